//! `#` line extents
//!
//! A `#` line written in the foreign language (`#define`, `#include`, ...)
//! may carry comments, and a block comment opened on it may run onto the
//! following lines. Host comment lines (`# text`) and a host comment kept
//! after code (`code  # text`) are opaque up to the end of the logical line.

use super::markers::{self, CommentExtent};
use super::tokens::ScanError;

/// Blanks between code and a host comment kept at the end of its line
pub const KEPT_COMMENT_GAP: &str = "  ";

/// Extent of one `#` line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveLine {
    /// Offset of the newline ending the line (or the text length)
    pub end: usize,
    /// Foreign comments on the line, in order
    pub comments: Vec<CommentExtent>,
}

/// Whether the `#` at `start` opens a foreign directive line.
///
/// The `#` must start its line (after blanks) and be followed directly by a
/// directive name; `# define` with a space reads as a host comment.
pub fn is_foreign(
    text: &str,
    start: usize,
) -> bool {
    let bytes = text.as_bytes();
    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    bytes[line_start..start].iter().all(|&b| b == b' ' || b == b'\t')
        && bytes
            .get(start + 1)
            .is_some_and(|&b| b.is_ascii_alphabetic() || b == b'_')
}

/// Walk the `#` line starting at `start`
pub fn walk(
    text: &str,
    start: usize,
) -> Result<DirectiveLine, ScanError> {
    let bytes = text.as_bytes();
    if !is_foreign(text, start) {
        return Ok(DirectiveLine {
            end: markers::logical_line_end(bytes, start),
            comments: Vec::new(),
        });
    }

    let mut line = DirectiveLine::default();
    let mut line_start = start;
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\n' => {
                if !markers::is_continued(bytes, line_start, pos) {
                    line.end = pos;
                    return Ok(line);
                }
                line_start = pos + 1;
                pos += 1;
            }
            quote @ (b'"' | b'\'') => {
                pos = literal_end(bytes, pos, quote).unwrap_or(pos + 1);
            }
            b'/' => match markers::comment_at(text, pos)? {
                Some(comment) => {
                    let end = comment.span.end;
                    if let Some(newline) = text[pos..end].rfind('\n') {
                        line_start = pos + newline + 1;
                    }
                    line.comments.push(comment);
                    pos = end;
                }
                None => pos += 1,
            },
            b'#' if text[..pos].ends_with(KEPT_COMMENT_GAP) => {
                line.end = markers::logical_line_end(bytes, pos);
                return Ok(line);
            }
            _ => pos += 1,
        }
    }

    line.end = bytes.len();
    Ok(line)
}

/// End of a quoted literal opened at `open`, if it closes on its physical line.
///
/// An unmatched quote (`#error don't`) is plain text.
fn literal_end(
    bytes: &[u8],
    open: usize,
    quote: u8,
) -> Option<usize> {
    let mut pos = open + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'\n' => return None,
            b if b == quote => return Some(pos + 1),
            _ => pos += 1,
        }
    }
    None
}
