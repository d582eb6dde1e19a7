//! Foreign comment grammar
//!
//! Shared by the scanner (to step over comment bodies while looking for
//! literals) and by the comment collector (to extract them), so both
//! always agree on where a comment ends.

use crate::util::span::{Position, Span};

use super::tokens::ScanError;

/// Single-line comment marker
pub const LINE_MARKER: &str = "//";
/// Multi-line comment opening marker
pub const BLOCK_OPEN: &str = "/*";
/// Multi-line comment closing marker
pub const BLOCK_CLOSE: &str = "*/";

/// Comment form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    /// `// ...` up to the end of the logical line
    SingleLine,
    /// `/* ... */`
    MultiLine,
}

/// Location of one comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentExtent {
    pub kind: CommentKind,
    /// Whole comment, markers included
    pub span: Span,
    /// Body, markers stripped
    pub body: Span,
}

/// Recognise a comment starting exactly at `start`.
///
/// Returns `Ok(None)` when no comment marker is at `start`.
pub fn comment_at(
    text: &str,
    start: usize,
) -> Result<Option<CommentExtent>, ScanError> {
    let rest = &text.as_bytes()[start.min(text.len())..];
    if rest.starts_with(LINE_MARKER.as_bytes()) {
        let body_start = start + LINE_MARKER.len();
        let end = logical_line_end(text.as_bytes(), body_start);
        return Ok(Some(CommentExtent {
            kind: CommentKind::SingleLine,
            span: Span::new(start, end),
            body: Span::new(body_start, end),
        }));
    }

    if rest.starts_with(BLOCK_OPEN.as_bytes()) {
        let body_start = start + BLOCK_OPEN.len();
        // non-greedy: the first terminator closes the comment
        let body_end = text[body_start..]
            .find(BLOCK_CLOSE)
            .map(|i| body_start + i)
            .ok_or_else(|| ScanError::UnterminatedComment {
                position: Position::locate(text, start),
            })?;
        return Ok(Some(CommentExtent {
            kind: CommentKind::MultiLine,
            span: Span::new(start, body_end + BLOCK_CLOSE.len()),
            body: Span::new(body_start, body_end),
        }));
    }

    Ok(None)
}

/// Offset of the newline ending the logical line that contains `from`
/// (or the text length when the line is the last one).
///
/// A backslash at the end of a physical line, optionally followed by spaces,
/// tabs or a carriage return, continues the logical line onto the next one.
pub fn logical_line_end(
    bytes: &[u8],
    from: usize,
) -> usize {
    let mut line_start = from;
    loop {
        let newline = match bytes[line_start.min(bytes.len())..]
            .iter()
            .position(|&b| b == b'\n')
        {
            Some(i) => line_start + i,
            None => return bytes.len(),
        };
        if !is_continued(bytes, line_start, newline) {
            return newline;
        }
        line_start = newline + 1;
    }
}

/// Whether the physical line `[line_start, newline)` ends in a continuation backslash
pub fn is_continued(
    bytes: &[u8],
    line_start: usize,
    newline: usize,
) -> bool {
    let mut end = newline;
    while end > line_start && matches!(bytes[end - 1], b' ' | b'\t' | b'\r') {
        end -= 1;
    }
    end > line_start && bytes[end - 1] == b'\\'
}
