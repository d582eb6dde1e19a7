//! Comment collection
//!
//! Walks the code runs of a scanned text, extracts every comment and records
//! its surroundings. Other comments never count as code: `/* a */ /* b */`
//! on an otherwise empty line leaves both comments standalone.

use std::ops::Range;

use tracing::debug;

use crate::frontend::lexer::{self, CommentExtent, Run, ScanError};
use crate::util::span::{Position, Span};

use super::{Comment, CommentGroup, CommentSpan, TranslateOptions};

/// Collect the comments of `text` in source order
pub fn collect(
    text: &str,
    options: &TranslateOptions,
) -> Result<Vec<Comment>, ScanError> {
    let runs = lexer::scan(text)?;
    collect_in(text, &runs, options)
}

/// Collect comments from already-scanned runs of `text`
pub fn collect_in(
    text: &str,
    runs: &[Run],
    options: &TranslateOptions,
) -> Result<Vec<Comment>, ScanError> {
    let extents = lexer::comments(text, runs)?;
    let mut positions = LineCounter::default();
    let comments: Vec<Comment> = extents
        .iter()
        .enumerate()
        .map(|(idx, extent)| {
            let position = positions.advance(text, extent.span.start);
            Comment::new(extent.kind, describe(text, &extents, idx, position, options))
        })
        .collect();

    debug!("Collected {} comments", comments.len());
    if !options.coalesce {
        return Ok(comments);
    }
    Ok(group(text, comments))
}

fn describe(
    text: &str,
    extents: &[CommentExtent],
    idx: usize,
    position: Position,
    options: &TranslateOptions,
) -> CommentSpan {
    let extent = &extents[idx];
    let bytes = text.as_bytes();
    let Span { start, end } = extent.span;

    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[end..].find('\n').map_or(text.len(), |i| end + i);

    let paragraph_break = idx > 0 && {
        let gap = &text[extents[idx - 1].span.end..start];
        gap.trim().is_empty() && gap.matches('\n').count() >= 2
    };

    CommentSpan {
        span: extent.span,
        position,
        body: text[extent.body.range()].to_string(),
        docstring: options.docstring,
        preserve_whitespace: options.preserve_whitespace,
        pre_whitespace: start == 0 || bytes[start - 1].is_ascii_whitespace(),
        post_whitespace: end == text.len() || bytes[end].is_ascii_whitespace(),
        code_before: has_code(text, line_start..start, extents),
        code_after: has_code(text, end..line_end, extents),
        paragraph_break,
    }
}

/// Whether `range` holds anything besides whitespace and comments
fn has_code(
    text: &str,
    range: Range<usize>,
    extents: &[CommentExtent],
) -> bool {
    let bytes = text.as_bytes();
    let mut pos = range.start;
    let mut idx = extents.partition_point(|e| e.span.end <= pos);
    while pos < range.end {
        if let Some(extent) = extents.get(idx) {
            if extent.span.start <= pos {
                pos = extent.span.end;
                idx += 1;
                continue;
            }
        }
        let stop = extents
            .get(idx)
            .map_or(range.end, |e| e.span.start.min(range.end));
        if bytes[pos..stop].iter().any(|b| !b.is_ascii_whitespace()) {
            return true;
        }
        pos = stop;
    }
    false
}

/// Merge comments separated only by whitespace.
///
/// A comment that follows code on its line only absorbs comments on the
/// same line; the next line starts a new block.
fn group(
    text: &str,
    comments: Vec<Comment>,
) -> Vec<Comment> {
    let mut blocks: Vec<Vec<Comment>> = Vec::new();
    for comment in comments {
        let joins = blocks.last().is_some_and(|block| {
            let gap = &text[block[block.len() - 1].span().end..comment.span().start];
            gap.trim().is_empty() && !(gap.contains('\n') && block[0].code_before())
        });
        match blocks.last_mut() {
            Some(block) if joins => block.push(comment),
            _ => blocks.push(vec![comment]),
        }
    }

    blocks
        .into_iter()
        .filter_map(|mut block| {
            if block.len() == 1 {
                return block.pop();
            }
            let span = block[0].span().merge(&block[block.len() - 1].span());
            Some(Comment::Group(CommentGroup {
                span,
                members: block,
            }))
        })
        .collect()
}

/// Incremental line/column tracking over increasing offsets
#[derive(Default)]
struct LineCounter {
    offset: usize,
    line: usize,
    line_start: usize,
}

impl LineCounter {
    fn advance(
        &mut self,
        text: &str,
        offset: usize,
    ) -> Position {
        if self.line == 0 {
            self.line = 1;
        }
        for (i, b) in text.as_bytes()[self.offset..offset].iter().enumerate() {
            if *b == b'\n' {
                self.line += 1;
                self.line_start = self.offset + i + 1;
            }
        }
        self.offset = offset;
        Position::with_offset(self.line, offset - self.line_start + 1, offset)
    }
}
