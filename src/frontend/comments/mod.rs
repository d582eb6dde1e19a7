//! Comment translation
//!
//! Turns foreign `//` and `/* */` comments into host `#` comments (or `"""`
//! docstring blocks), leaving every quoted literal untouched.
//!
//! The work is split in three passes:
//! - [`collector`] finds comments and records where they sit relative to code
//! - [`render`] turns comment bodies into host comment lines
//! - [`translator`] rebuilds the text, moving comments that share a line with
//!   code out of the way of that code

pub mod collector;
pub mod render;
pub mod translator;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::util::span::{Position, Span};

pub use crate::frontend::lexer::CommentKind;
pub use collector::{collect, collect_in};
pub use translator::{translate, CommentTranslator};

/// Translation flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateOptions {
    /// Render comments as `"""` blocks instead of `#` lines
    pub docstring: bool,
    /// Keep comment bodies verbatim instead of trimming each line
    pub preserve_whitespace: bool,
    /// Merge adjacent comments (and hoisted comments of one statement) into one block
    pub coalesce: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            docstring: false,
            preserve_whitespace: false,
            coalesce: true,
        }
    }
}

/// One foreign comment and its surroundings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentSpan {
    /// Whole comment, markers included
    pub span: Span,
    /// Where the comment starts
    pub position: Position,
    /// Comment text with the markers stripped
    pub body: String,
    pub docstring: bool,
    pub preserve_whitespace: bool,
    /// Comment starts the text or follows a whitespace byte
    pub pre_whitespace: bool,
    /// Comment ends the text or precedes a whitespace byte
    pub post_whitespace: bool,
    /// Code precedes the comment on its first line
    pub code_before: bool,
    /// Code follows the comment on its last line
    pub code_after: bool,
    /// A blank line separates this comment from the previous one
    pub paragraph_break: bool,
}

/// Adjacent comments merged into one block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentGroup {
    /// From the first member's start to the last member's end
    pub span: Span,
    pub members: Vec<Comment>,
}

/// A collected comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Comment {
    SingleLine(CommentSpan),
    MultiLine(CommentSpan),
    Group(CommentGroup),
}

impl Comment {
    pub(crate) fn new(
        kind: CommentKind,
        span: CommentSpan,
    ) -> Self {
        match kind {
            CommentKind::SingleLine => Comment::SingleLine(span),
            CommentKind::MultiLine => Comment::MultiLine(span),
        }
    }

    /// Byte range covered by the comment (or group)
    pub fn span(&self) -> Span {
        match self {
            Comment::SingleLine(c) | Comment::MultiLine(c) => c.span,
            Comment::Group(g) => g.span,
        }
    }

    /// Kind of a plain comment, `None` for groups
    pub fn kind(&self) -> Option<CommentKind> {
        match self {
            Comment::SingleLine(_) => Some(CommentKind::SingleLine),
            Comment::MultiLine(_) => Some(CommentKind::MultiLine),
            Comment::Group(_) => None,
        }
    }

    /// First underlying comment
    pub fn first(&self) -> &CommentSpan {
        match self {
            Comment::SingleLine(c) | Comment::MultiLine(c) => c,
            Comment::Group(g) => g.members[0].first(),
        }
    }

    /// Last underlying comment
    pub fn last(&self) -> &CommentSpan {
        match self {
            Comment::SingleLine(c) | Comment::MultiLine(c) => c,
            Comment::Group(g) => g.members[g.members.len() - 1].last(),
        }
    }

    pub fn code_before(&self) -> bool {
        self.first().code_before
    }

    pub fn code_after(&self) -> bool {
        self.last().code_after
    }

    pub fn docstring(&self) -> bool {
        self.first().docstring
    }

    pub fn preserve_whitespace(&self) -> bool {
        self.first().preserve_whitespace
    }

    /// Underlying comments in source order
    pub fn members(&self) -> Vec<(CommentKind, &CommentSpan)> {
        match self {
            Comment::SingleLine(c) => vec![(CommentKind::SingleLine, c)],
            Comment::MultiLine(c) => vec![(CommentKind::MultiLine, c)],
            Comment::Group(g) => g.members.iter().flat_map(Comment::members).collect(),
        }
    }
}
