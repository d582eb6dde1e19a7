//! Scanner output types

use std::fmt;

use crate::util::span::{Position, Span};

/// Scanning error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("Unterminated {style} literal starting at {position}")]
    UnterminatedLiteral { style: QuoteStyle, position: Position },
    #[error("Unterminated block comment starting at {position}")]
    UnterminatedComment { position: Position },
}

impl ScanError {
    /// Where the offending construct starts
    pub fn position(&self) -> Position {
        match self {
            ScanError::UnterminatedLiteral { position, .. }
            | ScanError::UnterminatedComment { position } => *position,
        }
    }
}

/// Literal delimiter style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// `"..."` string literal
    Double,
    /// `'...'` character literal
    Single,
    /// `"""..."""` host block literal
    Triple,
}

impl QuoteStyle {
    /// Opening (and closing) delimiter
    pub fn delimiter(self) -> &'static str {
        match self {
            QuoteStyle::Double => "\"",
            QuoteStyle::Single => "'",
            QuoteStyle::Triple => "\"\"\"",
        }
    }
}

impl fmt::Display for QuoteStyle {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            QuoteStyle::Double => write!(f, "string"),
            QuoteStyle::Single => write!(f, "character"),
            QuoteStyle::Triple => write!(f, "block string"),
        }
    }
}

/// Run kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    /// Code, including any comments inside it
    Code,
    /// Quoted literal, delimiters included
    Literal(QuoteStyle),
    /// `#` line: a preprocessor directive or an already-translated host comment
    Directive,
}

/// A maximal run of one kind; runs tile the whole document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub kind: RunKind,
    pub span: Span,
}

impl Run {
    /// Slice of `text` covered by this run
    pub fn text<'a>(
        &self,
        text: &'a str,
    ) -> &'a str {
        &text[self.span.range()]
    }

    /// Whether this run is a quoted literal
    pub fn is_literal(&self) -> bool {
        matches!(self.kind, RunKind::Literal(_))
    }
}

/// A quoted literal span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotedSpan {
    pub style: QuoteStyle,
    pub span: Span,
}

impl QuotedSpan {
    /// Literal contents without delimiters (escapes left as written)
    pub fn contents<'a>(
        &self,
        text: &'a str,
    ) -> &'a str {
        let width = self.style.delimiter().len();
        &text[self.span.start + width..self.span.end - width]
    }
}
