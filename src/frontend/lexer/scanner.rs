//! Quote-aware span scanner
//! Splits source text into code, literal and directive runs in one O(n) pass

use super::directive;
use super::markers;
use super::tokens::{QuoteStyle, Run, RunKind, ScanError};
use crate::util::span::{Position, Span};

/// Character-literal prefixes (`L'x'`, `u8'x'`, ...)
const CHAR_PREFIXES: [&[u8]; 4] = [b"L", b"u", b"U", b"u8"];
/// Keywords that may be written right before a character literal (`return'a';`)
const CHAR_KEYWORDS: [&[u8]; 9] = [
    b"return",
    b"case",
    b"sizeof",
    b"else",
    b"do",
    b"throw",
    b"co_return",
    b"co_yield",
    b"alignof",
];

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Outside any literal
    InCode,
    /// Inside a literal opened at `start`
    InLiteral { style: QuoteStyle, start: usize },
}

/// Span scanner
///
/// All delimiters are ASCII, so walking bytes never splits a UTF-8 sequence
/// and every run boundary is a valid `str` index.
pub struct SpanScanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    run_start: usize,
    state: ScanState,
    runs: Vec<Run>,
}

impl<'a> SpanScanner<'a> {
    /// Create a new scanner for the given source
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            run_start: 0,
            state: ScanState::InCode,
            runs: Vec::new(),
        }
    }

    /// Scan the whole text
    pub fn scan(mut self) -> Result<Vec<Run>, ScanError> {
        while self.pos < self.bytes.len() {
            match self.state {
                ScanState::InCode => self.step_code()?,
                ScanState::InLiteral { style, start } => self.step_literal(style, start),
            }
        }

        if let ScanState::InLiteral { style, start } = self.state {
            return Err(ScanError::UnterminatedLiteral {
                style,
                position: Position::locate(self.text, start),
            });
        }

        self.close_code(self.bytes.len());
        Ok(self.runs)
    }

    fn step_code(&mut self) -> Result<(), ScanError> {
        let pos = self.pos;
        match self.bytes[pos] {
            b'"' => {
                let style = if self.bytes[pos..].starts_with(b"\"\"\"") {
                    QuoteStyle::Triple
                } else {
                    QuoteStyle::Double
                };
                self.open_literal(style);
            }
            b'\'' if self.opens_char_literal() => self.open_literal(QuoteStyle::Single),
            b'/' => match markers::comment_at(self.text, pos)? {
                // quotes inside a comment never open a literal
                Some(comment) => self.pos = comment.span.end,
                None => self.pos += 1,
            },
            b'#' => {
                let end = directive::walk(self.text, pos)?.end;
                self.close_code(pos);
                self.runs.push(Run {
                    kind: RunKind::Directive,
                    span: Span::new(pos, end),
                });
                self.run_start = end;
                self.pos = end;
            }
            _ => self.pos += 1,
        }
        Ok(())
    }

    fn step_literal(
        &mut self,
        style: QuoteStyle,
        start: usize,
    ) {
        let pos = self.pos;
        let delimiter = style.delimiter().as_bytes();
        if self.bytes[pos] == b'\\' {
            // escape consumes the next byte verbatim, quotes included
            self.pos = (pos + 2).min(self.bytes.len());
        } else if self.bytes[pos..].starts_with(delimiter) {
            let end = pos + delimiter.len();
            self.runs.push(Run {
                kind: RunKind::Literal(style),
                span: Span::new(start, end),
            });
            self.run_start = end;
            self.pos = end;
            self.state = ScanState::InCode;
        } else {
            self.pos += 1;
        }
    }

    fn open_literal(
        &mut self,
        style: QuoteStyle,
    ) {
        let start = self.pos;
        self.close_code(start);
        self.state = ScanState::InLiteral { style, start };
        self.pos = start + style.delimiter().len();
    }

    /// Push the pending code run `[run_start, end)` if it is non-empty
    fn close_code(
        &mut self,
        end: usize,
    ) {
        if end > self.run_start {
            self.runs.push(Run {
                kind: RunKind::Code,
                span: Span::new(self.run_start, end),
            });
        }
        self.run_start = end;
    }

    /// A `'` opens a character literal unless it follows an identifier or number
    /// (`1'000'000` digit separators), except for encoding prefixes and keywords.
    fn opens_char_literal(&self) -> bool {
        let pos = self.pos;
        let word_start = self.bytes[..pos]
            .iter()
            .rposition(|&b| !is_ident_byte(b))
            .map_or(0, |i| i + 1);
        let word = &self.bytes[word_start..pos];
        word.is_empty() || CHAR_PREFIXES.contains(&word) || CHAR_KEYWORDS.contains(&word)
    }
}

#[inline]
fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
