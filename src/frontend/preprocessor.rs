//! 预处理指令提取
//!
//! Captures `#name body` lines from foreign source. Directives are recorded
//! as written; nothing is expanded and no conditional is evaluated.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::frontend::lexer::{self, directive, CommentExtent, RunKind, ScanError};
use crate::util::span::Span;

/// A captured preprocessor line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    /// Identifier after `#`, e.g. `define`
    pub name: String,
    /// Rest of the logical line, continuations joined, comments removed
    pub body: String,
    /// 1-indexed line of the `#`
    pub line: usize,
    /// The whole logical line, continuations included
    pub span: Span,
}

impl fmt::Display for Directive {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.body.is_empty() {
            write!(f, "#{}", self.name)
        } else {
            write!(f, "#{} {}", self.name, self.body)
        }
    }
}

/// Directives of a text and the text left once they are removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub directives: Vec<Directive>,
    pub remaining: String,
}

/// Split `text` into its directive lines and everything else.
///
/// Only `#` lines that start a line (after optional blanks) and carry a
/// directive name are captured. `#` inside literals or comments is never seen
/// because the scanner keeps those out of directive runs.
pub fn extract(text: &str) -> Result<Extracted, ScanError> {
    let runs = lexer::scan(text)?;
    let mut extracted = Extracted {
        directives: Vec::new(),
        remaining: String::with_capacity(text.len()),
    };

    let mut cursor = 0;
    let mut line = 1;
    let mut counted = 0;
    for run in runs.iter().filter(|run| run.kind == RunKind::Directive) {
        let start = run.span.start;
        let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
        if !text[line_start..start].trim_matches([' ', '\t']).is_empty() {
            continue;
        }
        let raw = without_comments(text, run.span, &directive::walk(text, start)?.comments);
        let Some((name, body)) = parse_directive(&raw) else {
            continue;
        };

        line += text[counted..start].matches('\n').count();
        counted = start;

        // the line goes away together with its newline
        let end = if text[run.span.end..].starts_with('\n') {
            run.span.end + 1
        } else {
            run.span.end
        };
        extracted.remaining.push_str(&text[cursor..line_start]);
        cursor = end;

        extracted.directives.push(Directive {
            name,
            body,
            line,
            span: run.span,
        });
    }
    extracted.remaining.push_str(&text[cursor..]);

    debug!("Extracted {} directives", extracted.directives.len());
    Ok(extracted)
}

/// Text of `span` with each comment replaced by a space
fn without_comments(
    text: &str,
    span: Span,
    comments: &[CommentExtent],
) -> String {
    let mut out = String::with_capacity(span.len());
    let mut cursor = span.start;
    for comment in comments {
        out.push_str(&text[cursor..comment.span.start]);
        out.push(' ');
        cursor = comment.span.end;
    }
    out.push_str(&text[cursor..span.end]);
    out
}

/// Name and body of a raw directive run, `None` for unnamed `#` lines
fn parse_directive(raw: &str) -> Option<(String, String)> {
    let rest = raw.strip_prefix('#')?.trim_start_matches([' ', '\t']);
    let mut chars = rest.char_indices();
    match chars.next() {
        Some((_, c)) if c == '_' || unicode_ident::is_xid_start(c) => {}
        _ => return None,
    }
    let name_len = chars
        .find(|&(_, c)| !unicode_ident::is_xid_continue(c))
        .map_or(rest.len(), |(i, _)| i);
    let (name, body) = rest.split_at(name_len);
    Some((name.to_string(), clean_body(body)))
}

/// Join continuation lines with single spaces and drop comments
fn clean_body(body: &str) -> String {
    let joined = body
        .split('\n')
        .map(|line| {
            let line = line.trim_matches([' ', '\t', '\r']);
            line.strip_suffix('\\').unwrap_or(line).trim_end()
        })
        .collect::<Vec<_>>()
        .join(" ");

    // a body that does not scan (e.g. `#error 'quote`) is kept as written
    let comments = lexer::scan(&joined).and_then(|runs| lexer::comments(&joined, &runs));
    let Ok(comments) = comments else {
        return joined.trim().to_string();
    };

    let mut out = String::with_capacity(joined.len());
    let mut cursor = 0;
    for comment in comments {
        out.push_str(&joined[cursor..comment.span.start]);
        out.push(' ');
        cursor = comment.span.end;
    }
    out.push_str(&joined[cursor..]);
    out.trim().to_string()
}
