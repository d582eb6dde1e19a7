//! Lexer module - quote-aware span scanning
//!
//! Splits foreign source text into runs:
//! - code (comments stay inside code runs; see [`markers`])
//! - quoted literals (`"..."`, `'...'`, `"""..."""`)
//! - `#` lines (preprocessor directives, or host comments in translated text);
//!   comments on directive lines are found by [`directive`]

pub mod directive;
pub mod markers;
pub mod scanner;
pub mod tokens;

#[cfg(test)]
mod tests;

// Re-export types
pub use markers::{CommentExtent, CommentKind};
pub use scanner::SpanScanner;
pub use tokens::{QuoteStyle, QuotedSpan, Run, RunKind, ScanError};

/// Scan source text into runs
pub fn scan(text: &str) -> Result<Vec<Run>, ScanError> {
    tracing::debug!("Scanning {} bytes", text.len());
    let runs = SpanScanner::new(text).scan()?;
    tracing::debug!("Scanned {} runs", runs.len());
    Ok(runs)
}

/// The ordered, non-overlapping quoted literals of `text`
pub fn quoted_spans(text: &str) -> Result<Vec<QuotedSpan>, ScanError> {
    Ok(literals(&scan(text)?).collect())
}

/// Quoted literals among already-scanned runs
pub fn literals(runs: &[Run]) -> impl Iterator<Item = QuotedSpan> + '_ {
    runs.iter().filter_map(|run| match run.kind {
        RunKind::Literal(style) => Some(QuotedSpan {
            style,
            span: run.span,
        }),
        _ => None,
    })
}

/// The comments of `text` in order: those in code runs and those on
/// foreign `#` lines
pub fn comments(
    text: &str,
    runs: &[Run],
) -> Result<Vec<CommentExtent>, ScanError> {
    let mut found = Vec::new();
    for run in runs {
        match run.kind {
            RunKind::Code => {}
            RunKind::Directive => {
                found.extend(directive::walk(text, run.span.start)?.comments);
                continue;
            }
            RunKind::Literal(_) => continue,
        }
        let mut pos = run.span.start;
        while let Some(idx) = text[pos..run.span.end].find('/') {
            let at = pos + idx;
            match markers::comment_at(text, at)? {
                Some(extent) => {
                    pos = extent.span.end;
                    found.push(extent);
                }
                None => pos = at + 1,
            }
            if pos >= run.span.end {
                break;
            }
        }
    }
    Ok(found)
}

/// The run containing byte `offset`, if any
pub fn run_at(
    runs: &[Run],
    offset: usize,
) -> Option<&Run> {
    let idx = runs.partition_point(|run| run.span.end <= offset);
    runs.get(idx).filter(|run| run.span.contains(offset))
}
