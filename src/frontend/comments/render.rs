//! Host comment rendering

use super::{Comment, CommentKind, CommentSpan};

/// Host line comment marker
pub const HASH: &str = "#";
/// Host docstring delimiter
pub const DOCSTRING: &str = "\"\"\"";

/// Body lines of a comment, one per physical line of the original.
///
/// Groups separate members with an empty line where the source had a blank line.
pub fn body_lines(comment: &Comment) -> Vec<String> {
    let mut lines = Vec::new();
    for (idx, (kind, span)) in comment.members().into_iter().enumerate() {
        if idx > 0 && span.paragraph_break {
            lines.push(String::new());
        }
        lines.extend(span_lines(kind, span));
    }
    lines
}

fn span_lines(
    kind: CommentKind,
    span: &CommentSpan,
) -> Vec<String> {
    let physical: Vec<&str> = span.body.split('\n').collect();
    let last = physical.len() - 1;
    physical
        .into_iter()
        .enumerate()
        .map(|(idx, line)| {
            let mut line = line.strip_suffix('\r').unwrap_or(line);
            if kind == CommentKind::SingleLine && idx < last {
                let trimmed = line.trim_end_matches([' ', '\t', '\r']);
                line = trimmed.strip_suffix('\\').unwrap_or(trimmed);
            }
            if span.preserve_whitespace {
                return line.to_string();
            }
            let line = line.trim();
            match kind {
                CommentKind::MultiLine => line
                    .strip_prefix('*')
                    .map_or(line, str::trim_start)
                    .to_string(),
                CommentKind::SingleLine => line.to_string(),
            }
        })
        .collect()
}

/// Render body lines as a host comment block.
///
/// The first line is not indented; following lines get `indent`.
/// No trailing newline is emitted.
pub fn render_lines(
    lines: &[String],
    docstring: bool,
    preserve_whitespace: bool,
    indent: &str,
) -> String {
    let mut out = String::new();
    if docstring {
        out.push_str(DOCSTRING);
        for line in lines {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(indent);
                out.push_str(&line.replace(DOCSTRING, "\\\"\\\"\\\""));
            }
        }
        out.push('\n');
        out.push_str(indent);
        out.push_str(DOCSTRING);
        return out;
    }

    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
            out.push_str(indent);
        }
        out.push_str(HASH);
        if !line.is_empty() {
            if !preserve_whitespace {
                out.push(' ');
            }
            out.push_str(line);
        }
    }
    out
}

/// Render one comment (or group) in its own style
pub fn render(
    comment: &Comment,
    indent: &str,
) -> String {
    render_lines(
        &body_lines(comment),
        comment.docstring(),
        comment.preserve_whitespace(),
        indent,
    )
}
