//! Comment translator
//!
//! Rebuilds the text with every foreign comment replaced by a host comment.
//! Where a comment lands depends on the code around it:
//!
//! | code before | code after | placement                                      |
//! |-------------|------------|------------------------------------------------|
//! | no          | no         | in place, at the line's indentation            |
//! | no          | yes        | in place, code continues on the next line      |
//! | yes         | no         | kept at the end of the line when it fits       |
//! | yes         | yes        | removed, re-emitted after the statement line   |
//!
//! Comments on `#` directive lines are kept at the end of the line or moved
//! after it; the directive itself is never split. Comments are never moved
//! into or out of quoted literals.

use tracing::debug;

use crate::frontend::lexer::{self, run_at, Run, RunKind, ScanError};

use super::render;
use super::{collect_in, Comment, TranslateOptions};

/// Closing punctuation a removed comment may sit right before
const CLOSERS: &[u8] = b";,)]}";
/// Separator between code and a comment kept at the end of its line
const INLINE_GAP: &str = lexer::directive::KEPT_COMMENT_GAP;

/// Translate all comments of `text` to host syntax
pub fn translate(
    text: &str,
    options: &TranslateOptions,
) -> Result<String, ScanError> {
    CommentTranslator::new(*options).translate(text)
}

/// Stateless comment translator with fixed options
#[derive(Debug, Clone, Default)]
pub struct CommentTranslator {
    options: TranslateOptions,
}

impl CommentTranslator {
    pub fn new(options: TranslateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    /// Translate all comments of `text`.
    ///
    /// Fails on an unterminated literal or block comment; no partial output
    /// is produced.
    pub fn translate(
        &self,
        text: &str,
    ) -> Result<String, ScanError> {
        let runs = lexer::scan(text)?;
        let comments = collect_in(text, &runs, &self.options)?;
        if comments.is_empty() {
            return Ok(text.to_string());
        }

        debug!("Translating {} comment blocks", comments.len());
        let mut emitter = Emitter::new(text, &runs, self.options);
        for comment in comments {
            emitter.place(comment);
        }
        Ok(emitter.finish())
    }
}

/// Output builder; copies source text up to each comment and places it
struct Emitter<'a> {
    text: &'a str,
    runs: &'a [Run],
    options: TranslateOptions,
    out: String,
    /// Source offset copied so far
    cursor: usize,
    /// Comments removed from the current statement line
    pending: Vec<Comment>,
    pending_indent: &'a str,
}

impl<'a> Emitter<'a> {
    fn new(
        text: &'a str,
        runs: &'a [Run],
        options: TranslateOptions,
    ) -> Self {
        Self {
            text,
            runs,
            options,
            out: String::with_capacity(text.len()),
            cursor: 0,
            pending: Vec::new(),
            pending_indent: "",
        }
    }

    fn place(
        &mut self,
        comment: Comment,
    ) {
        let span = comment.span();
        self.copy_to(span.start);

        let indent = self.indent_at(span.start);
        let rest_blank = self.rest_of_line_blank(span.end);
        let code_before = comment.code_before();

        let stays_inline = !comment.docstring()
            && rest_blank
            && render::body_lines(&comment).len() == 1;
        // a `#` line cannot be split, so its comments only stay as trailing ones
        let in_directive = self.in_directive(span.start);
        if !self.pending.is_empty()
            || (code_before && (comment.code_after() || !stays_inline))
            || (in_directive && !code_before)
        {
            self.hoist(comment, indent, rest_blank);
            return;
        }

        if code_before {
            let kept = self.out.trim_end_matches([' ', '\t']).len();
            self.out.truncate(kept);
            self.out.push_str(INLINE_GAP);
            self.out.push_str(&render::render(&comment, ""));
            self.cursor = self.skip_blanks(span.end);
            return;
        }

        // standalone or leading: the output already holds the indentation
        self.out.push_str(&render::render(&comment, indent));
        self.cursor = self.skip_blanks(span.end);
        if !rest_blank {
            self.out.push('\n');
            self.out.push_str(indent);
        }
    }

    /// Remove a comment from its line and queue it for the line's end
    fn hoist(
        &mut self,
        comment: Comment,
        indent: &'a str,
        rest_blank: bool,
    ) {
        let end = comment.span().end;
        let next = self.text.as_bytes().get(end).copied();
        let next_blank = next.map_or(true, |b| b.is_ascii_whitespace());
        let next_closer = next.is_some_and(|b| CLOSERS.contains(&b));
        let out_blank = self.out.ends_with([' ', '\t']);

        if out_blank && (next_blank || next_closer) {
            let kept = self.out.trim_end_matches([' ', '\t']).len();
            self.out.truncate(kept);
        } else if !out_blank && !next_blank && !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push(' ');
        }

        if self.pending.is_empty() {
            self.pending_indent = indent;
        }
        self.pending.push(comment);
        self.cursor = if rest_blank { self.skip_blanks(end) } else { end };
    }

    /// Copy source text up to `end`, flushing pending comments at each
    /// newline that ends a statement line
    fn copy_to(
        &mut self,
        end: usize,
    ) {
        let text = self.text;
        while self.cursor < end {
            let chunk = &text[self.cursor..end];
            match chunk.find('\n') {
                Some(idx) => {
                    let newline = self.cursor + idx;
                    self.out.push_str(&text[self.cursor..=newline]);
                    self.cursor = newline + 1;
                    if !self.pending.is_empty() && self.in_code(newline) {
                        self.flush();
                        self.out.push('\n');
                    }
                }
                None => {
                    self.out.push_str(chunk);
                    self.cursor = end;
                }
            }
        }
    }

    /// Emit the pending comments at the pending indentation (no trailing newline)
    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        let indent = self.pending_indent;
        self.out.push_str(indent);

        if self.options.coalesce {
            let lines: Vec<String> = pending.iter().flat_map(render::body_lines).collect();
            let first = &pending[0];
            self.out.push_str(&render::render_lines(
                &lines,
                first.docstring(),
                first.preserve_whitespace(),
                indent,
            ));
            return;
        }

        for (idx, comment) in pending.iter().enumerate() {
            if idx > 0 {
                self.out.push('\n');
                self.out.push_str(indent);
            }
            self.out.push_str(&render::render(comment, indent));
        }
    }

    fn finish(mut self) -> String {
        self.copy_to(self.text.len());
        if !self.pending.is_empty() {
            if !self.out.ends_with('\n') {
                self.out.push('\n');
            }
            self.flush();
        }
        self.out
    }

    fn in_code(
        &self,
        offset: usize,
    ) -> bool {
        run_at(self.runs, offset).map_or(true, |run| run.kind == RunKind::Code)
    }

    fn in_directive(
        &self,
        offset: usize,
    ) -> bool {
        run_at(self.runs, offset).is_some_and(|run| run.kind == RunKind::Directive)
    }

    /// Leading blanks of the line containing `offset`
    fn indent_at(
        &self,
        offset: usize,
    ) -> &'a str {
        let text = self.text;
        let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
        let line = &text[line_start..];
        let width = line.len() - line.trim_start_matches([' ', '\t']).len();
        &line[..width]
    }

    fn skip_blanks(
        &self,
        from: usize,
    ) -> usize {
        let rest = &self.text[from..];
        from + (rest.len() - rest.trim_start_matches([' ', '\t']).len())
    }

    /// Only blanks remain between `from` and the end of its line
    fn rest_of_line_blank(
        &self,
        from: usize,
    ) -> bool {
        let after = self.skip_blanks(from);
        matches!(self.text.as_bytes().get(after), None | Some(b'\n' | b'\r'))
    }
}
