//! Source location tracking

use std::fmt;
use std::fs;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Source position (line, column, and byte offset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, in bytes)
    pub column: usize,
    /// Byte offset from start of file
    pub offset: usize,
}

impl Position {
    /// Create a new position with offset
    #[inline]
    pub fn with_offset(
        line: usize,
        column: usize,
        offset: usize,
    ) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Locate a byte offset inside `text` without a prebuilt line table.
    ///
    /// Used on error paths where building a [`SourceDocument`] is not worth it.
    pub fn locate(
        text: &str,
        offset: usize,
    ) -> Self {
        let offset = offset.min(text.len());
        let before = &text.as_bytes()[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        Self::with_offset(line, offset - line_start + 1, offset)
    }
}

impl fmt::Display for Position {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open byte range `[start, end)` within a source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    #[inline]
    pub fn new(
        start: usize,
        end: usize,
    ) -> Self {
        debug_assert!(start <= end, "span start {} after end {}", start, end);
        Self { start, end }
    }

    /// Get the source text length
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if span is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check whether `offset` lies inside the span
    #[inline]
    pub fn contains(
        &self,
        offset: usize,
    ) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Check whether two spans share at least one byte
    #[inline]
    pub fn overlaps(
        &self,
        other: &Span,
    ) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The smallest span covering both `self` and `other`
    #[inline]
    pub fn merge(
        &self,
        other: &Span,
    ) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Byte range for slicing
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Foreign source text together with the file it came from.
///
/// The content is never mutated; translation produces a new string.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// File path (may be synthetic for in-memory text)
    path: PathBuf,
    /// File content
    content: String,
    /// Line offsets for fast line lookup
    line_offsets: Vec<usize>,
}

impl SourceDocument {
    /// Create a new source document
    pub fn new(
        path: impl Into<PathBuf>,
        content: String,
    ) -> Self {
        let mut line_offsets = vec![0];
        line_offsets.extend(
            content
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );

        Self {
            path: path.into(),
            content,
            line_offsets,
        }
    }

    /// Read a document from disk
    pub fn read(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let content = fs::read_to_string(&path)?;
        Ok(Self::new(path, content))
    }

    /// Path the document was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// Get position from byte offset
    pub fn position(
        &self,
        offset: usize,
    ) -> Position {
        let offset = offset.min(self.content.len());
        let line = self.line_offsets.partition_point(|&o| o <= offset);
        let column = offset - self.line_offsets[line - 1];
        Position::with_offset(line, column + 1, offset)
    }

    /// Get source text for a span
    pub fn text(
        &self,
        span: Span,
    ) -> Option<&str> {
        self.content.get(span.range())
    }
}

impl fmt::Display for SourceDocument {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
