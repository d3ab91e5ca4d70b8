//! Source location tracking.
//!
//! [`Span`] is a byte range into the source text. [`Location`] pairs a span
//! with the 1-based line it starts on, which is what diagnostics report.
//! [`LineIndex`] converts byte offsets to line numbers.

use std::ops::Range;

/// A byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Create a union of two spans (encompassing both)
    pub fn union(&self, other: Span) -> Span {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}

/// Where a token or tree element came from in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    span: Span,
    line: usize,
}

impl Location {
    /// Create a location from a span and the 1-based line it starts on.
    pub fn new(span: Span, line: usize) -> Self {
        Self { span, line }
    }

    /// The byte span.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Extend this location to cover `other`, keeping the starting line.
    pub fn to(&self, other: Location) -> Location {
        Self {
            span: self.span.union(other.span),
            line: self.line.min(other.line),
        }
    }
}

/// Maps byte offsets to 1-based line numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset at which each line starts. Always begins with 0.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Build the index for `source`.
    pub fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(offset, _)| offset + 1))
            .collect();
        Self { line_starts }
    }

    /// The 1-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Build a [`Location`] for a span.
    pub fn locate(&self, span: Span) -> Location {
        Location::new(span, self.line_of(span.start()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_union() {
        let a = Span::new(3..5);
        let b = Span::new(10..12);
        let union = a.union(b);
        assert_eq!(union.start(), 3);
        assert_eq!(union.end(), 12);
        assert_eq!(union.len(), 9);
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("(a\n b\n\n c)");
        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_of(2), 1);
        assert_eq!(index.line_of(3), 2);
        assert_eq!(index.line_of(6), 3);
        assert_eq!(index.line_of(8), 4);
    }

    #[test]
    fn test_line_index_empty_source() {
        let index = LineIndex::new("");
        assert_eq!(index.line_of(0), 1);
    }
}
