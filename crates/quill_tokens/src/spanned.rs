//! Positions and spans within a [SourceFile], and the [Spanned] trait for anything that covers one

use crate::source::SourceFile;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A trait that can provide the [Span] of the complete context of an item
pub trait Spanned {
    fn span(&self) -> Span;
}

/// A single position within a source file.
///
/// Lines and columns are 1-based, the index is the 0-based char offset from the start of the
/// source.
#[derive(Clone)]
pub struct Position {
    index: usize,
    line: usize,
    col: usize,
    source: Arc<SourceFile>,
}

impl Position {
    /// Creates a position at the very start of a source
    pub fn start(source: Arc<SourceFile>) -> Self {
        Self {
            index: 0,
            line: 1,
            col: 1,
            source,
        }
    }

    /// Moves this position past `current`.
    pub fn advance(&mut self, current: char) {
        self.index += 1;
        if current == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.col
    }

    /// The source this position is in
    #[inline]
    pub fn source(&self) -> &Arc<SourceFile> {
        &self.source
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.line == other.line
            && self.col == other.col
            && (Arc::ptr_eq(&self.source, &other.source) || self.source == other.source)
    }
}

impl Eq for Position {}

impl Debug for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.source.name(), self.line, self.col)
    }
}

/// The span between two positions of the same source
#[derive(Clone, PartialEq, Eq)]
pub struct Span {
    start: Position,
    end: Position,
}

impl Span {
    /// Creates a new span. `end` is exclusive.
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start.index <= end.index, "span must not end before it starts");
        Self { start, end }
    }

    /// Creates an empty span at a position
    pub fn at(position: Position) -> Self {
        Self {
            end: position.clone(),
            start: position,
        }
    }

    #[inline]
    pub fn start(&self) -> &Position {
        &self.start
    }

    #[inline]
    pub fn end(&self) -> &Position {
        &self.end
    }

    /// The number of chars covered by this span
    pub fn len(&self) -> usize {
        self.end.index - self.start.index
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates a span that encompasses both
    pub fn join(&self, other: &Self) -> Option<Self> {
        if !Arc::ptr_eq(&self.start.source, &other.start.source)
            && self.start.source != other.start.source
        {
            return None;
        }
        let start = if self.start.index <= other.start.index {
            &self.start
        } else {
            &other.start
        };
        let end = if self.end.index >= other.end.index {
            &self.end
        } else {
            &other.end
        };
        Some(Self::new(start.clone(), end.clone()))
    }
}

impl Spanned for Span {
    fn span(&self) -> Span {
        self.clone()
    }
}

impl Debug for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?}..{}:{}",
            self.start, self.end.line, self.end.col
        )
    }
}

/// A line reader struct that's responsible for getting lines from a span
#[derive(Debug, Default)]
pub struct LineReader {
    before: usize,
    after: usize,
}

impl LineReader {
    /// Creates a new line reader that gets `before` number of lines before a span and `after` number
    /// of lines after.
    pub fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }

    /// Gets the lines for a given span, plus the base line index
    pub fn lines(&self, span: &Span) -> (Vec<Line>, usize) {
        let base_line = span.start.line;
        let first = base_line.saturating_sub(self.before).max(1);
        let last = base_line.saturating_add(self.after);
        let lines = span
            .start
            .source
            .text()
            .lines()
            .enumerate()
            .map(|(idx, src)| (idx + 1, src))
            .skip_while(|(line, _)| *line < first)
            .take_while(|(line, _)| *line <= last)
            .map(|(line, src)| Line {
                line,
                src: src.to_string(),
            })
            .collect();
        (lines, base_line)
    }
}

#[derive(Debug)]
pub struct Line {
    pub line: usize,
    pub src: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advanced(source: &Arc<SourceFile>, by: &str) -> Position {
        let mut position = Position::start(source.clone());
        for c in by.chars() {
            position.advance(c);
        }
        position
    }

    #[test]
    fn test_position_advance() {
        let source = SourceFile::new("test", "ab\ncd");
        let position = advanced(&source, "ab\nc");
        assert_eq!(position.index(), 4);
        assert_eq!(position.line(), 2);
        assert_eq!(position.column(), 2);
    }

    #[test]
    fn test_span_is_spanned() {
        let source = SourceFile::new("test", "abc");
        let span = Span::new(advanced(&source, ""), advanced(&source, "ab"));
        assert_eq!(span.span(), span);
        assert_eq!(span.len(), 2);
    }

    #[test]
    fn test_join() {
        let source = SourceFile::new("test", "0123456789");
        let p1 = Span::new(advanced(&source, ""), advanced(&source, "01"));
        let p2 = Span::new(advanced(&source, "01234"), advanced(&source, "012345"));
        let joined = p1.join(&p2).unwrap();
        assert_eq!(joined.start().index(), 0);
        assert_eq!(joined.end().index(), 6);
    }

    #[test]
    fn test_join_different_sources() {
        let a = SourceFile::new("a", "x");
        let b = SourceFile::new("b", "y");
        assert!(Span::at(Position::start(a))
            .join(&Span::at(Position::start(b)))
            .is_none());
    }

    #[test]
    fn test_line_reader() {
        let source = SourceFile::new("test", "one\ntwo\nthree\nfour");
        let span = Span::at(advanced(&source, "one\ntwo\nth"));
        let (lines, base) = LineReader::new(1, 1).lines(&span);
        assert_eq!(base, 3);
        assert_eq!(
            lines.iter().map(|l| l.src.as_str()).collect::<Vec<_>>(),
            vec!["two", "three", "four"]
        );
    }
}
