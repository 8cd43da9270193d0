//! Source location tracking for expression text
//!
//! Offsets are byte offsets into the original source; line and column are
//! 1-based and only used for diagnostics.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number in characters (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The first position of any source (offset 0, line 1, column 1)
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Advance position past one character
    pub fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self::new(self.offset + 1, self.line + 1, 1)
        } else {
            Self::new(self.offset + ch.len_utf8(), self.line, self.column + 1)
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Create a span from byte offsets only (line and column unknown)
    pub fn from_offsets(start: usize, end: usize) -> Self {
        Self {
            start: Position::new(start, 0, 0),
            end: Position::new(end, 0, 0),
        }
    }

    /// Placeholder span for synthesized tokens
    pub fn dummy() -> Self {
        Self {
            start: Position::start(),
            end: Position::start(),
        }
    }

    /// Smallest span covering both
    pub fn merge(self, other: Self) -> Self {
        let start = if self.start.offset <= other.start.offset {
            self.start
        } else {
            other.start
        };
        let end = if self.end.offset >= other.end.offset {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// Byte length
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Source text covered by this span
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        input
            .get(self.start.offset..self.end.offset)
            .unwrap_or_default()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start.offset, self.end.offset)
    }
}

/// Line index over a source string for offset to line/column lookup
#[derive(Debug, Clone)]
pub struct SourceMap {
    pub source: String,
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut line_starts = vec![0];
        for (offset, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Line and column for a byte offset
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };

        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..offset)
            .map(|s| s.chars().count())
            .unwrap_or(0);

        Position::new(offset, (line + 1) as u32, (column + 1) as u32)
    }

    /// Line and column for `offset`, walking forward from an already resolved
    /// position. Falls back to a line-table lookup when `offset` lies behind
    /// `from` or off a character boundary.
    pub fn position_from(&self, from: Position, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        match self.source.get(from.offset..offset) {
            Some(skipped) if from.line > 0 => skipped.chars().fold(from, Position::advance),
            _ => self.position_at(offset),
        }
    }

    /// Span with resolved line/column for a byte range
    pub fn span_for(&self, start: usize, end: usize) -> Span {
        Span::new(self.position_at(start), self.position_at(end))
    }

    /// A line of text by line number (1-based)
    pub fn get_line(&self, line_num: u32) -> Option<&str> {
        if line_num == 0 {
            return None;
        }

        let line_idx = (line_num - 1) as usize;
        let start = *self.line_starts.get(line_idx)?;
        let end = match self.line_starts.get(line_idx + 1) {
            Some(next) => next - 1,
            None => self.source.len(),
        };

        self.source.get(start..end)
    }

    /// Format an error message with the offending line and a caret underline
    pub fn format_error(&self, span: &Span, message: &str) -> String {
        // Spans built from bare offsets carry no line information
        let span = if span.start.line == 0 {
            self.span_for(span.start.offset, span.end.offset)
        } else {
            *span
        };

        let mut result = String::new();
        result.push_str(&format!("Error: {}\n", message));
        result.push_str(&format!("  --> {}:{}\n", span.start.line, span.start.column));

        if let Some(line) = self.get_line(span.start.line) {
            let line_num_str = span.start.line.to_string();
            let padding = " ".repeat(line_num_str.len());

            result.push_str(&format!("{} |\n", padding));
            result.push_str(&format!("{} | {}\n", line_num_str, line));

            let caret_count = if span.start.line == span.end.line {
                span.end.column.saturating_sub(span.start.column) as usize
            } else {
                line.chars().count() + 1 - span.start.column as usize
            };

            result.push_str(&format!(
                "{} | {}{}\n",
                padding,
                " ".repeat((span.start.column - 1) as usize),
                "^".repeat(caret_count.max(1))
            ));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_advance() {
        let pos = Position::start().advance('a').advance('é');
        assert_eq!(pos.offset, 3);
        assert_eq!(pos.column, 3);

        let next_line = pos.advance('\n');
        assert_eq!(next_line.line, 2);
        assert_eq!(next_line.column, 1);
    }

    #[test]
    fn test_span_merge_and_slice() {
        let a = Span::from_offsets(0, 1);
        let b = Span::from_offsets(4, 5);
        let merged = a.merge(b);

        assert_eq!(merged.len(), 5);
        assert_eq!(merged.slice("1 + 2"), "1 + 2");
        assert!(Span::dummy().is_empty());
    }

    #[test]
    fn test_source_map_positions() {
        let map = SourceMap::new("a &&\n  b");
        let pos = map.position_at(7);
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 3);
        assert_eq!(map.get_line(1), Some("a &&"));
        assert_eq!(map.get_line(2), Some("  b"));
        assert_eq!(map.get_line(3), None);
    }

    #[test]
    fn test_position_from_agrees_with_lookup() {
        let source = "a &&\n  é || [x y]\nc";
        let map = SourceMap::new(source);

        let mut cursor = Position::start();
        for (offset, _) in source.char_indices() {
            cursor = map.position_from(cursor, offset);
            assert_eq!(cursor, map.position_at(offset));
        }

        // Behind the cursor: resolved from the line table
        assert_eq!(map.position_from(cursor, 1), map.position_at(1));
        assert_eq!(map.position_from(Position::default(), 6), map.position_at(6));
    }

    #[test]
    fn test_format_error_underlines_span() {
        let map = SourceMap::new("1 @ 2");
        let rendered = map.format_error(&Span::from_offsets(2, 3), "Invalid token: '@'");

        assert!(rendered.starts_with("Error: Invalid token: '@'"));
        assert!(rendered.contains("--> 1:3"));
        assert!(rendered.contains("1 | 1 @ 2"));
        assert!(rendered.ends_with("  |   ^\n"));
    }
}
