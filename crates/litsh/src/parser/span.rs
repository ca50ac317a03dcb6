//! Source location tracking for error messages and warnings
//!
//! RUN: lines are normally a single line, but continuation handling in the
//! test runner can leave embedded newlines behind, so lines are still counted.

use serde::Serialize;

/// A position in the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    /// 1-based line number
    pub line: usize,
    /// 1-based column number (in characters)
    pub column: usize,
    /// 0-based byte offset from start of input
    pub offset: usize,
}

impl Position {
    /// Create a new position at line 1, column 1, offset 0.
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Advance position by one character.
    pub fn advance(&mut self, ch: char) {
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of input (start to end position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    /// Create a span from start to end positions.
    pub fn from_positions(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Byte range of the span, for slicing the original input.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start.offset..self.end.offset
    }

    /// The input text covered by this span.
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.range()).unwrap_or("")
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start.line != self.end.line {
            write!(f, "{}-{}", self.start, self.end)
        } else if self.end.column > self.start.column + 1 {
            write!(
                f,
                "{}:{}-{}",
                self.start.line,
                self.start.column,
                self.end.column - 1
            )
        } else {
            write!(f, "{}", self.start)
        }
    }
}
