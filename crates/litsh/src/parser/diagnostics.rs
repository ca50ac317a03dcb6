//! Lenient-recovery warnings
//!
//! The lexer degrades instead of failing on a missing closing quote or a
//! backslash at the end of input. Each such recovery is recorded here so the
//! caller can surface it even though the parse succeeds.

use std::fmt;

use serde::Serialize;

use super::span::Position;

/// What the lexer had to recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningKind {
    /// A quoted argument ran to the end of input; carries the delimiter.
    UnterminatedQuote(char),
    /// A backslash was the last character of the input.
    TrailingEscape,
}

/// A recoverable lexing problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    /// Where the unterminated construct started
    pub position: Position,
}

impl Warning {
    pub(crate) fn new(kind: WarningKind, position: Position) -> Self {
        Self { kind, position }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            WarningKind::UnterminatedQuote(delim) => {
                write!(f, "missing quote character {} at {}", delim, self.position)
            }
            WarningKind::TrailingEscape => {
                write!(f, "escape at end of argument at {}", self.position)
            }
        }
    }
}
