//! Token types for the lexer

use std::fmt;

use serde::Serialize;

use super::span::Span;

/// Control and redirection operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    /// ;
    Semicolon,
    /// |
    Pipe,
    /// ||
    Or,
    /// &
    Background,
    /// &&
    And,
    /// &> - redirect both stdout and stderr
    RedirectBoth,
    /// >
    RedirectOut,
    /// >& - duplicate output fd
    DupOutput,
    /// >>
    RedirectAppend,
    /// <
    RedirectIn,
    /// <& - duplicate input fd
    DupInput,
    /// <<
    HereDoc,
}

impl Operator {
    /// The operator as written in the input.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Semicolon => ";",
            Self::Pipe => "|",
            Self::Or => "||",
            Self::Background => "&",
            Self::And => "&&",
            Self::RedirectBoth => "&>",
            Self::RedirectOut => ">",
            Self::DupOutput => ">&",
            Self::RedirectAppend => ">>",
            Self::RedirectIn => "<",
            Self::DupInput => "<&",
            Self::HereDoc => "<<",
        }
    }

    /// Operators that end a command: `|`, `;`, `&`, `||`, `&&`.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Self::Pipe | Self::Semicolon | Self::Background | Self::Or | Self::And
        )
    }

    /// Operators that join two pipelines: `;`, `&`, `&&`, `||`.
    pub fn is_sequence(&self) -> bool {
        self.is_terminator() && *self != Self::Pipe
    }

    /// Operators that take a target word.
    pub fn is_redirect(&self) -> bool {
        !self.is_terminator()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token types produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    /// A plain argument
    Word(String),

    /// An argument with unquoted `*` or `?`, left for the executor to expand
    GlobWord(String),

    /// A control or redirection operator
    Operator(Operator),

    /// Redirect with an explicit file descriptor (e.g., `2>`, `2>&`)
    NumericRedirect(i64, Operator),
}

impl Token {
    /// The bare operator, if this is a plain `Operator` token.
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Self::Operator(op) => Some(*op),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(w) | Self::GlobWord(w) => f.write_str(w),
            Self::Operator(op) => write!(f, "{}", op),
            Self::NumericRedirect(fd, op) => write!(f, "{}{}", fd, op),
        }
    }
}

/// A token with its source location span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}
