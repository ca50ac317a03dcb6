//! Error types for litsh
//!
//! Only fatal conditions live here. Lenient lexer recoveries (unterminated
//! quotes, trailing escapes) are reported as [`Warning`](crate::Warning)s and
//! never abort a parse.

use thiserror::Error;

/// Result type alias using litsh's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// litsh error types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parse error occurred with no token to point at (e.g. empty input).
    #[error("parse error: {0}")]
    Parse(String),

    /// Parse error with the location of the offending token.
    #[error("parse error at line {line}, column {column}: {message}")]
    ParseAt {
        message: String,
        line: usize,
        column: usize,
    },

    /// An argument could not be quoted so that it re-lexes to itself.
    #[error("unable to quote {0:?}")]
    Unquotable(String),

    /// A pipeline was rendered with a different `pipefail` setting than it
    /// was parsed with.
    #[error("inconsistent \"pipefail\" attribute")]
    PipefailMismatch,
}

impl Error {
    /// Create a parse error with source location.
    pub fn parse_at(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::ParseAt {
            message: message.into(),
            line,
            column,
        }
    }

    /// The bare message, without the location prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Parse(message) | Self::ParseAt { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_at_display() {
        let err = Error::parse_at("syntax error near token `>`", 1, 5);
        assert_eq!(
            err.to_string(),
            "parse error at line 1, column 5: syntax error near token `>`"
        );
        assert_eq!(err.message(), "syntax error near token `>`");
    }

    #[test]
    fn test_unquotable_display() {
        let err = Error::Unquotable("a'b\"c".to_string());
        assert_eq!(err.to_string(), r#"unable to quote "a'b\"c""#);
    }
}
