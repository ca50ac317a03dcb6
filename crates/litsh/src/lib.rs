//! litsh - lexer and parser for test-runner RUN: lines
//!
//! Turns one line of shell-like text into a tree of [`Seq`], [`Pipeline`]
//! and [`Command`] nodes for an executor to walk. Only pipelines, the
//! sequencing operators `;`, `&`, `&&`, `||` and redirections are
//! understood; there is no variable expansion, no subshells and no operator
//! precedence.
//!
//! # Example
//!
//! ```rust
//! use litsh::{parse, ArgWord, Node, SeqOperator};
//!
//! let node = parse("echo hi | grep h && rm *.o", false, false)?;
//! let Node::Seq(seq) = &node else { unreachable!() };
//! assert_eq!(seq.op, SeqOperator::And);
//!
//! let programs: Vec<&str> = node.commands().map(|c| c.program().as_str()).collect();
//! assert_eq!(programs, ["echo", "grep", "rm"]);
//!
//! let rm = node.commands().last().unwrap();
//! assert_eq!(rm.args[1], ArgWord::Glob("*.o".to_string()));
//! # Ok::<(), litsh::Error>(())
//! ```
//!
//! Lenient recoveries are returned alongside the tree rather than failing the
//! parse:
//!
//! ```rust
//! use litsh::{parse_with, ParseOptions, WarningKind};
//!
//! let parsed = parse_with("echo 'unterminated", &ParseOptions::new())?;
//! assert_eq!(parsed.warnings[0].kind, WarningKind::UnterminatedQuote('\''));
//! # Ok::<(), litsh::Error>(())
//! ```

mod error;
#[cfg(feature = "logging")]
mod logging_impl;
mod options;
pub mod parser;

pub use error::{Error, Result};
pub use options::ParseOptions;
pub use parser::{
    ArgWord, Command, Lexer, Node, Operator, Parsed, Parser, Pipeline, Position, Redirect,
    RedirectOp, Seq, SeqOperator, Span, Token, Warning, WarningKind,
};

#[cfg(feature = "logging")]
pub use logging_impl::LogConfig;

/// Log formatting helpers used by parse events.
#[cfg(feature = "logging")]
pub mod logging {
    pub use crate::logging_impl::{format_input_for_log, sanitize_for_log, LogConfig};
}

/// Parse one line.
///
/// Warnings are dropped (they are still logged with the `logging` feature);
/// use [`parse_with`] to receive them.
pub fn parse(input: &str, win32_escapes: bool, pipefail: bool) -> Result<Node> {
    let options = ParseOptions::new()
        .win32_escapes(win32_escapes)
        .pipefail(pipefail);
    parse_with(input, &options).map(|parsed| parsed.node)
}

/// Parse one line with explicit options, keeping lexer warnings.
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Parsed> {
    Parser::with_options(input, *options).parse()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_point() {
        let node = parse("echo hello", false, true).unwrap();
        let Node::Pipeline(pipeline) = node else {
            panic!("expected pipeline");
        };
        assert!(pipeline.pipefail);
        assert_eq!(pipeline.commands[0].args.len(), 2);
    }

    #[test]
    fn test_win32_escapes_entry_point() {
        let node = parse(r"type C:\dir\file", true, false).unwrap();
        let cmd = node.commands().next().unwrap();
        assert_eq!(cmd.args[1].as_str(), r"C:\dir\file");

        let node = parse(r"type C:\dir\file", false, false).unwrap();
        let cmd = node.commands().next().unwrap();
        assert_eq!(cmd.args[1].as_str(), "C:dirfile");
    }

    #[test]
    fn test_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Node>();
        assert_send_sync::<Parsed>();
        assert_send_sync::<Error>();
        assert_send_sync::<ParseOptions>();
    }
}
