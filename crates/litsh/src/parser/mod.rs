//! Parser module for litsh
//!
//! Implements a recursive descent parser over the lexer's token stream with
//! a single token of lookahead. The grammar is flat:
//!
//! ```text
//! line     := pipeline (seq_op pipeline)*
//! pipeline := command ('|' command)*
//! command  := word (word | redirect)*
//! redirect := [fd] redir_op word
//! seq_op   := ';' | '&' | '&&' | '||'
//! ```
//!
//! Sequencing operators all bind equally and fold to the left, so
//! `a && b || c` is `(a && b) || c` and `a || b && c` is `(a || b) && c`.

mod ast;
mod diagnostics;
mod lexer;
mod render;
mod span;
mod tokens;

pub use ast::*;
pub use diagnostics::{Warning, WarningKind};
pub use lexer::Lexer;
pub use span::{Position, Span};
pub use tokens::{Operator, SpannedToken, Token};

use crate::error::{Error, Result};
use crate::options::ParseOptions;

/// A successfully parsed line together with any lenient-recovery warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub node: Node,
    pub warnings: Vec<Warning>,
}

/// Parser for RUN: lines.
pub struct Parser<'a> {
    #[cfg_attr(not(feature = "logging"), allow(dead_code))]
    input: &'a str,
    lexer: Lexer<'a>,
    current_token: Option<SpannedToken>,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input with default options.
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    /// Create a new parser with explicit options.
    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        let mut lexer = Lexer::with_options(input, &options);
        let current_token = lexer.next_spanned_token();
        Self {
            input,
            lexer,
            current_token,
            options,
        }
    }

    /// Parse the whole line.
    pub fn parse(mut self) -> Result<Parsed> {
        let mut node = Node::Pipeline(self.parse_pipeline()?);

        while let Some(spanned) = self.advance() {
            let span = spanned.span;
            let op = spanned
                .token
                .operator()
                .filter(Operator::is_sequence)
                .and_then(|op| SeqOperator::try_from(op).ok());
            let Some(op) = op else {
                return Err(unexpected_token(&spanned.token, span));
            };

            if self.current_token.is_none() {
                return Err(error_at(
                    format!("missing argument to operator `{}`", op),
                    span,
                ));
            }

            // No precedence between sequencing operators: fold left.
            let rhs = self.parse_pipeline()?;
            node = Node::seq(node, op, Node::Pipeline(rhs));
        }

        let warnings = self.lexer.into_warnings();
        #[cfg(feature = "logging")]
        tracing::debug!(
            input = %crate::logging_impl::format_input_for_log(self.input, &self.options.log),
            pipelines = node.pipelines().len(),
            warnings = warnings.len(),
            "parsed line"
        );
        Ok(Parsed { node, warnings })
    }

    /// Take the current token and load the next one.
    fn advance(&mut self) -> Option<SpannedToken> {
        let next = self.lexer.next_spanned_token();
        std::mem::replace(&mut self.current_token, next)
    }

    /// Parse a pipeline (commands connected by |)
    fn parse_pipeline(&mut self) -> Result<Pipeline> {
        let mut commands = vec![self.parse_command()?];

        while matches!(
            self.current_token,
            Some(SpannedToken {
                token: Token::Operator(Operator::Pipe),
                ..
            })
        ) {
            self.advance();
            commands.push(self.parse_command()?);
        }

        Ok(Pipeline {
            commands,
            negate: false,
            pipefail: self.options.pipefail,
        })
    }

    /// Parse a simple command with redirections. Stops in front of a
    /// terminator, leaving it for the caller.
    fn parse_command(&mut self) -> Result<Command> {
        let first = match self.advance() {
            None => return Err(Error::Parse("empty command!".to_string())),
            Some(spanned) => match into_arg(spanned.token) {
                // An empty quoted word does not name a program
                Ok(arg) if arg.as_str().is_empty() => {
                    return Err(error_at("empty command!".to_string(), spanned.span));
                }
                Ok(arg) => arg,
                Err(token) => return Err(unexpected_token(&token, spanned.span)),
            },
        };

        let mut args = vec![first];
        let mut redirects = Vec::new();

        while let Some(next) = &self.current_token {
            if next.token.operator().is_some_and(|op| op.is_terminator()) {
                break;
            }
            let Some(spanned) = self.advance() else {
                break;
            };
            let op = match spanned.token {
                Token::Word(w) => {
                    args.push(ArgWord::Word(w));
                    continue;
                }
                Token::GlobWord(g) => {
                    args.push(ArgWord::Glob(g));
                    continue;
                }
                Token::Operator(op) => RedirectOp { fd: None, op },
                Token::NumericRedirect(fd, op) => RedirectOp { fd: Some(fd), op },
            };
            debug_assert!(op.op.is_redirect(), "non-redirect operator {op}");
            let target = self.expect_redirect_target(&op, spanned.span)?;
            redirects.push(Redirect { op, target });
        }

        Ok(Command { args, redirects })
    }

    /// Expect a word token as the target of the redirect `op`.
    /// An empty quoted word is as good as no target at all.
    fn expect_redirect_target(&mut self, op: &RedirectOp, op_span: Span) -> Result<ArgWord> {
        let missing = || error_at(format!("syntax error near token `{}`", op), op_span);
        let spanned = self.advance().ok_or_else(missing)?;
        match into_arg(spanned.token) {
            Ok(arg) if arg.as_str().is_empty() => Err(missing()),
            Ok(arg) => Ok(arg),
            Err(token) => Err(unexpected_token(&token, spanned.span)),
        }
    }
}

fn into_arg(token: Token) -> std::result::Result<ArgWord, Token> {
    match token {
        Token::Word(w) => Ok(ArgWord::Word(w)),
        Token::GlobWord(g) => Ok(ArgWord::Glob(g)),
        other => Err(other),
    }
}

fn error_at(message: String, span: Span) -> Error {
    Error::parse_at(message, span.start.line, span.start.column)
}

fn unexpected_token(token: &Token, span: Span) -> Error {
    error_at(
        format!("syntax error near unexpected token `{}`", token),
        span,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Node> {
        Parser::new(input).parse().map(|parsed| parsed.node)
    }

    fn args(cmd: &Command) -> Vec<&str> {
        cmd.args.iter().map(ArgWord::as_str).collect()
    }

    fn single_command(node: &Node) -> &Command {
        match node {
            Node::Pipeline(p) if p.commands.len() == 1 => &p.commands[0],
            other => panic!("expected single command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_command() {
        let node = parse("echo hello").unwrap();
        let cmd = single_command(&node);
        assert_eq!(args(cmd), vec!["echo", "hello"]);
        assert!(cmd.redirects.is_empty());
    }

    #[test]
    fn test_parse_pipeline() {
        let node = parse("echo hi | grep h | wc -l").unwrap();
        let Node::Pipeline(pipeline) = &node else {
            panic!("expected pipeline");
        };
        assert_eq!(pipeline.commands.len(), 3);
        assert_eq!(args(&pipeline.commands[2]), vec!["wc", "-l"]);
        assert!(!pipeline.negate);
        assert!(!pipeline.pipefail);
    }

    #[test]
    fn test_pipefail_is_stamped_from_options() {
        let options = ParseOptions::new().pipefail(true);
        let parsed = Parser::with_options("a | b ; c", options).parse().unwrap();
        assert!(parsed.node.pipelines().iter().all(|p| p.pipefail));
    }

    #[test]
    fn test_parse_redirect_out() {
        let node = parse("echo hello > /tmp/out").unwrap();
        let cmd = single_command(&node);
        assert_eq!(args(cmd), vec!["echo", "hello"]);
        assert_eq!(
            cmd.redirects,
            vec![Redirect {
                op: RedirectOp {
                    fd: None,
                    op: Operator::RedirectOut,
                },
                target: ArgWord::Word("/tmp/out".to_string()),
            }]
        );
    }

    #[test]
    fn test_redirects_interleave_with_args() {
        let node = parse("cmd <in a 2>>err b").unwrap();
        let cmd = single_command(&node);
        assert_eq!(args(cmd), vec!["cmd", "a", "b"]);
        assert_eq!(cmd.redirects.len(), 2);
        assert_eq!(cmd.redirects[0].op.op, Operator::RedirectIn);
        assert_eq!(
            cmd.redirects[1].op,
            RedirectOp {
                fd: Some(2),
                op: Operator::RedirectAppend,
            }
        );
        assert_eq!(cmd.redirects[1].target.as_str(), "err");
    }

    #[test]
    fn test_left_associative_sequence() {
        let node = parse("a ; b & c").unwrap();
        let Node::Seq(outer) = &node else {
            panic!("expected seq");
        };
        assert_eq!(outer.op, SeqOperator::Background);
        let Node::Seq(inner) = outer.left.as_ref() else {
            panic!("expected nested seq on the left");
        };
        assert_eq!(inner.op, SeqOperator::Semicolon);
        assert!(matches!(outer.right.as_ref(), Node::Pipeline(_)));
    }

    #[test]
    fn test_empty_command() {
        assert_eq!(parse(""), Err(Error::Parse("empty command!".to_string())));
        assert_eq!(parse("   "), Err(Error::Parse("empty command!".to_string())));
    }

    #[test]
    fn test_leading_operator() {
        let err = parse("| foo").unwrap_err();
        assert_eq!(
            err,
            Error::parse_at("syntax error near unexpected token `|`", 1, 1)
        );
    }

    #[test]
    fn test_redirect_without_target() {
        let err = parse("foo >").unwrap_err();
        assert_eq!(err, Error::parse_at("syntax error near token `>`", 1, 5));

        let err = parse("foo 2>").unwrap_err();
        assert_eq!(err, Error::parse_at("syntax error near token `2>`", 1, 5));
    }

    #[test]
    fn test_redirect_to_operator() {
        let err = parse("foo > | bar").unwrap_err();
        assert_eq!(
            err,
            Error::parse_at("syntax error near unexpected token `|`", 1, 7)
        );
    }

    #[test]
    fn test_missing_argument_to_operator() {
        let err = parse("foo &&").unwrap_err();
        assert_eq!(
            err,
            Error::parse_at("missing argument to operator `&&`", 1, 5)
        );
    }

    #[test]
    fn test_pipe_without_command() {
        assert_eq!(
            parse("foo |"),
            Err(Error::Parse("empty command!".to_string()))
        );
        assert_eq!(
            parse("foo | | bar").unwrap_err(),
            Error::parse_at("syntax error near unexpected token `|`", 1, 7)
        );
    }

    #[test]
    fn test_doubled_sequence_operator() {
        assert_eq!(
            parse("a ; ; b").unwrap_err(),
            Error::parse_at("syntax error near unexpected token `;`", 1, 5)
        );
    }

    #[test]
    fn test_empty_program_word() {
        assert_eq!(
            parse("'' foo").unwrap_err(),
            Error::parse_at("empty command!", 1, 1)
        );
        assert_eq!(
            parse("a | \"\" b").unwrap_err(),
            Error::parse_at("empty command!", 1, 5)
        );
        // Empty words are still fine as arguments
        let node = parse("echo '' x").unwrap();
        assert_eq!(args(single_command(&node)), vec!["echo", "", "x"]);
    }

    #[test]
    fn test_empty_redirect_target() {
        assert_eq!(
            parse("foo > ''").unwrap_err(),
            Error::parse_at("syntax error near token `>`", 1, 5)
        );
        assert_eq!(
            parse("foo 2>> \"\"").unwrap_err(),
            Error::parse_at("syntax error near token `2>>`", 1, 5)
        );
    }

    #[test]
    fn test_warnings_are_returned() {
        let parsed = Parser::new("echo 'unterminated").parse().unwrap();
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(
            parsed.warnings[0].kind,
            WarningKind::UnterminatedQuote('\'')
        );
        assert_eq!(args(single_command(&parsed.node)), vec!["echo", "unterminated"]);
    }
}
