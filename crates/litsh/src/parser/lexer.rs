//! Lexer for RUN: lines
//!
//! Tokenizes one line into words, glob words and operators with source
//! position tracking. Arguments go through a fast path that accepts plain
//! whitespace-delimited chunks verbatim; anything containing quotes,
//! operators or backslashes falls back to a character-level slow path.
//! Both must agree wherever the fast path accepts, which checked mode
//! verifies at runtime.

use super::diagnostics::{Warning, WarningKind};
use super::span::{Position, Span};
use super::tokens::{Operator, SpannedToken, Token};
use crate::options::ParseOptions;

/// Characters that force an argument onto the slow path.
const SLOW_PATH_CHARS: [char; 8] = ['|', '&', '<', '>', '\'', '"', ';', '\\'];

/// Unquoted characters that make an argument a glob.
const GLOB_CHARS: [char; 2] = ['*', '?'];

/// Lexer for RUN: lines.
///
/// Also an [`Iterator`] over [`Token`]s; the sequence is lazy and single
/// pass.
pub struct Lexer<'a> {
    input: &'a str,
    /// Current position in the input
    position: Position,
    options: ParseOptions,
    warnings: Vec<Warning>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input with default options.
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, &ParseOptions::default())
    }

    /// Create a new lexer honoring `win32_escapes` and `checked`.
    pub fn with_options(input: &'a str, options: &ParseOptions) -> Self {
        Self {
            input,
            position: Position::new(),
            options: *options,
            warnings: Vec::new(),
        }
    }

    /// Get the current position in the input.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Warnings recorded so far.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Consume the lexer, returning the warnings it recorded.
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    /// Get the next token from the input (without span info).
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();
        self.lex_one_token()
    }

    /// Get the next token with its source span.
    pub fn next_spanned_token(&mut self) -> Option<SpannedToken> {
        self.skip_whitespace();
        let start = self.position;
        let token = self.lex_one_token()?;
        Some(SpannedToken {
            token,
            span: Span::from_positions(start, self.position),
        })
    }

    /// Lex the whole input with default options, dropping warnings.
    pub fn tokenize(input: &'a str) -> Vec<Token> {
        Self::new(input).collect()
    }

    /// Iterate over the remaining tokens together with their spans.
    pub fn spanned(&mut self) -> impl Iterator<Item = SpannedToken> + '_ {
        std::iter::from_fn(move || self.next_spanned_token())
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position.offset..)?.chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek_char();
        if let Some(c) = ch {
            self.position.advance(c);
        }
        ch
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn warn(&mut self, kind: WarningKind, position: Position) {
        let warning = Warning::new(kind, position);
        #[cfg(feature = "logging")]
        tracing::warn!(
            input = %crate::logging_impl::format_input_for_log(self.input, &self.options.log),
            "{}",
            warning
        );
        self.warnings.push(warning);
    }

    /// Lex a single token starting at the current (non-whitespace) position.
    fn lex_one_token(&mut self) -> Option<Token> {
        let ch = self.peek_char()?;
        match ch {
            ';' | '|' | '&' | '>' | '<' => {
                self.advance();
                Some(Token::Operator(self.lex_operator(ch)))
            }
            _ => Some(self.lex_arg()),
        }
    }

    /// Finish an operator whose first character `ch` was already consumed.
    fn lex_operator(&mut self, ch: char) -> Operator {
        match ch {
            ';' => Operator::Semicolon,
            '|' => {
                if self.eat('|') {
                    Operator::Or
                } else {
                    Operator::Pipe
                }
            }
            '&' => {
                if self.eat('&') {
                    Operator::And
                } else if self.eat('>') {
                    Operator::RedirectBoth
                } else {
                    Operator::Background
                }
            }
            _ => self.lex_redirect_operator(ch),
        }
    }

    /// Finish a `>` or `<` operator.
    fn lex_redirect_operator(&mut self, ch: char) -> Operator {
        if ch == '>' {
            if self.eat('&') {
                Operator::DupOutput
            } else if self.eat('>') {
                Operator::RedirectAppend
            } else {
                Operator::RedirectOut
            }
        } else if self.eat('&') {
            Operator::DupInput
        } else if self.eat('>') {
            // `<>` yields `<<`; kept for compatibility with existing test suites
            Operator::HereDoc
        } else {
            Operator::RedirectIn
        }
    }

    fn lex_arg(&mut self) -> Token {
        if self.options.checked {
            return self.lex_arg_checked();
        }
        match self.lex_arg_fast() {
            Some(token) => token,
            None => self.lex_arg_slow(),
        }
    }

    /// Accept the whitespace-delimited chunk verbatim if it needs no quote,
    /// escape or operator handling. Leaves the cursor untouched otherwise.
    pub(crate) fn lex_arg_fast(&mut self) -> Option<Token> {
        let rest = self.input.get(self.position.offset..)?;
        let chunk = rest.split(char::is_whitespace).next().unwrap_or(rest);
        if chunk.is_empty() {
            return None;
        }
        if chunk.contains(SLOW_PATH_CHARS) {
            #[cfg(feature = "logging")]
            tracing::trace!(column = self.position.column, "fast path declined");
            return None;
        }

        for ch in chunk.chars() {
            self.position.advance(ch);
        }
        if chunk.contains(GLOB_CHARS) {
            Some(Token::GlobWord(chunk.to_string()))
        } else {
            Some(Token::Word(chunk.to_string()))
        }
    }

    /// Character-level argument lexer. Always consumes at least one character
    /// when called on a non-whitespace, non-operator position.
    pub(crate) fn lex_arg_slow(&mut self) -> Token {
        let mut word = String::new();
        let mut unquoted_glob = false;
        let mut quoted_glob = false;

        while let Some(ch) = self.peek_char() {
            match ch {
                c if c.is_whitespace() => break,
                '|' | '&' | ';' => break,
                '>' | '<' => {
                    // `2>` is one token so the parser never has to look at
                    // whitespace to tell `2>` from `2 >`.
                    let Some(fd) = parse_fd(&word) else {
                        break;
                    };
                    self.advance();
                    let op = self.lex_redirect_operator(ch);
                    return Token::NumericRedirect(fd, op);
                }
                '"' | '\'' => {
                    let open = self.position;
                    self.advance();
                    let quoted = self.lex_arg_quoted(ch, open);
                    if quoted.contains(GLOB_CHARS) {
                        quoted_glob = true;
                    }
                    word.push_str(&quoted);
                }
                '\\' if !self.options.win32_escapes => {
                    let escape_at = self.position;
                    self.advance();
                    match self.advance() {
                        Some(escaped) => word.push(escaped),
                        None => {
                            self.warn(WarningKind::TrailingEscape, escape_at);
                            break;
                        }
                    }
                }
                '*' | '?' => {
                    unquoted_glob = true;
                    word.push(ch);
                    self.advance();
                }
                _ => {
                    word.push(ch);
                    self.advance();
                }
            }
        }

        // Quote removal loses the information about which glob characters
        // were quoted, so an argument may only have them on one side.
        debug_assert!(
            !(quoted_glob && unquoted_glob),
            "glob characters both inside and outside quotes in {:?}",
            self.input
        );

        if unquoted_glob {
            Token::GlobWord(word)
        } else {
            Token::Word(word)
        }
    }

    /// Lex the body of a quoted argument; the opening `delim` at `open` has
    /// already been consumed.
    fn lex_arg_quoted(&mut self, delim: char, open: Position) -> String {
        let mut content = String::new();

        while let Some(ch) = self.advance() {
            if ch == delim {
                return content;
            }
            if ch == '\\' && delim == '"' {
                // Inside "...", backslash only escapes `"` and itself
                let escape_at = Position {
                    column: self.position.column - 1,
                    offset: self.position.offset - 1,
                    ..self.position
                };
                match self.advance() {
                    Some(next @ ('"' | '\\')) => content.push(next),
                    Some(next) => {
                        content.push('\\');
                        content.push(next);
                    }
                    None => {
                        self.warn(WarningKind::TrailingEscape, escape_at);
                        return content;
                    }
                }
            } else {
                content.push(ch);
            }
        }

        self.warn(WarningKind::UnterminatedQuote(delim), open);
        content
    }

    /// Run both argument lexers over the same input and panic if the fast
    /// path accepted something the slow path lexes differently.
    fn lex_arg_checked(&mut self) -> Token {
        let start = self.position;
        let fast = self.lex_arg_fast();
        let fast_end = self.position;

        self.position = start;
        let reference = self.lex_arg_slow();
        if let Some(fast) = fast {
            assert_eq!(
                fast, reference,
                "fast path failure at {} in {:?}",
                start, self.input
            );
            assert_eq!(
                fast_end, self.position,
                "fast path failure: cursor mismatch at {} in {:?}",
                start, self.input
            );
        }
        reference
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// A non-empty run of ASCII digits that fits a file descriptor number.
fn parse_fd(word: &str) -> Option<i64> {
    if word.is_empty() || !word.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    word.parse().ok()
}
