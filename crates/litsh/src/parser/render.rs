//! Rendering parsed lines back to shell text
//!
//! Used when a test runner has to hand a RUN: line to a real shell (for
//! example when writing a standalone reproducer script). Every quoted
//! argument is re-lexed to check that it reads back as the same word.

use super::ast::{ArgWord, Command, Node, Pipeline, RedirectOp, Seq};
use super::lexer::Lexer;
use super::tokens::{Operator, Token};
use crate::error::{Error, Result};

/// Characters that stop a glob pattern from being written out unquoted.
const UNSAFE_IN_GLOB: [char; 8] = ['|', '&', '<', '>', '\'', '"', ';', '\\'];

impl Command {
    /// Render as a single shell command.
    pub fn to_shell(&self) -> Result<String> {
        let mut words = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            words.push(quote_arg(arg)?);
        }
        let mut out = words.join(" ");
        for redirect in &self.redirects {
            out.push_str(&format!(
                " {} {}",
                redirect_op_text(&redirect.op),
                quote_arg(&redirect.target)?
            ));
        }
        Ok(out)
    }
}

impl Pipeline {
    /// Render with one command per line. `pipefail` must match the value the
    /// pipeline was parsed with.
    pub fn to_shell(&self, pipefail: bool) -> Result<String> {
        if pipefail != self.pipefail {
            return Err(Error::PipefailMismatch);
        }
        let mut out = String::new();
        if self.negate {
            out.push_str("! ");
        }
        let commands = self
            .commands
            .iter()
            .map(Command::to_shell)
            .collect::<Result<Vec<_>>>()?;
        out.push_str(&commands.join("|\n  "));
        Ok(out)
    }
}

impl Seq {
    pub fn to_shell(&self, pipefail: bool) -> Result<String> {
        Ok(format!(
            "{} {}\n{}",
            self.left.to_shell(pipefail)?,
            self.op,
            self.right.to_shell(pipefail)?
        ))
    }
}

impl Node {
    pub fn to_shell(&self, pipefail: bool) -> Result<String> {
        match self {
            Node::Pipeline(pipeline) => pipeline.to_shell(pipefail),
            Node::Seq(seq) => seq.to_shell(pipefail),
        }
    }
}

/// Spell a redirect operator so that it lexes back to the same operator.
/// `HereDoc` only ever comes from `<>`; a literal `<<` lexes as two `<`.
fn redirect_op_text(op: &RedirectOp) -> String {
    let text = match op.op {
        Operator::HereDoc => "<>",
        other => other.as_str(),
    };
    match op.fd {
        Some(fd) => format!("{fd}{text}"),
        None => text.to_string(),
    }
}

fn quote_arg(arg: &ArgWord) -> Result<String> {
    let text = match arg {
        ArgWord::Glob(pattern) => {
            // Globs must stay unquoted to keep their meaning
            if pattern.contains(UNSAFE_IN_GLOB) || pattern.contains(char::is_whitespace) {
                return Err(Error::Unquotable(pattern.clone()));
            }
            return Ok(pattern.clone());
        }
        ArgWord::Word(text) => text,
    };

    let quoted = if !text.contains('\'') {
        format!("'{}'", text)
    } else if !text.contains(['"', '$']) {
        format!("\"{}\"", text)
    } else {
        return Err(Error::Unquotable(text.clone()));
    };

    let mut lexer = Lexer::new(&quoted);
    let relexed: Vec<Token> = lexer.by_ref().collect();
    if relexed != [Token::Word(text.clone())] || !lexer.warnings().is_empty() {
        return Err(Error::Unquotable(text.clone()));
    }
    Ok(quoted)
}
