//! AST types for parsed RUN: lines
//!
//! The tree is built bottom-up by the parser and never mutated afterwards.
//! Leaves are always [`Pipeline`]s; [`Seq`] nodes lean left.

use std::fmt;

use serde::Serialize;

use super::tokens::Operator;

/// A command argument or redirect target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ArgWord {
    /// Literal text
    Word(String),
    /// Pattern with unquoted `*`/`?`, expanded against the filesystem by the
    /// executor
    Glob(String),
}

impl ArgWord {
    /// The argument text, without its glob tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Word(s) | Self::Glob(s) => s,
        }
    }

    pub fn is_glob(&self) -> bool {
        matches!(self, Self::Glob(_))
    }
}

impl fmt::Display for ArgWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operator half of a redirect, with its explicit fd if one was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RedirectOp {
    /// File descriptor from a `2>` style prefix
    pub fd: Option<i64>,
    pub op: Operator,
}

impl fmt::Display for RedirectOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fd {
            Some(fd) => write!(f, "{}{}", fd, self.op),
            None => write!(f, "{}", self.op),
        }
    }
}

/// I/O redirection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub op: RedirectOp,
    pub target: ArgWord,
}

/// A simple command with arguments and redirections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    /// Program name followed by its arguments; never empty
    pub args: Vec<ArgWord>,
    /// Redirections in source order
    pub redirects: Vec<Redirect>,
}

impl Command {
    /// The program name.
    pub fn program(&self) -> &ArgWord {
        &self.args[0]
    }
}

/// A pipeline of commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pipeline {
    /// Commands joined by `|`; never empty
    pub commands: Vec<Command>,
    /// Whether the pipeline is negated; this parser never sets it
    pub negate: bool,
    /// Whether any failing stage fails the pipeline
    pub pipefail: bool,
}

/// Operators joining two nodes of a [`Seq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeqOperator {
    /// ; - run right after left unconditionally
    Semicolon,
    /// & - run left in the background
    Background,
    /// && - run right if left succeeded
    And,
    /// || - run right if left failed
    Or,
}

impl SeqOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Semicolon => ";",
            Self::Background => "&",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

impl TryFrom<Operator> for SeqOperator {
    type Error = Operator;

    fn try_from(op: Operator) -> Result<Self, Operator> {
        match op {
            Operator::Semicolon => Ok(Self::Semicolon),
            Operator::Background => Ok(Self::Background),
            Operator::And => Ok(Self::And),
            Operator::Or => Ok(Self::Or),
            other => Err(other),
        }
    }
}

impl fmt::Display for SeqOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two nodes joined by a sequencing operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seq {
    pub left: Box<Node>,
    pub op: SeqOperator,
    pub right: Box<Node>,
}

/// Root of a parsed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Node {
    Pipeline(Pipeline),
    Seq(Seq),
}

impl Node {
    /// Join two nodes; the result leans left when folded over a line.
    pub fn seq(left: Node, op: SeqOperator, right: Node) -> Self {
        Self::Seq(Seq {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    /// Leaf pipelines in source order.
    pub fn pipelines(&self) -> Vec<&Pipeline> {
        let mut out = Vec::new();
        collect_pipelines(self, &mut out);
        out
    }

    /// Every command in source order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.pipelines()
            .into_iter()
            .flat_map(|pipeline| pipeline.commands.iter())
    }
}

fn collect_pipelines<'a>(node: &'a Node, out: &mut Vec<&'a Pipeline>) {
    match node {
        Node::Pipeline(pipeline) => out.push(pipeline),
        Node::Seq(seq) => {
            collect_pipelines(&seq.left, out);
            collect_pipelines(&seq.right, out);
        }
    }
}

impl From<Pipeline> for Node {
    fn from(p: Pipeline) -> Self {
        Node::Pipeline(p)
    }
}

impl From<Seq> for Node {
    fn from(s: Seq) -> Self {
        Node::Seq(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> Command {
        Command {
            args: args.iter().map(|a| ArgWord::Word(a.to_string())).collect(),
            redirects: Vec::new(),
        }
    }

    fn pipeline(commands: Vec<Command>) -> Node {
        Node::Pipeline(Pipeline {
            commands,
            negate: false,
            pipefail: false,
        })
    }

    #[test]
    fn test_arg_word_text_ignores_tag() {
        let word = ArgWord::Word("*.c".into());
        let glob = ArgWord::Glob("*.c".into());
        assert_eq!(word.as_str(), glob.as_str());
        assert_ne!(word, glob);
        assert!(glob.is_glob());
    }

    #[test]
    fn test_redirect_op_display() {
        let plain = RedirectOp {
            fd: None,
            op: Operator::RedirectAppend,
        };
        let numbered = RedirectOp {
            fd: Some(2),
            op: Operator::DupOutput,
        };
        assert_eq!(plain.to_string(), ">>");
        assert_eq!(numbered.to_string(), "2>&");
    }

    #[test]
    fn test_seq_operator_from_operator() {
        assert_eq!(SeqOperator::try_from(Operator::Or), Ok(SeqOperator::Or));
        assert_eq!(
            SeqOperator::try_from(Operator::Pipe),
            Err(Operator::Pipe)
        );
    }

    #[test]
    fn test_pipelines_in_source_order() {
        let node = Node::seq(
            Node::seq(
                pipeline(vec![command(&["a"])]),
                SeqOperator::And,
                pipeline(vec![command(&["b"]), command(&["c"])]),
            ),
            SeqOperator::Semicolon,
            pipeline(vec![command(&["d"])]),
        );

        assert_eq!(node.pipelines().len(), 3);
        let programs: Vec<&str> = node.commands().map(|c| c.program().as_str()).collect();
        assert_eq!(programs, vec!["a", "b", "c", "d"]);
    }
}
