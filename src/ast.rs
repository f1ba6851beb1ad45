use std::os::unix::io::RawFd;

/// Upper bound on the words of a single exec command, matching the fixed
/// argv table of the original shell.
pub const MAX_ARGS: usize = 10;

/// One parsed input line. The tree is built bottom-up by the parser and
/// consumed by a single depth-first pass in the executor; nodes are never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// A program name plus arguments. An empty argv is a valid tree (a
    /// whitespace-only line) and executes as a successful no-op.
    Exec { argv: Vec<String> },
    /// Rebinds one standard descriptor of the wrapped command to a file.
    Redirect {
        cmd: Box<Cmd>,
        file: String,
        kind: RedirectKind,
    },
    /// Left's stdout feeds right's stdin, both sides running concurrently.
    Pipe { left: Box<Cmd>, right: Box<Cmd> },
    /// Runs left to completion, then decides whether right runs at all.
    Sequence {
        left: Box<Cmd>,
        right: Box<Cmd>,
        op: SeqOp,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    In,
    Out,
}

impl RedirectKind {
    /// The descriptor the redirection rebinds: stdin for `<`, stdout for `>`.
    pub fn fd(self) -> RawFd {
        match self {
            RedirectKind::In => 0,
            RedirectKind::Out => 1,
        }
    }
}

/// Conditional-execution operator of a `Sequence` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqOp {
    /// `&&`: right runs only if left exited 0.
    And,
    /// `||`: right runs only if left did not exit 0.
    Or,
    /// `;`: right always runs.
    Then,
}
