mod recursive;

use std::fmt;

use crate::ast::Cmd;
use crate::lexer::{LexError, Lexer};
pub use recursive::Parser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Lex(LexError),
    /// An operator (or other non-word token) where a word or redirection was
    /// expected.
    SyntaxError(String),
    /// A `<` or `>` with no word after it.
    MissingRedirectFile,
    /// More than `MAX_ARGS` words in one exec command.
    TooManyArgs,
    /// Input remaining after the top-level expression was parsed.
    Leftovers(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(e) => write!(f, "{}", e),
            ParseError::SyntaxError(found) => write!(f, "syntax error: '{}'", found),
            ParseError::MissingRedirectFile => write!(f, "missing file for redirection"),
            ParseError::TooManyArgs => write!(f, "too many args"),
            ParseError::Leftovers(rest) => write!(f, "leftovers: {}", rest),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lex(e)
    }
}

/// Parses one full input line into a command tree. The entire line must be
/// consumed; a parse error means no tree at all is handed to the executor.
pub fn parse_line(line: &str) -> Result<Cmd, ParseError> {
    let tokens = Lexer::new(line).tokenize_all()?;
    let mut parser = Parser::new(&tokens);
    let cmd = parser.parse_pipe_expr()?;
    parser.expect_eof()?;
    Ok(cmd)
}
