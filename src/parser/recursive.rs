use crate::ast::{Cmd, RedirectKind, SeqOp, MAX_ARGS};
use crate::lexer::{Token, TokenKind};
use crate::parser::ParseError;

/// Top-down recursive descent over a token slice.
///
/// The grammar is deliberately flat: `&&`, `||`, `;` and `|` all live on one
/// level and associate to the right, so `a | b && c` parses as
/// `a | (b && c)`. The executor never sees a precedence distinction between
/// piping and sequencing.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// pipeExpr := execExpr ( ( '&&' | '||' | ';' | '|' ) pipeExpr )?
    pub fn parse_pipe_expr(&mut self) -> Result<Cmd, ParseError> {
        let left = self.parse_exec_expr()?;
        let kind = self.peek_kind();
        match kind {
            TokenKind::And | TokenKind::Or | TokenKind::Semi => {
                self.pos += 1;
                let op = match kind {
                    TokenKind::And => SeqOp::And,
                    TokenKind::Or => SeqOp::Or,
                    _ => SeqOp::Then,
                };
                let right = self.parse_pipe_expr()?;
                Ok(Cmd::Sequence {
                    left: Box::new(left),
                    right: Box::new(right),
                    op,
                })
            }
            TokenKind::Pipe => {
                self.pos += 1;
                let right = self.parse_pipe_expr()?;
                Ok(Cmd::Pipe {
                    left: Box::new(left),
                    right: Box::new(right),
                })
            }
            _ => Ok(left),
        }
    }

    /// execExpr := redirs ( word redirs )*
    ///
    /// Builds exactly one `Exec` node. Redirections may appear anywhere in
    /// the word list; each wraps the growing command, first one innermost.
    fn parse_exec_expr(&mut self) -> Result<Cmd, ParseError> {
        let mut argv = Vec::new();
        let mut redirs = Vec::new();
        self.parse_redirs(&mut redirs)?;

        loop {
            match self.peek_kind() {
                TokenKind::Eof
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Semi
                | TokenKind::Pipe => break,
                TokenKind::Word => {
                    argv.push(self.tokens[self.pos].lexeme.clone());
                    self.pos += 1;
                    if argv.len() > MAX_ARGS {
                        return Err(ParseError::TooManyArgs);
                    }
                    self.parse_redirs(&mut redirs)?;
                }
                TokenKind::RedirectIn | TokenKind::RedirectOut => {
                    self.parse_redirs(&mut redirs)?;
                }
                TokenKind::Amp => {
                    return Err(ParseError::SyntaxError(
                        self.tokens[self.pos].lexeme.clone(),
                    ));
                }
            }
        }

        let mut cmd = Cmd::Exec { argv };
        for (kind, file) in redirs {
            cmd = Cmd::Redirect {
                cmd: Box::new(cmd),
                file,
                kind,
            };
        }
        Ok(cmd)
    }

    /// redirs := ( ('<' | '>') word )*
    fn parse_redirs(&mut self, redirs: &mut Vec<(RedirectKind, String)>) -> Result<(), ParseError> {
        loop {
            let kind = match self.peek_kind() {
                TokenKind::RedirectIn => RedirectKind::In,
                TokenKind::RedirectOut => RedirectKind::Out,
                _ => return Ok(()),
            };
            self.pos += 1;
            if self.peek_kind() != TokenKind::Word {
                return Err(ParseError::MissingRedirectFile);
            }
            redirs.push((kind, self.tokens[self.pos].lexeme.clone()));
            self.pos += 1;
        }
    }

    /// The whole line must be consumed; anything left over is an error.
    pub fn expect_eof(&self) -> Result<(), ParseError> {
        match self.tokens.get(self.pos) {
            None => Ok(()),
            Some(t) if t.kind == TokenKind::Eof => Ok(()),
            Some(_) => {
                let rest: Vec<&str> = self.tokens[self.pos..]
                    .iter()
                    .filter(|t| t.kind != TokenKind::Eof)
                    .map(|t| t.lexeme.as_str())
                    .collect();
                Err(ParseError::Leftovers(rest.join(" ")))
            }
        }
    }

    fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }
}
