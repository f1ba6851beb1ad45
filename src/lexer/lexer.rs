use std::fmt;

use super::token::{Token, TokenKind};

/// Characters that terminate a bare word. Quote characters are included:
/// a quote directly after word characters starts a new token.
const OPERATOR_CHARS: [char; 8] = ['<', '>', '|', '&', ';', '"', '\'', '`'];
const QUOTE_CHARS: [char; 3] = ['"', '\'', '`'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A quote character with no matching close quote before end of input.
    UnbalancedQuote(char, usize),
    /// A closing bracket at token start. Dead rule kept from the base
    /// grammar, which has no bracket constructs at all.
    UnbalancedBracket(char, usize),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnbalancedQuote(c, _) => write!(f, "unbalanced quote: {}", c),
            LexError::UnbalancedBracket(c, _) => write!(f, "unbalanced brackets: '{}'", c),
        }
    }
}

impl std::error::Error for LexError {}

/// Scans one flat input line into tokens, one call at a time. Stateless
/// apart from the cursor; the parser pulls tokens on demand through
/// `tokenize_all`.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// Tokenizes the remaining input; the resulting vector always ends with
    /// an `Eof` token.
    pub fn tokenize_all(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        let start = self.pos;

        let Some(&c) = self.chars.get(self.pos) else {
            return Ok(Token {
                kind: TokenKind::Eof,
                lexeme: String::new(),
                span: (start, start),
            });
        };

        match c {
            ')' | ']' | '}' => Err(LexError::UnbalancedBracket(c, self.pos)),
            '|' => {
                self.pos += 1;
                if self.peek() == Some('|') {
                    self.pos += 1;
                    Ok(self.operator(TokenKind::Or, "||", start))
                } else {
                    Ok(self.operator(TokenKind::Pipe, "|", start))
                }
            }
            '&' => {
                self.pos += 1;
                if self.peek() == Some('&') {
                    self.pos += 1;
                    Ok(self.operator(TokenKind::And, "&&", start))
                } else {
                    Ok(self.operator(TokenKind::Amp, "&", start))
                }
            }
            ';' => {
                self.pos += 1;
                Ok(self.operator(TokenKind::Semi, ";", start))
            }
            '<' => {
                self.pos += 1;
                Ok(self.operator(TokenKind::RedirectIn, "<", start))
            }
            '>' => {
                self.pos += 1;
                Ok(self.operator(TokenKind::RedirectOut, ">", start))
            }
            q if QUOTE_CHARS.contains(&q) => self.quoted_word(q),
            _ => Ok(self.bare_word()),
        }
    }

    fn operator(&self, kind: TokenKind, lexeme: &str, start: usize) -> Token {
        Token {
            kind,
            lexeme: lexeme.to_string(),
            span: (start, self.pos),
        }
    }

    /// Everything between a quote character and its matching close quote is
    /// the token body; whitespace and operator characters lose their meaning
    /// inside.
    fn quoted_word(&mut self, quote: char) -> Result<Token, LexError> {
        let open = self.pos;
        self.pos += 1;
        let start = self.pos;
        while let Some(&c) = self.chars.get(self.pos) {
            if c == quote {
                let lexeme: String = self.chars[start..self.pos].iter().collect();
                let span = (start, self.pos);
                self.pos += 1;
                return Ok(Token {
                    kind: TokenKind::Word,
                    lexeme,
                    span,
                });
            }
            self.pos += 1;
        }
        Err(LexError::UnbalancedQuote(quote, open))
    }

    fn bare_word(&mut self) -> Token {
        let start = self.pos;
        while let Some(&c) = self.chars.get(self.pos) {
            if is_blank(c) || OPERATOR_CHARS.contains(&c) {
                break;
            }
            self.pos += 1;
        }
        Token {
            kind: TokenKind::Word,
            lexeme: self.chars[start..self.pos].iter().collect(),
            span: (start, self.pos),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.chars.get(self.pos) {
            if !is_blank(c) {
                break;
            }
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\u{b}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, lexeme: &str, span: (usize, usize)) -> Token {
        Token {
            kind,
            lexeme: lexeme.to_string(),
            span,
        }
    }

    fn kinds(input: &str) -> Vec<(TokenKind, String)> {
        Lexer::new(input)
            .tokenize_all()
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.lexeme))
            .collect()
    }

    #[test]
    fn test_simple_words() {
        let tokens = Lexer::new("echo hello").tokenize_all().unwrap();
        assert_eq!(
            tokens,
            vec![
                token(TokenKind::Word, "echo", (0, 4)),
                token(TokenKind::Word, "hello", (5, 10)),
                token(TokenKind::Eof, "", (10, 10)),
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("a|b && c || d > e < f ; g"),
            vec![
                (TokenKind::Word, "a".to_string()),
                (TokenKind::Pipe, "|".to_string()),
                (TokenKind::Word, "b".to_string()),
                (TokenKind::And, "&&".to_string()),
                (TokenKind::Word, "c".to_string()),
                (TokenKind::Or, "||".to_string()),
                (TokenKind::Word, "d".to_string()),
                (TokenKind::RedirectOut, ">".to_string()),
                (TokenKind::Word, "e".to_string()),
                (TokenKind::RedirectIn, "<".to_string()),
                (TokenKind::Word, "f".to_string()),
                (TokenKind::Semi, ";".to_string()),
                (TokenKind::Word, "g".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_lone_ampersand() {
        assert_eq!(
            kinds("a & b"),
            vec![
                (TokenKind::Word, "a".to_string()),
                (TokenKind::Amp, "&".to_string()),
                (TokenKind::Word, "b".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_quoted_words() {
        let tokens = Lexer::new("ls 'foo bar'").tokenize_all().unwrap();
        assert_eq!(
            tokens,
            vec![
                token(TokenKind::Word, "ls", (0, 2)),
                token(TokenKind::Word, "foo bar", (4, 11)),
                token(TokenKind::Eof, "", (12, 12)),
            ]
        );
    }

    #[test]
    fn test_all_quote_styles() {
        assert_eq!(
            kinds("echo \"a b\" 'c d' `e f`"),
            vec![
                (TokenKind::Word, "echo".to_string()),
                (TokenKind::Word, "a b".to_string()),
                (TokenKind::Word, "c d".to_string()),
                (TokenKind::Word, "e f".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_operators_inside_quotes_are_literal() {
        assert_eq!(
            kinds("echo 'a | b && c'"),
            vec![
                (TokenKind::Word, "echo".to_string()),
                (TokenKind::Word, "a | b && c".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_quote_terminates_bare_word() {
        assert_eq!(
            kinds("ab\"cd\""),
            vec![
                (TokenKind::Word, "ab".to_string()),
                (TokenKind::Word, "cd".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_unbalanced_quote() {
        let result = Lexer::new("echo \"foo").tokenize_all();
        assert_eq!(result, Err(LexError::UnbalancedQuote('"', 5)));
    }

    #[test]
    fn test_unbalanced_backtick() {
        let result = Lexer::new("`oops").tokenize_all();
        assert_eq!(result, Err(LexError::UnbalancedQuote('`', 0)));
    }

    #[test]
    fn test_unbalanced_bracket() {
        let result = Lexer::new("  ) ls").tokenize_all();
        assert_eq!(result, Err(LexError::UnbalancedBracket(')', 2)));
    }

    #[test]
    fn test_bracket_inside_word_is_literal() {
        assert_eq!(
            kinds("ab)"),
            vec![
                (TokenKind::Word, "ab)".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_whitespace_variants() {
        assert_eq!(
            kinds("\t a \r\n b \u{b} "),
            vec![
                (TokenKind::Word, "a".to_string()),
                (TokenKind::Word, "b".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let tokens = Lexer::new("").tokenize_all().unwrap();
        assert_eq!(tokens, vec![token(TokenKind::Eof, "", (0, 0))]);
    }

    #[test]
    fn test_empty_quotes_make_empty_word() {
        let tokens = Lexer::new("''").tokenize_all().unwrap();
        assert_eq!(
            tokens,
            vec![
                token(TokenKind::Word, "", (1, 1)),
                token(TokenKind::Eof, "", (2, 2)),
            ]
        );
    }
}
