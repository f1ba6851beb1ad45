#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A bare or quoted word; the lexeme holds the content, quotes stripped.
    Word,
    Pipe,        // |
    And,         // &&
    Or,          // ||
    Semi,        // ;
    RedirectIn,  // <
    RedirectOut, // >
    /// A lone `&`. Not a valid operator in this grammar; the parser rejects
    /// it where a word was expected.
    Amp,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// Char positions [start, end) of the lexeme; for quoted words this
    /// covers the content only, not the quote marks.
    pub span: (usize, usize),
}
