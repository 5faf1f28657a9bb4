#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokKind {
    // trivia / eof / error
    Eof,
    /// Error token (e.g., unterminated string)
    Error(String),
    // punctuation
    LParen,
    RParen,
    Quote, // 'datum shorthand
    // atoms
    Str(String),
    /// Identifier, keyword, number or boolean literal; classified by the parser
    Atom(String),
}

#[derive(Debug, Clone)]
pub struct Tok {
    pub kind: TokKind,
    pub span: Span,
}
