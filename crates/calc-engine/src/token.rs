#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Number(f64),

    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,

    LeftParen,
    RightParen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}
