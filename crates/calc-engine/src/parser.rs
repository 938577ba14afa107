use crate::ast::{BinaryOp, Expr};
use crate::error::{CalcError, ParseError};
use crate::lexer;
use crate::token::{Token, TokenKind};

// Deep enough for any human-entered expression, shallow enough that the
// recursive descent never exhausts the stack.
const MAX_DEPTH: usize = 256;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    const fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current(&self) -> Option<&Token> {
        if self.pos < self.tokens.len() {
            Some(&self.tokens[self.pos])
        } else {
            None
        }
    }

    fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|token| token.kind)
    }

    const fn advance(&mut self) {
        self.pos += 1;
    }

    fn parse(&mut self) -> Result<Expr, ParseError> {
        let result = self.parse_additive(0)?;
        if let Some(&Token { kind, pos }) = self.current() {
            return Err(ParseError::UnexpectedToken { kind, pos });
        }
        Ok(result)
    }

    fn parse_additive(&mut self, depth: usize) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative(depth)?;
        loop {
            let op = match self.current_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative(depth)?;
            left = Expr::Binary {
                op,
                lhs: Box::new(left),
                rhs: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self, depth: usize) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary(depth)?;
        loop {
            let op = match self.current_kind() {
                Some(TokenKind::Multiply) => BinaryOp::Mul,
                Some(TokenKind::Divide) => BinaryOp::Div,
                Some(TokenKind::Modulo) => BinaryOp::Rem,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary(depth)?;
            left = Expr::Binary {
                op,
                lhs: Box::new(left),
                rhs: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self, depth: usize) -> Result<Expr, ParseError> {
        if depth >= MAX_DEPTH {
            return Err(ParseError::NestingTooDeep);
        }
        match self.current_kind() {
            Some(TokenKind::Minus) => {
                self.advance();
                let value = self.parse_unary(depth + 1)?;
                Ok(Expr::Neg(Box::new(value)))
            }
            _ => self.parse_primary(depth),
        }
    }

    fn parse_primary(&mut self, depth: usize) -> Result<Expr, ParseError> {
        match self.current() {
            Some(&Token {
                kind: TokenKind::Number(value),
                ..
            }) => {
                self.advance();
                Ok(Expr::Number(value))
            }
            Some(&Token {
                kind: TokenKind::LeftParen,
                pos,
            }) => {
                self.advance();
                match self.current_kind() {
                    None => Err(ParseError::UnmatchedParen { pos }),
                    Some(TokenKind::RightParen) => Err(ParseError::EmptyGroup { pos }),
                    _ => {
                        let value = self.parse_additive(depth + 1)?;
                        self.expect_closing(pos)?;
                        Ok(value)
                    }
                }
            }
            Some(&Token { kind, pos }) => Err(ParseError::UnexpectedToken { kind, pos }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn expect_closing(&mut self, open_pos: usize) -> Result<(), ParseError> {
        match self.current() {
            Some(&Token {
                kind: TokenKind::RightParen,
                ..
            }) => {
                self.advance();
                Ok(())
            }
            Some(&Token { kind, pos }) => Err(ParseError::UnexpectedToken { kind, pos }),
            None => Err(ParseError::UnmatchedParen { pos: open_pos }),
        }
    }
}

/// # Errors
///
/// Returns an error if the expression cannot be tokenized or does not form a
/// valid arithmetic expression.
pub fn parse_expr(expr: &str) -> Result<Expr, CalcError> {
    let tokens = lexer::tokenize(expr)?;
    let ast = parse_tokens(tokens)?;
    Ok(ast)
}

/// # Errors
///
/// Returns an error if the tokens do not form a valid arithmetic expression.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(tokens);
    parser.parse()
}
