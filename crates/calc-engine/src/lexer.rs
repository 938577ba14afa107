use crate::error::LexError;
use crate::token::{Token, TokenKind};

struct Lexer {
    input: Vec<char>,
    pos: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    fn current(&self) -> Option<char> {
        if self.pos < self.input.len() {
            Some(self.input[self.pos])
        } else {
            None
        }
    }

    const fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> Result<f64, LexError> {
        let start = self.pos;
        let mut dots = 0;
        while let Some(ch) = self.current() {
            if ch.is_ascii_digit() || ch == '.' {
                if ch == '.' {
                    dots += 1;
                }
                self.advance();
            } else {
                break;
            }
        }
        let literal: String = self.input[start..self.pos].iter().collect();
        if dots > 1 {
            return Err(LexError::MalformedNumber {
                literal,
                pos: start,
            });
        }
        literal.parse::<f64>().map_err(|_| LexError::MalformedNumber {
            literal,
            pos: start,
        })
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let Some(ch) = self.current() else {
            return Ok(None);
        };

        let pos = self.pos;
        let kind = match ch {
            '+' => {
                self.advance();
                TokenKind::Plus
            }
            // '−' is the U+2212 minus sign calculator displays use.
            '-' | '−' => {
                self.advance();
                TokenKind::Minus
            }
            '*' | '×' => {
                self.advance();
                TokenKind::Multiply
            }
            '/' | '÷' => {
                self.advance();
                TokenKind::Divide
            }
            '%' => {
                self.advance();
                TokenKind::Modulo
            }
            '(' => {
                self.advance();
                TokenKind::LeftParen
            }
            ')' => {
                self.advance();
                TokenKind::RightParen
            }
            _ if ch.is_ascii_digit() || ch == '.' => {
                let num = self.read_number()?;
                TokenKind::Number(num)
            }
            _ => return Err(LexError::InvalidCharacter { ch, pos }),
        };

        Ok(Some(Token { kind, pos }))
    }

    fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        if tokens.is_empty() {
            return Err(LexError::EmptyExpression);
        }
        Ok(tokens)
    }
}

/// # Errors
///
/// Returns an error if the input is empty, contains characters outside the
/// calculator alphabet, or contains a malformed number literal.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    lexer.tokenize()
}
