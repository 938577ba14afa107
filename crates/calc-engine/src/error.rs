use crate::token::TokenKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("empty expression")]
    EmptyExpression,
    #[error("invalid character {ch:?} at position {pos}")]
    InvalidCharacter { ch: char, pos: usize },
    #[error("malformed number {literal:?} at position {pos}")]
    MalformedNumber { literal: String, pos: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected token {kind:?} at position {pos}")]
    UnexpectedToken { kind: TokenKind, pos: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("empty parentheses at position {pos}")]
    EmptyGroup { pos: usize },
    #[error("unmatched parenthesis opened at position {pos}")]
    UnmatchedParen { pos: usize },
    #[error("expression nested too deeply")]
    NestingTooDeep,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("result is not a finite number")]
    NonFiniteResult,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl CalcError {
    /// The fixed message shown to calculator users for this error.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Lex(LexError::EmptyExpression) => "Error: Empty expression",
            Self::Lex(LexError::InvalidCharacter { .. }) => "Error: Invalid characters",
            Self::Lex(LexError::MalformedNumber { .. }) | Self::Parse(_) => {
                "Error: Invalid expression"
            }
            Self::Eval(EvalError::NonFiniteResult) => "Error: Invalid result",
        }
    }
}
