mod ast;
mod error;
mod evaluator;
mod lexer;
mod parser;
mod token;

pub use ast::{BinaryOp, Expr};
pub use error::{CalcError, EvalError, LexError, ParseError};
pub use evaluator::{eval_expr, round_result};
pub use lexer::tokenize;
pub use parser::{parse_expr, parse_tokens};
pub use token::{Token, TokenKind};

/// Evaluates an arithmetic expression to its rounded numeric value.
///
/// # Errors
///
/// Returns an error if the expression cannot be tokenized, parsed, or
/// evaluated to a finite number.
pub fn evaluate(raw: &str) -> Result<f64, CalcError> {
    let expr = parse_expr(raw)?;
    let value = eval_expr(&expr)?;
    Ok(round_result(value))
}

/// Evaluates an arithmetic expression to a display string. Never fails:
/// any invalid input maps to one of the fixed `Error: ...` messages.
#[must_use]
pub fn calculate(raw: &str) -> String {
    match evaluate(raw) {
        Ok(value) => value.to_string(),
        Err(e) => e.user_message().to_string(),
    }
}
