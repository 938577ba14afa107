use crate::ast::Expr;
use crate::error::EvalError;

const ROUND_SCALE: f64 = 1e9;

/// Evaluates an expression tree to a number.
///
/// # Errors
///
/// Returns an error as soon as any step produces a non-finite value:
/// division or remainder by zero, overflow, or an overflowing literal.
pub fn eval_expr(expr: &Expr) -> Result<f64, EvalError> {
    let value = match expr {
        Expr::Number(n) => *n,
        Expr::Binary { op, lhs, rhs } => op.apply(eval_expr(lhs)?, eval_expr(rhs)?),
        Expr::Neg(inner) => -eval_expr(inner)?,
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFiniteResult)
    }
}

/// Rounds a result to 9 decimal places, ties to even, so float artifacts
/// like `0.1 + 0.2` present as `0.3`.
#[must_use]
pub fn round_result(value: f64) -> f64 {
    let scaled = value * ROUND_SCALE;
    // Beyond ~1.8e299 the scaled value overflows; doubles that large have
    // no fractional part left to round anyway.
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round_ties_even() / ROUND_SCALE;
    // Collapse -0.0 so it does not display as "-0".
    if rounded == 0.0 { 0.0 } else { rounded }
}
