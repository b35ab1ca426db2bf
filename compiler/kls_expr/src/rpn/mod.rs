//! Fold an RPN queue on an operand stack.

use smallvec::SmallVec;

use crate::{ExprError, Token};

/// Evaluate tokens produced by [`to_rpn`](crate::to_rpn).
///
/// Exactly one operand must remain once the queue is exhausted.
pub fn eval_rpn(tokens: &[Token]) -> Result<f64, ExprError> {
    let mut operands: SmallVec<[f64; 16]> = SmallVec::new();

    for token in tokens {
        let value = match *token {
            Token::Value(value) => value,
            Token::Operator(op) => {
                let not_enough = || ExprError::NotEnoughParameters {
                    symbol: op.as_symbol(),
                };
                let b = operands.pop().ok_or_else(not_enough)?;
                let a = operands.pop().ok_or_else(not_enough)?;
                op.apply(a, b)?
            }
            Token::Function(func) => {
                let a = operands.pop().ok_or(ExprError::NotEnoughParameters {
                    symbol: func.name(),
                })?;
                func.apply(a)
            }
        };
        operands.push(value);
    }

    match operands.as_slice() {
        [value] => Ok(*value),
        [] => Err(ExprError::EmptyExpression),
        rest => Err(ExprError::TooManyParameters { count: rest.len() }),
    }
}

#[cfg(test)]
mod tests;
