//! Expression evaluation errors.

use kls_diagnostic::ErrorCode;
use thiserror::Error;

/// Failure while tokenizing or folding an expression.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("Encountered unexpected operator `{symbol}`")]
    UnexpectedOperator { symbol: String },

    #[error("Encountered unknown operator `{symbol}`")]
    UnknownOperator { symbol: String },

    #[error("Encountered unknown expression `{name}`")]
    UnknownExpression { name: String },

    #[error("Expected bracket")]
    ExpectedBracket,

    #[error("Expected parameters for `{symbol}`")]
    NotEnoughParameters { symbol: &'static str },

    #[error("Expected operator between {count} values")]
    TooManyParameters { count: usize },

    #[error("Encountered wrong bracket number ({opening} opening, {closing} closing)")]
    BracketsNotEqual { opening: usize, closing: usize },

    #[error("Encountered division by zero")]
    DivisionByZero,

    #[error("Encountered empty expression")]
    EmptyExpression,
}

impl ExprError {
    /// Stable diagnostic code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ExprError::UnexpectedOperator { .. } => ErrorCode::E0001,
            ExprError::UnknownOperator { .. } => ErrorCode::E0002,
            ExprError::UnknownExpression { .. } => ErrorCode::E0003,
            ExprError::ExpectedBracket => ErrorCode::E0004,
            ExprError::NotEnoughParameters { .. } => ErrorCode::E0005,
            ExprError::TooManyParameters { .. } => ErrorCode::E0006,
            ExprError::BracketsNotEqual { .. } => ErrorCode::E0007,
            ExprError::DivisionByZero => ErrorCode::E0008,
            ExprError::EmptyExpression => ErrorCode::E0009,
        }
    }
}
