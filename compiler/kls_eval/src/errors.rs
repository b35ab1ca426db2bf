//! Statement interpreter errors.

use kls_diagnostic::ErrorCode;
use kls_expr::ExprError;
use thiserror::Error;

use crate::bindings::BindingError;
use crate::scope::ScopeError;

/// Reason an `evaluate`/`validate` call stopped early.
///
/// Every error is fatal for the call that raised it; there is no
/// statement-level recovery.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("Encountered undefined variable `{name}`")]
    UndefinedVariable { name: String },

    #[error("Encountered undefined function `{name}`")]
    UndefinedFunction { name: String },

    #[error("Expected `fi` token")]
    ExpectedEndif,

    #[error("Expected `done` token")]
    ExpectedDone,

    #[error("Expected `end` token")]
    ExpectedEnd,

    #[error("Expected `;` token")]
    ExpectedTerminator,

    #[error("Encountered empty function `{name}`")]
    EmptyFunction { name: String },

    #[error("Encountered empty expression")]
    EmptyExpression,

    #[error("Encountered unknown expression `{keyword}`")]
    UnknownExpression { keyword: String },

    #[error("Wrong or empty script code")]
    WrongScriptcode,

    #[error("Encountered invalid expression parameters")]
    WrongParameters,

    #[error("Encountered invalid math expression `{expression}`")]
    WrongEvaluation {
        expression: String,
        #[source]
        source: ExprError,
    },

    #[error("Selected variable `{name}` is readonly")]
    VariableReadonly { name: String },

    #[error("Script terminated before end")]
    ScriptTerminated,

    #[error("Subroutine `{name}` exceeded the call depth limit of {limit}")]
    CallDepthExceeded { name: String, limit: usize },
}

impl ScriptError {
    /// Stable diagnostic code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ScriptError::UndefinedVariable { .. } => ErrorCode::E1001,
            ScriptError::UndefinedFunction { .. } => ErrorCode::E1002,
            ScriptError::ExpectedEndif => ErrorCode::E1003,
            ScriptError::ExpectedDone => ErrorCode::E1004,
            ScriptError::ExpectedEnd => ErrorCode::E1005,
            ScriptError::ExpectedTerminator => ErrorCode::E1006,
            ScriptError::EmptyFunction { .. } => ErrorCode::E1007,
            ScriptError::EmptyExpression => ErrorCode::E1008,
            ScriptError::UnknownExpression { .. } => ErrorCode::E1009,
            ScriptError::WrongScriptcode => ErrorCode::E1010,
            ScriptError::WrongParameters => ErrorCode::E1011,
            ScriptError::WrongEvaluation { .. } => ErrorCode::E1012,
            ScriptError::VariableReadonly { .. } => ErrorCode::E1013,
            ScriptError::ScriptTerminated => ErrorCode::E1014,
            ScriptError::CallDepthExceeded { .. } => ErrorCode::E1015,
        }
    }

    /// The expression-level cause, if any.
    pub fn expr_error(&self) -> Option<&ExprError> {
        match self {
            ScriptError::WrongEvaluation { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ScopeError> for ScriptError {
    fn from(err: ScopeError) -> Self {
        match err {
            ScopeError::NotFound { name } => ScriptError::UndefinedVariable { name },
        }
    }
}

impl From<BindingError> for ScriptError {
    fn from(err: BindingError) -> Self {
        match err {
            BindingError::Undefined { name } => ScriptError::UndefinedFunction { name },
        }
    }
}
