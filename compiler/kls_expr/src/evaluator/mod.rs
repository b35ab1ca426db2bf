//! Stateful evaluator wrapper that remembers the last outcome.

use crate::{eval_rpn, to_rpn, ExprError, NameResolver};

/// Tokenize and fold `source` in one call.
pub fn evaluate(source: &str, resolver: Option<&dyn NameResolver>) -> Result<f64, ExprError> {
    let tokens = to_rpn(source, resolver)?;
    eval_rpn(&tokens)
}

/// Expression evaluator that retains the last value or error.
///
/// A failed evaluation clears the stored value, so a stale result is never
/// reported next to a fresh error.
#[derive(Clone, Debug, Default)]
pub struct ExprEvaluator {
    last_value: Option<f64>,
    last_error: Option<ExprError>,
}

impl ExprEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(
        &mut self,
        source: &str,
        resolver: Option<&dyn NameResolver>,
    ) -> Result<f64, ExprError> {
        let result = evaluate(source, resolver);
        match &result {
            Ok(value) => {
                self.last_value = Some(*value);
                self.last_error = None;
            }
            Err(err) => {
                self.last_value = None;
                self.last_error = Some(err.clone());
            }
        }
        result
    }

    /// Result of the last successful evaluation.
    pub fn value(&self) -> Option<f64> {
        self.last_value
    }

    /// Error of the last failed evaluation.
    pub fn error(&self) -> Option<&ExprError> {
        self.last_error.as_ref()
    }
}
