//! Expression evaluator for klscript.
//!
//! Evaluates one infix expression (`2 + 3 * x`, `sin(a) > 0.5 & b`) to an
//! `f64`. Tokenization and precedence resolution happen in a single
//! left-to-right pass that emits Reverse-Polish tokens; a second pass folds
//! the RPN queue on an operand stack.
//!
//! Identifiers that are not built-in functions are resolved eagerly through
//! a [`NameResolver`], usually a variable scope supplied by the interpreter.

mod error;
mod evaluator;
mod operators;
mod resolver;
mod rpn;
mod tokenizer;

pub use error::ExprError;
pub use evaluator::{evaluate, ExprEvaluator};
pub use operators::{FunctionKind, OperatorKind, Token};
pub use resolver::NameResolver;
pub use rpn::eval_rpn;
pub use tokenizer::{to_rpn, RpnQueue};
