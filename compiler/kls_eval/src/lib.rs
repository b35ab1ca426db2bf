//! Statement interpreter for klscript.
//!
//! A script is a sequence of `;`-terminated statements:
//!
//! ```text
//! var i;                    # declare in the run's local scope
//! set i 0;                  # assign an expression
//! while i < 3;              # loop while the guard is non-zero
//!     call print i;         # native binding
//!     set i i + 1;
//! done;
//! define square;            # subroutine, invoked with `goto`
//!     pop x;
//!     return x ^ 2;
//! end;
//! goto square 4;
//! export result;            # survives the run in the root scope
//! set result return;
//! ```
//!
//! The [`Interpreter`] owns the root [`SharedScope`], the native
//! [`Bindings`] and the defined subroutines. Expressions are handed to
//! [`kls_expr`] with the current scope as the name resolver.

mod bindings;
mod errors;
mod exec_mode;
mod interpreter;
mod minify;
mod scope;
mod stack;
mod variable;

pub use bindings::{BindingError, Bindings, NativeFn};
pub use errors::ScriptError;
pub use exec_mode::ExecMode;
pub use interpreter::{Functions, Interpreter, InterpreterBuilder, TerminateHandle};
pub use minify::minify;
pub use scope::{Scope, ScopeError, SharedScope};
pub use stack::{ensure_sufficient_stack, DEFAULT_MAX_CALL_DEPTH};
pub use variable::{Callback, HostCell, VarKind, Variable};

pub use kls_expr::{ExprError, ExprEvaluator};
