use super::{Functions, Interpreter, TerminateHandle};
use crate::stack::DEFAULT_MAX_CALL_DEPTH;
use crate::{Bindings, Scope, SharedScope};
use kls_expr::ExprEvaluator;

/// Configures an [`Interpreter`] before its first run.
///
/// ```
/// use kls_eval::{Bindings, Interpreter};
///
/// let mut bindings = Bindings::new();
/// bindings.add("twice", |args| args.iter().sum::<f64>() * 2.0);
///
/// let mut interp = Interpreter::builder()
///     .bindings(bindings)
///     .max_call_depth(32)
///     .build();
/// interp.evaluate("call twice 4;", None).unwrap();
/// assert_eq!(interp.last_return(), Some(8.0));
/// ```
#[derive(Debug)]
pub struct InterpreterBuilder {
    parent: Option<SharedScope>,
    bindings: Bindings,
    functions: Functions,
    max_call_depth: usize,
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        InterpreterBuilder {
            parent: None,
            bindings: Bindings::new(),
            functions: Functions::default(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope the root variables fall back to for lookups and assignment.
    #[must_use]
    pub fn parent(mut self, parent: SharedScope) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn bindings(mut self, bindings: Bindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Pre-defined subroutine bodies, callable with `goto`.
    #[must_use]
    pub fn functions(mut self, functions: Functions) -> Self {
        self.functions = functions;
        self
    }

    /// Maximum nesting of `goto` invocations before a run fails.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter {
        let variables = match self.parent {
            Some(parent) => SharedScope::new(Scope::with_parent(parent)),
            None => SharedScope::default(),
        };
        Interpreter {
            variables,
            bindings: self.bindings,
            functions: self.functions,
            parser: ExprEvaluator::new(),
            terminate: TerminateHandle::default(),
            last_return: None,
            last_error: None,
            last_position: 0,
            max_call_depth: self.max_call_depth,
            depth: 0,
        }
    }
}
