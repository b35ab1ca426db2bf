//! Statement interpreter.
//!
//! Walks `;`-terminated statements directly on the script text. There is no
//! AST: `if`/`while` bodies are located by a forward balanced scan and
//! control flow is a cursor move, with pending back-edges and else-skips kept
//! on a small per-run jump stack.
//!
//! Every run gets a fresh child scope of the root `variables`; subroutine
//! invocations (`goto`) re-enter [`Interpreter::run`] on the stored body with
//! their own child scope and parameter queue.

mod builder;
mod cursor;
mod keyword;
mod scan;
mod statements;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use kls_diagnostic::{span_utils, Diagnostic};
use kls_expr::ExprEvaluator;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;

use crate::{minify, Bindings, ExecMode, ScriptError, SharedScope};
use cursor::{Leading, ScriptCursor};

pub use builder::InterpreterBuilder;

/// Subroutine bodies defined by `define ... end`, in definition order.
pub type Functions = IndexMap<String, String, FxBuildHasher>;

/// Cooperative cancellation flag.
///
/// Cloneable and `Send`; a host thread can hold one while another thread
/// runs the interpreter. The flag is observed once per statement.
#[derive(Clone, Debug, Default)]
pub struct TerminateHandle(Arc<AtomicBool>);

impl TerminateHandle {
    /// Ask the running script to stop at the next statement boundary.
    pub fn terminate(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// "When the cursor reaches `when`, continue at `target`."
#[derive(Copy, Clone, Debug)]
struct Jump {
    when: usize,
    target: usize,
}

/// Per-run state: one per `evaluate`/`validate` call, subroutine
/// invocation, or `define` body check.
struct Frame<'s> {
    cursor: ScriptCursor<'s>,
    jumps: SmallVec<[Jump; 4]>,
    scope: SharedScope,
    params: Option<VecDeque<f64>>,
    mode: ExecMode,
}

impl<'s> Frame<'s> {
    fn new(
        source: &'s str,
        scope: SharedScope,
        params: Option<VecDeque<f64>>,
        mode: ExecMode,
    ) -> Self {
        Frame {
            cursor: ScriptCursor::new(source),
            jumps: SmallVec::new(),
            scope,
            params,
            mode,
        }
    }
}

/// Outcome of one statement.
enum Flow {
    Next,
    Finish,
}

/// Embeddable script interpreter.
///
/// Owns the root variable scope, the native binding table and the defined
/// subroutines; all of them persist across `evaluate` calls.
#[derive(Debug)]
pub struct Interpreter {
    variables: SharedScope,
    bindings: Bindings,
    functions: Functions,
    parser: ExprEvaluator,
    terminate: TerminateHandle,
    last_return: Option<f64>,
    last_error: Option<ScriptError>,
    last_position: usize,
    max_call_depth: usize,
    depth: usize,
}

impl Interpreter {
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    /// Interpreter whose root scope falls back to `parent` for lookups.
    pub fn with_parent(parent: SharedScope) -> Self {
        InterpreterBuilder::new().parent(parent).build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Execute `script`.
    ///
    /// `params` feeds `pop` statements. Variables declared by the script
    /// vanish when the call returns unless they were exported.
    #[tracing::instrument(level = "debug", skip_all, fields(len = script.len()))]
    pub fn evaluate(
        &mut self,
        script: &str,
        params: Option<VecDeque<f64>>,
    ) -> Result<(), ScriptError> {
        self.terminate.reset();
        self.depth = 0;
        self.last_return = None;

        let mut frame = Frame::new(script, self.variables.child(), params, ExecMode::Execute);
        let result = self.run(&mut frame);
        self.finish(frame.cursor.pos(), result)
    }

    /// Check `script` without running it.
    ///
    /// Names are resolved against `scope` (the root variables by default)
    /// through a throwaway child scope; no variable is assigned and no
    /// binding or subroutine is invoked.
    #[tracing::instrument(level = "debug", skip_all, fields(len = script.len()))]
    pub fn validate(
        &mut self,
        script: &str,
        scope: Option<&SharedScope>,
    ) -> Result<(), ScriptError> {
        self.last_return = None;

        let scope = scope.unwrap_or(&self.variables).child();
        let mut frame = Frame::new(script, scope, None, ExecMode::Validate);
        let result = self.run(&mut frame);
        self.finish(frame.cursor.pos(), result)
    }

    fn finish(
        &mut self,
        position: usize,
        result: Result<(), ScriptError>,
    ) -> Result<(), ScriptError> {
        self.last_position = position;
        self.last_error = result.as_ref().err().cloned();
        if let Err(err) = &result {
            tracing::debug!(code = %err.code(), position, "script stopped: {err}");
        }
        result
    }

    /// Main dispatch loop shared by every frame.
    fn run(&mut self, frame: &mut Frame<'_>) -> Result<(), ScriptError> {
        if frame.cursor.skip_comments() == frame.cursor.len() {
            return Err(ScriptError::WrongScriptcode);
        }

        loop {
            if frame.mode.observes_termination() && self.terminate.is_requested() {
                tracing::debug!(position = frame.cursor.pos(), "termination requested");
                return Err(ScriptError::ScriptTerminated);
            }

            if frame
                .jumps
                .last()
                .is_some_and(|jump| jump.when == frame.cursor.pos())
            {
                if let Some(jump) = frame.jumps.pop() {
                    frame.cursor.set_pos(jump.target);
                }
            }

            let start = frame.cursor.skip_comments();
            let keyword = match frame.cursor.read_keyword() {
                Leading::Keyword(keyword) => keyword,
                Leading::Empty if frame.cursor.is_at_end() => return Ok(()),
                Leading::Empty => return Err(ScriptError::EmptyExpression),
                Leading::Unknown(word) => {
                    return Err(ScriptError::UnknownExpression {
                        keyword: word.to_owned(),
                    })
                }
            };
            tracing::trace!(?keyword, position = start, mode = ?frame.mode, "statement");

            if let Flow::Finish = self.statement(frame, keyword, start)? {
                return Ok(());
            }

            if !frame.cursor.is_terminated() {
                return Err(ScriptError::ExpectedTerminator);
            }
            frame.cursor.set_pos(frame.cursor.pos() + 1);
        }
    }

    /// Request termination of the running script.
    pub fn terminate(&self) {
        self.terminate.terminate();
    }

    /// Handle for requesting termination from another thread.
    pub fn terminate_handle(&self) -> TerminateHandle {
        self.terminate.clone()
    }

    /// Root scope shared by every run.
    pub fn variables(&self) -> &SharedScope {
        &self.variables
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }

    pub fn functions(&self) -> &Functions {
        &self.functions
    }

    pub fn functions_mut(&mut self) -> &mut Functions {
        &mut self.functions
    }

    /// Expression evaluator holding the last expression's outcome.
    pub fn parser(&self) -> &ExprEvaluator {
        &self.parser
    }

    /// Value of the last `return` or native `call`, if any.
    pub fn last_return(&self) -> Option<f64> {
        self.last_return
    }

    pub fn last_error(&self) -> Option<&ScriptError> {
        self.last_error.as_ref()
    }

    /// Byte offset at which the last run stopped.
    pub fn last_position(&self) -> usize {
        self.last_position
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// 1-based line of [`last_position`](Self::last_position) in `script`.
    pub fn line(&self, script: &str) -> u32 {
        span_utils::line_from_offset(script, self.last_position)
    }

    /// Diagnostic for the last error, located in `script`.
    pub fn diagnostic(&self, script: &str) -> Option<Diagnostic> {
        let err = self.last_error.as_ref()?;
        let mut diagnostic = Diagnostic::error(err.code())
            .with_message(err.to_string())
            .with_offset(script, self.last_position);
        if let Some(cause) = err.expr_error() {
            diagnostic = diagnostic.with_note(format!("{cause} [{}]", cause.code()));
        }
        Some(diagnostic)
    }

    /// Minify every stored subroutine body in place.
    pub fn minify_functions(&mut self) {
        for body in self.functions.values_mut() {
            *body = minify(body);
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
