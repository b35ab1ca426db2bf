//! Statement handlers.

use std::collections::VecDeque;

use kls_expr::{ExprError, NameResolver};
use smallvec::SmallVec;

use super::keyword::Keyword;
use super::scan::{scan_block, Block};
use super::{Flow, Frame, Interpreter, Jump};
use crate::stack::ensure_sufficient_stack;
use crate::{ExecMode, ScriptError, SharedScope, Variable};

/// Names visible to statement expressions: the frame scope plus the
/// `return` pseudo-variable holding the last call result.
///
/// `return` reads as NaN until a `call` or a subroutine `return` has set
/// it, the same value an empty last-return slot has on the host side.
struct StatementNames<'a> {
    scope: &'a SharedScope,
    last_return: Option<f64>,
}

impl NameResolver for StatementNames<'_> {
    fn resolve(&self, name: &str) -> Option<f64> {
        if name == "return" {
            return Some(self.last_return.unwrap_or(f64::NAN));
        }
        self.scope.resolve(name)
    }
}

type Args = SmallVec<[f64; 4]>;

impl Interpreter {
    pub(super) fn statement(
        &mut self,
        frame: &mut Frame<'_>,
        keyword: Keyword,
        start: usize,
    ) -> Result<Flow, ScriptError> {
        match keyword {
            Keyword::Set => self.exec_set(frame),
            Keyword::Call => self.exec_call(frame),
            Keyword::Goto => self.exec_goto(frame),
            Keyword::Var | Keyword::Export | Keyword::Pop => self.exec_declare(frame, keyword),
            Keyword::If => self.exec_if(frame),
            Keyword::While => self.exec_while(frame, start),
            Keyword::Define => self.exec_define(frame),
            Keyword::Return => self.exec_return(frame),
            Keyword::Exit if frame.mode.performs_effects() => Ok(Flow::Finish),
            Keyword::Exit | Keyword::Else | Keyword::Fi | Keyword::Done | Keyword::End => {
                Ok(Flow::Next)
            }
        }
    }

    fn exec_set(&mut self, frame: &mut Frame<'_>) -> Result<Flow, ScriptError> {
        require_operands(frame)?;
        let name = frame.cursor.read_name();
        if !frame.scope.borrow().exists(name, true) {
            return Err(ScriptError::UndefinedVariable {
                name: name.to_owned(),
            });
        }

        let value = self.eval_param(frame)?;
        if frame.mode.performs_effects() {
            let readonly = frame
                .scope
                .borrow()
                .with_variable(name, Variable::is_readonly)?;
            if readonly && frame.mode.enforces_readonly() {
                return Err(ScriptError::VariableReadonly {
                    name: name.to_owned(),
                });
            }
            frame.scope.assign(name, value)?;
        }
        Ok(Flow::Next)
    }

    fn exec_call(&mut self, frame: &mut Frame<'_>) -> Result<Flow, ScriptError> {
        require_operands(frame)?;
        let name = frame.cursor.read_name();
        if !self.bindings.exists(name) {
            return Err(ScriptError::UndefinedFunction {
                name: name.to_owned(),
            });
        }

        let args = self.read_args(frame)?;
        if frame.mode.performs_effects() {
            let result = self.bindings.call(name, &args)?;
            tracing::trace!(name, args = args.len(), result, "native call");
            self.last_return = Some(result);
        }
        Ok(Flow::Next)
    }

    fn exec_goto(&mut self, frame: &mut Frame<'_>) -> Result<Flow, ScriptError> {
        require_operands(frame)?;
        let name = frame.cursor.read_name();

        // targets resolve at run time so bodies may call later definitions
        if !frame.mode.performs_effects() {
            self.read_args(frame)?;
            return Ok(Flow::Next);
        }

        let body = self
            .functions
            .get(name)
            .cloned()
            .ok_or_else(|| ScriptError::UndefinedFunction {
                name: name.to_owned(),
            })?;
        let args = self.read_args(frame)?;
        self.invoke(name, &body, args.into_iter().collect())?;
        Ok(Flow::Next)
    }

    fn exec_declare(&mut self, frame: &mut Frame<'_>, keyword: Keyword) -> Result<Flow, ScriptError> {
        require_operands(frame)?;
        loop {
            let name = frame.cursor.read_name();
            if name.is_empty() {
                return Err(ScriptError::EmptyExpression);
            }

            match keyword {
                Keyword::Export if frame.mode.performs_effects() => self.export(frame, name)?,
                Keyword::Pop if frame.mode.performs_effects() => pop_param(frame, name)?,
                _ => {
                    frame.scope.borrow_mut().declare(name);
                }
            }

            if !frame.cursor.next_separator() {
                return Ok(Flow::Next);
            }
        }
    }

    /// Move a local variable into the root scope, or create it there.
    fn export(&self, frame: &Frame<'_>, name: &str) -> Result<(), ScriptError> {
        let local = frame.scope.borrow_mut().remove(name);
        match local {
            Some(variable) => {
                let in_root = self.variables.borrow().exists(name, false);
                if in_root {
                    self.variables.assign(name, variable.to_number())?;
                } else {
                    self.variables.borrow_mut().add(name, variable);
                }
            }
            None => {
                let visible = self.variables.borrow().exists(name, true);
                if !visible {
                    self.variables.borrow_mut().declare(name);
                }
            }
        }
        tracing::debug!(name, "export");
        Ok(())
    }

    fn exec_if(&mut self, frame: &mut Frame<'_>) -> Result<Flow, ScriptError> {
        require_operands(frame)?;
        let guard = self.eval_param(frame)?;
        let then = frame.cursor.pos();
        let scan = scan_block(&mut frame.cursor, Block::If)?;

        if !frame.mode.follows_branches() {
            frame.cursor.set_pos(then);
        } else if guard != 0.0 {
            if let Some(alternate) = scan.alternate {
                frame.jumps.push(Jump {
                    when: alternate + 1,
                    target: scan.close + 1,
                });
            }
            frame.cursor.set_pos(then);
        } else {
            frame.cursor.set_pos(scan.alternate.unwrap_or(scan.close));
        }
        Ok(Flow::Next)
    }

    fn exec_while(&mut self, frame: &mut Frame<'_>, start: usize) -> Result<Flow, ScriptError> {
        require_operands(frame)?;
        let guard = self.eval_param(frame)?;
        let then = frame.cursor.pos();
        let scan = scan_block(&mut frame.cursor, Block::While)?;

        if !frame.mode.follows_branches() {
            frame.cursor.set_pos(then);
        } else if guard != 0.0 {
            frame.jumps.push(Jump {
                when: scan.close + 1,
                target: start,
            });
            frame.cursor.set_pos(then);
        }
        Ok(Flow::Next)
    }

    fn exec_define(&mut self, frame: &mut Frame<'_>) -> Result<Flow, ScriptError> {
        require_operands(frame)?;
        let name = frame.cursor.read_name();
        if name.is_empty() || !frame.cursor.is_terminated() {
            return Err(ScriptError::WrongParameters);
        }

        let header = frame.cursor.pos();
        frame.cursor.set_pos(header + 1);
        let body_start = frame.cursor.skip_comments();
        frame.cursor.set_pos(header);
        let scan = scan_block(&mut frame.cursor, Block::Define)?;

        let body = frame
            .cursor
            .source()
            .get(body_start..scan.body_end)
            .unwrap_or_default();
        if body.is_empty() {
            return Err(ScriptError::EmptyFunction {
                name: name.to_owned(),
            });
        }

        let mut check = Frame::new(body, frame.scope.child(), None, ExecMode::Validate);
        ensure_sufficient_stack(|| self.run(&mut check))?;

        if frame.mode.performs_effects() {
            tracing::debug!(name, len = body.len(), "define subroutine");
            self.functions.insert(name.to_owned(), body.to_owned());
        }
        Ok(Flow::Next)
    }

    fn exec_return(&mut self, frame: &mut Frame<'_>) -> Result<Flow, ScriptError> {
        require_operands(frame)?;
        let value = self.eval_param(frame)?;
        if frame.mode.performs_effects() {
            self.last_return = Some(value);
            return Ok(Flow::Finish);
        }
        Ok(Flow::Next)
    }

    /// Run a subroutine body in a fresh child of the root scope.
    #[tracing::instrument(level = "debug", skip(self, body, params))]
    fn invoke(&mut self, name: &str, body: &str, params: VecDeque<f64>) -> Result<(), ScriptError> {
        if self.depth >= self.max_call_depth {
            return Err(ScriptError::CallDepthExceeded {
                name: name.to_owned(),
                limit: self.max_call_depth,
            });
        }

        self.depth += 1;
        self.last_return = None;
        let mut frame = Frame::new(body, self.variables.child(), Some(params), ExecMode::Execute);
        let result = ensure_sufficient_stack(|| self.run(&mut frame));
        self.depth -= 1;
        result
    }

    /// Evaluate the next statement parameter as an expression.
    fn eval_param(&mut self, frame: &mut Frame<'_>) -> Result<f64, ScriptError> {
        let expression = frame.cursor.read_param();
        let names = StatementNames {
            scope: &frame.scope,
            last_return: self.last_return,
        };
        match self.parser.evaluate(&expression, Some(&names)) {
            Ok(value) => Ok(value),
            Err(ExprError::DivisionByZero) if frame.mode.tolerates_arithmetic_faults() => {
                Ok(f64::NAN)
            }
            Err(source) => Err(ScriptError::WrongEvaluation {
                expression: expression.trim().to_owned(),
                source,
            }),
        }
    }

    /// Comma-separated expressions up to the statement terminator.
    fn read_args(&mut self, frame: &mut Frame<'_>) -> Result<Args, ScriptError> {
        let mut args = Args::new();
        if frame.cursor.is_terminated() {
            return Ok(args);
        }
        loop {
            args.push(self.eval_param(frame)?);
            if !frame.cursor.next_separator() {
                return Ok(args);
            }
        }
    }
}

fn require_operands(frame: &Frame<'_>) -> Result<(), ScriptError> {
    if frame.cursor.is_terminated() {
        Err(ScriptError::WrongParameters)
    } else {
        Ok(())
    }
}

/// Declare `name` and fill it from the parameter queue, if there is one.
fn pop_param(frame: &mut Frame<'_>, name: &str) -> Result<(), ScriptError> {
    frame.scope.borrow_mut().declare(name);
    if let Some(params) = frame.params.as_mut() {
        let value = params.pop_front().ok_or(ScriptError::WrongParameters)?;
        frame.scope.assign(name, value)?;
    }
    Ok(())
}
