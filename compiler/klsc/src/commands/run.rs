//! The `run` command: evaluate a script with the host bindings.

use std::collections::VecDeque;
use std::rc::Rc;

use kls_diagnostic::Diagnostic;
use kls_eval::Interpreter;

use super::{fail, read_source};
use crate::{host_bindings, OutputSink};

#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Values handed to the script's `pop` statements.
    pub params: Vec<f64>,
    /// Print the root variables after a successful run.
    pub dump: bool,
}

/// Evaluate `source` and return the interpreter for inspection.
pub fn run_source(
    source: &str,
    params: Vec<f64>,
    sink: OutputSink,
) -> Result<Interpreter, Diagnostic> {
    let mut interp = Interpreter::builder().bindings(host_bindings(sink)).build();
    let params = (!params.is_empty()).then(|| VecDeque::from(params));

    match interp.evaluate(source, params) {
        Ok(()) => Ok(interp),
        Err(err) => Err(interp.diagnostic(source).unwrap_or_else(|| {
            Diagnostic::error(err.code()).with_message(err.to_string())
        })),
    }
}

pub fn run_file(path: &str, options: RunOptions) {
    let source = read_source(path);
    tracing::debug!(params = options.params.len(), dump = options.dump, "running script");
    let interp = match run_source(&source, options.params, Rc::new(|line: String| println!("{line}"))) {
        Ok(interp) => interp,
        Err(diagnostic) => fail(path, &diagnostic),
    };

    tracing::debug!(last_return = ?interp.last_return(), "run finished");
    if let Some(value) = interp.last_return() {
        println!("=> {value}");
    }
    if options.dump {
        for (name, variable) in interp.variables().borrow().iter() {
            println!("{name} = {}", variable.render());
        }
    }
}
