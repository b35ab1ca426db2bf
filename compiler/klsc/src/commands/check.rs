//! The `check` command: validate a script without running it.

use std::rc::Rc;

use kls_diagnostic::Diagnostic;
use kls_eval::Interpreter;

use super::{fail, read_source};
use crate::host_bindings;

pub fn check_source(source: &str) -> Result<(), Diagnostic> {
    let mut interp = Interpreter::builder()
        .bindings(host_bindings(Rc::new(|_: String| {})))
        .build();

    interp.validate(source, None).map_err(|err| {
        interp
            .diagnostic(source)
            .unwrap_or_else(|| Diagnostic::error(err.code()).with_message(err.to_string()))
    })
}

pub fn check_file(path: &str) {
    let source = read_source(path);
    if let Err(diagnostic) = check_source(&source) {
        fail(path, &diagnostic);
    }
    tracing::debug!("script validated");
    println!("ok");
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_check_accepts_host_calls() {
        assert_eq!(check_source("var x; set x 2; call print x;"), Ok(()));
    }

    #[test]
    fn test_check_reports_unbalanced_blocks() {
        let diagnostic = check_source("if 1;\n  call print 1;\n").unwrap_err();
        assert_eq!(diagnostic.code.as_str(), "E1003");
    }
}
