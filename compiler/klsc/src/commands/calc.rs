//! The `calc` command: evaluate a single expression.

use std::collections::HashMap;

use kls_diagnostic::Diagnostic;
use kls_expr::NameResolver;

use super::fail;

/// Evaluate `expr` with `vars` as the only visible names.
pub fn calc_expression(expr: &str, vars: &HashMap<String, f64>) -> Result<f64, Diagnostic> {
    kls_expr::evaluate(expr, Some(vars as &dyn NameResolver)).map_err(|err| {
        Diagnostic::error(err.code())
            .with_message(err.to_string())
            .with_note(format!("in expression `{}`", expr.trim()))
    })
}

/// `kls calc <expr> [name=value ...]`
pub fn calc(expr: &str, bindings: &[String]) {
    let mut vars = HashMap::new();
    for binding in bindings {
        let parsed = binding
            .split_once('=')
            .and_then(|(name, value)| Some((name.trim(), value.trim().parse::<f64>().ok()?)));
        let Some((name, value)) = parsed else {
            eprintln!("error: expected `name=value`, found '{binding}'");
            std::process::exit(1);
        };
        vars.insert(name.to_owned(), value);
    }

    match calc_expression(expr, &vars) {
        Ok(value) => println!("{value}"),
        Err(diagnostic) => fail("<expr>", &diagnostic),
    }
}
