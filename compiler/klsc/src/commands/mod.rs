//! Command handlers for the `kls` binary.
//!
//! Each submodule implements one command. The `*_source` functions do the
//! work and return a [`Diagnostic`] on failure; the `*_file` wrappers read
//! the input, print results and exit with status 1 on error.

use std::io::Read;

use kls_diagnostic::Diagnostic;

mod calc;
mod check;
mod minify;
mod run;

pub use calc::{calc, calc_expression};
pub use check::{check_file, check_source};
pub use minify::minify_file;
pub use run::{run_file, run_source, RunOptions};

/// Read a script from `path`, or from stdin when `path` is `-`.
pub(crate) fn read_source(path: &str) -> String {
    let result = if path == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content).map(|_| content)
    } else {
        std::fs::read_to_string(path)
    };

    match result {
        Ok(content) => {
            tracing::debug!(path = display_name(path), bytes = content.len(), "read script");
            content
        }
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Print `diagnostic` against `path` and exit with status 1.
pub(crate) fn fail(path: &str, diagnostic: &Diagnostic) -> ! {
    tracing::debug!(code = ?diagnostic.code, "exiting with status 1");
    eprintln!("{}", diagnostic.render(display_name(path)));
    std::process::exit(1);
}

fn display_name(path: &str) -> &str {
    if path == "-" {
        "<stdin>"
    } else {
        path
    }
}
