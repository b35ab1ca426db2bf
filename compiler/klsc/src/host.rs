//! Native bindings offered to scripts run from the command line.

use std::rc::Rc;

use kls_eval::Bindings;

/// Receives each line a script prints.
pub type OutputSink = Rc<dyn Fn(String)>;

/// `print a, b, ...` writes its arguments space-separated and returns how
/// many there were. `min`/`max` fold their arguments; with no arguments
/// they return NaN.
pub fn host_bindings(sink: OutputSink) -> Bindings {
    let mut bindings = Bindings::new();

    bindings.add("print", move |args| {
        let line = args
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        sink(line);
        args.len() as f64
    });
    bindings.add("min", |args| fold(args, f64::min));
    bindings.add("max", |args| fold(args, f64::max));

    bindings
}

fn fold(args: &[f64], op: fn(f64, f64) -> f64) -> f64 {
    args.iter().copied().reduce(op).unwrap_or(f64::NAN)
}
