//! End-to-end tests through the host-facing interpreter API.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;

use kls_eval::{
    minify, Bindings, HostCell, Interpreter, Scope, ScriptError, SharedScope, VarKind, Variable,
};
use pretty_assertions::assert_eq;

const COUNTDOWN: &str = "
    # sum the even numbers below `limit`
    var i, acc;
    set i 0;
    set acc 0;
    while i < limit;
        if i % 2 = 0;
            set acc acc + i;
        else;
            call tick i;
        fi;
        set i i + 1;
    done;
    export acc;
";

fn counting_bindings() -> (Bindings, Rc<Cell<u32>>) {
    let ticks = Rc::new(Cell::new(0));
    let mut bindings = Bindings::new();
    let counter = Rc::clone(&ticks);
    bindings.add("tick", move |_| {
        counter.set(counter.get() + 1);
        0.0
    });
    (bindings, ticks)
}

#[test]
fn host_variables_drive_scripts() {
    let (bindings, ticks) = counting_bindings();
    let mut interp = Interpreter::builder().bindings(bindings).build();
    interp
        .variables()
        .borrow_mut()
        .add("limit", Variable::integer(7).with_readonly(true));

    interp.evaluate(COUNTDOWN, None).unwrap();

    assert_eq!(interp.variables().value("acc"), Ok(12.0));
    assert_eq!(ticks.get(), 3);
    assert!(!interp.variables().borrow().exists("i", true));
}

#[test]
fn validation_has_no_side_effects() {
    let (bindings, ticks) = counting_bindings();
    let mut interp = Interpreter::builder().bindings(bindings).build();
    interp
        .variables()
        .borrow_mut()
        .add("limit", Variable::number(7.0));

    assert_eq!(interp.validate(COUNTDOWN, None), Ok(()));
    assert_eq!(ticks.get(), 0);
    assert!(!interp.variables().borrow().exists("acc", true));
    assert_eq!(interp.variables().value("limit"), Ok(7.0));
}

#[test]
fn readonly_variables_reject_assignment() {
    let mut interp = Interpreter::new();
    interp
        .variables()
        .borrow_mut()
        .add("k", Variable::number(3.0).with_readonly(true));

    assert_eq!(
        interp.evaluate("set k 4;", None),
        Err(ScriptError::VariableReadonly { name: "k".to_owned() })
    );
    assert_eq!(interp.variables().value("k"), Ok(3.0));

    // validation does not enforce the flag
    assert_eq!(interp.validate("set k 4;", None), Ok(()));
}

#[test]
fn undefined_call_is_reported() {
    let mut interp = Interpreter::new();
    assert_eq!(
        interp.evaluate("call nosuch;", None),
        Err(ScriptError::UndefinedFunction { name: "nosuch".to_owned() })
    );
    assert_eq!(
        interp.evaluate("var a, b; call nosuch a, b;", None),
        Err(ScriptError::UndefinedFunction { name: "nosuch".to_owned() })
    );
    assert_eq!(
        interp.evaluate("goto nosuch;", None),
        Err(ScriptError::UndefinedFunction { name: "nosuch".to_owned() })
    );
}

#[test]
fn host_cells_see_script_writes() {
    let speed = HostCell::new(0.0_f64);
    let gear = HostCell::new(0_i32);
    let running = HostCell::new(false);

    let mut interp = Interpreter::new();
    {
        let mut vars = interp.variables().borrow_mut();
        vars.add("speed", Variable::bound_number(&speed));
        vars.add("gear", Variable::bound_integer(&gear));
        vars.add("running", Variable::bound_boolean(&running));
    }

    interp
        .evaluate("set speed 12.5; set gear 2.9; set running speed > 10;", None)
        .unwrap();
    assert_eq!(speed.get(), 12.5);
    assert_eq!(gear.get(), 2);
    assert!(running.get());

    // host writes are visible to the next run
    gear.set(5);
    interp.evaluate("set speed gear * 2;", None).unwrap();
    assert_eq!(speed.get(), 10.0);
}

#[test]
fn callbacks_fire_on_every_assignment() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut interp = Interpreter::new();
    interp.variables().borrow_mut().add(
        "flag",
        Variable::new(VarKind::Boolean).with_callback(move |value| sink.borrow_mut().push(value)),
    );

    interp
        .evaluate("set flag 1; set flag 0; set flag 42;", None)
        .unwrap();
    assert_eq!(*seen.borrow(), vec![1.0, 0.0, 1.0]);
}

#[test]
fn callbacks_may_read_the_scope() {
    let root = SharedScope::default();
    let observed = Rc::new(Cell::new(f64::NAN));
    let (scope, out) = (root.clone(), Rc::clone(&observed));
    root.borrow_mut().declare("other");
    root.borrow_mut().add(
        "x",
        Variable::number(0.0).with_callback(move |_| out.set(scope.value("other").unwrap_or(-1.0))),
    );

    let mut interp = Interpreter::with_parent(root.clone());
    interp.evaluate("set other 3; set x 1;", None).unwrap();
    assert_eq!(observed.get(), 3.0);
}

#[test]
fn parent_scope_is_shared_with_the_host() {
    let globals = SharedScope::new(Scope::new());
    globals.borrow_mut().add("gain", Variable::number(2.0));

    let mut first = Interpreter::with_parent(globals.clone());
    let mut second = Interpreter::with_parent(globals.clone());

    first.evaluate("set gain gain * 3;", None).unwrap();
    second.evaluate("set gain gain + 1;", None).unwrap();
    assert_eq!(globals.value("gain"), Ok(7.0));

    // exports land in each interpreter's own root, not in the parent
    first.evaluate("var mine; export mine;", None).unwrap();
    assert!(first.variables().borrow().exists("mine", false));
    assert!(!globals.borrow().exists("mine", false));
}

#[test]
fn terminate_from_a_binding() {
    let mut interp = Interpreter::new();
    interp.variables().borrow_mut().declare("n");
    let handle = interp.terminate_handle();
    interp.bindings_mut().add("stop", move |_| {
        handle.terminate();
        0.0
    });

    let result = interp.evaluate("while 1; set n n + 1; if n = 5; call stop; fi; done;", None);
    assert_eq!(result, Err(ScriptError::ScriptTerminated));
    assert_eq!(interp.variables().value("n"), Ok(5.0));

    // the flag does not leak into the next run
    interp.evaluate("set n 0;", None).unwrap();
    assert_eq!(interp.variables().value("n"), Ok(0.0));
}

#[test]
fn terminate_from_another_thread() {
    let (ready_tx, ready_rx) = mpsc::channel::<()>();
    let handle = {
        let mut interp = Interpreter::new();
        let handle = interp.terminate_handle();
        interp.bindings_mut().add("ready", move |_| {
            ready_tx.send(()).ok();
            0.0
        });

        let watcher = thread::spawn({
            let handle = handle.clone();
            move || {
                ready_rx.recv().unwrap();
                handle.terminate();
            }
        });

        let result = interp.evaluate("call ready; while 1; done;", None);
        watcher.join().unwrap();
        assert_eq!(result, Err(ScriptError::ScriptTerminated));
        handle
    };
    assert!(handle.is_requested());
}

#[test]
fn subroutines_share_root_and_bindings() {
    let mut bindings = Bindings::new();
    bindings.add("max", |args| args.iter().copied().fold(f64::MIN, f64::max));
    let mut interp = Interpreter::builder().bindings(bindings).build();

    let script = "
        define clamp;
            pop value, top;
            call max value, 0;
            if return > top;
                return top;
            fi;
            return return;
        end;
        export out;
        goto clamp 15, 10;
        set out return;
    ";
    interp.evaluate(script, None).unwrap();
    assert_eq!(interp.variables().value("out"), Ok(10.0));

    interp.evaluate("goto clamp -4, 10; set out return;", None).unwrap();
    assert_eq!(interp.variables().value("out"), Ok(0.0));
}

#[test]
fn recursion_through_goto() {
    let mut interp = Interpreter::new();
    let script = "
        define fact;
            pop n;
            if n < 2;
                return 1;
            fi;
            goto fact n - 1;
            return n * return;
        end;
        export out;
        goto fact 6;
        set out return;
    ";
    interp.evaluate(script, None).unwrap();
    assert_eq!(interp.variables().value("out"), Ok(720.0));
}

#[test]
fn runaway_recursion_is_bounded() {
    let mut interp = Interpreter::builder().max_call_depth(64).build();
    let err = interp
        .evaluate("define loop; goto loop; end; goto loop;", None)
        .unwrap_err();
    assert_eq!(
        err,
        ScriptError::CallDepthExceeded { name: "loop".to_owned(), limit: 64 }
    );
}

#[test]
fn minified_scripts_behave_the_same() {
    let (bindings, _) = counting_bindings();
    let mut plain = Interpreter::builder().bindings(bindings).build();
    let (bindings, _) = counting_bindings();
    let mut small = Interpreter::builder().bindings(bindings).build();
    for interp in [&plain, &small] {
        interp.variables().borrow_mut().add("limit", Variable::number(9.0));
    }

    let minified = minify(COUNTDOWN);
    assert!(minified.len() < COUNTDOWN.len());
    assert!(!minified.contains('#'));

    plain.evaluate(COUNTDOWN, None).unwrap();
    small.evaluate(&minified, None).unwrap();
    assert_eq!(
        plain.variables().value("acc"),
        small.variables().value("acc")
    );
}

#[test]
fn diagnostics_point_at_the_failing_line() {
    let mut interp = Interpreter::new();
    let script = "var a;\nset a 1;\nset a (2 + ;\n";
    let err = interp.evaluate(script, None).unwrap_err();
    assert_eq!(err.code().as_str(), "E1012");
    assert_eq!(interp.line(script), 3);

    let rendered = interp.diagnostic(script).unwrap().render("demo.kls");
    assert!(rendered.starts_with("error [E1012]"));
    assert!(rendered.contains("demo.kls:3:"));
    assert!(rendered.contains("note:"));
}
