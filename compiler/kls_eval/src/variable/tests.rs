use super::*;
use pretty_assertions::assert_eq;
use std::cell::RefCell;

#[test]
fn test_owned_number() {
    let mut var = Variable::number(1.5);
    assert_eq!(var.kind(), VarKind::Number);
    assert!(!var.is_bound());
    var.assign(2.25);
    assert_eq!(var.to_number(), 2.25);
    assert_eq!(var.to_int(), 2);
    assert!(var.to_bool());
}

#[test]
fn test_owned_integer_truncates() {
    let mut var = Variable::integer(3);
    var.assign(7.9);
    assert_eq!(var.to_number(), 7.0);
    var.assign(-2.5);
    assert_eq!(var.to_number(), -2.0);
    assert_eq!(var.render(), "-2");
}

#[test]
fn test_owned_boolean_coerces() {
    let mut var = Variable::boolean(false);
    var.assign(0.3);
    assert_eq!(var.to_number(), 1.0);
    assert_eq!(var.render(), "true");
    var.assign(0.0);
    assert_eq!(var.render(), "false");
}

#[test]
fn test_bound_cells_write_through() {
    let speed = HostCell::new(1.0_f64);
    let count = HostCell::new(0_i32);
    let flag = HostCell::new(false);

    let mut a = Variable::bound_number(&speed);
    let mut b = Variable::bound_integer(&count);
    let mut c = Variable::bound_boolean(&flag);
    assert!(a.is_bound() && b.is_bound() && c.is_bound());

    a.assign(4.5);
    b.assign(9.7);
    c.assign(2.0);
    assert_eq!(speed.get(), 4.5);
    assert_eq!(count.get(), 9);
    assert!(flag.get());

    // host writes are visible to the variable
    count.set(-3);
    assert_eq!(b.to_number(), -3.0);
}

#[test]
fn test_clone_aliases_same_cell() {
    let cell = HostCell::new(0.0_f64);
    let var = Variable::bound_number(&cell);
    let mut copy = var.clone();
    copy.assign(8.0);
    assert_eq!(var.to_number(), 8.0);
}

#[test]
fn test_callback_sees_coerced_value() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut var = Variable::integer(0).with_callback(move |v| sink.borrow_mut().push(v));
    var.assign(2.8);
    var.assign(5.0);
    assert_eq!(*seen.borrow(), vec![2.0, 5.0]);

    var.set_callback(None);
    var.assign(1.0);
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn test_readonly_flag() {
    let mut var = Variable::number(1.0).with_readonly(true);
    assert!(var.is_readonly());
    // host writes are not restricted
    var.assign(2.0);
    assert_eq!(var.to_number(), 2.0);
    var.set_readonly(false);
    assert!(!var.is_readonly());
}

#[test]
fn test_nan_to_int_is_zero() {
    assert_eq!(Variable::number(f64::NAN).to_int(), 0);
}
