use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_symbol_roundtrip() {
    let all = [
        OperatorKind::Round,
        OperatorKind::Add,
        OperatorKind::Sub,
        OperatorKind::Mul,
        OperatorKind::Div,
        OperatorKind::Mod,
        OperatorKind::Pow,
        OperatorKind::Eq,
        OperatorKind::NotEq,
        OperatorKind::Gt,
        OperatorKind::Lt,
        OperatorKind::GtEq,
        OperatorKind::LtEq,
        OperatorKind::And,
        OperatorKind::FuzzyAnd,
        OperatorKind::Or,
        OperatorKind::FuzzyOr,
        OperatorKind::LeftBracket,
        OperatorKind::RightBracket,
    ];
    for op in all {
        assert_eq!(OperatorKind::from_symbol(op.as_symbol()), Some(op));
    }
    assert_eq!(OperatorKind::from_symbol("=="), None);
    assert_eq!(OperatorKind::from_symbol(""), None);
}

#[test]
fn test_priorities_order() {
    assert!(OperatorKind::Pow.priority() > OperatorKind::Mul.priority());
    assert!(OperatorKind::Mul.priority() > OperatorKind::Add.priority());
    assert!(OperatorKind::Add.priority() > OperatorKind::Round.priority());
    assert!(OperatorKind::Round.priority() > OperatorKind::Gt.priority());
    assert!(OperatorKind::Gt.priority() > OperatorKind::Eq.priority());
    assert!(OperatorKind::Eq.priority() > OperatorKind::Or.priority());
    assert!(OperatorKind::Or.priority() > OperatorKind::And.priority());
    assert!(OperatorKind::And.priority() > OperatorKind::LeftBracket.priority());
    assert!(FunctionKind::PRIORITY > OperatorKind::Pow.priority());
}

#[test]
fn test_arithmetic() {
    assert_eq!(OperatorKind::Add.apply(2.0, 3.0), Ok(5.0));
    assert_eq!(OperatorKind::Sub.apply(2.0, 3.0), Ok(-1.0));
    assert_eq!(OperatorKind::Mul.apply(2.0, 3.0), Ok(6.0));
    assert_eq!(OperatorKind::Div.apply(3.0, 2.0), Ok(1.5));
    assert_eq!(OperatorKind::Pow.apply(2.0, 10.0), Ok(1024.0));
}

#[test]
fn test_mod_truncates_operands() {
    assert_eq!(OperatorKind::Mod.apply(7.9, 3.2), Ok(1.0));
    assert_eq!(OperatorKind::Mod.apply(-7.0, 3.0), Ok(-1.0));
}

#[test]
fn test_division_by_zero() {
    assert_eq!(OperatorKind::Div.apply(1.0, 0.0), Err(ExprError::DivisionByZero));
    assert_eq!(OperatorKind::Mod.apply(1.0, 0.0), Err(ExprError::DivisionByZero));
    // divisor truncates to zero
    assert_eq!(OperatorKind::Mod.apply(5.0, 0.5), Err(ExprError::DivisionByZero));
}

#[test]
fn test_round() {
    assert_eq!(OperatorKind::Round.apply(2.567, 0.0), Ok(3.0));
    assert_eq!(OperatorKind::Round.apply(2.567, 1.0), Ok(2.6));
    assert_eq!(OperatorKind::Round.apply(2.567, 2.0), Ok(2.57));
    assert_eq!(OperatorKind::Round.apply(1234.0, -2.0), Ok(1200.0));
}

#[test]
fn test_comparison_and_logic() {
    assert_eq!(OperatorKind::Gt.apply(3.0, 2.0), Ok(1.0));
    assert_eq!(OperatorKind::LtEq.apply(3.0, 2.0), Ok(0.0));
    assert_eq!(OperatorKind::NotEq.apply(1.0, 1.0), Ok(0.0));
    assert_eq!(OperatorKind::And.apply(2.0, -1.0), Ok(1.0));
    assert_eq!(OperatorKind::And.apply(2.0, 0.0), Ok(0.0));
    assert_eq!(OperatorKind::Or.apply(0.0, 0.5), Ok(1.0));
    assert_eq!(OperatorKind::FuzzyAnd.apply(0.3, 0.7), Ok(0.3));
    assert_eq!(OperatorKind::FuzzyOr.apply(0.3, 0.7), Ok(0.7));
}

#[test]
fn test_functions() {
    assert_eq!(FunctionKind::from_name("sqrt"), Some(FunctionKind::Sqrt));
    assert_eq!(FunctionKind::from_name("SQRT"), None);
    assert_eq!(FunctionKind::Sqrt.apply(9.0), 3.0);
    assert!((FunctionKind::Log.apply(1000.0) - 3.0).abs() < 1e-12);
    assert_eq!(FunctionKind::Ln.apply(1.0), 0.0);
    assert_eq!(FunctionKind::Abs.apply(-2.5), 2.5);
    assert_eq!(FunctionKind::Not.apply(0.0), 1.0);
    assert_eq!(FunctionKind::Not.apply(3.0), 0.0);
    assert_eq!(FunctionKind::Minus.apply(4.0), -4.0);
}

#[test]
fn test_token_priority() {
    assert_eq!(Token::Value(1.0).priority(), 0);
    assert_eq!(Token::Function(FunctionKind::Sin).priority(), 100);
    assert_eq!(Token::Operator(OperatorKind::Mul).priority(), 33);
    assert!(Token::Operator(OperatorKind::LeftBracket).is_left_bracket());
    assert_eq!(Token::Function(FunctionKind::Minus).symbol(), "minus");
}
