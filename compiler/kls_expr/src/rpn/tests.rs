use super::*;
use pretty_assertions::assert_eq;

use crate::{FunctionKind, OperatorKind};

#[test]
fn test_single_value() {
    assert_eq!(eval_rpn(&[Token::Value(4.0)]), Ok(4.0));
}

#[test]
fn test_operand_order() {
    let tokens = [
        Token::Value(10.0),
        Token::Value(4.0),
        Token::Operator(OperatorKind::Sub),
    ];
    assert_eq!(eval_rpn(&tokens), Ok(6.0));
}

#[test]
fn test_function() {
    let tokens = [Token::Value(16.0), Token::Function(FunctionKind::Sqrt)];
    assert_eq!(eval_rpn(&tokens), Ok(4.0));
}

#[test]
fn test_not_enough_parameters() {
    assert_eq!(
        eval_rpn(&[Token::Value(1.0), Token::Operator(OperatorKind::Add)]),
        Err(ExprError::NotEnoughParameters { symbol: "+" })
    );
    assert_eq!(
        eval_rpn(&[Token::Function(FunctionKind::Minus)]),
        Err(ExprError::NotEnoughParameters { symbol: "minus" })
    );
}

#[test]
fn test_leftover_operands() {
    assert_eq!(
        eval_rpn(&[Token::Value(1.0), Token::Value(2.0)]),
        Err(ExprError::TooManyParameters { count: 2 })
    );
}

#[test]
fn test_empty_queue() {
    assert_eq!(eval_rpn(&[]), Err(ExprError::EmptyExpression));
}

#[test]
fn test_operator_error_propagates() {
    let tokens = [
        Token::Value(1.0),
        Token::Value(0.0),
        Token::Operator(OperatorKind::Div),
    ];
    assert_eq!(eval_rpn(&tokens), Err(ExprError::DivisionByZero));
}
