//! Single-pass tokenizer with inline precedence resolution.
//!
//! Emits tokens in Reverse-Polish order. Operators wait on a working stack
//! and are drained into the output while the stack top binds at least as
//! tightly as the incoming operator (left-associative on ties). Prefix
//! functions are pushed without draining so that chains like `- -3` or
//! `sin -x` bind to the operand on their right.

use smallvec::SmallVec;

use crate::operators::{FunctionKind, OperatorKind, Token};
use crate::{ExprError, NameResolver};

/// Output queue of the tokenizer, in RPN order.
pub type RpnQueue = SmallVec<[Token; 16]>;

/// Tokenize `source` into RPN.
///
/// Identifiers that are not built-in functions are looked up in `resolver`
/// and replaced by their current value immediately. Without a resolver every
/// such identifier is an [`ExprError::UnknownExpression`].
pub fn to_rpn(source: &str, resolver: Option<&dyn NameResolver>) -> Result<RpnQueue, ExprError> {
    check_brackets(source)?;

    let bytes = source.as_bytes();
    let mut output = RpnQueue::new();
    let mut stack: SmallVec<[Token; 8]> = SmallVec::new();
    // true at the start and after any operator, bracket or function name
    let mut after_operator = true;
    let mut pos = 0;

    while let Some(&byte) = bytes.get(pos) {
        if byte.is_ascii_whitespace() {
            pos += 1;
            continue;
        }
        let start = pos;

        match byte {
            b'0'..=b'9' => {
                pos = eat_while(bytes, pos, |b| b.is_ascii_digit() || b == b'.');
                let text = &source[start..pos];
                let value = text
                    .parse::<f64>()
                    .map_err(|_| ExprError::UnknownExpression {
                        name: text.to_owned(),
                    })?;
                output.push(Token::Value(value));
                after_operator = false;
            }
            b if is_ident_start(b) => {
                pos = eat_while(bytes, pos, is_ident_continue);
                let name = &source[start..pos];
                if let Some(func) = FunctionKind::from_name(name) {
                    stack.push(Token::Function(func));
                    after_operator = true;
                } else {
                    let value = resolver.and_then(|r| r.resolve(name)).ok_or_else(|| {
                        ExprError::UnknownExpression {
                            name: name.to_owned(),
                        }
                    })?;
                    output.push(Token::Value(value));
                    after_operator = false;
                }
            }
            b'(' => {
                pos += 1;
                stack.push(Token::Operator(OperatorKind::LeftBracket));
                after_operator = true;
            }
            b')' => {
                pos += 1;
                loop {
                    match stack.pop() {
                        None => return Err(ExprError::ExpectedBracket),
                        Some(token) if token.is_left_bracket() => break,
                        Some(token) => output.push(token),
                    }
                }
                after_operator = false;
            }
            b'-' if after_operator => {
                pos += 1;
                stack.push(Token::Function(FunctionKind::Minus));
            }
            _ => {
                pos = if is_single_operator(byte) {
                    pos + 1
                } else {
                    eat_while(bytes, pos, is_symbol_continue)
                };
                let symbol = &source[start..pos];
                let op = OperatorKind::from_symbol(symbol).ok_or_else(|| {
                    ExprError::UnknownOperator {
                        symbol: symbol.to_owned(),
                    }
                })?;
                if after_operator {
                    return Err(ExprError::UnexpectedOperator {
                        symbol: symbol.to_owned(),
                    });
                }
                while let Some(&top) = stack.last() {
                    if op.priority() > top.priority() {
                        break;
                    }
                    output.push(top);
                    stack.pop();
                }
                stack.push(Token::Operator(op));
                after_operator = true;
            }
        }
    }

    while let Some(token) = stack.pop() {
        output.push(token);
    }

    tracing::trace!(expression = source, tokens = output.len(), "tokenized expression");
    Ok(output)
}

fn check_brackets(source: &str) -> Result<(), ExprError> {
    let opening = source.bytes().filter(|&b| b == b'(').count();
    let closing = source.bytes().filter(|&b| b == b')').count();
    if opening == closing {
        Ok(())
    } else {
        Err(ExprError::BracketsNotEqual { opening, closing })
    }
}

#[inline]
fn eat_while(bytes: &[u8], mut pos: usize, pred: impl Fn(u8) -> bool) -> usize {
    while bytes.get(pos).is_some_and(|&b| pred(b)) {
        pos += 1;
    }
    pos
}

#[inline]
fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

#[inline]
fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Arithmetic operators that always form a token on their own.
#[inline]
fn is_single_operator(byte: u8) -> bool {
    matches!(byte, b'+' | b'-' | b'*' | b'/' | b'%' | b'^')
}

/// Multi-character symbol runs (`>=`, `!=`, ...) stop at anything else.
#[inline]
fn is_symbol_continue(byte: u8) -> bool {
    !(byte.is_ascii_whitespace()
        || byte.is_ascii_digit()
        || is_ident_continue(byte)
        || byte == b'('
        || byte == b')'
        || is_single_operator(byte))
}
