//! Operator and function tables.
//!
//! Symbols map to kinds at tokenize time and kinds map to behavior at fold
//! time.
//!
//! Priorities (higher binds tighter):
//! - 100: prefix functions (`sin`, `not`, unary `-`, ...)
//! - 34: `^`
//! - 33: `*` `/` `%`
//! - 32: `+` `-`
//! - 31: `~`
//! - 22: `>` `<` `>=` `<=`
//! - 21: `=` `!=`
//! - 12: `|` `?`
//! - 11: `&` `@`
//! - 1: brackets (only ever removed by bracket matching)

use crate::ExprError;

/// Binary operators and bracket markers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OperatorKind {
    // Arithmetic
    Round,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,

    // Comparison
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,

    // Logical
    And,
    FuzzyAnd,
    Or,
    FuzzyOr,

    // Grouping
    LeftBracket,
    RightBracket,
}

impl OperatorKind {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Round => "~",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
            Self::And => "&",
            Self::FuzzyAnd => "@",
            Self::Or => "|",
            Self::FuzzyOr => "?",
            Self::LeftBracket => "(",
            Self::RightBracket => ")",
        }
    }

    /// Look up an operator by its exact symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "~" => Self::Round,
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Mod,
            "^" => Self::Pow,
            "=" => Self::Eq,
            "!=" => Self::NotEq,
            ">" => Self::Gt,
            "<" => Self::Lt,
            ">=" => Self::GtEq,
            "<=" => Self::LtEq,
            "&" => Self::And,
            "@" => Self::FuzzyAnd,
            "|" => Self::Or,
            "?" => Self::FuzzyOr,
            "(" => Self::LeftBracket,
            ")" => Self::RightBracket,
            _ => return None,
        })
    }

    pub const fn priority(self) -> u8 {
        match self {
            Self::Pow => 34,
            Self::Mul | Self::Div | Self::Mod => 33,
            Self::Add | Self::Sub => 32,
            Self::Round => 31,
            Self::Gt | Self::Lt | Self::GtEq | Self::LtEq => 22,
            Self::Eq | Self::NotEq => 21,
            Self::Or | Self::FuzzyOr => 12,
            Self::And | Self::FuzzyAnd => 11,
            Self::LeftBracket | Self::RightBracket => 1,
        }
    }

    /// Apply the operator to `a <op> b`.
    ///
    /// Comparisons and crisp logic yield `1.0`/`0.0`. `%` truncates both
    /// operands to integers first; `/` and `%` reject a zero divisor.
    pub fn apply(self, a: f64, b: f64) -> Result<f64, ExprError> {
        Ok(match self {
            Self::Round => round_to(a, b),
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => {
                if b == 0.0 {
                    return Err(ExprError::DivisionByZero);
                }
                a / b
            }
            Self::Mod => {
                let (a, b) = (a.trunc(), b.trunc());
                if b == 0.0 {
                    return Err(ExprError::DivisionByZero);
                }
                a % b
            }
            Self::Pow => a.powf(b),
            Self::Eq => truth(a == b),
            Self::NotEq => truth(a != b),
            Self::Gt => truth(a > b),
            Self::Lt => truth(a < b),
            Self::GtEq => truth(a >= b),
            Self::LtEq => truth(a <= b),
            Self::And => truth(is_true(a) && is_true(b)),
            Self::Or => truth(is_true(a) || is_true(b)),
            Self::FuzzyAnd => a.min(b),
            Self::FuzzyOr => a.max(b),
            Self::LeftBracket | Self::RightBracket => {
                return Err(ExprError::UnexpectedOperator {
                    symbol: self.as_symbol().to_owned(),
                })
            }
        })
    }
}

/// Prefix functions taking a single operand.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FunctionKind {
    Sin,
    Cos,
    Tan,
    Abs,
    Exp,
    Sqrt,
    Log,
    Ln,
    Not,
    Minus,
}

impl FunctionKind {
    pub const PRIORITY: u8 = 100;

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Abs => "abs",
            Self::Exp => "exp",
            Self::Sqrt => "sqrt",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Not => "not",
            Self::Minus => "minus",
        }
    }

    /// Look up a function by name (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "abs" => Self::Abs,
            "exp" => Self::Exp,
            "sqrt" => Self::Sqrt,
            "log" => Self::Log,
            "ln" => Self::Ln,
            "not" => Self::Not,
            "minus" => Self::Minus,
            _ => return None,
        })
    }

    pub fn apply(self, a: f64) -> f64 {
        match self {
            Self::Sin => a.sin(),
            Self::Cos => a.cos(),
            Self::Tan => a.tan(),
            Self::Abs => a.abs(),
            Self::Exp => a.exp(),
            Self::Sqrt => a.sqrt(),
            Self::Log => a.log10(),
            Self::Ln => a.ln(),
            Self::Not => truth(!is_true(a)),
            Self::Minus => -a,
        }
    }
}

/// One element of the RPN queue.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Token {
    Value(f64),
    Operator(OperatorKind),
    Function(FunctionKind),
}

impl Token {
    pub fn priority(&self) -> u8 {
        match self {
            Token::Value(_) => 0,
            Token::Operator(op) => op.priority(),
            Token::Function(_) => FunctionKind::PRIORITY,
        }
    }

    pub fn is_left_bracket(&self) -> bool {
        matches!(self, Token::Operator(OperatorKind::LeftBracket))
    }

    /// Symbol or name used when reporting this token.
    pub fn symbol(&self) -> &'static str {
        match self {
            Token::Value(_) => "value",
            Token::Operator(op) => op.as_symbol(),
            Token::Function(func) => func.name(),
        }
    }
}

/// Numeric truthiness: anything but zero is true (NaN included).
#[inline]
pub(crate) fn is_true(value: f64) -> bool {
    value != 0.0
}

#[inline]
fn truth(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

fn round_to(value: f64, places: f64) -> f64 {
    // `places` is truncated like an integer parameter
    let places = places.trunc();
    if places == 0.0 {
        return value.round();
    }
    let factor = 10f64.powf(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests;
