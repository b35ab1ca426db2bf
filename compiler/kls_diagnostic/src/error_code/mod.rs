//! Error codes for all engine diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1003`) with the first digit
//! indicating the layer that produced it.

use std::fmt;

/// Error codes for all engine diagnostics.
///
/// Format: E#### where first digit indicates the layer:
/// - E0xxx: Expression evaluator errors
/// - E1xxx: Statement interpreter errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Expression Errors (E0xxx)
    /// Operator where an operand was expected
    E0001,
    /// Unknown operator symbol
    E0002,
    /// Unknown identifier or function
    E0003,
    /// Closing bracket without an opening one
    E0004,
    /// Operator or function is missing operands
    E0005,
    /// Operands left over without an operator joining them
    E0006,
    /// Unequal number of opening and closing brackets
    E0007,
    /// Division or modulo by zero
    E0008,
    /// Expression without any operand
    E0009,

    // Script Errors (E1xxx)
    /// Undefined variable
    E1001,
    /// Undefined native binding or subroutine
    E1002,
    /// Missing `fi`
    E1003,
    /// Missing `done`
    E1004,
    /// Missing `end`
    E1005,
    /// Missing `;`
    E1006,
    /// Subroutine without a body
    E1007,
    /// Empty statement or empty name
    E1008,
    /// Unknown statement keyword
    E1009,
    /// Empty or whitespace-only script
    E1010,
    /// Malformed statement parameters
    E1011,
    /// Expression inside a statement failed
    E1012,
    /// Assignment to a read-only variable
    E1013,
    /// Script stopped by a termination request
    E1014,
    /// Subroutine nesting too deep
    E1015,
}

impl ErrorCode {
    /// Every error code, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E0008,
        ErrorCode::E0009,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        ErrorCode::E1009,
        ErrorCode::E1010,
        ErrorCode::E1011,
        ErrorCode::E1012,
        ErrorCode::E1013,
        ErrorCode::E1014,
        ErrorCode::E1015,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E0008 => "E0008",
            ErrorCode::E0009 => "E0009",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E1011 => "E1011",
            ErrorCode::E1012 => "E1012",
            ErrorCode::E1013 => "E1013",
            ErrorCode::E1014 => "E1014",
            ErrorCode::E1015 => "E1015",
        }
    }

    /// Short description used by `--explain`-style listings.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unexpected operator",
            ErrorCode::E0002 => "unknown operator",
            ErrorCode::E0003 => "unknown expression",
            ErrorCode::E0004 => "expected bracket",
            ErrorCode::E0005 => "not enough parameters",
            ErrorCode::E0006 => "too many parameters",
            ErrorCode::E0007 => "brackets not equal",
            ErrorCode::E0008 => "division by zero",
            ErrorCode::E0009 => "empty expression",
            ErrorCode::E1001 => "undefined variable",
            ErrorCode::E1002 => "undefined function",
            ErrorCode::E1003 => "expected `fi`",
            ErrorCode::E1004 => "expected `done`",
            ErrorCode::E1005 => "expected `end`",
            ErrorCode::E1006 => "expected `;`",
            ErrorCode::E1007 => "empty function",
            ErrorCode::E1008 => "empty expression",
            ErrorCode::E1009 => "unknown statement",
            ErrorCode::E1010 => "wrong script code",
            ErrorCode::E1011 => "wrong parameters",
            ErrorCode::E1012 => "wrong evaluation",
            ErrorCode::E1013 => "variable is read-only",
            ErrorCode::E1014 => "script terminated",
            ErrorCode::E1015 => "call depth exceeded",
        }
    }

    /// Check if this is an expression evaluator error (E0xxx).
    pub fn is_expression_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Check if this is a statement interpreter error (E1xxx).
    pub fn is_script_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ErrorCode {
    type Err = ();

    /// Parse an error code string like `"E1003"` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == upper)
            .ok_or(())
    }
}
