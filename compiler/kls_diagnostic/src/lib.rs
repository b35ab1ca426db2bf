//! Diagnostic support for the klscript engine.
//!
//! - Error codes for searchability (`E0xxx` expression, `E1xxx` script)
//! - Clear messages (what went wrong)
//! - Line and column of the position where processing stopped
//!
//! The expression evaluator and the statement interpreter both map their
//! typed errors onto an [`ErrorCode`]; hosts turn the last error of an
//! interpreter run into a [`Diagnostic`] for display.

mod diagnostic;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Location, Severity};
pub use error_code::ErrorCode;
pub use span_utils::LineOffsetTable;
