//! Execution modes for the statement interpreter.
//!
//! `evaluate` and `validate` walk the same grammar. Statement handlers ask
//! the policy methods below which side effects to perform.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExecMode {
    /// Full execution: assignments, native calls, subroutine invocation.
    #[default]
    Execute,
    /// Dry run: checks syntax and names, declares into a throwaway scope,
    /// walks every branch linearly.
    Validate,
}

impl ExecMode {
    /// Whether assignments, native calls and `goto` actually happen.
    #[inline]
    pub fn performs_effects(self) -> bool {
        matches!(self, Self::Execute)
    }

    /// Whether `if`/`while` guards choose the branch. In validation every
    /// branch body is walked once, in source order.
    #[inline]
    pub fn follows_branches(self) -> bool {
        matches!(self, Self::Execute)
    }

    /// Whether `set` rejects read-only variables.
    #[inline]
    pub fn enforces_readonly(self) -> bool {
        matches!(self, Self::Execute)
    }

    /// Whether a pending termination request aborts the run.
    #[inline]
    pub fn observes_termination(self) -> bool {
        matches!(self, Self::Execute)
    }

    /// Whether arithmetic faults (division by zero) count as success.
    ///
    /// Validation runs with placeholder values, so a zero divisor there says
    /// nothing about the script.
    #[inline]
    pub fn tolerates_arithmetic_faults(self) -> bool {
        matches!(self, Self::Validate)
    }
}
