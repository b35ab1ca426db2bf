//! Native stack headroom for nested subroutines.
//!
//! A `goto` runs the callee body through a recursive call to the statement
//! loop, and validating a `define` walks its body the same way. Recursion
//! depth is capped by `max_call_depth` (checked in `invoke`); this module
//! only makes sure that many levels fit on the native stack.

/// `goto` nesting allowed unless the builder sets another limit.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Run `f`, first moving to a fresh stack segment if the current one is
/// nearly used up. Wraps every recursive entry into the statement loop.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    // One statement loop level with an expression evaluation stays well
    // below this.
    const HEADROOM: usize = 128 * 1024;
    const SEGMENT: usize = 1024 * 1024;

    stacker::maybe_grow(HEADROOM, SEGMENT, f)
}

/// wasm32 has no stack switching; the call depth limit is the only guard.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
