//! Identifier lookup seam between the evaluator and whatever owns variables.

use std::collections::HashMap;
use std::hash::BuildHasher;

/// Resolves a bare identifier to its current numeric value.
///
/// The tokenizer substitutes the value at the point the identifier is read,
/// so resolution is eager and happens at most once per occurrence.
pub trait NameResolver {
    fn resolve(&self, name: &str) -> Option<f64>;
}

impl<S: BuildHasher> NameResolver for HashMap<String, f64, S> {
    fn resolve(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<R: NameResolver + ?Sized> NameResolver for &R {
    fn resolve(&self, name: &str) -> Option<f64> {
        (**self).resolve(name)
    }
}
