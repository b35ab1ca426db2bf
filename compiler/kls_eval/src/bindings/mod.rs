//! Native function table used by the `call` statement.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Host function: receives the evaluated arguments, returns the call result.
pub type NativeFn = Rc<dyn Fn(&[f64]) -> f64>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("no native binding named `{name}`")]
    Undefined { name: String },
}

/// Name to native function dispatch table.
#[derive(Clone, Default)]
pub struct Bindings {
    entries: FxHashMap<String, NativeFn>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `func`; false if `name` is empty or already bound.
    pub fn add(&mut self, name: &str, func: impl Fn(&[f64]) -> f64 + 'static) -> bool {
        if name.is_empty() || self.entries.contains_key(name) {
            return false;
        }
        self.entries.insert(name.to_owned(), Rc::new(func));
        true
    }

    /// Replace the function of an existing binding; false if absent.
    pub fn update(&mut self, name: &str, func: impl Fn(&[f64]) -> f64 + 'static) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                *entry = Rc::new(func);
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<NativeFn> {
        self.entries.get(name).cloned()
    }

    pub fn call(&self, name: &str, args: &[f64]) -> Result<f64, BindingError> {
        let func = self.entries.get(name).ok_or_else(|| BindingError::Undefined {
            name: name.to_owned(),
        })?;
        Ok(func(args))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bound names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NativeFn)> {
        self.entries.iter().map(|(name, func)| (name.as_str(), func))
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
