//! Chained variable scopes.
//!
//! A [`Scope`] is an insertion-ordered name to [`Variable`] map plus an
//! optional parent. Reads fall through to the parent chain; structural
//! mutation (`add`, `delete`, `rename`) only touches the local map.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use indexmap::IndexMap;
use kls_expr::NameResolver;
use rustc_hash::FxBuildHasher;
use thiserror::Error;

use crate::variable::{Callback, VarKind, Variable};

/// Lookup failure on a scope chain.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("variable `{name}` is not defined in any enclosing scope")]
    NotFound { name: String },
}

fn not_found(name: &str) -> ScopeError {
    ScopeError::NotFound {
        name: name.to_owned(),
    }
}

/// A shared, single-threaded handle to a [`Scope`].
///
/// Child scopes keep their parent alive through this handle, and the
/// interpreter hands the same root to every nested invocation.
#[repr(transparent)]
pub struct SharedScope(Rc<RefCell<Scope>>);

impl SharedScope {
    #[inline]
    pub fn new(scope: Scope) -> Self {
        SharedScope(Rc::new(RefCell::new(scope)))
    }

    /// A fresh empty scope whose parent is `self`.
    pub fn child(&self) -> Self {
        SharedScope::new(Scope::with_parent(self.clone()))
    }

    /// Whether both handles point at the same scope.
    pub fn ptr_eq(&self, other: &SharedScope) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Assign through the chain, running the callback after the borrow ends
    /// so that it may read the scope again.
    pub fn assign(&self, name: &str, value: f64) -> Result<(), ScopeError> {
        let pending = self.0.borrow_mut().store(name, value)?;
        if let Some((callback, stored)) = pending {
            callback(stored);
        }
        Ok(())
    }

    pub fn value(&self, name: &str) -> Result<f64, ScopeError> {
        self.0.borrow().value(name)
    }
}

impl Clone for SharedScope {
    #[inline]
    fn clone(&self) -> Self {
        SharedScope(Rc::clone(&self.0))
    }
}

impl fmt::Debug for SharedScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedScope").field(&self.0).finish()
    }
}

impl Default for SharedScope {
    fn default() -> Self {
        SharedScope::new(Scope::new())
    }
}

impl Deref for SharedScope {
    type Target = RefCell<Scope>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl NameResolver for SharedScope {
    fn resolve(&self, name: &str) -> Option<f64> {
        self.0.try_borrow().ok()?.value(name).ok()
    }
}

/// A single level of variables.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    variables: IndexMap<String, Variable, FxBuildHasher>,
    parent: Option<SharedScope>,
}

impl Scope {
    pub fn new() -> Self {
        Scope {
            variables: IndexMap::default(),
            parent: None,
        }
    }

    pub fn with_parent(parent: SharedScope) -> Self {
        Scope {
            variables: IndexMap::default(),
            parent: Some(parent),
        }
    }

    pub fn parent(&self) -> Option<&SharedScope> {
        self.parent.as_ref()
    }

    /// Add `variable` under `name`; false if the name is already local.
    pub fn add(&mut self, name: &str, variable: Variable) -> bool {
        if self.variables.contains_key(name) {
            return false;
        }
        self.variables.insert(name.to_owned(), variable);
        true
    }

    /// Add an owned number initialized to zero.
    pub fn declare(&mut self, name: &str) -> bool {
        self.add(name, Variable::new(VarKind::Number))
    }

    pub fn delete(&mut self, name: &str) -> bool {
        self.remove(name).is_some()
    }

    /// Take a local variable out, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Variable> {
        self.variables.shift_remove(name)
    }

    /// Rename a local variable in place. Fails if `old` is not local or
    /// `new` is already taken locally.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        if old == new {
            return self.variables.contains_key(old);
        }
        if self.variables.contains_key(new) {
            return false;
        }
        let Some((index, _, variable)) = self.variables.shift_remove_full(old) else {
            return false;
        };
        let (inserted, _) = self.variables.insert_full(new.to_owned(), variable);
        self.variables.move_index(inserted, index);
        true
    }

    pub fn exists(&self, name: &str, recursive: bool) -> bool {
        if self.variables.contains_key(name) {
            return true;
        }
        match &self.parent {
            Some(parent) if recursive => parent.borrow().exists(name, true),
            _ => false,
        }
    }

    /// Local variable only.
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Local variable only.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.get_mut(name)
    }

    /// Run `f` on the nearest variable named `name`.
    pub fn with_variable<R>(
        &self,
        name: &str,
        f: impl FnOnce(&Variable) -> R,
    ) -> Result<R, ScopeError> {
        if let Some(variable) = self.variables.get(name) {
            return Ok(f(variable));
        }
        match &self.parent {
            Some(parent) => parent.borrow().with_variable(name, f),
            None => Err(not_found(name)),
        }
    }

    /// Run `f` on the nearest variable named `name`, mutably.
    pub fn with_variable_mut<R>(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut Variable) -> R,
    ) -> Result<R, ScopeError> {
        if let Some(variable) = self.variables.get_mut(name) {
            return Ok(f(variable));
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().with_variable_mut(name, f),
            None => Err(not_found(name)),
        }
    }

    pub fn value(&self, name: &str) -> Result<f64, ScopeError> {
        self.with_variable(name, Variable::to_number)
    }

    /// Assign to the nearest variable named `name` and notify its callback.
    pub fn assign(&mut self, name: &str, value: f64) -> Result<(), ScopeError> {
        if let Some((callback, stored)) = self.store(name, value)? {
            callback(stored);
        }
        Ok(())
    }

    /// Write without notifying; returns the callback still to be run.
    fn store(&mut self, name: &str, value: f64) -> Result<Option<(Callback, f64)>, ScopeError> {
        self.with_variable_mut(name, |variable| {
            variable.store(value);
            variable
                .callback()
                .map(|callback| (Rc::clone(callback), variable.to_number()))
        })
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Drop every local variable. The parent link is kept.
    pub fn clear(&mut self) {
        self.variables.clear();
    }

    /// Local variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables
            .iter()
            .map(|(name, variable)| (name.as_str(), variable))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }
}

impl NameResolver for Scope {
    fn resolve(&self, name: &str) -> Option<f64> {
        self.value(name).ok()
    }
}
