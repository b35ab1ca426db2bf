//! Typed script variables, optionally aliasing host-owned cells.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Declared type of a variable. Fixed at creation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum VarKind {
    Boolean,
    Integer,
    #[default]
    Number,
}

/// A host-owned value that script variables can alias.
///
/// Writes from a script land in the cell and host writes are visible to the
/// next expression that reads the variable.
pub struct HostCell<T: Copy>(Rc<Cell<T>>);

impl<T: Copy> HostCell<T> {
    pub fn new(value: T) -> Self {
        HostCell(Rc::new(Cell::new(value)))
    }

    #[inline]
    pub fn get(&self) -> T {
        self.0.get()
    }

    #[inline]
    pub fn set(&self, value: T) {
        self.0.set(value);
    }
}

impl<T: Copy> Clone for HostCell<T> {
    fn clone(&self) -> Self {
        HostCell(Rc::clone(&self.0))
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for HostCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HostCell").field(&self.0.get()).finish()
    }
}

/// Change notification, called with the value after every mutation.
pub type Callback = Rc<dyn Fn(f64)>;

#[derive(Clone, Debug)]
enum Storage {
    Owned(f64),
    Boolean(HostCell<bool>),
    Integer(HostCell<i32>),
    Number(HostCell<f64>),
}

/// One slot in a [`Scope`](crate::Scope).
///
/// Values are always read and written as `f64`; writes are coerced to the
/// declared kind (integers truncate, booleans become `value != 0`).
/// Cloning a bound variable aliases the same host cell.
#[derive(Clone)]
pub struct Variable {
    kind: VarKind,
    storage: Storage,
    readonly: bool,
    callback: Option<Callback>,
}

impl Variable {
    /// Owned variable of `kind`, initialized to zero.
    pub fn new(kind: VarKind) -> Self {
        Variable {
            kind,
            storage: Storage::Owned(0.0),
            readonly: false,
            callback: None,
        }
    }

    pub fn number(value: f64) -> Self {
        Variable {
            storage: Storage::Owned(value),
            ..Variable::new(VarKind::Number)
        }
    }

    pub fn integer(value: i32) -> Self {
        Variable {
            storage: Storage::Owned(f64::from(value)),
            ..Variable::new(VarKind::Integer)
        }
    }

    pub fn boolean(value: bool) -> Self {
        Variable {
            storage: Storage::Owned(if value { 1.0 } else { 0.0 }),
            ..Variable::new(VarKind::Boolean)
        }
    }

    pub fn bound_number(cell: &HostCell<f64>) -> Self {
        Variable {
            storage: Storage::Number(cell.clone()),
            ..Variable::new(VarKind::Number)
        }
    }

    pub fn bound_integer(cell: &HostCell<i32>) -> Self {
        Variable {
            storage: Storage::Integer(cell.clone()),
            ..Variable::new(VarKind::Integer)
        }
    }

    pub fn bound_boolean(cell: &HostCell<bool>) -> Self {
        Variable {
            storage: Storage::Boolean(cell.clone()),
            ..Variable::new(VarKind::Boolean)
        }
    }

    #[must_use]
    pub fn with_callback(mut self, callback: impl Fn(f64) + 'static) -> Self {
        self.callback = Some(Rc::new(callback));
        self
    }

    #[must_use]
    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn set_callback(&mut self, callback: Option<Callback>) {
        self.callback = callback;
    }

    pub fn callback(&self) -> Option<&Callback> {
        self.callback.as_ref()
    }

    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
    }

    /// Read-only is enforced by the `set` statement only; host writes pass.
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn kind(&self) -> VarKind {
        self.kind
    }

    /// Whether the value lives in a host cell.
    pub fn is_bound(&self) -> bool {
        !matches!(self.storage, Storage::Owned(_))
    }

    pub fn to_number(&self) -> f64 {
        match &self.storage {
            Storage::Owned(value) => *value,
            Storage::Boolean(cell) => {
                if cell.get() {
                    1.0
                } else {
                    0.0
                }
            }
            Storage::Integer(cell) => f64::from(cell.get()),
            Storage::Number(cell) => cell.get(),
        }
    }

    /// Saturating conversion; NaN becomes zero.
    pub fn to_int(&self) -> i32 {
        self.to_number() as i32
    }

    pub fn to_bool(&self) -> bool {
        self.to_number() != 0.0
    }

    /// Text form according to the declared kind.
    pub fn render(&self) -> String {
        match self.kind {
            VarKind::Boolean => self.to_bool().to_string(),
            VarKind::Integer => self.to_int().to_string(),
            VarKind::Number => self.to_number().to_string(),
        }
    }

    /// Write `value` without notifying the callback.
    pub(crate) fn store(&mut self, value: f64) {
        match &mut self.storage {
            Storage::Owned(slot) => {
                *slot = match self.kind {
                    VarKind::Boolean => coerce_bool(value),
                    VarKind::Integer => f64::from(value as i32),
                    VarKind::Number => value,
                };
            }
            Storage::Boolean(cell) => cell.set(value != 0.0),
            Storage::Integer(cell) => cell.set(value as i32),
            Storage::Number(cell) => cell.set(value),
        }
    }

    /// Write `value` and notify the callback with the stored result.
    pub fn assign(&mut self, value: f64) {
        self.store(value);
        if let Some(callback) = &self.callback {
            callback(self.to_number());
        }
    }
}

fn coerce_bool(value: f64) -> f64 {
    if value != 0.0 {
        1.0
    } else {
        0.0
    }
}

impl Default for Variable {
    fn default() -> Self {
        Variable::new(VarKind::Number)
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("kind", &self.kind)
            .field("value", &self.to_number())
            .field("bound", &self.is_bound())
            .field("readonly", &self.readonly)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests;
