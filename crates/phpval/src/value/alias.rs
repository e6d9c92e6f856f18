//! Reference cell backing PHP's `&` aliasing

use std::cell::{Cell, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::error::{Result, ValueError};

use super::Value;

/// A shared cell holding one value and a manual reference count.
///
/// Several `Value::Alias` handles may point at the same cell; all of
/// them belong to one logical script execution, so the count is a plain
/// counter, never atomic. The count reaching zero marks the cell
/// eligible for release; cells that (indirectly) alias themselves are
/// accepted and never collected here.
pub struct AliasCell {
    value: RefCell<Value>,
    count: Cell<u32>,
}

impl AliasCell {
    /// Wrap a value in a fresh cell with one reference.
    pub fn new(value: Value) -> Rc<AliasCell> {
        Rc::new(AliasCell {
            value: RefCell::new(value),
            count: Cell::new(1),
        })
    }

    /// Snapshot the current value.
    pub fn get(&self) -> Value {
        self.value.borrow().clone()
    }

    /// Replace the current value, visible to every holder.
    pub fn set(&self, value: Value) {
        *self.value.borrow_mut() = value;
    }

    /// Current reference count.
    pub fn ref_count(&self) -> u32 {
        self.count.get()
    }

    /// Record one more holder; returns the new count.
    pub fn add_ref(&self) -> u32 {
        let n = self.count.get() + 1;
        self.count.set(n);
        n
    }

    /// Drop one holder; returns the new count. Releasing a cell whose
    /// count is already zero is a bookkeeping bug and reported as an
    /// error rather than wrapping around.
    pub fn release(&self) -> Result<u32> {
        match self.count.get() {
            0 => Err(ValueError::AliasUnderflow),
            n => {
                self.count.set(n - 1);
                Ok(n - 1)
            }
        }
    }

    pub(crate) fn value_mut(&self) -> RefMut<'_, Value> {
        self.value.borrow_mut()
    }
}

impl fmt::Debug for AliasCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Self-aliasing cells would recurse here; show the refcount and
        // a shallow view only.
        match self.value.try_borrow() {
            Ok(v) => write!(f, "AliasCell(refs={}, {:?})", self.count.get(), v),
            Err(_) => write!(f, "AliasCell(refs={}, <borrowed>)", self.count.get()),
        }
    }
}
