//! Object model boundary
//!
//! Class instances live in their own subsystem; the value core only
//! asks them capability questions. Every capability is optional with a
//! PHP-defined default: any instance is truthy, numerically `1`, not
//! convertible to string, and not orderable unless it opts in.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::context::Context;
use crate::number::PhpNumber;
use crate::value::Value;

/// Capability contract a class instance may implement.
pub trait PhpObject {
    /// PHP class name of the instance.
    fn class_name(&self) -> &str;

    /// Opt-in string conversion (`__toString` equivalent).
    fn stringify(&self, ctx: &Context) -> Option<String> {
        let _ = ctx;
        None
    }

    /// Opt-in numeric conversion.
    fn to_number(&self) -> Option<PhpNumber> {
        None
    }

    /// Truthiness; any instance is true unless it opts out.
    fn truthy(&self) -> bool {
        true
    }

    /// Opt-in ordering against another instance. `None` means the pair
    /// is not comparable.
    fn compare_to(&self, other: &dyn PhpObject) -> Option<Ordering> {
        let _ = other;
        None
    }
}

/// The plain property-bag instance produced by implicit object
/// widening, PHP's `stdClass`.
#[derive(Debug, Default)]
pub struct StdObject {
    properties: RefCell<IndexMap<Rc<str>, Value>>,
}

impl StdObject {
    /// Create an empty instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a scalar the way `(object)$scalar` does: a single `scalar`
    /// property holding the value.
    pub fn with_scalar(value: Value) -> Self {
        let obj = Self::new();
        obj.set_property("scalar", value);
        obj
    }

    /// Read a property.
    pub fn get_property(&self, name: &str) -> Option<Value> {
        self.properties.borrow().get(name).cloned()
    }

    /// Write a property.
    pub fn set_property(&self, name: &str, value: Value) {
        self.properties.borrow_mut().insert(Rc::from(name), value);
    }

    /// Number of properties.
    pub fn property_count(&self) -> usize {
        self.properties.borrow().len()
    }
}

impl PhpObject for StdObject {
    fn class_name(&self) -> &str {
        "stdClass"
    }
}
