//! Value representation for one PHP variable
//!
//! A `Value` is a small tagged union: a discriminator plus a payload
//! that is a 64-bit integer, a 64-bit float, a flag, or one reference
//! slot shared by the string/array/object/alias kinds. Behavior is not
//! implemented on the union itself: every operation forwards to one of
//! ten stateless per-kind handler singletons, so the discriminator is
//! effectively the identity of the chosen handler and dispatch is one
//! indirect call rather than a branch ladder repeated per operation.

mod alias;
mod display;
mod handler;
mod impls;

pub use alias::AliasCell;

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use crate::array::{Enumerator, IntStringKey, PhpArray};
use crate::context::Context;
use crate::error::Result;
use crate::number::PhpNumber;
use crate::object::PhpObject;
use crate::parse::NumberInfo;
use crate::string::MutableString;

use handler::TypeHandler;

/// One PHP variable's content at a point in time.
///
/// `Obj(None)` is PHP's `null`: null and "class instance" share one
/// variant so the null check and the object check are a single path.
/// `Undefined` is distinct from null — a slot that was never assigned —
/// and is only observably different for isset-style checks.
#[derive(Clone, Default)]
pub enum Value {
    /// A never-assigned variable slot
    #[default]
    Undefined,

    /// 64-bit signed integer
    Long(i64),

    /// 64-bit float
    Double(f64),

    /// Boolean
    Bool(bool),

    /// Immutable text; copying the value copies the reference
    Str(Rc<str>),

    /// Mutable string builder
    MutStr(Rc<RefCell<MutableString>>),

    /// Ordered array
    Arr(Rc<RefCell<PhpArray>>),

    /// Class instance, or `null` when the reference is absent
    Obj(Option<Rc<dyn PhpObject>>),

    /// Shared reference cell (`&` aliasing)
    Alias(Rc<AliasCell>),
}

impl Value {
    /// The handler singleton this value dispatches through.
    fn handler(&self) -> &'static dyn TypeHandler {
        handler::table_for(self)
    }

    /// PHP-visible type name, derived from the handler identity.
    /// References are transparent here, like `gettype`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Alias(cell) => cell.get().type_name(),
            _ => self.handler().type_name(),
        }
    }

    /// String conversion; fails for arrays and for objects without a
    /// string capability.
    pub fn convert_to_string(&self, ctx: &Context) -> Result<String> {
        self.handler().convert_to_string(self, ctx)
    }

    /// String conversion that never fails: arrays render as `"Array"`,
    /// unconvertible objects as `"Object(Class)"`.
    pub fn to_string_lossy(&self, ctx: &Context) -> String {
        self.handler().to_string_lossy(self, ctx)
    }

    /// Integer coercion.
    pub fn to_long(&self) -> i64 {
        self.handler().to_long(self)
    }

    /// Float coercion.
    pub fn to_double(&self) -> f64 {
        self.handler().to_double(self)
    }

    /// Truthiness.
    pub fn to_bool(&self) -> bool {
        self.handler().to_bool(self)
    }

    /// Classified numeric coercion; the single path feeding arithmetic.
    pub fn to_number(&self) -> (NumberInfo, PhpNumber) {
        self.handler().to_number(self)
    }

    /// Loose three-way comparison. Defined for every pair except two
    /// objects without a shared ordering capability.
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        let rhs = other.unaliased();
        self.handler().compare(self, &rhs)
    }

    /// Identity-respecting equality (`===`): same discriminator, same
    /// payload, no coercion. The two string representations
    /// cross-compare by content.
    pub fn strict_equals(&self, other: &Value) -> bool {
        let rhs = other.unaliased();
        self.handler().strict_equals(self, &rhs)
    }

    /// Array view for element access, widening empty values in place.
    ///
    /// An empty value (undefined, null, `""`, `false`) is silently
    /// replaced by a fresh array which is then returned — a second call
    /// yields the same instance. A non-empty scalar yields a throwaway
    /// wrapper without mutating the slot. Objects cannot supply an
    /// array view.
    pub fn ensure_array(&mut self) -> Result<Rc<RefCell<PhpArray>>> {
        self.handler().ensure_array(self)
    }

    /// Object view for property access, widening empty values in place;
    /// the object counterpart of [`Value::ensure_array`].
    pub fn ensure_object(&mut self) -> Result<Rc<dyn PhpObject>> {
        self.handler().ensure_object(self)
    }

    /// Wrap this slot in a reference cell, or return the existing cell
    /// when the slot already is one — aliases do not nest.
    pub fn ensure_alias(&mut self) -> Rc<AliasCell> {
        self.handler().ensure_alias(self)
    }

    /// Non-widening array view; fails unless the value is an array.
    pub fn as_array(&self) -> Result<Rc<RefCell<PhpArray>>> {
        self.handler().as_array(self)
    }

    /// Non-widening object view; fails unless the value is an instance.
    pub fn as_object(&self) -> Result<Rc<dyn PhpObject>> {
        self.handler().as_object(self)
    }

    /// Value-assignment copy: identity for by-value kinds and immutable
    /// text, a container clone for arrays and builders, and a copy of
    /// the referenced value for aliases.
    pub fn deep_copy(&self) -> Value {
        self.handler().deep_copy(self)
    }

    /// Ordered iteration; only arrays are iterable here. With `by_ref`
    /// the visited slots are promoted to aliases so writes through the
    /// yielded values land back in the array.
    pub fn foreach_enumerator(&self, by_ref: bool) -> Result<Enumerator> {
        self.handler().enumerator(self, by_ref)
    }

    /// Normalize this value into the array key domain.
    pub fn array_key(&self) -> Result<IntStringKey> {
        self.handler().array_key(self)
    }

    /// Follow alias cells to the underlying value.
    pub(crate) fn unaliased(&self) -> Value {
        match self {
            Value::Alias(cell) => {
                let mut v = cell.get();
                while let Value::Alias(inner) = v {
                    v = inner.get();
                }
                v
            }
            other => other.clone(),
        }
    }
}
