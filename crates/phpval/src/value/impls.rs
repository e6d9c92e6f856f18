//! Constructors, inspection helpers, and standard-trait impls

use std::cell::RefCell;
use std::rc::Rc;

use crate::array::{IntStringKey, PhpArray};
use crate::number::PhpNumber;
use crate::object::PhpObject;
use crate::string::MutableString;

use super::alias::AliasCell;
use super::Value;

impl Value {
    /// The `null` value.
    pub fn null() -> Value {
        Value::Obj(None)
    }

    /// An immutable string value.
    pub fn string(s: impl Into<Rc<str>>) -> Value {
        Value::Str(s.into())
    }

    /// A fresh mutable string builder.
    pub fn mutable_string(s: impl Into<String>) -> Value {
        Value::MutStr(Rc::new(RefCell::new(MutableString::from(s.into()))))
    }

    /// A fresh empty array.
    pub fn array() -> Value {
        Value::Arr(Rc::new(RefCell::new(PhpArray::new())))
    }

    /// A class instance.
    pub fn object(obj: Rc<dyn PhpObject>) -> Value {
        Value::Obj(Some(obj))
    }

    /// A value holding the given reference cell.
    pub fn alias(cell: Rc<AliasCell>) -> Value {
        Value::Alias(cell)
    }

    /// `true` for a never-assigned slot.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// `true` for `null`. Undefined is not null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Obj(None))
    }

    /// `true` for an integer payload.
    pub fn is_long(&self) -> bool {
        matches!(self, Value::Long(_))
    }

    /// `true` for a float payload.
    pub fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    /// `true` for a boolean payload.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// `true` for either string representation.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_) | Value::MutStr(_))
    }

    /// `true` for an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Arr(_))
    }

    /// `true` for a class instance. `null` is not an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Obj(Some(_)))
    }

    /// `true` for a reference cell.
    pub fn is_alias(&self) -> bool {
        matches!(self, Value::Alias(_))
    }

    /// The integer payload, without coercion.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// The float payload, without coercion.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// The boolean payload, without coercion.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The immutable string payload, without coercion. Builders are
    /// not borrowable this way; use [`Value::convert_to_string`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value::Long(n)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Value {
        Value::Double(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Str(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Str(Rc::from(s))
    }
}

impl From<PhpNumber> for Value {
    fn from(n: PhpNumber) -> Value {
        match n {
            PhpNumber::Long(x) => Value::Long(x),
            PhpNumber::Double(x) => Value::Double(x),
        }
    }
}

impl From<PhpArray> for Value {
    fn from(arr: PhpArray) -> Value {
        Value::Arr(Rc::new(RefCell::new(arr)))
    }
}

impl From<IntStringKey> for Value {
    fn from(key: IntStringKey) -> Value {
        match key {
            IntStringKey::Int(n) => Value::Long(n),
            IntStringKey::Str(s) => Value::Str(s),
        }
    }
}

/// Equality as `===`: no coercion, identity for containers. The loose
/// `==` lives on [`Value::compare`] and is deliberately not `PartialEq`.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        self.strict_equals(other)
    }
}
