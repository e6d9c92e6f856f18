//! Diagnostic and user-facing rendering

use std::fmt;

use crate::context::Context;

use super::Value;

/// Debug rendering in the shape of a type-annotated dump, one line.
/// Containers recurse; alias cells show as `&inner`.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.handler().display(self, f)
    }
}

/// User-facing rendering: the lossy string conversion under a default
/// print context. Callers with a configured context should go through
/// [`Value::to_string_lossy`] instead.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy(&Context::default()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::array::PhpArray;
    use crate::value::Value;

    #[test]
    fn debug_scalars() {
        assert_eq!(format!("{:?}", Value::from(42)), "int(42)");
        assert_eq!(format!("{:?}", Value::from(1.5)), "float(1.5)");
        assert_eq!(format!("{:?}", Value::from(true)), "bool(true)");
        assert_eq!(format!("{:?}", Value::from("ab")), "string(2) \"ab\"");
        assert_eq!(format!("{:?}", Value::null()), "NULL");
        assert_eq!(format!("{:?}", Value::Undefined), "undefined");
    }

    #[test]
    fn debug_array_recurses() {
        let mut arr = PhpArray::new();
        arr.append(Value::from(1));
        arr.insert("k".into(), Value::from("v"));
        let rendered = format!("{:?}", Value::from(arr));
        assert_eq!(rendered, "array(2) { [0] => int(1), [\"k\"] => string(1) \"v\" }");
    }

    #[test]
    fn debug_alias_marks_indirection() {
        let mut v = Value::from(7);
        v.ensure_alias();
        assert_eq!(format!("{:?}", v), "&int(7)");
    }

    #[test]
    fn display_is_lossy_conversion() {
        assert_eq!(Value::from(3.0).to_string(), "3");
        assert_eq!(Value::from(PhpArray::new()).to_string(), "Array");
        assert_eq!(Value::from(false).to_string(), "");
    }
}
