//! Tests for value coercions, widening, and copying semantics

use std::rc::Rc;

use phpval::*;

fn ctx() -> Context {
    Context::default()
}

// ═══════════════════════════════════════════════════════════════════════
// Coercion Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_null_coercions() {
    let v = Value::null();
    assert_eq!(v.to_long(), 0);
    assert_eq!(v.to_double(), 0.0);
    assert!(!v.to_bool());
    assert_eq!(v.convert_to_string(&ctx()).unwrap(), "");
    assert_eq!(v.type_name(), "null");
}

#[test]
fn test_undefined_coerces_like_null() {
    let v = Value::Undefined;
    assert_eq!(v.to_long(), 0);
    assert!(!v.to_bool());
    assert_eq!(v.convert_to_string(&ctx()).unwrap(), "");
}

#[test]
fn test_bool_string_conversion_is_asymmetric() {
    assert_eq!(Value::from(true).convert_to_string(&ctx()).unwrap(), "1");
    assert_eq!(Value::from(false).convert_to_string(&ctx()).unwrap(), "");
}

#[test]
fn test_string_truthiness() {
    assert!(!Value::from("").to_bool());
    assert!(!Value::from("0").to_bool());
    assert!(Value::from("0.0").to_bool());
    assert!(Value::from("false").to_bool());
    assert!(Value::from(" ").to_bool());
}

#[test]
fn test_double_truthiness() {
    assert!(!Value::from(0.0).to_bool());
    assert!(!Value::from(-0.0).to_bool());
    assert!(Value::from(f64::NAN).to_bool());
    assert!(Value::from(0.001).to_bool());
}

#[test]
fn test_double_to_string_uses_context() {
    assert_eq!(Value::from(3.0).convert_to_string(&ctx()).unwrap(), "3");
    assert_eq!(Value::from(1.5).convert_to_string(&ctx()).unwrap(), "1.5");
    let comma = Context {
        decimal_separator: ',',
        ..Context::default()
    };
    assert_eq!(Value::from(1.5).convert_to_string(&comma).unwrap(), "1,5");
}

#[test]
fn test_array_string_conversion_fails_lossy_succeeds() {
    let v = Value::array();
    assert!(matches!(
        v.convert_to_string(&ctx()),
        Err(ValueError::TypeError { .. })
    ));
    assert_eq!(v.to_string_lossy(&ctx()), "Array");
}

#[test]
fn test_array_numeric_coercion_is_count() {
    let mut arr = PhpArray::new();
    arr.append(Value::from(10));
    arr.append(Value::from(20));
    let v = Value::from(arr);
    assert_eq!(v.to_long(), 2);
    assert!(v.to_bool());
    assert!(!Value::array().to_bool());
}

#[test]
fn test_plain_object_coercions() {
    let v = Value::object(Rc::new(StdObject::new()));
    assert!(v.to_bool());
    assert_eq!(v.to_long(), 1);
    assert!(matches!(
        v.convert_to_string(&ctx()),
        Err(ValueError::NotStringable(ref name)) if name == "stdClass"
    ));
    assert_eq!(v.to_string_lossy(&ctx()), "Object(stdClass)");
}

#[test]
fn test_to_number_classification() {
    let (info, n) = Value::from("10").to_number();
    assert!(info.is_number());
    assert_eq!(n, PhpNumber::Long(10));

    let (info, n) = Value::from("3.5kg").to_number();
    assert!(!info.is_number());
    assert_eq!(n, PhpNumber::Double(3.5));

    let (info, n) = Value::from(true).to_number();
    assert!(!info.is_number());
    assert_eq!(n, PhpNumber::Long(1));
}

// ═══════════════════════════════════════════════════════════════════════
// Widening Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_ensure_array_widens_empty_values_in_place() {
    for mut v in [
        Value::Undefined,
        Value::null(),
        Value::from(""),
        Value::from(false),
    ] {
        let first = v.ensure_array().unwrap();
        assert!(v.is_array());
        let second = v.ensure_array().unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }
}

#[test]
fn test_ensure_array_on_scalar_leaves_slot_unchanged() {
    let mut v = Value::from(7);
    let arr = v.ensure_array().unwrap();
    assert!(v.is_long());
    // The throwaway wrapper carries the scalar at index zero.
    assert_eq!(
        arr.borrow().get(&IntStringKey::Int(0)).unwrap().to_long(),
        7
    );
}

#[test]
fn test_ensure_array_on_object_fails() {
    let mut v = Value::object(Rc::new(StdObject::new()));
    assert!(matches!(
        v.ensure_array(),
        Err(ValueError::TypeError { expected: "array", got: "object" })
    ));
    assert!(v.is_object());
}

#[test]
fn test_ensure_object_widens_and_is_stable() {
    let mut v = Value::null();
    let first = v.ensure_object().unwrap();
    assert!(v.is_object());
    let second = v.ensure_object().unwrap();
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(first.class_name(), "stdClass");
}

#[test]
fn test_ensure_object_on_scalar_wraps_as_scalar_property() {
    let mut v = Value::from("text");
    let obj = v.ensure_object().unwrap();
    assert!(v.is_string());
    let std = StdObject::with_scalar(Value::from("text"));
    assert_eq!(obj.class_name(), std.class_name());
}

#[test]
fn test_ensure_object_on_array_fails() {
    let mut v = Value::array();
    assert!(v.ensure_object().is_err());
}

#[test]
fn test_as_array_does_not_widen() {
    let v = Value::null();
    assert!(v.as_array().is_err());
    assert!(v.is_null());
}

// ═══════════════════════════════════════════════════════════════════════
// Copy Semantics Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_clone_shares_array_deep_copy_does_not() {
    let original = Value::array();
    let shared = original.clone();
    let copied = original.deep_copy();

    shared
        .as_array()
        .unwrap()
        .borrow_mut()
        .append(Value::from(1));

    assert_eq!(original.to_long(), 1);
    assert_eq!(copied.to_long(), 0);
}

#[test]
fn test_deep_copy_of_nested_array() {
    let mut inner = PhpArray::new();
    inner.append(Value::from("x"));
    let mut outer = PhpArray::new();
    outer.append(Value::from(inner));
    let original = Value::from(outer);

    let copied = original.deep_copy();
    let inner_copy = copied
        .as_array()
        .unwrap()
        .borrow()
        .get(&IntStringKey::Int(0))
        .cloned()
        .unwrap();
    inner_copy
        .as_array()
        .unwrap()
        .borrow_mut()
        .append(Value::from("y"));

    let inner_orig = original
        .as_array()
        .unwrap()
        .borrow()
        .get(&IntStringKey::Int(0))
        .cloned()
        .unwrap();
    assert_eq!(inner_orig.to_long(), 1);
}

#[test]
fn test_deep_copy_shares_objects() {
    let obj = Rc::new(StdObject::new());
    let v = Value::object(obj.clone());
    let copied = v.deep_copy();
    assert!(copied.strict_equals(&v));
}

#[test]
fn test_mutable_string_deep_copy_is_independent() {
    let v = Value::mutable_string("ab");
    let copied = v.deep_copy();
    if let Value::MutStr(m) = &v {
        m.borrow_mut().append("c");
    }
    assert_eq!(v.convert_to_string(&ctx()).unwrap(), "abc");
    assert_eq!(copied.convert_to_string(&ctx()).unwrap(), "ab");
}

// ═══════════════════════════════════════════════════════════════════════
// Strict Equality Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_strict_equality_requires_same_type() {
    assert!(!Value::from(1).strict_equals(&Value::from(1.0)));
    assert!(!Value::from(1).strict_equals(&Value::from("1")));
    assert!(!Value::from(0).strict_equals(&Value::from(false)));
    assert!(!Value::null().strict_equals(&Value::from(false)));
    assert!(Value::null().strict_equals(&Value::null()));
}

#[test]
fn test_strict_equality_of_string_representations() {
    assert!(Value::from("ab").strict_equals(&Value::mutable_string("ab")));
    assert!(Value::mutable_string("ab").strict_equals(&Value::from("ab")));
    assert!(!Value::from("ab").strict_equals(&Value::mutable_string("ba")));
}

#[test]
fn test_strict_equality_of_arrays_is_structural_in_order() {
    let mut a = PhpArray::new();
    a.append(Value::from(1));
    a.insert("k".into(), Value::from("v"));
    let mut b = PhpArray::new();
    b.append(Value::from(1));
    b.insert("k".into(), Value::from("v"));
    assert!(Value::from(a).strict_equals(&Value::from(b)));

    // Same pairs in a different insertion order are not identical.
    let mut c = PhpArray::new();
    c.insert("k".into(), Value::from("v"));
    c.append(Value::from(1));
    let mut d = PhpArray::new();
    d.append(Value::from(1));
    d.insert("k".into(), Value::from("v"));
    assert!(!Value::from(c).strict_equals(&Value::from(d)));
}

#[test]
fn test_strict_equality_of_objects_is_identity() {
    let obj = Rc::new(StdObject::new());
    let a = Value::object(obj.clone());
    let b = Value::object(obj);
    let c = Value::object(Rc::new(StdObject::new()));
    assert!(a.strict_equals(&b));
    assert!(!a.strict_equals(&c));
}

// ═══════════════════════════════════════════════════════════════════════
// Enumeration Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_enumerator_yields_keys_and_values_in_order() {
    let mut arr = PhpArray::new();
    arr.append(Value::from("a"));
    arr.insert("k".into(), Value::from("b"));
    arr.append(Value::from("c"));
    let v = Value::from(arr);

    let pairs: Vec<(i64, String)> = v
        .foreach_enumerator(false)
        .unwrap()
        .map(|(k, val)| (k.to_long(), val.to_string_lossy(&ctx())))
        .collect();
    assert_eq!(pairs.len(), 3);
    assert_eq!(pairs[0], (0, "a".to_string()));
    assert_eq!(pairs[2], (1, "c".to_string()));
}

#[test]
fn test_by_ref_enumeration_writes_back() {
    let mut arr = PhpArray::new();
    arr.append(Value::from(1));
    arr.append(Value::from(2));
    let v = Value::from(arr);

    for (_k, slot) in v.foreach_enumerator(true).unwrap() {
        if let Value::Alias(cell) = slot {
            let doubled = cell.get().to_long() * 2;
            cell.set(Value::from(doubled));
        }
    }

    let arr = v.as_array().unwrap();
    assert_eq!(arr.borrow().get(&IntStringKey::Int(0)).unwrap().to_long(), 2);
    assert_eq!(arr.borrow().get(&IntStringKey::Int(1)).unwrap().to_long(), 4);
}

#[test]
fn test_scalars_are_not_iterable() {
    assert!(Value::from(5).foreach_enumerator(false).is_err());
    assert!(Value::null().foreach_enumerator(false).is_err());
}

// ═══════════════════════════════════════════════════════════════════════
// Array Key Normalization Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_key_folding_of_canonical_integers() {
    assert_eq!(Value::from("8").array_key().unwrap(), IntStringKey::Int(8));
    assert_eq!(
        Value::from("-8").array_key().unwrap(),
        IntStringKey::Int(-8)
    );
    assert_eq!(Value::from(8).array_key().unwrap(), IntStringKey::Int(8));
}

#[test]
fn test_non_canonical_numeric_strings_stay_strings() {
    for s in ["08", "8.0", "+8", "-0", "8 "] {
        assert!(matches!(
            Value::from(s).array_key().unwrap(),
            IntStringKey::Str(_)
        ));
    }
}

#[test]
fn test_special_key_types() {
    assert_eq!(Value::null().array_key().unwrap(), IntStringKey::from(""));
    assert_eq!(
        Value::from(true).array_key().unwrap(),
        IntStringKey::Int(1)
    );
    assert_eq!(
        Value::from(1.9).array_key().unwrap(),
        IntStringKey::Int(1)
    );
    assert!(Value::array().array_key().is_err());
}
