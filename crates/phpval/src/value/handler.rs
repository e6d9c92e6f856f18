//! Per-kind dispatch tables
//!
//! One stateless handler per discriminator implements the whole
//! capability contract: conversions, comparison, widening, copying,
//! iteration, key normalization, and diagnostic rendering. The handlers
//! are the only objects in this crate meant to be shared across
//! executions; they hold no per-call state.
//!
//! The alias handler is the odd one out: it forwards every operation to
//! the referenced value's own handler, one level of indirection, except
//! `ensure_alias` which returns the existing cell so aliases never
//! nest.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::array::{Enumerator, IntStringKey, PhpArray};
use crate::compare;
use crate::context::Context;
use crate::error::{Result, ValueError};
use crate::number::PhpNumber;
use crate::object::{PhpObject, StdObject};
use crate::parse::{self, NumberInfo};
use crate::string::MutableString;

use super::alias::AliasCell;
use super::Value;

/// The capability contract every per-kind handler implements.
///
/// `me` is always the value the handler was selected from; operations
/// that widen take it mutably so they can replace the slot in place.
pub(crate) trait TypeHandler {
    fn type_name(&self) -> &'static str;

    fn convert_to_string(&self, me: &Value, ctx: &Context) -> Result<String>;

    fn to_string_lossy(&self, me: &Value, ctx: &Context) -> String {
        self.convert_to_string(me, ctx).unwrap_or_default()
    }

    fn to_long(&self, me: &Value) -> i64;
    fn to_double(&self, me: &Value) -> f64;
    fn to_bool(&self, me: &Value) -> bool;
    fn to_number(&self, me: &Value) -> (NumberInfo, PhpNumber);

    fn compare(&self, me: &Value, other: &Value) -> Result<Ordering>;
    fn strict_equals(&self, me: &Value, other: &Value) -> bool;

    fn ensure_array(&self, me: &mut Value) -> Result<Rc<RefCell<PhpArray>>> {
        Ok(throwaway_array(me))
    }

    fn ensure_object(&self, me: &mut Value) -> Result<Rc<dyn PhpObject>> {
        Ok(throwaway_object(me))
    }

    fn ensure_alias(&self, me: &mut Value) -> Rc<AliasCell> {
        wrap_in_alias(me)
    }

    fn as_array(&self, me: &Value) -> Result<Rc<RefCell<PhpArray>>> {
        let _ = me;
        Err(ValueError::TypeError {
            expected: "array",
            got: self.type_name(),
        })
    }

    fn as_object(&self, me: &Value) -> Result<Rc<dyn PhpObject>> {
        let _ = me;
        Err(ValueError::TypeError {
            expected: "object",
            got: self.type_name(),
        })
    }

    fn deep_copy(&self, me: &Value) -> Value {
        me.clone()
    }

    fn enumerator(&self, me: &Value, by_ref: bool) -> Result<Enumerator> {
        let _ = (me, by_ref);
        Err(ValueError::TypeError {
            expected: "iterable",
            got: self.type_name(),
        })
    }

    fn array_key(&self, me: &Value) -> Result<IntStringKey>;

    fn display(&self, me: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Map a value to its handler singleton. This is the single place the
/// discriminator is inspected; everything else is an indirect call.
pub(crate) fn table_for(v: &Value) -> &'static dyn TypeHandler {
    match v {
        Value::Undefined => &UndefinedHandler,
        Value::Long(_) => &LongHandler,
        Value::Double(_) => &DoubleHandler,
        Value::Bool(_) => &BoolHandler,
        Value::Str(_) => &StrHandler,
        Value::MutStr(_) => &MutStrHandler,
        Value::Arr(_) => &ArrayHandler,
        Value::Obj(None) => &NullHandler,
        Value::Obj(Some(_)) => &ObjectHandler,
        Value::Alias(_) => &AliasHandler,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Widening helpers
// ═══════════════════════════════════════════════════════════════════════

fn widen_to_array(me: &mut Value) -> Rc<RefCell<PhpArray>> {
    let arr = Rc::new(RefCell::new(PhpArray::new()));
    *me = Value::Arr(Rc::clone(&arr));
    arr
}

fn throwaway_array(v: &Value) -> Rc<RefCell<PhpArray>> {
    let mut arr = PhpArray::new();
    arr.append(v.clone());
    Rc::new(RefCell::new(arr))
}

fn widen_to_object(me: &mut Value) -> Rc<dyn PhpObject> {
    let obj: Rc<dyn PhpObject> = Rc::new(StdObject::new());
    *me = Value::Obj(Some(Rc::clone(&obj)));
    obj
}

fn throwaway_object(v: &Value) -> Rc<dyn PhpObject> {
    Rc::new(StdObject::with_scalar(v.clone()))
}

fn wrap_in_alias(me: &mut Value) -> Rc<AliasCell> {
    let cell = AliasCell::new(std::mem::replace(me, Value::Undefined));
    *me = Value::Alias(Rc::clone(&cell));
    cell
}

// ═══════════════════════════════════════════════════════════════════════
// Payload extractors
//
// Each handler is only ever dispatched on its own discriminator, so a
// mismatch here is a dispatch-table bug.
// ═══════════════════════════════════════════════════════════════════════

fn long_of(me: &Value) -> i64 {
    match me {
        Value::Long(n) => *n,
        _ => unreachable!("long handler dispatched on {}", me.type_name()),
    }
}

fn double_of(me: &Value) -> f64 {
    match me {
        Value::Double(d) => *d,
        _ => unreachable!("double handler dispatched on {}", me.type_name()),
    }
}

fn bool_of(me: &Value) -> bool {
    match me {
        Value::Bool(b) => *b,
        _ => unreachable!("bool handler dispatched on {}", me.type_name()),
    }
}

fn str_of(me: &Value) -> &str {
    match me {
        Value::Str(s) => s,
        _ => unreachable!("string handler dispatched on {}", me.type_name()),
    }
}

fn mutstr_of(me: &Value) -> &Rc<RefCell<MutableString>> {
    match me {
        Value::MutStr(m) => m,
        _ => unreachable!("mutable-string handler dispatched on {}", me.type_name()),
    }
}

fn array_of(me: &Value) -> &Rc<RefCell<PhpArray>> {
    match me {
        Value::Arr(a) => a,
        _ => unreachable!("array handler dispatched on {}", me.type_name()),
    }
}

fn object_of(me: &Value) -> &Rc<dyn PhpObject> {
    match me {
        Value::Obj(Some(o)) => o,
        _ => unreachable!("object handler dispatched on {}", me.type_name()),
    }
}

fn cell_of(me: &Value) -> Rc<AliasCell> {
    match me {
        Value::Alias(c) => Rc::clone(c),
        _ => unreachable!("alias handler dispatched on {}", me.type_name()),
    }
}

fn str_truthy(s: &str) -> bool {
    !s.is_empty() && s != "0"
}

// ═══════════════════════════════════════════════════════════════════════
// Undefined
// ═══════════════════════════════════════════════════════════════════════

struct UndefinedHandler;

impl TypeHandler for UndefinedHandler {
    fn type_name(&self) -> &'static str {
        "undefined"
    }

    fn convert_to_string(&self, _me: &Value, _ctx: &Context) -> Result<String> {
        Ok(String::new())
    }

    fn to_long(&self, _me: &Value) -> i64 {
        0
    }

    fn to_double(&self, _me: &Value) -> f64 {
        0.0
    }

    fn to_bool(&self, _me: &Value) -> bool {
        false
    }

    fn to_number(&self, _me: &Value) -> (NumberInfo, PhpNumber) {
        (NumberInfo::LONG, PhpNumber::Long(0))
    }

    fn compare(&self, _me: &Value, other: &Value) -> Result<Ordering> {
        compare::compare_null(other)
    }

    fn strict_equals(&self, _me: &Value, other: &Value) -> bool {
        matches!(other, Value::Undefined)
    }

    fn ensure_array(&self, me: &mut Value) -> Result<Rc<RefCell<PhpArray>>> {
        Ok(widen_to_array(me))
    }

    fn ensure_object(&self, me: &mut Value) -> Result<Rc<dyn PhpObject>> {
        Ok(widen_to_object(me))
    }

    fn array_key(&self, _me: &Value) -> Result<IntStringKey> {
        Ok(IntStringKey::Str(Rc::from("")))
    }

    fn display(&self, _me: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "undefined")
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Null
// ═══════════════════════════════════════════════════════════════════════

struct NullHandler;

impl TypeHandler for NullHandler {
    fn type_name(&self) -> &'static str {
        "null"
    }

    fn convert_to_string(&self, _me: &Value, _ctx: &Context) -> Result<String> {
        Ok(String::new())
    }

    fn to_long(&self, _me: &Value) -> i64 {
        0
    }

    fn to_double(&self, _me: &Value) -> f64 {
        0.0
    }

    fn to_bool(&self, _me: &Value) -> bool {
        false
    }

    fn to_number(&self, _me: &Value) -> (NumberInfo, PhpNumber) {
        (NumberInfo::LONG, PhpNumber::Long(0))
    }

    fn compare(&self, _me: &Value, other: &Value) -> Result<Ordering> {
        compare::compare_null(other)
    }

    fn strict_equals(&self, _me: &Value, other: &Value) -> bool {
        matches!(other, Value::Obj(None))
    }

    fn ensure_array(&self, me: &mut Value) -> Result<Rc<RefCell<PhpArray>>> {
        Ok(widen_to_array(me))
    }

    fn ensure_object(&self, me: &mut Value) -> Result<Rc<dyn PhpObject>> {
        Ok(widen_to_object(me))
    }

    fn array_key(&self, _me: &Value) -> Result<IntStringKey> {
        Ok(IntStringKey::Str(Rc::from("")))
    }

    fn display(&self, _me: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NULL")
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Long
// ═══════════════════════════════════════════════════════════════════════

struct LongHandler;

impl TypeHandler for LongHandler {
    fn type_name(&self) -> &'static str {
        "integer"
    }

    fn convert_to_string(&self, me: &Value, _ctx: &Context) -> Result<String> {
        Ok(long_of(me).to_string())
    }

    fn to_long(&self, me: &Value) -> i64 {
        long_of(me)
    }

    fn to_double(&self, me: &Value) -> f64 {
        long_of(me) as f64
    }

    fn to_bool(&self, me: &Value) -> bool {
        long_of(me) != 0
    }

    fn to_number(&self, me: &Value) -> (NumberInfo, PhpNumber) {
        (
            NumberInfo::LONG | NumberInfo::IS_NUMBER,
            PhpNumber::Long(long_of(me)),
        )
    }

    fn compare(&self, me: &Value, other: &Value) -> Result<Ordering> {
        compare::compare_long(long_of(me), other)
    }

    fn strict_equals(&self, me: &Value, other: &Value) -> bool {
        matches!(other, Value::Long(y) if *y == long_of(me))
    }

    fn array_key(&self, me: &Value) -> Result<IntStringKey> {
        Ok(IntStringKey::Int(long_of(me)))
    }

    fn display(&self, me: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "int({})", long_of(me))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Double
// ═══════════════════════════════════════════════════════════════════════

struct DoubleHandler;

impl TypeHandler for DoubleHandler {
    fn type_name(&self) -> &'static str {
        "double"
    }

    fn convert_to_string(&self, me: &Value, ctx: &Context) -> Result<String> {
        Ok(ctx.format_double(double_of(me)))
    }

    fn to_long(&self, me: &Value) -> i64 {
        // Truncation toward zero, saturating at the i64 range.
        double_of(me) as i64
    }

    fn to_double(&self, me: &Value) -> f64 {
        double_of(me)
    }

    fn to_bool(&self, me: &Value) -> bool {
        double_of(me) != 0.0
    }

    fn to_number(&self, me: &Value) -> (NumberInfo, PhpNumber) {
        (
            NumberInfo::DOUBLE | NumberInfo::IS_NUMBER,
            PhpNumber::Double(double_of(me)),
        )
    }

    fn compare(&self, me: &Value, other: &Value) -> Result<Ordering> {
        compare::compare_double(double_of(me), other)
    }

    fn strict_equals(&self, me: &Value, other: &Value) -> bool {
        matches!(other, Value::Double(y) if *y == double_of(me))
    }

    fn array_key(&self, me: &Value) -> Result<IntStringKey> {
        Ok(IntStringKey::Int(double_of(me) as i64))
    }

    fn display(&self, me: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "float({})", double_of(me))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Bool
// ═══════════════════════════════════════════════════════════════════════

struct BoolHandler;

impl TypeHandler for BoolHandler {
    fn type_name(&self) -> &'static str {
        "boolean"
    }

    fn convert_to_string(&self, me: &Value, _ctx: &Context) -> Result<String> {
        Ok(if bool_of(me) { "1".to_string() } else { String::new() })
    }

    fn to_long(&self, me: &Value) -> i64 {
        bool_of(me) as i64
    }

    fn to_double(&self, me: &Value) -> f64 {
        bool_of(me) as i64 as f64
    }

    fn to_bool(&self, me: &Value) -> bool {
        bool_of(me)
    }

    fn to_number(&self, me: &Value) -> (NumberInfo, PhpNumber) {
        (NumberInfo::LONG, PhpNumber::Long(bool_of(me) as i64))
    }

    fn compare(&self, me: &Value, other: &Value) -> Result<Ordering> {
        compare::compare_bool(bool_of(me), other)
    }

    fn strict_equals(&self, me: &Value, other: &Value) -> bool {
        matches!(other, Value::Bool(y) if *y == bool_of(me))
    }

    fn ensure_array(&self, me: &mut Value) -> Result<Rc<RefCell<PhpArray>>> {
        if bool_of(me) {
            Ok(throwaway_array(me))
        } else {
            Ok(widen_to_array(me))
        }
    }

    fn ensure_object(&self, me: &mut Value) -> Result<Rc<dyn PhpObject>> {
        if bool_of(me) {
            Ok(throwaway_object(me))
        } else {
            Ok(widen_to_object(me))
        }
    }

    fn array_key(&self, me: &Value) -> Result<IntStringKey> {
        Ok(IntStringKey::Int(bool_of(me) as i64))
    }

    fn display(&self, me: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bool({})", bool_of(me))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Immutable string
// ═══════════════════════════════════════════════════════════════════════

struct StrHandler;

impl TypeHandler for StrHandler {
    fn type_name(&self) -> &'static str {
        "string"
    }

    fn convert_to_string(&self, me: &Value, _ctx: &Context) -> Result<String> {
        Ok(str_of(me).to_string())
    }

    fn to_long(&self, me: &Value) -> i64 {
        parse::str_to_long(str_of(me))
    }

    fn to_double(&self, me: &Value) -> f64 {
        parse::str_to_double(str_of(me))
    }

    fn to_bool(&self, me: &Value) -> bool {
        str_truthy(str_of(me))
    }

    fn to_number(&self, me: &Value) -> (NumberInfo, PhpNumber) {
        parse::str_to_number(str_of(me))
    }

    fn compare(&self, me: &Value, other: &Value) -> Result<Ordering> {
        compare::compare_string(str_of(me), other)
    }

    fn strict_equals(&self, me: &Value, other: &Value) -> bool {
        match other {
            Value::Str(t) => str_of(me) == &**t,
            Value::MutStr(m) => str_of(me) == m.borrow().as_str(),
            _ => false,
        }
    }

    fn ensure_array(&self, me: &mut Value) -> Result<Rc<RefCell<PhpArray>>> {
        if str_of(me).is_empty() {
            Ok(widen_to_array(me))
        } else {
            Ok(throwaway_array(me))
        }
    }

    fn ensure_object(&self, me: &mut Value) -> Result<Rc<dyn PhpObject>> {
        if str_of(me).is_empty() {
            Ok(widen_to_object(me))
        } else {
            Ok(throwaway_object(me))
        }
    }

    fn array_key(&self, me: &Value) -> Result<IntStringKey> {
        Ok(IntStringKey::from_str_key(str_of(me)))
    }

    fn display(&self, me: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = str_of(me);
        write!(f, "string({}) {:?}", s.len(), s)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Mutable string builder: a thin pass-through to the builder's own
// conversion surface.
// ═══════════════════════════════════════════════════════════════════════

struct MutStrHandler;

impl TypeHandler for MutStrHandler {
    fn type_name(&self) -> &'static str {
        "string"
    }

    fn convert_to_string(&self, me: &Value, _ctx: &Context) -> Result<String> {
        Ok(mutstr_of(me).borrow().as_str().to_string())
    }

    fn to_long(&self, me: &Value) -> i64 {
        mutstr_of(me).borrow().to_long()
    }

    fn to_double(&self, me: &Value) -> f64 {
        mutstr_of(me).borrow().to_double()
    }

    fn to_bool(&self, me: &Value) -> bool {
        mutstr_of(me).borrow().to_bool()
    }

    fn to_number(&self, me: &Value) -> (NumberInfo, PhpNumber) {
        mutstr_of(me).borrow().to_number()
    }

    fn compare(&self, me: &Value, other: &Value) -> Result<Ordering> {
        compare::compare_string(mutstr_of(me).borrow().as_str(), other)
    }

    fn strict_equals(&self, me: &Value, other: &Value) -> bool {
        let lhs = mutstr_of(me);
        match other {
            Value::Str(t) => lhs.borrow().as_str() == &**t,
            Value::MutStr(m) => {
                Rc::ptr_eq(lhs, m) || lhs.borrow().as_str() == m.borrow().as_str()
            }
            _ => false,
        }
    }

    fn ensure_array(&self, me: &mut Value) -> Result<Rc<RefCell<PhpArray>>> {
        if mutstr_of(me).borrow().is_empty() {
            Ok(widen_to_array(me))
        } else {
            Ok(throwaway_array(me))
        }
    }

    fn ensure_object(&self, me: &mut Value) -> Result<Rc<dyn PhpObject>> {
        if mutstr_of(me).borrow().is_empty() {
            Ok(widen_to_object(me))
        } else {
            Ok(throwaway_object(me))
        }
    }

    fn deep_copy(&self, me: &Value) -> Value {
        Value::MutStr(Rc::new(RefCell::new(mutstr_of(me).borrow().deep_copy())))
    }

    fn array_key(&self, me: &Value) -> Result<IntStringKey> {
        Ok(IntStringKey::from_str_key(mutstr_of(me).borrow().as_str()))
    }

    fn display(&self, me: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = mutstr_of(me).borrow();
        write!(f, "string({}) {:?}", m.len(), m.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Array
// ═══════════════════════════════════════════════════════════════════════

struct ArrayHandler;

impl TypeHandler for ArrayHandler {
    fn type_name(&self) -> &'static str {
        "array"
    }

    fn convert_to_string(&self, _me: &Value, _ctx: &Context) -> Result<String> {
        Err(ValueError::TypeError {
            expected: "string",
            got: "array",
        })
    }

    fn to_string_lossy(&self, _me: &Value, _ctx: &Context) -> String {
        "Array".to_string()
    }

    fn to_long(&self, me: &Value) -> i64 {
        array_of(me).borrow().len() as i64
    }

    fn to_double(&self, me: &Value) -> f64 {
        array_of(me).borrow().len() as f64
    }

    fn to_bool(&self, me: &Value) -> bool {
        !array_of(me).borrow().is_empty()
    }

    fn to_number(&self, me: &Value) -> (NumberInfo, PhpNumber) {
        (
            NumberInfo::LONG,
            PhpNumber::Long(array_of(me).borrow().len() as i64),
        )
    }

    fn compare(&self, me: &Value, other: &Value) -> Result<Ordering> {
        let lhs = array_of(me);
        match other {
            Value::Bool(b) => Ok(compare::rank(self.to_bool(me), *b)),
            Value::Obj(None) | Value::Undefined => {
                Ok(compare::rank(self.to_bool(me), false))
            }
            Value::Arr(rhs) => {
                if Rc::ptr_eq(lhs, rhs) {
                    Ok(Ordering::Equal)
                } else {
                    lhs.borrow().compare(&rhs.borrow())
                }
            }
            Value::Obj(Some(_)) => Ok(Ordering::Less),
            Value::Alias(cell) => self.compare(me, &cell.get()),
            _ => Ok(Ordering::Greater),
        }
    }

    fn strict_equals(&self, me: &Value, other: &Value) -> bool {
        match other {
            Value::Arr(rhs) => {
                let lhs = array_of(me);
                Rc::ptr_eq(lhs, rhs) || lhs.borrow().strict_eq(&rhs.borrow())
            }
            _ => false,
        }
    }

    fn ensure_array(&self, me: &mut Value) -> Result<Rc<RefCell<PhpArray>>> {
        Ok(Rc::clone(array_of(me)))
    }

    fn ensure_object(&self, me: &mut Value) -> Result<Rc<dyn PhpObject>> {
        let _ = me;
        Err(ValueError::TypeError {
            expected: "object",
            got: "array",
        })
    }

    fn as_array(&self, me: &Value) -> Result<Rc<RefCell<PhpArray>>> {
        Ok(Rc::clone(array_of(me)))
    }

    fn deep_copy(&self, me: &Value) -> Value {
        Value::Arr(Rc::new(RefCell::new(array_of(me).borrow().clone_value())))
    }

    fn enumerator(&self, me: &Value, by_ref: bool) -> Result<Enumerator> {
        Ok(array_of(me).borrow_mut().enumerator(by_ref))
    }

    fn array_key(&self, _me: &Value) -> Result<IntStringKey> {
        Err(ValueError::TypeError {
            expected: "int or string key",
            got: "array",
        })
    }

    fn display(&self, me: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arr = array_of(me).borrow();
        write!(f, "array({}) {{", arr.len())?;
        for (i, (key, value)) in arr.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            match key {
                IntStringKey::Int(k) => write!(f, " [{}] => {:?}", k, value)?,
                IntStringKey::Str(k) => write!(f, " [{:?}] => {:?}", k, value)?,
            }
        }
        write!(f, " }}")
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Object (non-null instance)
// ═══════════════════════════════════════════════════════════════════════

struct ObjectHandler;

impl TypeHandler for ObjectHandler {
    fn type_name(&self) -> &'static str {
        "object"
    }

    fn convert_to_string(&self, me: &Value, ctx: &Context) -> Result<String> {
        let obj = object_of(me);
        obj.stringify(ctx)
            .ok_or_else(|| ValueError::NotStringable(obj.class_name().to_string()))
    }

    fn to_string_lossy(&self, me: &Value, ctx: &Context) -> String {
        let obj = object_of(me);
        obj.stringify(ctx)
            .unwrap_or_else(|| format!("Object({})", obj.class_name()))
    }

    fn to_long(&self, me: &Value) -> i64 {
        object_of(me).to_number().map(PhpNumber::to_long).unwrap_or(1)
    }

    fn to_double(&self, me: &Value) -> f64 {
        object_of(me)
            .to_number()
            .map(PhpNumber::to_double)
            .unwrap_or(1.0)
    }

    fn to_bool(&self, me: &Value) -> bool {
        object_of(me).truthy()
    }

    fn to_number(&self, me: &Value) -> (NumberInfo, PhpNumber) {
        match object_of(me).to_number() {
            Some(n @ PhpNumber::Long(_)) => (NumberInfo::LONG | NumberInfo::IS_NUMBER, n),
            Some(n @ PhpNumber::Double(_)) => (NumberInfo::DOUBLE | NumberInfo::IS_NUMBER, n),
            None => (NumberInfo::LONG, PhpNumber::Long(1)),
        }
    }

    fn compare(&self, me: &Value, other: &Value) -> Result<Ordering> {
        let lhs = object_of(me);
        match other {
            Value::Bool(b) => Ok(compare::rank(lhs.truthy(), *b)),
            Value::Obj(None) | Value::Undefined => Ok(compare::rank(lhs.truthy(), false)),
            Value::Obj(Some(rhs)) => {
                if Rc::ptr_eq(lhs, rhs) {
                    return Ok(Ordering::Equal);
                }
                lhs.compare_to(rhs.as_ref())
                    .ok_or_else(|| ValueError::Incomparable {
                        left: lhs.class_name().to_string(),
                        right: rhs.class_name().to_string(),
                    })
            }
            Value::Alias(cell) => self.compare(me, &cell.get()),
            // Any scalar or array orders below an instance.
            _ => Ok(Ordering::Greater),
        }
    }

    fn strict_equals(&self, me: &Value, other: &Value) -> bool {
        matches!(other, Value::Obj(Some(rhs)) if Rc::ptr_eq(object_of(me), rhs))
    }

    fn ensure_array(&self, me: &mut Value) -> Result<Rc<RefCell<PhpArray>>> {
        let _ = me;
        Err(ValueError::TypeError {
            expected: "array",
            got: "object",
        })
    }

    fn ensure_object(&self, me: &mut Value) -> Result<Rc<dyn PhpObject>> {
        Ok(Rc::clone(object_of(me)))
    }

    fn as_object(&self, me: &Value) -> Result<Rc<dyn PhpObject>> {
        Ok(Rc::clone(object_of(me)))
    }

    fn array_key(&self, _me: &Value) -> Result<IntStringKey> {
        Err(ValueError::TypeError {
            expected: "int or string key",
            got: "object",
        })
    }

    fn display(&self, me: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object({})", object_of(me).class_name())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Alias: forwards everything to the referenced value, one level deep.
// ═══════════════════════════════════════════════════════════════════════

struct AliasHandler;

impl TypeHandler for AliasHandler {
    fn type_name(&self) -> &'static str {
        "reference"
    }

    fn convert_to_string(&self, me: &Value, ctx: &Context) -> Result<String> {
        cell_of(me).get().convert_to_string(ctx)
    }

    fn to_string_lossy(&self, me: &Value, ctx: &Context) -> String {
        cell_of(me).get().to_string_lossy(ctx)
    }

    fn to_long(&self, me: &Value) -> i64 {
        cell_of(me).get().to_long()
    }

    fn to_double(&self, me: &Value) -> f64 {
        cell_of(me).get().to_double()
    }

    fn to_bool(&self, me: &Value) -> bool {
        cell_of(me).get().to_bool()
    }

    fn to_number(&self, me: &Value) -> (NumberInfo, PhpNumber) {
        cell_of(me).get().to_number()
    }

    fn compare(&self, me: &Value, other: &Value) -> Result<Ordering> {
        cell_of(me).get().compare(other)
    }

    fn strict_equals(&self, me: &Value, other: &Value) -> bool {
        cell_of(me).get().strict_equals(other)
    }

    fn ensure_array(&self, me: &mut Value) -> Result<Rc<RefCell<PhpArray>>> {
        let cell = cell_of(me);
        let mut inner = cell.value_mut();
        inner.ensure_array()
    }

    fn ensure_object(&self, me: &mut Value) -> Result<Rc<dyn PhpObject>> {
        let cell = cell_of(me);
        let mut inner = cell.value_mut();
        inner.ensure_object()
    }

    fn ensure_alias(&self, me: &mut Value) -> Rc<AliasCell> {
        cell_of(me)
    }

    fn as_array(&self, me: &Value) -> Result<Rc<RefCell<PhpArray>>> {
        cell_of(me).get().as_array()
    }

    fn as_object(&self, me: &Value) -> Result<Rc<dyn PhpObject>> {
        cell_of(me).get().as_object()
    }

    fn deep_copy(&self, me: &Value) -> Value {
        // Assigning from a reference copies the value out of the cell.
        cell_of(me).get().deep_copy()
    }

    fn enumerator(&self, me: &Value, by_ref: bool) -> Result<Enumerator> {
        cell_of(me).get().foreach_enumerator(by_ref)
    }

    fn array_key(&self, me: &Value) -> Result<IntStringKey> {
        cell_of(me).get().array_key()
    }

    fn display(&self, me: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "&{:?}", cell_of(me).get())
    }
}
