//! Cross-type ordering rules
//!
//! PHP's loose comparison coerces operands before ordering them. The
//! probe functions here compare one bare primitive against an arbitrary
//! value; the per-kind handlers compose them into the full relation.
//!
//! Two rules dominate everything else:
//! - booleans compare by truthiness rank (`false < true`) against every
//!   type, never numerically;
//! - integer/float cross comparisons promote to `f64` and use the plain
//!   relational operators — no epsilon, PHP's exact float behavior.
//!
//! For ranking across kinds, scalars order below arrays and arrays
//! below objects. Only an object pair without a shared ordering
//! capability refuses to compare.

use std::cmp::Ordering;

use crate::error::Result;
use crate::parse;
use crate::value::Value;

/// Total order on floats the way PHP's relational operators see them:
/// NaN compares neither smaller nor greater, which collapses to equal.
pub(crate) fn fcmp(a: f64, b: f64) -> Ordering {
    if a < b {
        Ordering::Less
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Truthiness rank: `false < true`.
pub(crate) fn rank(a: bool, b: bool) -> Ordering {
    a.cmp(&b)
}

/// Compare an integer probe against an arbitrary value.
pub fn compare_long(probe: i64, other: &Value) -> Result<Ordering> {
    match other {
        Value::Long(y) => Ok(probe.cmp(y)),
        Value::Double(y) => Ok(fcmp(probe as f64, *y)),
        Value::Bool(y) => Ok(rank(probe != 0, *y)),
        Value::Str(s) => Ok(fcmp(probe as f64, parse::str_to_double(s))),
        Value::MutStr(m) => Ok(fcmp(probe as f64, m.borrow().to_double())),
        Value::Obj(None) | Value::Undefined => Ok(rank(probe != 0, false)),
        Value::Arr(_) => Ok(Ordering::Less),
        Value::Obj(Some(_)) => Ok(Ordering::Less),
        Value::Alias(cell) => compare_long(probe, &cell.get()),
    }
}

/// Compare a float probe against an arbitrary value.
pub fn compare_double(probe: f64, other: &Value) -> Result<Ordering> {
    match other {
        Value::Long(y) => Ok(fcmp(probe, *y as f64)),
        Value::Double(y) => Ok(fcmp(probe, *y)),
        Value::Bool(y) => Ok(rank(probe != 0.0, *y)),
        Value::Str(s) => Ok(fcmp(probe, parse::str_to_double(s))),
        Value::MutStr(m) => Ok(fcmp(probe, m.borrow().to_double())),
        Value::Obj(None) | Value::Undefined => Ok(rank(probe != 0.0, false)),
        Value::Arr(_) => Ok(Ordering::Less),
        Value::Obj(Some(_)) => Ok(Ordering::Less),
        Value::Alias(cell) => compare_double(probe, &cell.get()),
    }
}

/// Compare a boolean probe against an arbitrary value. Everything
/// collapses to truthiness rank on both sides.
pub fn compare_bool(probe: bool, other: &Value) -> Result<Ordering> {
    Ok(rank(probe, other.to_bool()))
}

/// General loose comparison of two values; the commutative composition
/// used when neither side is a bare primitive.
pub fn compare_values(a: &Value, b: &Value) -> Result<Ordering> {
    a.compare(b)
}

/// Null compared against an arbitrary value. Strings compare as against
/// `""`, everything else by truthiness rank.
pub(crate) fn compare_null(other: &Value) -> Result<Ordering> {
    match other {
        Value::Str(s) => Ok(if s.is_empty() {
            Ordering::Equal
        } else {
            Ordering::Less
        }),
        Value::MutStr(m) => Ok(if m.borrow().is_empty() {
            Ordering::Equal
        } else {
            Ordering::Less
        }),
        Value::Obj(None) | Value::Undefined => Ok(Ordering::Equal),
        Value::Alias(cell) => compare_null(&cell.get()),
        _ => Ok(rank(false, other.to_bool())),
    }
}

/// A string compared against an arbitrary value.
pub(crate) fn compare_string(probe: &str, other: &Value) -> Result<Ordering> {
    match other {
        Value::Str(t) => Ok(compare_strings(probe, t)),
        Value::MutStr(m) => Ok(compare_strings(probe, m.borrow().as_str())),
        Value::Long(y) => Ok(fcmp(parse::str_to_double(probe), *y as f64)),
        Value::Double(y) => Ok(fcmp(parse::str_to_double(probe), *y)),
        Value::Bool(y) => Ok(rank(str_truthy(probe), *y)),
        Value::Obj(None) | Value::Undefined => Ok(if probe.is_empty() {
            Ordering::Equal
        } else {
            Ordering::Greater
        }),
        Value::Arr(_) => Ok(Ordering::Less),
        Value::Obj(Some(_)) => Ok(Ordering::Less),
        Value::Alias(cell) => compare_string(probe, &cell.get()),
    }
}

/// String-vs-string ordering: numeric when both sides are well-formed
/// numbers, bytewise lexicographic otherwise.
pub(crate) fn compare_strings(a: &str, b: &str) -> Ordering {
    let pa = parse::parse_number(a, 0, a.len());
    let pb = parse::parse_number(b, 0, b.len());
    if pa.info.is_number() && pb.info.is_number() {
        if pa.info.is_long() && pb.info.is_long() {
            pa.long.cmp(&pb.long)
        } else {
            fcmp(pa.double, pb.double)
        }
    } else {
        a.cmp(b)
    }
}

fn str_truthy(s: &str) -> bool {
    !s.is_empty() && s != "0"
}
