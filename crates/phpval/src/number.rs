//! The two-case numeric union
//!
//! Arithmetic in PHP produces either an integer or a float, never any
//! other type, so operators return this small `Copy` union instead of
//! forcing callers back into the full value container. Integer
//! operations that overflow promote to the float case, matching PHP's
//! silent widening.

use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{Result, ValueError};
use crate::parse::{self, NumberInfo};

/// Exactly one of a 64-bit integer or a 64-bit float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhpNumber {
    /// Integer case
    Long(i64),

    /// Float case
    Double(f64),
}

impl PhpNumber {
    /// Parse a string through the numeric automaton.
    ///
    /// Returns the classification alongside the value so callers can
    /// tell a well-formed numeric string from a truncated one.
    pub fn from_str_prefix(s: &str) -> (NumberInfo, PhpNumber) {
        parse::str_to_number(s)
    }

    /// True for the integer case.
    pub fn is_long(&self) -> bool {
        matches!(self, PhpNumber::Long(_))
    }

    /// True for the float case.
    pub fn is_double(&self) -> bool {
        matches!(self, PhpNumber::Double(_))
    }

    /// Integer value; floats truncate toward zero.
    pub fn to_long(self) -> i64 {
        match self {
            PhpNumber::Long(n) => n,
            PhpNumber::Double(d) => d as i64,
        }
    }

    /// Float value; integers promote exactly.
    pub fn to_double(self) -> f64 {
        match self {
            PhpNumber::Long(n) => n as f64,
            PhpNumber::Double(d) => d,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            PhpNumber::Long(n) => n == 0,
            PhpNumber::Double(d) => d == 0.0,
        }
    }

    /// Division; exact integer quotients stay integers, everything else
    /// is a float. Zero divisors are an error, never infinity.
    pub fn div(self, rhs: PhpNumber) -> Result<PhpNumber> {
        if rhs.is_zero() {
            return Err(ValueError::DivisionByZero);
        }
        match (self, rhs) {
            (PhpNumber::Long(a), PhpNumber::Long(b)) => {
                match (a.checked_div(b), a.checked_rem(b)) {
                    (Some(q), Some(0)) => Ok(PhpNumber::Long(q)),
                    _ => Ok(PhpNumber::Double(a as f64 / b as f64)),
                }
            }
            _ => Ok(PhpNumber::Double(self.to_double() / rhs.to_double())),
        }
    }

    /// Modulo; both operands are cast to integers first, as PHP's `%`
    /// does.
    pub fn rem(self, rhs: PhpNumber) -> Result<PhpNumber> {
        let b = rhs.to_long();
        if b == 0 {
            return Err(ValueError::DivisionByZero);
        }
        // i64::MIN % -1 is 0, unreachable through checked_rem.
        Ok(PhpNumber::Long(self.to_long().checked_rem(b).unwrap_or(0)))
    }
}

impl Add for PhpNumber {
    type Output = PhpNumber;

    fn add(self, rhs: PhpNumber) -> PhpNumber {
        match (self, rhs) {
            (PhpNumber::Long(a), PhpNumber::Long(b)) => a
                .checked_add(b)
                .map(PhpNumber::Long)
                .unwrap_or(PhpNumber::Double(a as f64 + b as f64)),
            _ => PhpNumber::Double(self.to_double() + rhs.to_double()),
        }
    }
}

impl Sub for PhpNumber {
    type Output = PhpNumber;

    fn sub(self, rhs: PhpNumber) -> PhpNumber {
        match (self, rhs) {
            (PhpNumber::Long(a), PhpNumber::Long(b)) => a
                .checked_sub(b)
                .map(PhpNumber::Long)
                .unwrap_or(PhpNumber::Double(a as f64 - b as f64)),
            _ => PhpNumber::Double(self.to_double() - rhs.to_double()),
        }
    }
}

impl Mul for PhpNumber {
    type Output = PhpNumber;

    fn mul(self, rhs: PhpNumber) -> PhpNumber {
        match (self, rhs) {
            (PhpNumber::Long(a), PhpNumber::Long(b)) => a
                .checked_mul(b)
                .map(PhpNumber::Long)
                .unwrap_or(PhpNumber::Double(a as f64 * b as f64)),
            _ => PhpNumber::Double(self.to_double() * rhs.to_double()),
        }
    }
}

impl Neg for PhpNumber {
    type Output = PhpNumber;

    fn neg(self) -> PhpNumber {
        match self {
            PhpNumber::Long(n) => n
                .checked_neg()
                .map(PhpNumber::Long)
                .unwrap_or(PhpNumber::Double(-(n as f64))),
            PhpNumber::Double(d) => PhpNumber::Double(-d),
        }
    }
}

impl From<i64> for PhpNumber {
    fn from(n: i64) -> Self {
        PhpNumber::Long(n)
    }
}

impl From<f64> for PhpNumber {
    fn from(d: f64) -> Self {
        PhpNumber::Double(d)
    }
}
