//! String → number parsing automaton
//!
//! Every string-to-number coercion in the value core goes through one
//! hand-rolled scanner. Given a byte range it produces both the integer
//! and the floating interpretation of the longest numeric prefix, the
//! positions where each interpretation stopped, and a classification of
//! what was found.
//!
//! The automaton walks: leading whitespace → optional sign → integer
//! digits → (hex body after a leading `0x` | decimal point | exponent
//! marker) → fraction digits → exponent sign → exponent digits. A digit
//! that would overflow the 64-bit accumulator freezes the integer result
//! (saturated by sign) and the scan continues in float mode from that
//! same digit.

use crate::number::PhpNumber;

/// Classification flags produced by the numeric automaton.
///
/// The low bits form the type mask (`LONG` / `DOUBLE` / `UNCONVERTIBLE`,
/// exactly one set); `IS_NUMBER` and `IS_HEX` are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberInfo(u32);

impl NumberInfo {
    /// The scanned prefix fits a 64-bit integer.
    pub const LONG: NumberInfo = NumberInfo(1);

    /// The scanned prefix needs a floating representation: it carried a
    /// fraction or exponent, or the integer accumulator overflowed.
    pub const DOUBLE: NumberInfo = NumberInfo(2);

    /// No numeric prefix was found at all.
    pub const UNCONVERTIBLE: NumberInfo = NumberInfo(4);

    /// Digits were seen and the scan consumed the whole requested range.
    pub const IS_NUMBER: NumberInfo = NumberInfo(8);

    /// The literal used the `0x` hexadecimal form.
    pub const IS_HEX: NumberInfo = NumberInfo(16);

    const TYPE_MASK: u32 = 0b111;

    /// The empty flag set.
    pub const fn empty() -> Self {
        NumberInfo(0)
    }

    /// True when every bit of `flag` is set in `self`.
    pub fn contains(self, flag: NumberInfo) -> bool {
        self.0 & flag.0 == flag.0
    }

    /// The type-mask portion of the flags.
    pub fn type_mask(self) -> NumberInfo {
        NumberInfo(self.0 & Self::TYPE_MASK)
    }

    /// The prefix classified as a 64-bit integer.
    pub fn is_long(self) -> bool {
        self.contains(Self::LONG)
    }

    /// The prefix classified as a float.
    pub fn is_double(self) -> bool {
        self.contains(Self::DOUBLE)
    }

    /// Nothing numeric was found.
    pub fn is_unconvertible(self) -> bool {
        self.contains(Self::UNCONVERTIBLE)
    }

    /// The whole range was one well-formed number.
    pub fn is_number(self) -> bool {
        self.contains(Self::IS_NUMBER)
    }

    /// The literal was hexadecimal.
    pub fn is_hex(self) -> bool {
        self.contains(Self::IS_HEX)
    }
}

impl std::ops::BitOr for NumberInfo {
    type Output = NumberInfo;

    fn bitor(self, rhs: NumberInfo) -> NumberInfo {
        NumberInfo(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for NumberInfo {
    fn bitor_assign(&mut self, rhs: NumberInfo) {
        self.0 |= rhs.0;
    }
}

/// Full result of one automaton run.
#[derive(Debug, Clone, Copy)]
pub struct ParsedNumber {
    /// Classification of the scanned prefix
    pub info: NumberInfo,

    /// Longest-prefix integer value (saturated on overflow)
    pub long: i64,

    /// Longest-prefix floating value
    pub double: f64,

    /// Offset at which integer parsing stopped
    pub long_end: usize,

    /// Offset at which float parsing stopped
    pub double_end: usize,
}

impl ParsedNumber {
    /// Fold into the two-case numeric union, preferring the integer
    /// unless the prefix required a float.
    pub fn to_number(&self) -> PhpNumber {
        if self.info.is_double() {
            PhpNumber::Double(self.double)
        } else {
            PhpNumber::Long(self.long)
        }
    }
}

/// PHP's whitespace set for numeric literals.
fn is_php_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0B' | b'\x0C')
}

/// Run the automaton over `s[from..to]`.
///
/// `to` is exclusive and clamped to the string length. Offsets in the
/// result are absolute byte offsets into `s`.
pub fn parse_number(s: &str, from: usize, to: usize) -> ParsedNumber {
    let bytes = s.as_bytes();
    let to = to.min(bytes.len());
    let mut p = from.min(to);

    while p < to && is_php_space(bytes[p]) {
        p += 1;
    }

    // Slice handed to the float re-parse starts at the sign, never at
    // the whitespace.
    let num_start = p;

    let mut negative = false;
    if p < to && (bytes[p] == b'+' || bytes[p] == b'-') {
        negative = bytes[p] == b'-';
        p += 1;
    }

    // A magnitude limit of |i64::MIN| for negative literals keeps the
    // exact boundary string "-9223372036854775808" in integer range.
    let limit: u64 = if negative {
        (i64::MAX as u64) + 1
    } else {
        i64::MAX as u64
    };

    // Hexadecimal body: a leading zero followed by x/X and at least one
    // hex digit. A bare "0x" stays decimal zero with the x unconsumed.
    if p + 2 < to && bytes[p] == b'0' && (bytes[p + 1] | 0x20) == b'x' && bytes[p + 2].is_ascii_hexdigit() {
        return parse_hex(bytes, p + 2, to, negative, limit);
    }

    let mut magnitude: u64 = 0;
    let mut overflow_at: Option<usize> = None;
    let mut int_digits = 0usize;

    while p < to && bytes[p].is_ascii_digit() {
        let d = (bytes[p] - b'0') as u64;
        if overflow_at.is_none() {
            if magnitude > limit / 10 || (magnitude == limit / 10 && d > limit % 10) {
                overflow_at = Some(p);
            } else {
                magnitude = magnitude * 10 + d;
            }
        }
        p += 1;
        int_digits += 1;
    }

    let int_stop = p;

    // Fraction: a decimal point needs a digit on at least one side, so
    // ".5" converts but "." alone stays unconvertible.
    let mut float_stop = int_stop;
    let mut is_float = false;
    let mut frac_digits = 0usize;
    if p < to
        && bytes[p] == b'.'
        && (int_digits > 0 || (p + 1 < to && bytes[p + 1].is_ascii_digit()))
    {
        p += 1;
        while p < to && bytes[p].is_ascii_digit() {
            p += 1;
            frac_digits += 1;
        }
        float_stop = p;
        is_float = true;
    }

    if int_digits == 0 && frac_digits == 0 {
        // Nothing numeric; an empty (or all-whitespace) range still
        // classifies as integer zero.
        let info = if num_start == to {
            NumberInfo::LONG
        } else {
            NumberInfo::UNCONVERTIBLE
        };
        return ParsedNumber {
            info,
            long: 0,
            double: 0.0,
            long_end: num_start,
            double_end: num_start,
        };
    }

    // Exponent: accepted only after digits; an empty digit run leaves
    // the marker unconsumed instead of eating it.
    if p < to && (bytes[p] | 0x20) == b'e' {
        let mut q = p + 1;
        if q < to && (bytes[q] == b'+' || bytes[q] == b'-') {
            q += 1;
        }
        if q < to && bytes[q].is_ascii_digit() {
            while q < to && bytes[q].is_ascii_digit() {
                q += 1;
            }
            float_stop = q;
            is_float = true;
        }
    }

    let long = match overflow_at {
        Some(_) => {
            if negative {
                i64::MIN
            } else {
                i64::MAX
            }
        }
        None => apply_sign(magnitude, negative),
    };
    let long_end = overflow_at.unwrap_or(int_stop);

    // The grammar is already validated, so a failed float re-parse can
    // only mean overflow; PHP yields signed infinity there.
    let double = s[num_start..float_stop].parse::<f64>().unwrap_or(if negative {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    });

    let mut info = if is_float || overflow_at.is_some() {
        NumberInfo::DOUBLE
    } else {
        NumberInfo::LONG
    };
    if float_stop == to {
        info |= NumberInfo::IS_NUMBER;
    }

    ParsedNumber {
        info,
        long,
        double,
        long_end,
        double_end: float_stop,
    }
}

/// Hexadecimal sub-automaton; `p` sits on the first hex digit.
fn parse_hex(bytes: &[u8], mut p: usize, to: usize, negative: bool, limit: u64) -> ParsedNumber {
    let mut magnitude: u64 = 0;
    let mut double = 0.0f64;
    let mut overflow_at: Option<usize> = None;

    while p < to && bytes[p].is_ascii_hexdigit() {
        let d = hex_digit(bytes[p]) as u64;
        if overflow_at.is_none() {
            if magnitude > limit / 16 || (magnitude == limit / 16 && d > limit % 16) {
                overflow_at = Some(p);
            } else {
                magnitude = magnitude * 16 + d;
            }
        }
        double = double * 16.0 + d as f64;
        p += 1;
    }

    let long = match overflow_at {
        Some(_) => {
            if negative {
                i64::MIN
            } else {
                i64::MAX
            }
        }
        None => apply_sign(magnitude, negative),
    };
    if negative {
        double = -double;
    }

    let mut info = NumberInfo::IS_HEX
        | if overflow_at.is_some() {
            NumberInfo::DOUBLE
        } else {
            NumberInfo::LONG
        };
    if p == to {
        info |= NumberInfo::IS_NUMBER;
    }

    ParsedNumber {
        info,
        long,
        double,
        long_end: overflow_at.unwrap_or(p),
        double_end: p,
    }
}

fn hex_digit(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

/// Re-apply the sign to an accumulated magnitude.
///
/// A magnitude of exactly |i64::MIN| only ever arrives here negative and
/// wraps to the right value through the cast.
fn apply_sign(magnitude: u64, negative: bool) -> i64 {
    if negative {
        (magnitude as i64).wrapping_neg()
    } else {
        magnitude as i64
    }
}

/// Integer value of the leading numeric run of the whole string.
pub fn str_to_long(s: &str) -> i64 {
    parse_number(s, 0, s.len()).long
}

/// Float value of the leading numeric run of the whole string.
pub fn str_to_double(s: &str) -> f64 {
    parse_number(s, 0, s.len()).double
}

/// Classified numeric value of the whole string, for arithmetic.
pub fn str_to_number(s: &str) -> (NumberInfo, PhpNumber) {
    let parsed = parse_number(s, 0, s.len());
    (parsed.info, parsed.to_number())
}

/// Integer parse starting at `*pos`; leaves the cursor at the first
/// byte the integer scan did not consume.
pub fn substring_to_long(s: &str, pos: &mut usize) -> i64 {
    let parsed = parse_number(s, *pos, s.len());
    *pos = parsed.long_end;
    parsed.long
}

/// Float parse starting at `*pos`; leaves the cursor at the first byte
/// the float scan did not consume.
pub fn substring_to_double(s: &str, pos: &mut usize) -> f64 {
    let parsed = parse_number(s, *pos, s.len());
    *pos = parsed.double_end;
    parsed.double
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_integers() {
        let r = parse_number("42", 0, 2);
        assert_eq!(r.long, 42);
        assert_eq!(r.double, 42.0);
        assert!(r.info.is_long());
        assert!(r.info.is_number());
    }

    #[test]
    fn leading_whitespace_and_sign() {
        let r = parse_number("  -42", 0, 5);
        assert_eq!(r.long, -42);
        assert_eq!(r.double, -42.0);
        assert!(r.info.is_number());
    }

    #[test]
    fn trailing_garbage_keeps_value_clears_is_number() {
        let r = parse_number("123abc", 0, 6);
        assert_eq!(r.long, 123);
        assert_eq!(r.long_end, 3);
        assert!(!r.info.is_number());

        let r = parse_number("42 ", 0, 3);
        assert_eq!(r.long, 42);
        assert!(!r.info.is_number());
    }

    #[test]
    fn truncated_float() {
        let r = parse_number("3.14xyz", 0, 7);
        assert_eq!(r.long, 3);
        assert_eq!(r.long_end, 1);
        assert_eq!(r.double, 3.14);
        assert_eq!(r.double_end, 4);
        assert!(r.info.is_double());
        assert!(!r.info.is_number());
    }

    #[test]
    fn empty_input_is_integer_zero() {
        let r = parse_number("", 0, 0);
        assert_eq!(r.long, 0);
        assert!(r.info.is_long());
        assert!(!r.info.is_number());
    }

    #[test]
    fn garbage_is_unconvertible() {
        let r = parse_number("abc", 0, 3);
        assert_eq!(r.long, 0);
        assert!(r.info.is_unconvertible());
    }

    #[test]
    fn overflow_saturates_and_goes_double() {
        let r = parse_number("9223372036854775808", 0, 19);
        assert_eq!(r.long, i64::MAX);
        assert_eq!(r.long_end, 18);
        assert_eq!(r.info.type_mask(), NumberInfo::DOUBLE);
        assert!(r.info.is_number());
        assert_eq!(r.double, "9223372036854775808".parse::<f64>().unwrap());
    }

    #[test]
    fn min_magnitude_with_sign_stays_long() {
        let r = parse_number("-9223372036854775808", 0, 20);
        assert_eq!(r.long, i64::MIN);
        assert_eq!(r.info.type_mask(), NumberInfo::LONG);
        assert!(r.info.is_number());
    }

    #[test]
    fn hex_literal() {
        let r = parse_number("0x1F", 0, 4);
        assert!(r.info.is_hex());
        assert_eq!(r.long, 31);
        assert_eq!(r.double, 31.0);
        assert!(r.info.is_number());
    }

    #[test]
    fn bare_hex_prefix_is_decimal_zero() {
        let r = parse_number("0x", 0, 2);
        assert!(!r.info.is_hex());
        assert_eq!(r.long, 0);
        assert_eq!(r.long_end, 1);
        assert!(!r.info.is_number());
    }

    #[test]
    fn empty_exponent_rolls_back() {
        let r = parse_number("10e", 0, 3);
        assert_eq!(r.long, 10);
        assert_eq!(r.long_end, 2);
        assert_eq!(r.double_end, 2);
        assert!(r.info.is_long());
        assert!(!r.info.is_number());

        let r = parse_number("10e+", 0, 4);
        assert_eq!(r.double_end, 2);
        assert!(r.info.is_long());
    }

    #[test]
    fn exponent_form() {
        let r = parse_number("1e3", 0, 3);
        assert_eq!(r.double, 1000.0);
        assert!(r.info.is_double());
        assert!(r.info.is_number());
    }

    #[test]
    fn huge_exponent_is_infinity() {
        let r = parse_number("1e999", 0, 5);
        assert_eq!(r.double, f64::INFINITY);
        let r = parse_number("-1e999", 0, 6);
        assert_eq!(r.double, f64::NEG_INFINITY);
    }

    #[test]
    fn cursor_entry_points() {
        let mut pos = 0;
        assert_eq!(substring_to_long("123abc", &mut pos), 123);
        assert_eq!(pos, 3);

        let mut pos = 0;
        assert_eq!(substring_to_double("3.14xyz", &mut pos), 3.14);
        assert_eq!(pos, 4);

        // Integer cursor freezes at the overflowing digit.
        let mut pos = 0;
        assert_eq!(substring_to_long("9223372036854775808", &mut pos), i64::MAX);
        assert_eq!(pos, 18);
    }

    #[test]
    fn leading_decimal_point() {
        let r = parse_number(".5", 0, 2);
        assert!(r.info.is_double());
        assert!(r.info.is_number());
        assert_eq!(r.double, 0.5);
        assert_eq!(r.long, 0);

        // A lone dot has no digit on either side.
        let r = parse_number(".", 0, 1);
        assert!(r.info.is_unconvertible());
    }
}
