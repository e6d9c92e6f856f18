//! Tests for string-to-number conversion through the public surface

use phpval::parse::{self, parse_number, NumberInfo};
use phpval::*;

// ═══════════════════════════════════════════════════════════════════════
// Prefix Semantics Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_leading_whitespace_and_sign() {
    assert_eq!(Value::from("  \t\n-42").to_long(), -42);
    assert_eq!(Value::from("+7").to_long(), 7);
    assert_eq!(parse::str_to_long("   "), 0);
}

#[test]
fn test_trailing_garbage_converts_the_prefix() {
    assert_eq!(Value::from("3.5kg").to_double(), 3.5);
    assert_eq!(Value::from("10 apples").to_long(), 10);
    let p = parse_number("3.5kg", 0, 5);
    assert!(!p.info.is_number());
    assert!(p.info.is_double());
}

#[test]
fn test_non_numeric_text_is_unconvertible_zero() {
    let p = parse_number("abc", 0, 3);
    assert!(p.info.is_unconvertible());
    assert_eq!(p.long, 0);
    assert_eq!(Value::from("abc").to_long(), 0);
    assert_eq!(Value::from("abc").to_double(), 0.0);
}

#[test]
fn test_empty_string_is_long_zero_but_not_a_number() {
    let p = parse_number("", 0, 0);
    assert!(p.info.is_long());
    assert!(!p.info.is_number());
    assert_eq!(p.long, 0);
}

#[test]
fn test_is_number_requires_full_consumption() {
    assert!(parse_number("10", 0, 2).info.is_number());
    assert!(parse_number(" 10", 0, 3).info.is_number());
    assert!(!parse_number("10 ", 0, 3).info.is_number());
    assert!(!parse_number("10x", 0, 3).info.is_number());
}

// ═══════════════════════════════════════════════════════════════════════
// Integer Overflow Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_overflow_switches_to_double() {
    let p = parse_number("9223372036854775808", 0, 19);
    assert!(p.info.is_double());
    assert_eq!(p.double, 9.223372036854776e18);
}

#[test]
fn test_negative_boundary_stays_long() {
    let p = parse_number("-9223372036854775808", 0, 20);
    assert!(p.info.is_long());
    assert_eq!(p.long, i64::MIN);
    assert_eq!(Value::from("-9223372036854775808").to_long(), i64::MIN);
}

#[test]
fn test_max_boundary_stays_long() {
    assert_eq!(Value::from("9223372036854775807").to_long(), i64::MAX);
}

// ═══════════════════════════════════════════════════════════════════════
// Float Syntax Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_exponent_forms() {
    assert_eq!(Value::from("1e3").to_double(), 1000.0);
    assert_eq!(Value::from("1.5E+2").to_double(), 150.0);
    assert_eq!(Value::from(".5").to_double(), 0.5);
    assert_eq!(Value::from("2.").to_double(), 2.0);
}

#[test]
fn test_empty_exponent_rolls_back() {
    // "10e" and "10e+" convert as the integer 10.
    let p = parse_number("10e", 0, 3);
    assert!(p.info.is_long());
    assert_eq!(p.long, 10);
    assert_eq!(p.long_end, 2);

    let p = parse_number("10e+", 0, 4);
    assert!(p.info.is_long());
    assert_eq!(p.long, 10);
}

#[test]
fn test_huge_exponent_saturates_to_infinity() {
    assert_eq!(Value::from("1e999").to_double(), f64::INFINITY);
    assert_eq!(Value::from("-1e999").to_double(), f64::NEG_INFINITY);
}

// ═══════════════════════════════════════════════════════════════════════
// Hexadecimal Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_hex_literals() {
    let p = parse_number("0xff", 0, 4);
    assert!(p.info.is_hex());
    assert_eq!(p.long, 255);
    assert_eq!(Value::from("0xFF").to_long(), 255);
    assert_eq!(Value::from("-0x10").to_long(), -16);
}

#[test]
fn test_bare_0x_is_decimal_zero() {
    // Without at least one hex digit the "x" is trailing garbage.
    let p = parse_number("0x", 0, 2);
    assert!(!p.info.is_hex());
    assert_eq!(p.long, 0);
    assert_eq!(p.long_end, 1);
}

// ═══════════════════════════════════════════════════════════════════════
// Cursor-Based Parsing Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_substring_parse_advances_the_cursor() {
    let s = "12,34";
    let mut pos = 0;
    assert_eq!(parse::substring_to_long(s, &mut pos), 12);
    assert_eq!(pos, 2);
    pos = 3;
    assert_eq!(parse::substring_to_long(s, &mut pos), 34);
    assert_eq!(pos, 5);
}

#[test]
fn test_substring_double_stops_after_the_float() {
    let s = "1.5rest";
    let mut pos = 0;
    assert_eq!(parse::substring_to_double(s, &mut pos), 1.5);
    assert_eq!(pos, 3);
}

// ═══════════════════════════════════════════════════════════════════════
// Classified Conversion Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_str_to_number_classification() {
    let (info, n) = parse::str_to_number("42");
    assert_eq!(info.type_mask(), NumberInfo::LONG);
    assert_eq!(n, PhpNumber::Long(42));

    let (info, n) = parse::str_to_number("4.5");
    assert_eq!(info.type_mask(), NumberInfo::DOUBLE);
    assert_eq!(n, PhpNumber::Double(4.5));

    let (info, _) = parse::str_to_number("x");
    assert_eq!(info.type_mask(), NumberInfo::UNCONVERTIBLE);
}

#[test]
fn test_arithmetic_follows_classified_conversion() {
    // "10" + "2.5" promotes to float exactly once.
    let (_, a) = Value::from("10").to_number();
    let (_, b) = Value::from("2.5").to_number();
    assert_eq!(a + b, PhpNumber::Double(12.5));
}

#[test]
fn test_division_stays_integral_only_when_exact() {
    assert_eq!(
        PhpNumber::Long(10).div(PhpNumber::Long(2)).unwrap(),
        PhpNumber::Long(5)
    );
    assert_eq!(
        PhpNumber::Long(10).div(PhpNumber::Long(4)).unwrap(),
        PhpNumber::Double(2.5)
    );
    assert!(matches!(
        PhpNumber::Long(1).div(PhpNumber::Long(0)),
        Err(ValueError::DivisionByZero)
    ));
}
