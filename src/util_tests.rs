#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_negative_large() {
    assert_eq!(format_amount(dec!(-99999.01)), "-$99,999.01");
}

#[test]
fn test_format_amount_starting_capital() {
    assert_eq!(format_amount(dec!(10000)), "$10,000.00");
}

// ── format_quantity ───────────────────────────────────────────

#[test]
fn test_format_quantity_whole() {
    assert_eq!(format_quantity(75.0), "75");
    assert_eq!(format_quantity(500.0), "500");
}

#[test]
fn test_format_quantity_fraction() {
    assert_eq!(format_quantity(33.333333), "33.3333");
    assert_eq!(format_quantity(0.5), "0.5");
}

#[test]
fn test_format_quantity_negative_and_zero() {
    assert_eq!(format_quantity(-25.0), "-25");
    assert_eq!(format_quantity(0.0), "0");
    assert_eq!(format_quantity(-0.000001), "0");
}
