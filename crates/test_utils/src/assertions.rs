//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more
/// than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value is positive
pub fn assert_money_positive(money: &Money) {
    assert!(
        money.is_positive(),
        "Expected positive money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that money values sum to a total
pub fn assert_money_sums_to(parts: &[Money], total: &Money) {
    let sum: Decimal = parts.iter().map(|m| m.amount()).sum();
    assert_eq!(
        sum,
        total.amount(),
        "Parts sum to {} but expected {}",
        sum,
        total.amount()
    );
}

/// Asserts that a document number has the `YYMM` + serial shape
pub fn assert_document_number_shape(number: &str) {
    assert!(
        number.len() >= 7,
        "Document number '{}' is shorter than YYMM + 3 digits",
        number
    );
    assert!(
        number.chars().all(|c| c.is_ascii_digit()),
        "Document number '{}' contains non-digits",
        number
    );
    let month: u32 = number[2..4].parse().expect("month digits");
    assert!(
        (1..=12).contains(&month),
        "Document number '{}' has invalid month '{}'",
        number,
        month
    );
}
