//! Unit tests for the Money module
//!
//! Tests cover money creation, arithmetic operations, currency handling,
//! and rounding edge cases.

use core_kernel::money::{Currency, Money, MoneyError};
use rust_decimal_macros::dec;

#[test]
fn test_creation_rounds_to_four_places() {
    let m = Money::new(dec!(10.123456), Currency::USD);
    assert_eq!(m.amount(), dec!(10.1235));
}

#[test]
fn test_from_minor_units() {
    assert_eq!(Money::from_minor(250_000, Currency::PKR).amount(), dec!(2500.00));
    // JPY has no minor unit
    assert_eq!(Money::from_minor(2500, Currency::JPY).amount(), dec!(2500));
}

#[test]
fn test_zero() {
    let z = Money::zero(Currency::GBP);
    assert!(z.is_zero());
    assert!(!z.is_positive());
}

#[test]
fn test_sign_predicates() {
    assert!(Money::new(dec!(1), Currency::USD).is_positive());
    assert!(Money::new(dec!(-1), Currency::USD).is_negative());
    assert!(Money::new(dec!(-1), Currency::USD).abs().is_positive());
}

#[test]
fn test_addition_and_subtraction() {
    let course = Money::new(dec!(12000), Currency::GBP);
    let service = Money::new(dec!(350), Currency::GBP);
    let discount = Money::new(dec!(500), Currency::GBP);

    let total = course + service - discount;
    assert_eq!(total.amount(), dec!(11850));
}

#[test]
fn test_checked_add_rejects_currency_mismatch() {
    let usd = Money::new(dec!(10), Currency::USD);
    let eur = Money::new(dec!(10), Currency::EUR);

    assert_eq!(
        usd.checked_add(&eur),
        Err(MoneyError::CurrencyMismatch("USD".to_string(), "EUR".to_string()))
    );
}

#[test]
fn test_multiply_by_scalar() {
    let installment = Money::new(dec!(1000), Currency::AUD);
    assert_eq!(installment.multiply(dec!(3)).amount(), dec!(3000));
}

#[test]
fn test_round_to_currency() {
    let m = Money::new(dec!(99.995), Currency::USD);
    assert_eq!(m.round_to_currency().amount(), dec!(100.00));

    let yen = Money::new(dec!(1999.4), Currency::JPY);
    assert_eq!(yen.round_to_currency().amount(), dec!(1999));
}

#[test]
fn test_display_uses_symbol_and_precision() {
    let m = Money::new(dec!(1234.5), Currency::USD);
    assert_eq!(m.to_string(), "$ 1234.50");

    let yen = Money::new(dec!(1234), Currency::JPY);
    assert_eq!(yen.to_string(), "¥ 1234");
}

#[test]
fn test_currency_codes() {
    assert_eq!(Currency::PKR.code(), "PKR");
    assert_eq!(Currency::PKR.to_string(), "PKR");
    assert_eq!(Currency::JPY.decimal_places(), 0);
    assert_eq!(Currency::USD.decimal_places(), 2);
}

#[test]
fn test_currency_parses_from_code() {
    assert_eq!("GBP".parse::<Currency>().unwrap(), Currency::GBP);
    assert!(matches!(
        "XYZ".parse::<Currency>(),
        Err(MoneyError::UnknownCurrency(_))
    ));
}

#[test]
fn test_serde_round_trip() {
    let m = Money::new(dec!(42.42), Currency::MYR);
    let json = serde_json::to_string(&m).unwrap();
    let back: Money = serde_json::from_str(&json).unwrap();
    assert_eq!(m, back);
}
