//! Property-Based Test Generators
//!
//! Provides proptest strategies and fake-data helpers for generating
//! random test data that maintains domain invariants.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::AUD),
        Just(Currency::CAD),
        Just(Currency::JPY),
        Just(Currency::PKR),
        Just(Currency::INR),
        Just(Currency::BDT),
        Just(Currency::MYR),
        Just(Currency::TRY),
    ]
}

/// Strategy for generating valid positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating valid Money values with positive amounts
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (positive_amount_minor_strategy(), currency_strategy())
        .prop_map(|(amount, currency)| Money::from_minor(amount, currency))
}

/// Strategy for generating serials across the padding boundary
pub fn serial_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![1i64..1000i64, 1000i64..100_000i64]
}

/// Strategy for generating issuance dates
pub fn issuance_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2035i32, 1u32..=12u32)
        .prop_map(|(year, month)| NaiveDate::from_ymd_opt(year, month, 1).unwrap())
}

/// Strategy for generating well-formed slugs
pub fn slug_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-z0-9]{1,8}", 1..4).prop_map(|parts| parts.join("-"))
}

/// Generates a realistic person name
pub fn fake_name() -> String {
    Name().fake()
}

/// Generates a realistic email address
pub fn fake_email() -> String {
    SafeEmail().fake()
}
