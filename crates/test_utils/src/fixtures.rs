//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the agency
//! system. These fixtures are designed to be consistent and predictable
//! for unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{AgencyId, Currency, FormId, LeadId, Money, ProfileId, QuotationId};
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A standard GBP tuition fee
    pub fn gbp_tuition() -> Money {
        Money::new(dec!(24000.00), Currency::GBP)
    }

    /// A typical service fee
    pub fn gbp_service_fee() -> Money {
        Money::new(dec!(350.00), Currency::GBP)
    }

    /// A typical discount
    pub fn gbp_discount() -> Money {
        Money::new(dec!(500.00), Currency::GBP)
    }

    /// A zero amount
    pub fn gbp_zero() -> Money {
        Money::zero(Currency::GBP)
    }

    /// A PKR amount for local-fee scenarios
    pub fn pkr_100k() -> Money {
        Money::new(dec!(100000.00), Currency::PKR)
    }

    /// A USD amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The canonical issuance month used across numbering tests
    pub fn june_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    /// Start of a standard fair-week event
    pub fn fair_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 14, 9, 0, 0).unwrap()
    }

    /// End of a standard fair-week event
    pub fn fair_end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 17, 0, 0).unwrap()
    }

    /// A quotation validity date comfortably in the future of the fixtures
    pub fn validity_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 30).unwrap()
    }

    /// Standard date of birth for a 21-year-old applicant
    pub fn date_of_birth_21() -> NaiveDate {
        NaiveDate::from_ymd_opt(2004, 5, 15).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic lead ID for testing
    pub fn lead_id() -> LeadId {
        LeadId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a deterministic quotation ID for testing
    pub fn quotation_id() -> QuotationId {
        QuotationId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// Creates a deterministic profile ID for testing
    pub fn profile_id() -> ProfileId {
        ProfileId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }

    /// Creates a deterministic agency ID for testing
    pub fn agency_id() -> AgencyId {
        AgencyId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440004").unwrap())
    }

    /// Creates a deterministic form ID for testing
    pub fn form_id() -> FormId {
        FormId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440005").unwrap())
    }
}

/// Fixture for common string data
pub struct StringFixtures;

impl StringFixtures {
    /// A quotation number matching the documented format
    pub fn quotation_number() -> &'static str {
        "2506008"
    }

    /// A lead number matching the documented format
    pub fn lead_number() -> &'static str {
        "2506001"
    }

    /// A well-formed campaign slug
    pub fn slug() -> &'static str {
        "eid-offer"
    }

    /// A student email
    pub fn student_email() -> &'static str {
        "student@example.com"
    }

    /// An agency contact email
    pub fn agency_email() -> &'static str {
        "info@studybridge.pk"
    }
}
