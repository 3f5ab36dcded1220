//! Cross-domain integration tests
//!
//! These scenarios exercise several crates together without a database:
//! document numbering composed with quotation construction, totals over
//! builder-made quotations, campaign form validation feeding submissions,
//! and the mock outbound-messaging port.

use chrono::{Datelike, NaiveDate};
use core_kernel::numbering::{counter_names, format_document_number};
use core_kernel::{Currency, Money};
use rust_decimal_macros::dec;

use test_utils::{
    assert_document_number_shape, assert_money_approx_eq, MoneyFixtures, StringFixtures,
    TemporalFixtures, TestFormBuilder, TestLeadBuilder, TestQuotationBuilder,
};

mod quotation_numbering {
    use super::*;

    /// A counter sitting at 7 in June 2025 issues serial 8 next, and the
    /// composed number is exactly "2506008"
    #[test]
    fn test_counter_at_seven_composes_2506008() {
        let stored_counter_value = 7i64;
        let next_serial = stored_counter_value + 1;

        let number = format_document_number(TemporalFixtures::june_2025(), next_serial);
        assert_eq!(number, "2506008");
        assert_document_number_shape(&number);
    }

    #[test]
    fn test_quotation_carries_composed_number() {
        let number = format_document_number(TemporalFixtures::june_2025(), 8);
        let quotation = TestQuotationBuilder::new()
            .with_quotation_number(number.clone())
            .build();

        assert_eq!(quotation.quotation_number, "2506008");
    }

    #[test]
    fn test_lead_and_quotation_numbering_spaces_are_independent() {
        // Same serial in both families composes the same digits; only the
        // counter name keeps the spaces apart
        assert_ne!(counter_names::LEAD, counter_names::QUOTATION);

        let lead = TestLeadBuilder::new()
            .with_lead_number(format_document_number(TemporalFixtures::june_2025(), 1))
            .build();
        let quotation = TestQuotationBuilder::new()
            .with_quotation_number(format_document_number(TemporalFixtures::june_2025(), 1))
            .build();

        assert_eq!(lead.lead_number, quotation.quotation_number);
    }

    #[test]
    fn test_serial_past_999_widens_number() {
        let number = format_document_number(TemporalFixtures::june_2025(), 1000);
        assert_eq!(number, "25061000");
        assert_document_number_shape(&number);
    }
}

mod quotation_totals {
    use super::*;

    #[test]
    fn test_course_plus_services_minus_discount() {
        let quotation = TestQuotationBuilder::new()
            .with_course_fee(MoneyFixtures::gbp_tuition())
            .with_service("Visa processing", MoneyFixtures::gbp_service_fee())
            .with_service("Courier", Money::new(dec!(50), Currency::GBP))
            .with_discount(MoneyFixtures::gbp_discount())
            .build();

        assert_eq!(quotation.subtotal.amount(), dec!(24400));
        assert_eq!(quotation.total.amount(), dec!(23900));
        assert_money_approx_eq(
            &quotation.total,
            &Money::new(dec!(23900), Currency::GBP),
            dec!(0),
        );
    }

    #[test]
    fn test_issued_quotation_tracks_payments() {
        use domain_billing::{Payment, PaymentMethod};

        let mut quotation = TestQuotationBuilder::new()
            .with_course_fee(MoneyFixtures::pkr_100k())
            .build();
        quotation.issue().unwrap();

        let mut deposit = Payment::new(
            quotation.id,
            Money::new(dec!(40000), Currency::PKR),
            PaymentMethod::BankTransfer,
        );
        deposit.confirm();

        let balance = quotation.balance_due(&[deposit]);
        assert_eq!(balance.amount(), dec!(60000));
    }
}

mod campaign_flow {
    use super::*;
    use domain_campaign::{FieldDefinition, FieldType, Submission};
    use std::collections::BTreeMap;

    #[test]
    fn test_form_built_from_fixtures_accepts_submission() {
        let form = TestFormBuilder::new()
            .add_field(FieldDefinition::select(
                "Destination",
                "destination",
                true,
                vec!["UK".to_string(), "Canada".to_string()],
            ))
            .build();

        assert_eq!(form.slug, StringFixtures::slug());

        let mut answers = BTreeMap::new();
        answers.insert("name".to_string(), "Omar".to_string());
        answers.insert("destination".to_string(), "UK".to_string());

        let submission = Submission::new(&form, answers).unwrap();
        assert_eq!(submission.form_id, form.id);
    }

    #[test]
    fn test_invalid_field_poisons_whole_form() {
        let result = TestFormBuilder::new()
            .add_field(FieldDefinition::select("City", "city", false, vec![]))
            .try_build();
        assert!(result.is_err());
    }
}

mod outbound_messaging {
    use domain_party::ports::mock::{MockNotificationPort, SentChannel};
    use domain_party::{NotificationPort, OutboundMessage};

    #[tokio::test]
    async fn test_quotation_email_goes_through_the_port() {
        let port = MockNotificationPort::new();

        let message = OutboundMessage::new(
            vec!["student@example.com".to_string()],
            "Your quotation 2506008",
        )
        .with_link("/quotations/2506008");

        port.send_email(&message).await.unwrap();

        let sent = port.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, SentChannel::Email);
        assert_eq!(sent[0].1.subject, "Your quotation 2506008");
    }

    #[tokio::test]
    async fn test_delivery_failure_is_an_error_not_a_panic() {
        let port = MockNotificationPort::new();
        port.fail_next().await;

        let message = OutboundMessage::new(vec!["a@b.c".to_string()], "hello");
        assert!(port.send_email(&message).await.is_err());
    }
}

mod numbering_properties {
    use super::*;
    use proptest::prelude::*;
    use test_utils::{issuance_date_strategy, serial_strategy};

    proptest! {
        #[test]
        fn composed_numbers_always_have_valid_shape(
            date in issuance_date_strategy(),
            serial in serial_strategy()
        ) {
            let number = format_document_number(date, serial);
            assert_document_number_shape(&number);
        }

        #[test]
        fn distinct_serials_compose_distinct_numbers(
            date in issuance_date_strategy(),
            serial in 1i64..999_999i64
        ) {
            let a = format_document_number(date, serial);
            let b = format_document_number(date, serial + 1);
            prop_assert_ne!(a, b);
        }
    }
}

#[test]
fn test_fixture_dates_are_consistent() {
    // The fair fixtures sit inside the canonical issuance month
    assert_eq!(TemporalFixtures::june_2025().month(), 6);
    assert!(TemporalFixtures::fair_start() < TemporalFixtures::fair_end());
    assert!(TemporalFixtures::validity_date() > NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
}
