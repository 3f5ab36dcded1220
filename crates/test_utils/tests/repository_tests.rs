//! Database-backed repository tests
//!
//! These run against a throwaway PostgreSQL testcontainer and are ignored
//! by default; run them with `cargo test -- --ignored` on a machine with
//! Docker available.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::numbering::counter_names;
use core_kernel::{Currency, Money};
use domain_billing::{Payment, PaymentMethod};
use domain_campaign::{FieldDefinition, FieldType};
use domain_lead::LeadStatus;
use domain_party::Agency;
use infra_db::repositories::billing::{PaymentRepository, QuotationFilter, QuotationRepository};
use infra_db::repositories::campaign::CampaignRepository;
use infra_db::repositories::lead::{LeadFilter, LeadRepository};
use infra_db::repositories::party::AgencyRepository;
use infra_db::CounterStore;
use test_utils::{TestDatabase, TestFormBuilder, TestLeadBuilder, TestQuotationBuilder};

async fn seed_agency(db: &TestDatabase) -> Agency {
    let agency = Agency::new("StudyBridge Lahore", "Pakistan", "info@studybridge.pk");
    AgencyRepository::new(db.pool.clone())
        .insert(&agency)
        .await
        .unwrap();
    agency
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_fresh_counter_issues_one_then_increments() {
    let db = TestDatabase::new().await.unwrap();
    let counters = CounterStore::new(db.pool.clone());

    assert_eq!(counters.current("lead").await.unwrap(), None);
    assert_eq!(counters.next_serial("lead").await.unwrap(), 1);
    assert_eq!(counters.next_serial("lead").await.unwrap(), 2);
    assert_eq!(counters.next_serial("lead").await.unwrap(), 3);
    assert_eq!(counters.current("lead").await.unwrap(), Some(3));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_counter_names_are_independent_sequences() {
    let db = TestDatabase::new().await.unwrap();
    let counters = CounterStore::new(db.pool.clone());

    assert_eq!(counters.next_serial(counter_names::LEAD).await.unwrap(), 1);
    assert_eq!(counters.next_serial(counter_names::LEAD).await.unwrap(), 2);
    assert_eq!(
        counters.next_serial(counter_names::QUOTATION).await.unwrap(),
        1
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_concurrent_issuance_yields_distinct_consecutive_serials() {
    let db = TestDatabase::new().await.unwrap();
    let counters = Arc::new(CounterStore::new(db.pool.clone()));

    const CALLERS: i64 = 24;
    let mut handles = Vec::new();
    for _ in 0..CALLERS {
        let counters = counters.clone();
        handles.push(tokio::spawn(async move {
            counters.next_serial("quotation").await.unwrap()
        }));
    }

    let mut serials = HashSet::new();
    for handle in handles {
        serials.insert(handle.await.unwrap());
    }

    // N distinct values, no gaps, final stored value = N
    assert_eq!(serials.len() as i64, CALLERS);
    assert_eq!(*serials.iter().min().unwrap(), 1);
    assert_eq!(*serials.iter().max().unwrap(), CALLERS);
    assert_eq!(
        counters.current("quotation").await.unwrap(),
        Some(CALLERS)
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_counter_at_seven_issues_2506008() {
    let db = TestDatabase::new().await.unwrap();
    let counters = CounterStore::new(db.pool.clone());

    for _ in 0..7 {
        counters.next_serial(counter_names::QUOTATION).await.unwrap();
    }

    let number = counters
        .next_document_number(
            counter_names::QUOTATION,
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(number, "2506008");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_lead_crud_round_trip() {
    let db = TestDatabase::new().await.unwrap();
    let repo = LeadRepository::new(db.pool.clone());

    let mut lead = TestLeadBuilder::new().with_lead_number("2506001").build();
    repo.insert(&lead).await.unwrap();

    let fetched = repo.get_by_id(lead.id).await.unwrap();
    assert_eq!(fetched.lead_number, "2506001");
    assert_eq!(fetched.status, LeadStatus::New);
    assert_eq!(fetched.study_preference, lead.study_preference);

    lead.update_status(LeadStatus::Contacted).unwrap();
    repo.update(&lead).await.unwrap();

    let by_status = repo
        .list(&LeadFilter {
            status: Some(LeadStatus::Contacted),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_status.len(), 1);

    repo.delete(lead.id).await.unwrap();
    assert!(repo.get_by_id(lead.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_lead_number_is_rejected() {
    let db = TestDatabase::new().await.unwrap();
    let repo = LeadRepository::new(db.pool.clone());

    let first = TestLeadBuilder::new().with_lead_number("2506001").build();
    let second = TestLeadBuilder::new()
        .with_lead_number("2506001")
        .with_email("other@example.com")
        .build();

    repo.insert(&first).await.unwrap();
    let err = repo.insert(&second).await.unwrap_err();
    assert!(err.is_constraint_violation());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_quotation_round_trip_preserves_totals() {
    let db = TestDatabase::new().await.unwrap();
    let agency = seed_agency(&db).await;

    let quotation = TestQuotationBuilder::new()
        .with_agency(agency.id)
        .with_service("Visa processing", Money::new(350.into(), Currency::GBP))
        .with_discount(Money::new(500.into(), Currency::GBP))
        .build();

    let repo = QuotationRepository::new(db.pool.clone());
    repo.insert(&quotation).await.unwrap();

    let fetched = repo.get_by_number(&quotation.quotation_number).await.unwrap();
    assert_eq!(fetched.subtotal, quotation.subtotal);
    assert_eq!(fetched.total, quotation.total);
    assert_eq!(fetched.services.len(), 1);
    assert_eq!(fetched.currency, Currency::GBP);

    let listed = repo
        .list(&QuotationFilter {
            agency_id: Some(agency.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_payments_accumulate_against_quotation() {
    let db = TestDatabase::new().await.unwrap();
    let agency = seed_agency(&db).await;

    let quotation = TestQuotationBuilder::new().with_agency(agency.id).build();
    QuotationRepository::new(db.pool.clone())
        .insert(&quotation)
        .await
        .unwrap();

    let payments = PaymentRepository::new(db.pool.clone());
    let mut deposit = Payment::new(
        quotation.id,
        Money::new(4000.into(), Currency::GBP),
        PaymentMethod::BankTransfer,
    );
    deposit.confirm();
    payments.insert(&deposit).await.unwrap();

    let listed = payments.list_for_quotation(quotation.id).await.unwrap();
    assert_eq!(listed.len(), 1);

    let balance = quotation.balance_due(&listed);
    assert_eq!(balance, quotation.total - deposit.amount);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_campaign_form_and_fields_commit_together() {
    let db = TestDatabase::new().await.unwrap();
    let repo = CampaignRepository::new(db.pool.clone());

    let form = TestFormBuilder::new().build();
    repo.create_with_fields(&form).await.unwrap();

    let fetched = repo.get_by_slug("eid-offer").await.unwrap();
    assert_eq!(fetched.title, "Eid Offer");
    assert_eq!(fetched.fields.len(), 1);
    assert_eq!(fetched.fields[0].name, "name");
    assert_eq!(repo.field_count(form.id).await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_slug_rejected_without_touching_first_form() {
    let db = TestDatabase::new().await.unwrap();
    let repo = CampaignRepository::new(db.pool.clone());

    let first = TestFormBuilder::new().build();
    repo.create_with_fields(&first).await.unwrap();

    let second = TestFormBuilder::new()
        .with_title("Eid Offer Again")
        .add_field(FieldDefinition::new("Email", "email", FieldType::Email, true))
        .build();

    let err = repo.create_with_fields(&second).await.unwrap_err();
    assert!(err.is_constraint_violation());

    // The first form's field count is unchanged and the second form's
    // fields were not persisted
    assert_eq!(repo.field_count(first.id).await.unwrap(), 1);
    assert!(repo.get_by_id(second.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_mid_transaction_failure_persists_nothing() {
    let db = TestDatabase::new().await.unwrap();
    let repo = CampaignRepository::new(db.pool.clone());

    // Two fields with the same machine name violate the per-form UNIQUE
    // constraint on the second insert, after the form row is already in
    // the transaction. The whole creation must roll back.
    let mut form = TestFormBuilder::new().build();
    let duplicate = FieldDefinition::new("Name again", "name", FieldType::Text, false);
    form.fields.push(duplicate);

    let err = repo.create_with_fields(&form).await.unwrap_err();
    assert!(err.is_constraint_violation());
    assert!(repo.get_by_slug("eid-offer").await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_form_deletion_cascades_to_fields() {
    let db = TestDatabase::new().await.unwrap();
    let repo = CampaignRepository::new(db.pool.clone());

    let form = TestFormBuilder::new().build();
    repo.create_with_fields(&form).await.unwrap();

    repo.delete(form.id).await.unwrap();
    assert_eq!(repo.field_count(form.id).await.unwrap(), 0);
    assert!(repo.get_by_slug("eid-offer").await.unwrap_err().is_not_found());
}
