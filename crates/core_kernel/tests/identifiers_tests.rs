//! Unit tests for the identifiers module
//!
//! Tests cover identifier creation, parsing, conversion, and display
//! formatting across the id families.

use std::collections::HashSet;
use std::str::FromStr;

use core_kernel::identifiers::{
    AgencyId, FieldId, FormId, LeadId, NotificationId, PaymentId, ProfileId, QuotationId,
};
use uuid::Uuid;

#[test]
fn test_display_includes_prefix() {
    assert!(LeadId::new().to_string().starts_with("LEAD-"));
    assert!(QuotationId::new().to_string().starts_with("QTN-"));
    assert!(PaymentId::new().to_string().starts_with("PAY-"));
    assert!(ProfileId::new().to_string().starts_with("PRF-"));
    assert!(AgencyId::new().to_string().starts_with("AGY-"));
    assert!(FormId::new().to_string().starts_with("FRM-"));
    assert!(FieldId::new().to_string().starts_with("FLD-"));
    assert!(NotificationId::new().to_string().starts_with("NTF-"));
}

#[test]
fn test_round_trip_through_display() {
    let id = LeadId::new();
    let parsed = LeadId::from_str(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn test_parses_bare_uuid() {
    let uuid = Uuid::new_v4();
    let parsed = QuotationId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(parsed.as_uuid(), &uuid);
}

#[test]
fn test_rejects_garbage() {
    assert!(LeadId::from_str("not-a-uuid").is_err());
}

#[test]
fn test_uuid_conversions() {
    let uuid = Uuid::new_v4();
    let id = ProfileId::from(uuid);
    let back: Uuid = id.into();
    assert_eq!(uuid, back);
}

#[test]
fn test_new_ids_are_unique() {
    let ids: HashSet<_> = (0..100).map(|_| LeadId::new()).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_v7_ids_are_time_ordered_enough_to_differ() {
    let a = FormId::new_v7();
    let b = FormId::new_v7();
    assert_ne!(a, b);
}

#[test]
fn test_serde_is_transparent() {
    let id = AgencyId::new();
    let json = serde_json::to_string(&id).unwrap();
    // Serializes as a bare UUID string, no prefix
    assert_eq!(json, format!("\"{}\"", id.as_uuid()));

    let back: AgencyId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, back);
}
