//! Integration tests for the lead domain

use core_kernel::AgencyId;
use domain_lead::{Lead, LeadError, LeadNote, LeadSource, LeadStatus, StudyLevel, StudyPreference};

fn preference() -> StudyPreference {
    StudyPreference {
        level: StudyLevel::Undergraduate,
        field_of_study: "Business Administration".to_string(),
        intake: "Spring 2027".to_string(),
    }
}

fn new_lead(number: &str) -> Lead {
    Lead::new(
        number,
        "Bilal Ahmed",
        "bilal@example.com",
        "Australia",
        preference(),
        LeadSource::Campaign,
    )
    .unwrap()
}

#[test]
fn test_lead_assignment_to_agency() {
    let mut lead = new_lead("2506010");
    let agency = AgencyId::new();

    assert!(lead.agency_id.is_none());
    lead.assign_to(agency);
    assert_eq!(lead.agency_id, Some(agency));
}

#[test]
fn test_phone_builder() {
    let lead = new_lead("2506011").with_phone("+92-300-1234567");
    assert_eq!(lead.phone.as_deref(), Some("+92-300-1234567"));
}

#[test]
fn test_full_funnel_with_reopen() {
    let mut lead = new_lead("2506012");

    lead.update_status(LeadStatus::Contacted).unwrap();
    lead.update_status(LeadStatus::Lost).unwrap();
    lead.update_status(LeadStatus::Contacted).unwrap();
    lead.update_status(LeadStatus::Qualified).unwrap();
    lead.update_status(LeadStatus::Converted).unwrap();

    assert_eq!(lead.status, LeadStatus::Converted);
}

#[test]
fn test_invalid_transition_leaves_lead_untouched() {
    let mut lead = new_lead("2506013");
    let before = lead.updated_at;

    let err = lead.update_status(LeadStatus::Qualified).unwrap_err();
    assert!(matches!(err, LeadError::InvalidStatusTransition { .. }));
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(lead.updated_at, before);
}

#[test]
fn test_empty_name_rejected() {
    let result = Lead::new(
        "2506014",
        "   ",
        "someone@example.com",
        "Germany",
        preference(),
        LeadSource::Referral,
    );
    assert!(result.is_err());
}

#[test]
fn test_serde_round_trip() {
    let mut lead = new_lead("2506015");
    lead.add_note(LeadNote::new("staff@agency.pk", "Requested IELTS info"));

    let json = serde_json::to_string(&lead).unwrap();
    let back: Lead = serde_json::from_str(&json).unwrap();

    assert_eq!(back.lead_number, lead.lead_number);
    assert_eq!(back.notes.len(), 1);
    assert_eq!(back.status, LeadStatus::New);
}
