//! Integration tests for the party domain

use chrono::NaiveDate;
use core_kernel::AgencyId;
use domain_party::{
    Address, Agency, AgencyStatus, DocumentLink, EducationEntry, ProfileValidator, StudentProfile,
    UserRole,
};

#[test]
fn test_profile_with_full_details_validates() {
    let mut profile = StudentProfile::new("Fatima Noor", "fatima@example.com", AgencyId::new())
        .with_phone("+92-321-9876543")
        .with_address(Address::new("House 4, F-7/2", "Islamabad", "44000", "Pakistan"));

    profile.date_of_birth = NaiveDate::from_ymd_opt(2002, 3, 14);
    profile.target_country = Some("Canada".to_string());
    profile.add_education(EducationEntry {
        institution: "Islamabad Model College".to_string(),
        qualification: "A Levels".to_string(),
        year_completed: 2021,
        grade: Some("AAB".to_string()),
    });
    profile.attach_document(DocumentLink::new(
        "Passport",
        "https://files.example.com/fatima-passport.pdf",
    ));

    let result = ProfileValidator::validate(&profile);
    assert!(result.is_valid, "errors: {:?}", result.errors);
}

#[test]
fn test_validation_accumulates_multiple_errors() {
    let mut profile = StudentProfile::new("", "not-an-email", AgencyId::new());
    profile.date_of_birth = NaiveDate::from_ymd_opt(2999, 1, 1);

    let result = ProfileValidator::validate(&profile);
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 3);
}

#[test]
fn test_address_formatting() {
    let mut address = Address::new("12-B Model Town", "Lahore", "54700", "Pakistan");
    address.line2 = Some("Block C".to_string());

    let formatted = address.format();
    assert_eq!(formatted, "12-B Model Town\nBlock C\nLahore 54700\nPakistan");
}

#[test]
fn test_agency_lifecycle_and_serde() {
    let mut agency = Agency::new("StudyBridge Karachi", "Pakistan", "karachi@studybridge.pk")
        .with_logo("https://files.example.com/sb-logo.png");

    agency.suspend();
    let json = serde_json::to_string(&agency).unwrap();
    let back: Agency = serde_json::from_str(&json).unwrap();
    assert_eq!(back.status, AgencyStatus::Suspended);
    assert_eq!(back.logo_url, agency.logo_url);
}

#[test]
fn test_roles_serialize_snake_case() {
    let json = serde_json::to_string(&UserRole::AgencyStaff).unwrap();
    assert_eq!(json, "\"agency_staff\"");
}
