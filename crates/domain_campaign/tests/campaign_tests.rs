//! Integration tests for the campaign domain

use std::collections::BTreeMap;

use domain_campaign::{CampaignError, CampaignForm, FieldDefinition, FieldType, Submission};

#[test]
fn test_eid_offer_form_shape() {
    let form = CampaignForm::new(
        "Eid Offer",
        "eid-offer",
        "marketing@agency.pk",
        vec![FieldDefinition::new("Name", "name", FieldType::Text, true)],
    )
    .unwrap();

    assert_eq!(form.title, "Eid Offer");
    assert_eq!(form.slug, "eid-offer");
    assert_eq!(form.fields.len(), 1);

    let field = &form.fields[0];
    assert_eq!(field.label, "Name");
    assert_eq!(field.name, "name");
    assert_eq!(field.field_type, FieldType::Text);
    assert!(field.required);
    assert!(field.options.is_empty());
}

#[test]
fn test_validation_failure_builds_nothing() {
    // A select field with zero options poisons the whole form
    let result = CampaignForm::new(
        "Broken",
        "broken",
        "m@agency.pk",
        vec![
            FieldDefinition::new("Name", "name", FieldType::Text, true),
            FieldDefinition::select("City", "city", false, vec![]),
        ],
    );
    assert!(matches!(result, Err(CampaignError::SelectWithoutOptions(_))));
}

#[test]
fn test_mixed_field_types() {
    let form = CampaignForm::new(
        "Open Day",
        "open-day-2025",
        "events@agency.pk",
        vec![
            FieldDefinition::new("Full name", "full_name", FieldType::Text, true),
            FieldDefinition::new("Email", "email", FieldType::Email, true),
            FieldDefinition::new("Birth date", "birth_date", FieldType::Date, false),
            FieldDefinition::new("Questions", "questions", FieldType::Textarea, false),
            FieldDefinition::new("Consent", "consent", FieldType::Checkbox, true),
        ],
    )
    .unwrap();

    assert_eq!(form.fields.len(), 5);
    assert!(form.fields.iter().all(|f| f.options.is_empty()));
}

#[test]
fn test_submission_round_trip_against_form() {
    let form = CampaignForm::new(
        "Eid Offer",
        "eid-offer",
        "marketing@agency.pk",
        vec![
            FieldDefinition::new("Name", "name", FieldType::Text, true),
            FieldDefinition::select(
                "Intake",
                "intake",
                true,
                vec!["Fall 2025".to_string(), "Spring 2026".to_string()],
            ),
        ],
    )
    .unwrap();

    let mut answers = BTreeMap::new();
    answers.insert("name".to_string(), "Omar".to_string());
    answers.insert("intake".to_string(), "Fall 2025".to_string());

    let submission = Submission::new(&form, answers).unwrap();
    assert_eq!(submission.answers["intake"], "Fall 2025");

    let json = serde_json::to_string(&submission).unwrap();
    let back: Submission = serde_json::from_str(&json).unwrap();
    assert_eq!(back.form_id, form.id);
}
