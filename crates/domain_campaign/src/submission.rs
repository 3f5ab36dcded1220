//! Campaign form submissions

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{FormId, SubmissionId};
use crate::error::CampaignError;
use crate::form::CampaignForm;

/// A visitor's answers to a campaign form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Unique identifier
    pub id: SubmissionId,
    /// The form answered
    pub form_id: FormId,
    /// Field name to answer value
    pub answers: BTreeMap<String, String>,
    /// When the visitor submitted
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Validates answers against the form definition and builds a submission.
    ///
    /// Rejects answers for unknown fields, missing or blank answers for
    /// required fields, and select answers outside the option list.
    pub fn new(
        form: &CampaignForm,
        answers: BTreeMap<String, String>,
    ) -> Result<Self, CampaignError> {
        if !form.active {
            return Err(CampaignError::validation(format!(
                "form '{}' is no longer accepting submissions",
                form.slug
            )));
        }

        for name in answers.keys() {
            if form.field(name).is_none() {
                return Err(CampaignError::UnknownField(name.clone()));
            }
        }

        for field in &form.fields {
            let answer = answers.get(&field.name).map(String::as_str);
            match answer {
                None | Some("") if field.required => {
                    return Err(CampaignError::MissingRequired(field.name.clone()));
                }
                Some(value) if field.field_type.has_options() && !value.is_empty() => {
                    if !field.options.iter().any(|o| o == value) {
                        return Err(CampaignError::InvalidOption {
                            field: field.name.clone(),
                            value: value.to_string(),
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(Self {
            id: SubmissionId::new_v7(),
            form_id: form.id,
            answers,
            submitted_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldDefinition, FieldType};

    fn form() -> CampaignForm {
        CampaignForm::new(
            "Eid Offer",
            "eid-offer",
            "marketing@agency.pk",
            vec![
                FieldDefinition::new("Name", "name", FieldType::Text, true),
                FieldDefinition::new("Phone", "phone", FieldType::Phone, false),
                FieldDefinition::select(
                    "Destination",
                    "destination",
                    true,
                    vec!["UK".to_string(), "Canada".to_string()],
                ),
            ],
        )
        .unwrap()
    }

    fn answers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_submission() {
        let form = form();
        let sub =
            Submission::new(&form, answers(&[("name", "Sara"), ("destination", "UK")])).unwrap();
        assert_eq!(sub.form_id, form.id);
        assert_eq!(sub.answers.len(), 2);
    }

    #[test]
    fn test_missing_required_rejected() {
        let form = form();
        let err = Submission::new(&form, answers(&[("name", "Sara")])).unwrap_err();
        assert!(matches!(err, CampaignError::MissingRequired(f) if f == "destination"));
    }

    #[test]
    fn test_blank_required_rejected() {
        let form = form();
        let err =
            Submission::new(&form, answers(&[("name", ""), ("destination", "UK")])).unwrap_err();
        assert!(matches!(err, CampaignError::MissingRequired(f) if f == "name"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let form = form();
        let err = Submission::new(
            &form,
            answers(&[("name", "Sara"), ("destination", "UK"), ("age", "25")]),
        )
        .unwrap_err();
        assert!(matches!(err, CampaignError::UnknownField(f) if f == "age"));
    }

    #[test]
    fn test_answer_outside_options_rejected() {
        let form = form();
        let err = Submission::new(
            &form,
            answers(&[("name", "Sara"), ("destination", "Mars")]),
        )
        .unwrap_err();
        assert!(matches!(err, CampaignError::InvalidOption { .. }));
    }

    #[test]
    fn test_optional_field_may_be_absent() {
        let form = form();
        assert!(Submission::new(&form, answers(&[("name", "Sara"), ("destination", "Canada")]))
            .is_ok());
    }

    #[test]
    fn test_inactive_form_rejects_submissions() {
        let mut form = form();
        form.deactivate();
        let err = Submission::new(&form, answers(&[("name", "Sara"), ("destination", "UK")]))
            .unwrap_err();
        assert!(matches!(err, CampaignError::Validation(_)));
    }
}
