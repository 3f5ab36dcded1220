//! Campaign form aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{FieldId, FormId};
use crate::error::CampaignError;

/// Field input type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Email,
    Phone,
    Number,
    Date,
    Textarea,
    Select,
    Checkbox,
}

impl FieldType {
    /// Whether this type carries an options list
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select)
    }
}

/// A single field of a campaign form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field ID
    pub id: FieldId,
    /// Label shown to the visitor
    pub label: String,
    /// Machine key used in submissions
    pub name: String,
    /// Input type
    pub field_type: FieldType,
    /// Whether an answer is mandatory
    pub required: bool,
    /// Options (select fields only, at least one)
    pub options: Vec<String>,
    /// Display order
    pub position: i32,
}

impl FieldDefinition {
    /// Creates a non-select field
    pub fn new(
        label: impl Into<String>,
        name: impl Into<String>,
        field_type: FieldType,
        required: bool,
    ) -> Self {
        Self {
            id: FieldId::new(),
            label: label.into(),
            name: name.into(),
            field_type,
            required,
            options: Vec::new(),
            position: 0,
        }
    }

    /// Creates a select field with its options
    pub fn select(
        label: impl Into<String>,
        name: impl Into<String>,
        required: bool,
        options: Vec<String>,
    ) -> Self {
        Self {
            id: FieldId::new(),
            label: label.into(),
            name: name.into(),
            field_type: FieldType::Select,
            required,
            options,
            position: 0,
        }
    }

    fn validate(&self) -> Result<(), CampaignError> {
        if self.label.trim().is_empty() {
            return Err(CampaignError::validation("field label cannot be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(CampaignError::validation("field name cannot be empty"));
        }
        if self.field_type.has_options() && self.options.is_empty() {
            return Err(CampaignError::SelectWithoutOptions(self.name.clone()));
        }
        Ok(())
    }
}

/// A promotional campaign form with its field definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignForm {
    /// Unique identifier
    pub id: FormId,
    /// Title shown on the landing page
    pub title: String,
    /// Globally unique URL slug
    pub slug: String,
    /// Email of the staff member who created the form
    pub author_email: String,
    /// Ordered field definitions (never empty)
    pub fields: Vec<FieldDefinition>,
    /// Whether the form accepts submissions
    pub active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl CampaignForm {
    /// Creates a campaign form, validating the whole shape.
    ///
    /// Field positions are assigned from the input order. Slug uniqueness
    /// is a storage concern and is checked by the repository inside the
    /// creation transaction; this constructor checks everything that can
    /// be checked without storage.
    pub fn new(
        title: impl Into<String>,
        slug: impl Into<String>,
        author_email: impl Into<String>,
        mut fields: Vec<FieldDefinition>,
    ) -> Result<Self, CampaignError> {
        let title = title.into();
        let slug = slug.into();
        let author_email = author_email.into();

        if title.trim().is_empty() {
            return Err(CampaignError::validation("title cannot be empty"));
        }
        validate_slug(&slug)?;
        if !author_email.contains('@') {
            return Err(CampaignError::validation(format!(
                "'{}' is not a valid email address",
                author_email
            )));
        }
        if fields.is_empty() {
            return Err(CampaignError::EmptyFields);
        }

        for (position, field) in fields.iter_mut().enumerate() {
            field.validate()?;
            field.position = position as i32;
        }

        let mut seen = std::collections::HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(CampaignError::DuplicateFieldName(field.name.clone()));
            }
        }

        let now = Utc::now();
        Ok(Self {
            id: FormId::new_v7(),
            title,
            slug,
            author_email,
            fields,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Looks up a field by machine name
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Deactivates the form; submissions are rejected afterwards
    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }
}

/// Checks slug shape: lowercase letters, digits, and single hyphens between
/// runs, no leading or trailing hyphen.
pub fn validate_slug(slug: &str) -> Result<(), CampaignError> {
    let valid = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(CampaignError::InvalidSlug(slug.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_field() -> FieldDefinition {
        FieldDefinition::new("Name", "name", FieldType::Text, true)
    }

    #[test]
    fn test_create_simple_form() {
        let form =
            CampaignForm::new("Eid Offer", "eid-offer", "marketing@agency.pk", vec![name_field()])
                .unwrap();

        assert_eq!(form.slug, "eid-offer");
        assert_eq!(form.fields.len(), 1);
        assert!(form.active);
        assert_eq!(form.fields[0].position, 0);
    }

    #[test]
    fn test_positions_follow_input_order() {
        let form = CampaignForm::new(
            "Spring Intake",
            "spring-intake",
            "marketing@agency.pk",
            vec![
                name_field(),
                FieldDefinition::new("Email", "email", FieldType::Email, true),
                FieldDefinition::select(
                    "Destination",
                    "destination",
                    true,
                    vec!["UK".to_string(), "Australia".to_string()],
                ),
            ],
        )
        .unwrap();

        let positions: Vec<i32> = form.fields.iter().map(|f| f.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_fields_rejected() {
        let err = CampaignForm::new("Eid Offer", "eid-offer", "m@agency.pk", vec![]).unwrap_err();
        assert!(matches!(err, CampaignError::EmptyFields));
    }

    #[test]
    fn test_select_without_options_rejected() {
        let err = CampaignForm::new(
            "Eid Offer",
            "eid-offer",
            "m@agency.pk",
            vec![FieldDefinition::select("Destination", "destination", true, vec![])],
        )
        .unwrap_err();
        assert!(matches!(err, CampaignError::SelectWithoutOptions(_)));
    }

    #[test]
    fn test_duplicate_field_name_rejected() {
        let err = CampaignForm::new(
            "Eid Offer",
            "eid-offer",
            "m@agency.pk",
            vec![name_field(), name_field()],
        )
        .unwrap_err();
        assert!(matches!(err, CampaignError::DuplicateFieldName(_)));
    }

    #[test]
    fn test_slug_shapes() {
        assert!(validate_slug("eid-offer").is_ok());
        assert!(validate_slug("summer2025").is_ok());
        assert!(validate_slug("Eid-Offer").is_err());
        assert!(validate_slug("eid offer").is_err());
        assert!(validate_slug("-eid").is_err());
        assert!(validate_slug("eid-").is_err());
        assert!(validate_slug("eid--offer").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn test_field_lookup() {
        let form =
            CampaignForm::new("Eid Offer", "eid-offer", "m@agency.pk", vec![name_field()]).unwrap();
        assert!(form.field("name").is_some());
        assert!(form.field("missing").is_none());
    }
}
