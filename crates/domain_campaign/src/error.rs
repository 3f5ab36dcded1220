//! Campaign domain errors

use thiserror::Error;

/// Errors that can occur in the campaign domain
#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("Form not found: {0}")]
    FormNotFound(String),

    #[error("A form with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("Invalid slug '{0}': use lowercase letters, digits, and hyphens")]
    InvalidSlug(String),

    #[error("A form must have at least one field")]
    EmptyFields,

    #[error("Select field '{0}' must have at least one option")]
    SelectWithoutOptions(String),

    #[error("Duplicate field name '{0}'")]
    DuplicateFieldName(String),

    #[error("Unknown field '{0}' in submission")]
    UnknownField(String),

    #[error("Required field '{0}' is missing")]
    MissingRequired(String),

    #[error("'{value}' is not an option of field '{field}'")]
    InvalidOption { field: String, value: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CampaignError {
    pub fn validation(message: impl Into<String>) -> Self {
        CampaignError::Validation(message.into())
    }
}
