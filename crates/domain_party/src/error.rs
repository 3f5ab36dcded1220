//! Party domain errors

use thiserror::Error;

/// Errors that can occur in the party domain
#[derive(Debug, Error)]
pub enum PartyError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Agency not found: {0}")]
    AgencyNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl PartyError {
    pub fn validation(message: impl Into<String>) -> Self {
        PartyError::Validation(message.into())
    }
}
