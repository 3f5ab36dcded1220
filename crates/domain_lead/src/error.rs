//! Lead domain errors

use thiserror::Error;

/// Errors that can occur in the lead domain
#[derive(Debug, Error)]
pub enum LeadError {
    #[error("Lead not found: {0}")]
    LeadNotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl LeadError {
    pub fn validation(message: impl Into<String>) -> Self {
        LeadError::Validation(message.into())
    }
}
