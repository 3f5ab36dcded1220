//! Content domain errors

use thiserror::Error;

/// Errors that can occur in the content domain
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl ContentError {
    pub fn validation(message: impl Into<String>) -> Self {
        ContentError::Validation(message.into())
    }
}
