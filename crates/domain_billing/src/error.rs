//! Billing domain errors

use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Quotation not found: {0}")]
    QuotationNotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Discount {discount} exceeds gross amount {gross}")]
    DiscountExceedsGross { discount: String, gross: String },

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl BillingError {
    pub fn validation(message: impl Into<String>) -> Self {
        BillingError::Validation(message.into())
    }
}
