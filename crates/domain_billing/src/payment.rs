//! Payment tracking
//!
//! Payments are recorded against quotations after the student commits.
//! Recording is append-only; a failed payment stays on file with its
//! failure reason.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Money, PaymentId, QuotationId};

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Bank transfer
    BankTransfer,
    /// Credit or debit card
    Card,
    /// Cash at the agency office
    Cash,
    /// Anything else (noted in the reference)
    Other,
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Recorded, awaiting confirmation
    Pending,
    /// Funds confirmed received
    Confirmed,
    /// Did not go through
    Failed,
}

/// A payment recorded against a quotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Quotation being paid
    pub quotation_id: QuotationId,
    /// Payment amount
    pub amount: Money,
    /// Payment method
    pub method: PaymentMethod,
    /// External reference (bank ref, transaction ID)
    pub reference: Option<String>,
    /// Status
    pub status: PaymentStatus,
    /// When the payer says the payment was made
    pub paid_at: DateTime<Utc>,
    /// When status changed to confirmed
    pub confirmed_at: Option<DateTime<Utc>>,
    /// Notes (failure reason, manual adjustments)
    pub notes: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a new pending payment
    pub fn new(quotation_id: QuotationId, amount: Money, method: PaymentMethod) -> Self {
        let now = Utc::now();

        Self {
            id: PaymentId::new_v7(),
            quotation_id,
            amount,
            method,
            reference: None,
            status: PaymentStatus::Pending,
            paid_at: now,
            confirmed_at: None,
            notes: None,
            created_at: now,
        }
    }

    /// Sets the external reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Marks the payment as confirmed
    pub fn confirm(&mut self) {
        self.status = PaymentStatus::Confirmed;
        self.confirmed_at = Some(Utc::now());
    }

    /// Marks the payment as failed
    pub fn fail(&mut self, reason: &str) {
        self.status = PaymentStatus::Failed;
        self.notes = Some(reason.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_payment_is_pending() {
        let p = Payment::new(
            QuotationId::new(),
            Money::new(dec!(5000), Currency::GBP),
            PaymentMethod::BankTransfer,
        );
        assert_eq!(p.status, PaymentStatus::Pending);
        assert!(p.confirmed_at.is_none());
    }

    #[test]
    fn test_confirm_sets_timestamp() {
        let mut p = Payment::new(
            QuotationId::new(),
            Money::new(dec!(5000), Currency::GBP),
            PaymentMethod::Card,
        )
        .with_reference("TXN-99812");

        p.confirm();
        assert_eq!(p.status, PaymentStatus::Confirmed);
        assert!(p.confirmed_at.is_some());
        assert_eq!(p.reference.as_deref(), Some("TXN-99812"));
    }

    #[test]
    fn test_fail_records_reason() {
        let mut p = Payment::new(
            QuotationId::new(),
            Money::new(dec!(100), Currency::USD),
            PaymentMethod::Other,
        );
        p.fail("card declined");
        assert_eq!(p.status, PaymentStatus::Failed);
        assert_eq!(p.notes.as_deref(), Some("card declined"));
    }
}
