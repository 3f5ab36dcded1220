//! Quotation management
//!
//! A quotation prices a course for a prospective student: one course item,
//! any number of service fee items, and an optional absolute discount.
//! Totals are recomputed on every item change.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{AgencyId, Currency, Money, QuotationId};
use crate::error::BillingError;

/// Quotation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuotationStatus {
    /// Being drafted by a counselor
    Draft,
    /// Issued to the student
    Issued,
    /// Accepted by the student
    Accepted,
    /// Declined by the student
    Declined,
    /// Validity date passed without a decision
    Expired,
}

/// The course being quoted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseItem {
    /// Institution name
    pub institution: String,
    /// Course title
    pub course_name: String,
    /// Tuition fee for the quoted period
    pub fee: Money,
}

/// An agency service fee line (visa processing, document attestation, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceItem {
    /// Item ID
    pub id: Uuid,
    /// Fee label
    pub label: String,
    /// Fee amount
    pub amount: Money,
}

impl ServiceItem {
    pub fn new(label: impl Into<String>, amount: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            amount,
        }
    }
}

/// A quotation for a course plus agency services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    /// Unique identifier
    pub id: QuotationId,
    /// Quotation number (YYMM + serial, shown to the student)
    pub quotation_number: String,
    /// Student name
    pub student_name: String,
    /// Student email
    pub student_email: String,
    /// Issuing agency
    pub agency_id: AgencyId,
    /// Currency
    pub currency: Currency,
    /// The quoted course
    pub course: CourseItem,
    /// Service fee items
    pub services: Vec<ServiceItem>,
    /// Absolute discount applied to the gross amount
    pub discount: Money,
    /// Course fee plus service fees
    pub subtotal: Money,
    /// Subtotal minus discount
    pub total: Money,
    /// Status
    pub status: QuotationStatus,
    /// Last day the quoted prices hold
    pub valid_until: NaiveDate,
    /// Notes shown on the printed quotation
    pub notes: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Quotation {
    /// Creates a new draft quotation.
    ///
    /// The quotation number is issued by the counter store before
    /// construction; this constructor only records it. The course fee
    /// currency fixes the quotation currency.
    pub fn new(
        quotation_number: impl Into<String>,
        student_name: impl Into<String>,
        student_email: impl Into<String>,
        agency_id: AgencyId,
        course: CourseItem,
        valid_until: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        let currency = course.fee.currency();

        let mut quotation = Self {
            id: QuotationId::new_v7(),
            quotation_number: quotation_number.into(),
            student_name: student_name.into(),
            student_email: student_email.into(),
            agency_id,
            currency,
            course,
            services: Vec::new(),
            discount: Money::zero(currency),
            subtotal: Money::zero(currency),
            total: Money::zero(currency),
            status: QuotationStatus::Draft,
            valid_until,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        quotation.recalculate_totals();
        quotation
    }

    /// Adds a service fee item
    pub fn add_service(&mut self, item: ServiceItem) -> Result<(), BillingError> {
        if item.amount.currency() != self.currency {
            return Err(core_kernel::MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                item.amount.currency().to_string(),
            )
            .into());
        }
        self.services.push(item);
        self.recalculate_totals();
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Replaces the whole service fee list
    pub fn replace_services(&mut self, items: Vec<ServiceItem>) -> Result<(), BillingError> {
        if let Some(item) = items.iter().find(|i| i.amount.currency() != self.currency) {
            return Err(core_kernel::MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                item.amount.currency().to_string(),
            )
            .into());
        }
        // A shrunk gross can leave the discount oversized; check before mutating
        let new_subtotal = items.iter().fold(self.course.fee, |acc, i| acc + i.amount);
        if self.discount.amount() > new_subtotal.amount() {
            return Err(BillingError::DiscountExceedsGross {
                discount: self.discount.to_string(),
                gross: new_subtotal.to_string(),
            });
        }
        self.services = items;
        self.recalculate_totals();
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Removes a service fee item by id; returns whether one was removed
    pub fn remove_service(&mut self, id: Uuid) -> bool {
        let before = self.services.len();
        self.services.retain(|s| s.id != id);
        let removed = self.services.len() != before;
        if removed {
            self.recalculate_totals();
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Applies an absolute discount.
    ///
    /// A discount larger than the gross amount is rejected rather than
    /// floored at zero.
    pub fn set_discount(&mut self, discount: Money) -> Result<(), BillingError> {
        if discount.currency() != self.currency {
            return Err(core_kernel::MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                discount.currency().to_string(),
            )
            .into());
        }
        if discount.is_negative() {
            return Err(BillingError::validation("discount cannot be negative"));
        }
        if discount.amount() > self.subtotal.amount() {
            return Err(BillingError::DiscountExceedsGross {
                discount: discount.to_string(),
                gross: self.subtotal.to_string(),
            });
        }
        self.discount = discount;
        self.recalculate_totals();
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Issues the quotation to the student
    pub fn issue(&mut self) -> Result<(), BillingError> {
        self.transition(QuotationStatus::Issued)
    }

    /// Records the student's acceptance
    pub fn accept(&mut self) -> Result<(), BillingError> {
        self.transition(QuotationStatus::Accepted)
    }

    /// Records the student's refusal
    pub fn decline(&mut self) -> Result<(), BillingError> {
        self.transition(QuotationStatus::Declined)
    }

    /// Marks the quotation expired
    pub fn mark_expired(&mut self) -> Result<(), BillingError> {
        self.transition(QuotationStatus::Expired)
    }

    /// Whether the validity date has passed
    pub fn is_past_validity(&self, today: NaiveDate) -> bool {
        today > self.valid_until
    }

    /// Outstanding balance given the payments recorded against this quotation.
    ///
    /// Only confirmed payments reduce the balance.
    pub fn balance_due(&self, payments: &[crate::payment::Payment]) -> Money {
        let paid = payments
            .iter()
            .filter(|p| p.status == crate::payment::PaymentStatus::Confirmed)
            .fold(Money::zero(self.currency), |acc, p| acc + p.amount);
        self.total - paid
    }

    fn transition(&mut self, target: QuotationStatus) -> Result<(), BillingError> {
        use QuotationStatus::*;
        let allowed = matches!(
            (self.status, target),
            (Draft, Issued) | (Issued, Accepted) | (Issued, Declined) | (Issued, Expired)
        );
        if !allowed {
            return Err(BillingError::InvalidStatusTransition {
                from: format!("{:?}", self.status),
                to: format!("{:?}", target),
            });
        }
        tracing::debug!(
            quotation = %self.quotation_number,
            from = ?self.status,
            to = ?target,
            "Quotation status changed"
        );
        self.status = target;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Recalculates subtotal and total from items
    fn recalculate_totals(&mut self) {
        self.subtotal = self
            .services
            .iter()
            .fold(self.course.fee, |acc, item| acc + item.amount);
        self.total = self.subtotal - self.discount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn course() -> CourseItem {
        CourseItem {
            institution: "University of Manchester".to_string(),
            course_name: "MSc Data Science".to_string(),
            fee: Money::new(dec!(24000), Currency::GBP),
        }
    }

    fn quotation() -> Quotation {
        Quotation::new(
            "2506008",
            "Ayesha Khan",
            "ayesha@example.com",
            AgencyId::new(),
            course(),
            NaiveDate::from_ymd_opt(2025, 7, 31).unwrap(),
        )
    }

    #[test]
    fn test_new_quotation_totals_equal_course_fee() {
        let q = quotation();
        assert_eq!(q.subtotal.amount(), dec!(24000));
        assert_eq!(q.total.amount(), dec!(24000));
        assert_eq!(q.status, QuotationStatus::Draft);
    }

    #[test]
    fn test_totals_fold_over_services_and_discount() {
        let mut q = quotation();
        q.add_service(ServiceItem::new("Visa processing", Money::new(dec!(350), Currency::GBP)))
            .unwrap();
        q.add_service(ServiceItem::new("Document attestation", Money::new(dec!(150), Currency::GBP)))
            .unwrap();
        q.set_discount(Money::new(dec!(500), Currency::GBP)).unwrap();

        assert_eq!(q.subtotal.amount(), dec!(24500));
        assert_eq!(q.total.amount(), dec!(24000));
    }

    #[test]
    fn test_discount_cannot_exceed_gross() {
        let mut q = quotation();
        let err = q
            .set_discount(Money::new(dec!(25000), Currency::GBP))
            .unwrap_err();
        assert!(matches!(err, BillingError::DiscountExceedsGross { .. }));
        assert_eq!(q.total.amount(), dec!(24000));
    }

    #[test]
    fn test_service_currency_must_match() {
        let mut q = quotation();
        let err = q
            .add_service(ServiceItem::new("IELTS booking", Money::new(dec!(100), Currency::USD)))
            .unwrap_err();
        assert!(matches!(err, BillingError::Money(_)));
        assert!(q.services.is_empty());
    }

    #[test]
    fn test_remove_service_recalculates() {
        let mut q = quotation();
        let item = ServiceItem::new("Courier", Money::new(dec!(40), Currency::GBP));
        let id = item.id;
        q.add_service(item).unwrap();
        assert_eq!(q.subtotal.amount(), dec!(24040));

        assert!(q.remove_service(id));
        assert_eq!(q.subtotal.amount(), dec!(24000));
        assert!(!q.remove_service(id));
    }

    #[test]
    fn test_status_workflow() {
        let mut q = quotation();
        assert!(q.accept().is_err());
        q.issue().unwrap();
        q.accept().unwrap();
        assert_eq!(q.status, QuotationStatus::Accepted);
        assert!(q.decline().is_err());
    }

    #[test]
    fn test_validity_check() {
        let q = quotation();
        assert!(!q.is_past_validity(NaiveDate::from_ymd_opt(2025, 7, 31).unwrap()));
        assert!(q.is_past_validity(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()));
    }
}
