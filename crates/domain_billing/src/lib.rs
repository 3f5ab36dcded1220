//! Billing Domain
//!
//! This crate implements quotations (course fee + service fees − discount)
//! and the payments recorded against them.
//!
//! # Quotation Lifecycle
//!
//! ```text
//! Draft -> Issued -> Accepted / Declined / Expired
//! ```

pub mod quotation;
pub mod payment;
pub mod error;

pub use quotation::{CourseItem, Quotation, QuotationStatus, ServiceItem};
pub use payment::{Payment, PaymentMethod, PaymentStatus};
pub use error::BillingError;
