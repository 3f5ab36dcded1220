//! Core Kernel - Foundational types and utilities for the agency system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers and value objects
//! - The serial counter naming and document-numbering policy

pub mod money;
pub mod identifiers;
pub mod numbering;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{
    LeadId, QuotationId, PaymentId, ProfileId, AgencyId,
    DownloadId, EventId, ResourceId, PromotionId, NotificationId,
    FormId, FieldId, SubmissionId,
};
pub use numbering::{counter_names, format_document_number};
pub use error::CoreError;
