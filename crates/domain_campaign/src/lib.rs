//! Campaign Domain
//!
//! This crate implements promotional campaign forms: a form definition with
//! its ordered field definitions, and the submissions captured against it.
//!
//! Form and field definitions are created together as one unit; the
//! database layer persists them in a single all-or-nothing transaction.

pub mod form;
pub mod submission;
pub mod error;

pub use form::{CampaignForm, FieldDefinition, FieldType};
pub use submission::Submission;
pub use error::CampaignError;
