//! Lead Intake Domain
//!
//! This crate implements the lead lifecycle from first enquiry through
//! qualification and conversion.
//!
//! # Lead Lifecycle
//!
//! ```text
//! New -> Contacted -> Qualified -> Converted
//!   \________\___________\______> Lost -> Contacted (reopen)
//! ```

pub mod lead;
pub mod error;

pub use lead::{Lead, LeadStatus, LeadSource, LeadNote, StudyLevel, StudyPreference};
pub use error::LeadError;
