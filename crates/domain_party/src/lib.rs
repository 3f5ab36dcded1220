//! Party Management Domain
//!
//! This crate implements the people and tenants of the system: student
//! profiles with their education history and documents, agencies (the
//! tenant organizations of the network), user roles, and the port for
//! outbound email/WhatsApp messaging.

pub mod profile;
pub mod agency;
pub mod address;
pub mod validation;
pub mod ports;
pub mod error;

pub use profile::{DocumentLink, EducationEntry, StudentProfile};
pub use agency::{Agency, AgencyStatus, UserRole};
pub use address::Address;
pub use validation::{ProfileValidator, ValidationResult};
pub use ports::{NotificationPort, NotifyError, OutboundMessage};
pub use error::PartyError;
