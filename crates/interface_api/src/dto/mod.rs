//! Request/Response data transfer objects

pub mod lead;
pub mod billing;
pub mod party;
pub mod campaign;
pub mod content;
