//! Request handlers

pub mod health;
pub mod lead;
pub mod billing;
pub mod party;
pub mod campaign;
pub mod content;
