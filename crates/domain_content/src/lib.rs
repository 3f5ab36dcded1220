//! Content Domain
//!
//! This crate implements the portal's content records: downloadable
//! documents, calendar events with date-range queries, external resources,
//! promotions with an active window, and in-app/email/WhatsApp
//! notifications with unread tracking.

pub mod download;
pub mod event;
pub mod resource;
pub mod promotion;
pub mod notification;
pub mod error;

pub use download::Download;
pub use event::{events_in_range, CalendarEvent};
pub use resource::Resource;
pub use promotion::Promotion;
pub use notification::{Notification, NotificationChannel};
pub use error::ContentError;
