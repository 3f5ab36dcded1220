//! Notifications
//!
//! One record per recipient per message. The client polls an unread-count
//! endpoint; the count itself is a storage query, this module owns the
//! record shape and read-flag transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::NotificationId;

/// Delivery channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    /// Shown in the portal only
    InApp,
    /// Also dispatched by email
    Email,
    /// Also dispatched by WhatsApp
    WhatsApp,
}

/// A notification addressed to one recipient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier
    pub id: NotificationId,
    /// Recipient email (doubles as the user key)
    pub recipient_email: String,
    /// Title
    pub title: String,
    /// Body text
    pub body: String,
    /// Link to the record the notification is about
    pub link: Option<String>,
    /// Channel
    pub channel: NotificationChannel,
    /// Whether the recipient has opened it
    pub read: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a new unread notification
    pub fn new(
        recipient_email: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        channel: NotificationChannel,
    ) -> Self {
        Self {
            id: NotificationId::new_v7(),
            recipient_email: recipient_email.into(),
            title: title.into(),
            body: body.into(),
            link: None,
            channel,
            read: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Marks the notification as read
    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notification_is_unread() {
        let n = Notification::new(
            "staff@agency.pk",
            "New quotation issued",
            "Quotation 2506008 was issued to Ayesha Khan",
            NotificationChannel::InApp,
        );
        assert!(!n.read);
        assert!(n.link.is_none());
    }

    #[test]
    fn test_mark_read() {
        let mut n = Notification::new(
            "staff@agency.pk",
            "Payment confirmed",
            "PKR 450,000 received",
            NotificationChannel::Email,
        )
        .with_link("/quotations/2506008");

        n.mark_read();
        assert!(n.read);
        assert_eq!(n.link.as_deref(), Some("/quotations/2506008"));
    }
}
