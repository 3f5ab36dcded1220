//! Party Domain Ports
//!
//! The outbound-messaging port. Email and WhatsApp dispatch go through
//! provider-wrapping HTTP endpoints in production; the port keeps the
//! domain decoupled from that plumbing and lets tests swap in a mock.
//!
//! Dispatch is best-effort by contract: callers send after the primary
//! record is committed, log failures, and never roll back the write
//! because a message could not be delivered.

use async_trait::async_trait;
use thiserror::Error;

/// A message to a set of recipients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Recipient email addresses or phone numbers, depending on channel
    pub recipients: Vec<String>,
    /// Subject (email) or message title (WhatsApp)
    pub subject: String,
    /// Link to the record the message is about
    pub link: Option<String>,
}

impl OutboundMessage {
    pub fn new(recipients: Vec<String>, subject: impl Into<String>) -> Self {
        Self {
            recipients,
            subject: subject.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Errors surfaced by messaging adapters
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Provider unreachable: {0}")]
    Unreachable(String),

    #[error("Provider rejected the message: {0}")]
    Rejected(String),

    #[error("No recipients")]
    NoRecipients,
}

/// Port for outbound email and WhatsApp messaging
///
/// Implementations: the HTTP adapter in the API layer (production) and
/// the in-memory mock below (tests).
#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// Sends an email to the message recipients
    async fn send_email(&self, message: &OutboundMessage) -> Result<(), NotifyError>;

    /// Sends a WhatsApp message to the message recipients
    async fn send_whatsapp(&self, message: &OutboundMessage) -> Result<(), NotifyError>;
}

/// In-memory mock implementation of NotificationPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Which channel a recorded message went out on
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SentChannel {
        Email,
        WhatsApp,
    }

    /// Mock port that records every message instead of sending it
    #[derive(Debug, Default, Clone)]
    pub struct MockNotificationPort {
        sent: Arc<RwLock<Vec<(SentChannel, OutboundMessage)>>>,
        fail_next: Arc<RwLock<bool>>,
    }

    impl MockNotificationPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes the next send fail with an Unreachable error
        pub async fn fail_next(&self) {
            *self.fail_next.write().await = true;
        }

        /// Returns every message recorded so far
        pub async fn sent(&self) -> Vec<(SentChannel, OutboundMessage)> {
            self.sent.read().await.clone()
        }

        async fn record(
            &self,
            channel: SentChannel,
            message: &OutboundMessage,
        ) -> Result<(), NotifyError> {
            if message.recipients.is_empty() {
                return Err(NotifyError::NoRecipients);
            }
            if std::mem::take(&mut *self.fail_next.write().await) {
                return Err(NotifyError::Unreachable("mock failure".to_string()));
            }
            self.sent.write().await.push((channel, message.clone()));
            Ok(())
        }
    }

    #[async_trait]
    impl NotificationPort for MockNotificationPort {
        async fn send_email(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
            self.record(SentChannel::Email, message).await
        }

        async fn send_whatsapp(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
            self.record(SentChannel::WhatsApp, message).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{MockNotificationPort, SentChannel};
    use super::*;

    fn message() -> OutboundMessage {
        OutboundMessage::new(
            vec!["staff@agency.pk".to_string()],
            "New quotation issued",
        )
        .with_link("/quotations/2506008")
    }

    #[tokio::test]
    async fn test_mock_records_sends() {
        let port = MockNotificationPort::new();

        port.send_email(&message()).await.unwrap();
        port.send_whatsapp(&message()).await.unwrap();

        let sent = port.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, SentChannel::Email);
        assert_eq!(sent[1].0, SentChannel::WhatsApp);
        assert_eq!(sent[0].1.link.as_deref(), Some("/quotations/2506008"));
    }

    #[tokio::test]
    async fn test_mock_rejects_empty_recipients() {
        let port = MockNotificationPort::new();
        let empty = OutboundMessage::new(vec![], "nothing");

        let err = port.send_email(&empty).await.unwrap_err();
        assert!(matches!(err, NotifyError::NoRecipients));
    }

    #[tokio::test]
    async fn test_mock_failure_toggle_does_not_record() {
        let port = MockNotificationPort::new();
        port.fail_next().await;

        let err = port.send_email(&message()).await.unwrap_err();
        assert!(matches!(err, NotifyError::Unreachable(_)));
        assert!(port.sent().await.is_empty());

        // Toggle is one-shot
        port.send_email(&message()).await.unwrap();
        assert_eq!(port.sent().await.len(), 1);
    }
}
