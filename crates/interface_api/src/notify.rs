//! Outbound notification adapter
//!
//! Email and WhatsApp go out as HTTP POSTs to provider-wrapping endpoints
//! (`POST {notify_email_url}` / `POST {notify_whatsapp_url}` with a
//! recipients + subject + link payload). Dispatch is best-effort and
//! post-commit: a delivery failure is logged and surfaced to the caller as
//! a degraded response, never by reversing the primary write.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use domain_party::{NotificationPort, NotifyError, OutboundMessage};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct NotifyRequest<'a> {
    recipients: &'a [String],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<&'a str>,
}

/// NotificationPort implementation over the provider-wrapping HTTP routes
///
/// A channel with no configured endpoint reports `Unreachable` rather than
/// silently swallowing the message.
pub struct HttpNotificationPort {
    client: reqwest::Client,
    email_url: Option<String>,
    whatsapp_url: Option<String>,
}

impl HttpNotificationPort {
    /// Creates the adapter from the configured endpoint URLs
    pub fn new(email_url: Option<String>, whatsapp_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            email_url,
            whatsapp_url,
        }
    }

    async fn post(&self, url: &str, message: &OutboundMessage) -> Result<(), NotifyError> {
        if message.recipients.is_empty() {
            return Err(NotifyError::NoRecipients);
        }

        let payload = NotifyRequest {
            recipients: &message.recipients,
            subject: &message.subject,
            link: message.link.as_deref(),
        };

        let response = self
            .client
            .post(url)
            .json(&payload)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| NotifyError::Unreachable(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(NotifyError::Rejected(format!("status={status}: {body}")))
        }
    }
}

#[async_trait]
impl NotificationPort for HttpNotificationPort {
    async fn send_email(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        match &self.email_url {
            Some(url) => self.post(url, message).await,
            None => Err(NotifyError::Unreachable(
                "no email endpoint configured".to_string(),
            )),
        }
    }

    async fn send_whatsapp(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        match &self.whatsapp_url {
            Some(url) => self.post(url, message).await,
            None => Err(NotifyError::Unreachable(
                "no WhatsApp endpoint configured".to_string(),
            )),
        }
    }
}

/// Fires an email notification after the primary write has committed.
///
/// Runs detached; a failure is logged at warn level and dropped, matching
/// the no-rollback contract for side effects.
pub fn spawn_email(notifier: Arc<dyn NotificationPort>, message: OutboundMessage) {
    tokio::spawn(async move {
        if let Err(e) = notifier.send_email(&message).await {
            warn!(subject = %message.subject, error = %e, "Email notification failed");
        }
    });
}

/// Fires a WhatsApp notification after the primary write has committed.
pub fn spawn_whatsapp(notifier: Arc<dyn NotificationPort>, message: OutboundMessage) {
    tokio::spawn(async move {
        if let Err(e) = notifier.send_whatsapp(&message).await {
            warn!(subject = %message.subject, error = %e, "WhatsApp notification failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_channel_is_unreachable() {
        let port = HttpNotificationPort::new(None, None);
        let message = OutboundMessage::new(vec!["a@b.c".to_string()], "hello");

        assert!(matches!(
            port.send_email(&message).await,
            Err(NotifyError::Unreachable(_))
        ));
        assert!(matches!(
            port.send_whatsapp(&message).await,
            Err(NotifyError::Unreachable(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_recipients_rejected_before_any_io() {
        let port = HttpNotificationPort::new(Some("http://localhost:1/email".to_string()), None);
        let message = OutboundMessage::new(vec![], "hello");

        assert!(matches!(
            port.send_email(&message).await,
            Err(NotifyError::NoRecipients)
        ));
    }
}
