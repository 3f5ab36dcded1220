//! Content DTOs (downloads, events, resources, promotions, notifications)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{DownloadId, EventId, NotificationId, PromotionId, ResourceId};
use domain_content::{
    CalendarEvent, Download, Notification, NotificationChannel, Promotion, Resource,
};

// ---------------------------------------------------------------------------
// Downloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateDownloadRequest {
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub country: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDownloadRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub id: DownloadId,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub country: Option<String>,
    pub category: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Download> for DownloadResponse {
    fn from(d: Download) -> Self {
        Self {
            id: d.id,
            title: d.title,
            description: d.description,
            file_url: d.file_url,
            country: d.country,
            category: d.category,
            active: d.active,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

/// Query parameters for download listings
#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub include_inactive: bool,
    pub country: Option<String>,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub agency_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// Query parameters for the calendar range view
#[derive(Debug, Deserialize)]
pub struct EventRangeQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub agency_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub agency_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CalendarEvent> for EventResponse {
    fn from(e: CalendarEvent) -> Self {
        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            location: e.location,
            starts_at: e.starts_at,
            ends_at: e.ends_at,
            agency_id: e.agency_id.map(Uuid::from),
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateResourceRequest {
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateResourceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub category: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ResourceResponse {
    pub id: ResourceId,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub category: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Resource> for ResourceResponse {
    fn from(r: Resource) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            link: r.link,
            category: r.category,
            active: r.active,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Query parameters for resource listings
#[derive(Debug, Default, Deserialize)]
pub struct ResourceQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

// ---------------------------------------------------------------------------
// Promotions
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreatePromotionRequest {
    pub title: String,
    pub description: Option<String>,
    pub banner_url: Option<String>,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePromotionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub banner_url: Option<String>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct PromotionResponse {
    pub id: PromotionId,
    pub title: String,
    pub description: Option<String>,
    pub banner_url: Option<String>,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Promotion> for PromotionResponse {
    fn from(p: Promotion) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            banner_url: p.banner_url,
            starts_on: p.starts_on,
            ends_on: p.ends_on,
            active: p.active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: NotificationId,
    pub recipient_email: String,
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    pub channel: NotificationChannel,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            recipient_email: n.recipient_email,
            title: n.title,
            body: n.body,
            link: n.link,
            channel: n.channel,
            read: n.read,
            created_at: n.created_at,
        }
    }
}

/// Query parameters for notification listings; recipient defaults to the
/// caller's own email
#[derive(Debug, Default, Deserialize)]
pub struct RecipientQuery {
    pub recipient: Option<String>,
}

/// Unread-count payload for the client's polling timer
#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub unread: i64,
}
