//! Content repository implementations
//!
//! Downloads, calendar events, resources, promotions, and notifications.
//! All simple single-table CRUD; the event range query and the
//! notification unread count are the only queries with any shape to them.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{
    AgencyId, DownloadId, EventId, NotificationId, PromotionId, ResourceId,
};
use domain_content::{CalendarEvent, Download, Notification, Promotion, Resource};

use crate::error::DatabaseError;

/// Notification channel, as stored in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "notification_channel", rename_all = "snake_case")]
pub enum NotificationChannel {
    InApp,
    Email,
    WhatsApp,
}

impl From<domain_content::NotificationChannel> for NotificationChannel {
    fn from(channel: domain_content::NotificationChannel) -> Self {
        match channel {
            domain_content::NotificationChannel::InApp => NotificationChannel::InApp,
            domain_content::NotificationChannel::Email => NotificationChannel::Email,
            domain_content::NotificationChannel::WhatsApp => NotificationChannel::WhatsApp,
        }
    }
}

impl From<NotificationChannel> for domain_content::NotificationChannel {
    fn from(channel: NotificationChannel) -> Self {
        match channel {
            NotificationChannel::InApp => domain_content::NotificationChannel::InApp,
            NotificationChannel::Email => domain_content::NotificationChannel::Email,
            NotificationChannel::WhatsApp => domain_content::NotificationChannel::WhatsApp,
        }
    }
}

/// Database row representation of a download
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DownloadRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub country: Option<String>,
    pub category: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DownloadRow {
    fn into_domain(self) -> Download {
        Download {
            id: DownloadId::from(self.id),
            title: self.title,
            description: self.description,
            file_url: self.file_url,
            country: self.country,
            category: self.category,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Repository for download persistence
#[derive(Debug, Clone)]
pub struct DownloadRepository {
    pool: PgPool,
}

impl DownloadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new download
    pub async fn insert(&self, download: &Download) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO downloads (
                id, title, description, file_url, country, category, active,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::from(download.id))
        .bind(&download.title)
        .bind(&download.description)
        .bind(&download.file_url)
        .bind(&download.country)
        .bind(&download.category)
        .bind(download.active)
        .bind(download.created_at)
        .bind(download.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves a download by its identifier
    pub async fn get_by_id(&self, id: DownloadId) -> Result<Download, DatabaseError> {
        let row: DownloadRow = sqlx::query_as(
            r#"
            SELECT id, title, description, file_url, country, category, active,
                   created_at, updated_at
            FROM downloads WHERE id = $1
            "#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Download", id))?;

        Ok(row.into_domain())
    }

    /// Lists downloads, optionally only active ones and/or for one country
    pub async fn list(
        &self,
        only_active: bool,
        country: Option<&str>,
    ) -> Result<Vec<Download>, DatabaseError> {
        let rows: Vec<DownloadRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, file_url, country, category, active,
                   created_at, updated_at
            FROM downloads
            WHERE (NOT $1 OR active)
              AND ($2::text IS NULL OR country = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(only_active)
        .bind(country)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DownloadRow::into_domain).collect())
    }

    /// Updates a download in full (last-write-wins)
    pub async fn update(&self, download: &Download) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE downloads
            SET title = $2, description = $3, file_url = $4, country = $5,
                category = $6, active = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(download.id))
        .bind(&download.title)
        .bind(&download.description)
        .bind(&download.file_url)
        .bind(&download.country)
        .bind(&download.category)
        .bind(download.active)
        .bind(download.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Download", download.id));
        }
        Ok(())
    }

    /// Deletes a download
    pub async fn delete(&self, id: DownloadId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM downloads WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Download", id));
        }
        Ok(())
    }
}

/// Database row representation of a calendar event
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub agency_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventRow {
    fn into_domain(self) -> CalendarEvent {
        CalendarEvent {
            id: EventId::from(self.id),
            title: self.title,
            description: self.description,
            location: self.location,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            agency_id: self.agency_id.map(AgencyId::from),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const EVENT_COLUMNS: &str = r#"
    SELECT id, title, description, location, starts_at, ends_at, agency_id,
           created_at, updated_at
    FROM events
"#;

/// Repository for calendar event persistence
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new event
    pub async fn insert(&self, event: &CalendarEvent) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO events (
                id, title, description, location, starts_at, ends_at,
                agency_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::from(event.id))
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(event.agency_id.map(Uuid::from))
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves an event by its identifier
    pub async fn get_by_id(&self, id: EventId) -> Result<CalendarEvent, DatabaseError> {
        let row: EventRow = sqlx::query_as(&format!("{EVENT_COLUMNS} WHERE id = $1"))
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Event", id))?;

        Ok(row.into_domain())
    }

    /// Lists events overlapping the half-open range `[from, to)`,
    /// optionally scoped to one agency's calendar (network-wide events
    /// are always included)
    pub async fn list_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        agency_id: Option<AgencyId>,
    ) -> Result<Vec<CalendarEvent>, DatabaseError> {
        let rows: Vec<EventRow> = sqlx::query_as(&format!(
            r#"
            {EVENT_COLUMNS}
            WHERE starts_at < $2 AND ends_at > $1
              AND ($3::uuid IS NULL OR agency_id IS NULL OR agency_id = $3)
            ORDER BY starts_at ASC
            "#
        ))
        .bind(from)
        .bind(to)
        .bind(agency_id.map(Uuid::from))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EventRow::into_domain).collect())
    }

    /// Updates an event in full (last-write-wins)
    pub async fn update(&self, event: &CalendarEvent) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET title = $2, description = $3, location = $4, starts_at = $5,
                ends_at = $6, agency_id = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(event.id))
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(event.agency_id.map(Uuid::from))
        .bind(event.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Event", event.id));
        }
        Ok(())
    }

    /// Deletes an event
    pub async fn delete(&self, id: EventId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Event", id));
        }
        Ok(())
    }
}

/// Database row representation of a resource
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResourceRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub category: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceRow {
    fn into_domain(self) -> Resource {
        Resource {
            id: ResourceId::from(self.id),
            title: self.title,
            description: self.description,
            link: self.link,
            category: self.category,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Repository for resource persistence
#[derive(Debug, Clone)]
pub struct ResourceRepository {
    pool: PgPool,
}

impl ResourceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new resource
    pub async fn insert(&self, resource: &Resource) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO resources (
                id, title, description, link, category, active,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Uuid::from(resource.id))
        .bind(&resource.title)
        .bind(&resource.description)
        .bind(&resource.link)
        .bind(&resource.category)
        .bind(resource.active)
        .bind(resource.created_at)
        .bind(resource.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves a resource by its identifier
    pub async fn get_by_id(&self, id: ResourceId) -> Result<Resource, DatabaseError> {
        let row: ResourceRow = sqlx::query_as(
            r#"
            SELECT id, title, description, link, category, active,
                   created_at, updated_at
            FROM resources WHERE id = $1
            "#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Resource", id))?;

        Ok(row.into_domain())
    }

    /// Lists resources, optionally only active ones
    pub async fn list(&self, only_active: bool) -> Result<Vec<Resource>, DatabaseError> {
        let rows: Vec<ResourceRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, link, category, active,
                   created_at, updated_at
            FROM resources
            WHERE (NOT $1 OR active)
            ORDER BY created_at DESC
            "#,
        )
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ResourceRow::into_domain).collect())
    }

    /// Updates a resource in full (last-write-wins)
    pub async fn update(&self, resource: &Resource) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE resources
            SET title = $2, description = $3, link = $4, category = $5,
                active = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(resource.id))
        .bind(&resource.title)
        .bind(&resource.description)
        .bind(&resource.link)
        .bind(&resource.category)
        .bind(resource.active)
        .bind(resource.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Resource", resource.id));
        }
        Ok(())
    }

    /// Deletes a resource
    pub async fn delete(&self, id: ResourceId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Resource", id));
        }
        Ok(())
    }
}

/// Database row representation of a promotion
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PromotionRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub banner_url: Option<String>,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PromotionRow {
    fn into_domain(self) -> Promotion {
        Promotion {
            id: PromotionId::from(self.id),
            title: self.title,
            description: self.description,
            banner_url: self.banner_url,
            starts_on: self.starts_on,
            ends_on: self.ends_on,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Repository for promotion persistence
#[derive(Debug, Clone)]
pub struct PromotionRepository {
    pool: PgPool,
}

impl PromotionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new promotion
    pub async fn insert(&self, promotion: &Promotion) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO promotions (
                id, title, description, banner_url, starts_on, ends_on,
                active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::from(promotion.id))
        .bind(&promotion.title)
        .bind(&promotion.description)
        .bind(&promotion.banner_url)
        .bind(promotion.starts_on)
        .bind(promotion.ends_on)
        .bind(promotion.active)
        .bind(promotion.created_at)
        .bind(promotion.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves a promotion by its identifier
    pub async fn get_by_id(&self, id: PromotionId) -> Result<Promotion, DatabaseError> {
        let row: PromotionRow = sqlx::query_as(
            r#"
            SELECT id, title, description, banner_url, starts_on, ends_on,
                   active, created_at, updated_at
            FROM promotions WHERE id = $1
            "#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Promotion", id))?;

        Ok(row.into_domain())
    }

    /// Lists promotions running on the given date
    pub async fn list_running(&self, today: NaiveDate) -> Result<Vec<Promotion>, DatabaseError> {
        let rows: Vec<PromotionRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, banner_url, starts_on, ends_on,
                   active, created_at, updated_at
            FROM promotions
            WHERE active AND starts_on <= $1 AND ends_on >= $1
            ORDER BY starts_on ASC
            "#,
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PromotionRow::into_domain).collect())
    }

    /// Lists all promotions, newest window first
    pub async fn list(&self) -> Result<Vec<Promotion>, DatabaseError> {
        let rows: Vec<PromotionRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, banner_url, starts_on, ends_on,
                   active, created_at, updated_at
            FROM promotions
            ORDER BY starts_on DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PromotionRow::into_domain).collect())
    }

    /// Updates a promotion in full (last-write-wins)
    pub async fn update(&self, promotion: &Promotion) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE promotions
            SET title = $2, description = $3, banner_url = $4, starts_on = $5,
                ends_on = $6, active = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(promotion.id))
        .bind(&promotion.title)
        .bind(&promotion.description)
        .bind(&promotion.banner_url)
        .bind(promotion.starts_on)
        .bind(promotion.ends_on)
        .bind(promotion.active)
        .bind(promotion.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Promotion", promotion.id));
        }
        Ok(())
    }

    /// Deletes a promotion
    pub async fn delete(&self, id: PromotionId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM promotions WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Promotion", id));
        }
        Ok(())
    }
}

/// Database row representation of a notification
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NotificationRow {
    pub id: Uuid,
    pub recipient_email: String,
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    pub channel: NotificationChannel,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl NotificationRow {
    fn into_domain(self) -> Notification {
        Notification {
            id: NotificationId::from(self.id),
            recipient_email: self.recipient_email,
            title: self.title,
            body: self.body,
            link: self.link,
            channel: self.channel.into(),
            read: self.read,
            created_at: self.created_at,
        }
    }
}

/// Repository for notification persistence and unread tracking
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new notification
    pub async fn insert(&self, notification: &Notification) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (
                id, recipient_email, title, body, link, channel, read, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Uuid::from(notification.id))
        .bind(&notification.recipient_email)
        .bind(&notification.title)
        .bind(&notification.body)
        .bind(&notification.link)
        .bind(NotificationChannel::from(notification.channel))
        .bind(notification.read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists a recipient's notifications, newest first
    pub async fn list_for_recipient(
        &self,
        recipient_email: &str,
    ) -> Result<Vec<Notification>, DatabaseError> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            r#"
            SELECT id, recipient_email, title, body, link, channel, read, created_at
            FROM notifications
            WHERE lower(recipient_email) = lower($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(recipient_email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(NotificationRow::into_domain).collect())
    }

    /// Counts a recipient's unread notifications (the polling endpoint)
    pub async fn unread_count(&self, recipient_email: &str) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT count(*) FROM notifications
            WHERE lower(recipient_email) = lower($1) AND NOT read
            "#,
        )
        .bind(recipient_email)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Marks one notification as read
    pub async fn mark_read(&self, id: NotificationId) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE notifications SET read = TRUE WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Notification", id));
        }
        Ok(())
    }

    /// Marks all of a recipient's notifications as read; returns how many
    pub async fn mark_all_read(&self, recipient_email: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET read = TRUE
            WHERE lower(recipient_email) = lower($1) AND NOT read
            "#,
        )
        .bind(recipient_email)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
