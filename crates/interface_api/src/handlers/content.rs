//! Content handlers (downloads, events, resources, promotions, notifications)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use core_kernel::{AgencyId, DownloadId, EventId, NotificationId, PromotionId, ResourceId};
use domain_content::{CalendarEvent, Download, Promotion, Resource};
use infra_db::repositories::content::{
    DownloadRepository, EventRepository, NotificationRepository, PromotionRepository,
    ResourceRepository,
};

use crate::auth::Claims;
use crate::dto::content::*;
use crate::error::ApiError;
use crate::AppState;

// ---------------------------------------------------------------------------
// Downloads
// ---------------------------------------------------------------------------

/// Creates a download record (the file is already in object storage)
pub async fn create_download(
    State(state): State<AppState>,
    Json(request): Json<CreateDownloadRequest>,
) -> Result<(StatusCode, Json<DownloadResponse>), ApiError> {
    let mut download = Download::new(request.title, request.file_url);
    download.description = request.description;
    download.country = request.country;
    download.category = request.category;

    DownloadRepository::new(state.pool.clone())
        .insert(&download)
        .await?;
    Ok((StatusCode::CREATED, Json(download.into())))
}

/// Lists downloads
pub async fn list_downloads(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Json<Vec<DownloadResponse>>, ApiError> {
    let downloads = DownloadRepository::new(state.pool.clone())
        .list(!query.include_inactive, query.country.as_deref())
        .await?;
    Ok(Json(downloads.into_iter().map(DownloadResponse::from).collect()))
}

/// Gets a download by ID
pub async fn get_download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let download = DownloadRepository::new(state.pool.clone())
        .get_by_id(DownloadId::from(id))
        .await?;
    Ok(Json(download.into()))
}

/// Applies a partial update to a download
pub async fn update_download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDownloadRequest>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let repo = DownloadRepository::new(state.pool.clone());
    let mut download = repo.get_by_id(DownloadId::from(id)).await?;

    if let Some(title) = request.title {
        download.title = title;
    }
    if let Some(description) = request.description {
        download.description = Some(description);
    }
    if let Some(file_url) = request.file_url {
        download.file_url = file_url;
    }
    if let Some(country) = request.country {
        download.country = Some(country);
    }
    if let Some(category) = request.category {
        download.category = Some(category);
    }
    if let Some(active) = request.active {
        download.active = active;
    }
    download.updated_at = Utc::now();

    repo.update(&download).await?;
    Ok(Json(download.into()))
}

/// Deletes a download
pub async fn delete_download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    DownloadRepository::new(state.pool.clone())
        .delete(DownloadId::from(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Creates a calendar event
pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    let mut event = CalendarEvent::new(request.title, request.starts_at, request.ends_at)?;
    event.description = request.description;
    event.location = request.location;
    event.agency_id = request.agency_id.map(AgencyId::from);

    EventRepository::new(state.pool.clone()).insert(&event).await?;
    Ok((StatusCode::CREATED, Json(event.into())))
}

/// Lists events overlapping the requested calendar window
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventRangeQuery>,
) -> Result<Json<Vec<EventResponse>>, ApiError> {
    if query.to <= query.from {
        return Err(ApiError::Validation(
            "'to' must be after 'from'".to_string(),
        ));
    }

    let events = EventRepository::new(state.pool.clone())
        .list_in_range(query.from, query.to, query.agency_id.map(AgencyId::from))
        .await?;
    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}

/// Gets an event by ID
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventResponse>, ApiError> {
    let event = EventRepository::new(state.pool.clone())
        .get_by_id(EventId::from(id))
        .await?;
    Ok(Json(event.into()))
}

/// Applies a partial update to an event
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    let repo = EventRepository::new(state.pool.clone());
    let mut event = repo.get_by_id(EventId::from(id)).await?;

    if let Some(title) = request.title {
        event.title = title;
    }
    if let Some(description) = request.description {
        event.description = Some(description);
    }
    if let Some(location) = request.location {
        event.location = Some(location);
    }
    if let Some(starts_at) = request.starts_at {
        event.starts_at = starts_at;
    }
    if let Some(ends_at) = request.ends_at {
        event.ends_at = ends_at;
    }
    if event.ends_at <= event.starts_at {
        return Err(ApiError::Validation(
            "event must end after it starts".to_string(),
        ));
    }
    event.updated_at = Utc::now();

    repo.update(&event).await?;
    Ok(Json(event.into()))
}

/// Deletes an event
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    EventRepository::new(state.pool.clone())
        .delete(EventId::from(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Creates a resource
pub async fn create_resource(
    State(state): State<AppState>,
    Json(request): Json<CreateResourceRequest>,
) -> Result<(StatusCode, Json<ResourceResponse>), ApiError> {
    let mut resource = Resource::new(request.title, request.link);
    resource.description = request.description;
    resource.category = request.category;

    ResourceRepository::new(state.pool.clone())
        .insert(&resource)
        .await?;
    Ok((StatusCode::CREATED, Json(resource.into())))
}

/// Lists resources
pub async fn list_resources(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<Vec<ResourceResponse>>, ApiError> {
    let resources = ResourceRepository::new(state.pool.clone())
        .list(!query.include_inactive)
        .await?;
    Ok(Json(resources.into_iter().map(ResourceResponse::from).collect()))
}

/// Gets a resource by ID
pub async fn get_resource(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResourceResponse>, ApiError> {
    let resource = ResourceRepository::new(state.pool.clone())
        .get_by_id(ResourceId::from(id))
        .await?;
    Ok(Json(resource.into()))
}

/// Applies a partial update to a resource
pub async fn update_resource(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateResourceRequest>,
) -> Result<Json<ResourceResponse>, ApiError> {
    let repo = ResourceRepository::new(state.pool.clone());
    let mut resource = repo.get_by_id(ResourceId::from(id)).await?;

    if let Some(title) = request.title {
        resource.title = title;
    }
    if let Some(description) = request.description {
        resource.description = Some(description);
    }
    if let Some(link) = request.link {
        resource.link = link;
    }
    if let Some(category) = request.category {
        resource.category = Some(category);
    }
    if let Some(active) = request.active {
        resource.active = active;
    }
    resource.updated_at = Utc::now();

    repo.update(&resource).await?;
    Ok(Json(resource.into()))
}

/// Deletes a resource
pub async fn delete_resource(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ResourceRepository::new(state.pool.clone())
        .delete(ResourceId::from(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Promotions
// ---------------------------------------------------------------------------

/// Creates a promotion
pub async fn create_promotion(
    State(state): State<AppState>,
    Json(request): Json<CreatePromotionRequest>,
) -> Result<(StatusCode, Json<PromotionResponse>), ApiError> {
    let mut promotion = Promotion::new(request.title, request.starts_on, request.ends_on)?;
    promotion.description = request.description;
    promotion.banner_url = request.banner_url;

    PromotionRepository::new(state.pool.clone())
        .insert(&promotion)
        .await?;
    Ok((StatusCode::CREATED, Json(promotion.into())))
}

/// Lists all promotions
pub async fn list_promotions(
    State(state): State<AppState>,
) -> Result<Json<Vec<PromotionResponse>>, ApiError> {
    let promotions = PromotionRepository::new(state.pool.clone()).list().await?;
    Ok(Json(promotions.into_iter().map(PromotionResponse::from).collect()))
}

/// Lists promotions running today
pub async fn list_running_promotions(
    State(state): State<AppState>,
) -> Result<Json<Vec<PromotionResponse>>, ApiError> {
    let promotions = PromotionRepository::new(state.pool.clone())
        .list_running(Utc::now().date_naive())
        .await?;
    Ok(Json(promotions.into_iter().map(PromotionResponse::from).collect()))
}

/// Gets a promotion by ID
pub async fn get_promotion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PromotionResponse>, ApiError> {
    let promotion = PromotionRepository::new(state.pool.clone())
        .get_by_id(PromotionId::from(id))
        .await?;
    Ok(Json(promotion.into()))
}

/// Applies a partial update to a promotion
pub async fn update_promotion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePromotionRequest>,
) -> Result<Json<PromotionResponse>, ApiError> {
    let repo = PromotionRepository::new(state.pool.clone());
    let mut promotion = repo.get_by_id(PromotionId::from(id)).await?;

    if let Some(title) = request.title {
        promotion.title = title;
    }
    if let Some(description) = request.description {
        promotion.description = Some(description);
    }
    if let Some(banner_url) = request.banner_url {
        promotion.banner_url = Some(banner_url);
    }
    if let Some(starts_on) = request.starts_on {
        promotion.starts_on = starts_on;
    }
    if let Some(ends_on) = request.ends_on {
        promotion.ends_on = ends_on;
    }
    if promotion.ends_on < promotion.starts_on {
        return Err(ApiError::Validation(
            "promotion cannot end before it starts".to_string(),
        ));
    }
    if let Some(active) = request.active {
        promotion.active = active;
    }
    promotion.updated_at = Utc::now();

    repo.update(&promotion).await?;
    Ok(Json(promotion.into()))
}

/// Deletes a promotion
pub async fn delete_promotion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    PromotionRepository::new(state.pool.clone())
        .delete(PromotionId::from(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Lists notifications; defaults to the caller's own
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<RecipientQuery>,
) -> Result<Json<Vec<NotificationResponse>>, ApiError> {
    let recipient = query.recipient.unwrap_or(claims.email);
    let notifications = NotificationRepository::new(state.pool.clone())
        .list_for_recipient(&recipient)
        .await?;
    Ok(Json(
        notifications.into_iter().map(NotificationResponse::from).collect(),
    ))
}

/// Returns the caller's unread count (polled by the client)
pub async fn unread_count(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<RecipientQuery>,
) -> Result<Json<UnreadCountResponse>, ApiError> {
    let recipient = query.recipient.unwrap_or(claims.email);
    let unread = NotificationRepository::new(state.pool.clone())
        .unread_count(&recipient)
        .await?;
    Ok(Json(UnreadCountResponse { unread }))
}

/// Marks one notification as read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    NotificationRepository::new(state.pool.clone())
        .mark_read(NotificationId::from(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Marks all of the caller's notifications as read
pub async fn mark_all_read(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<RecipientQuery>,
) -> Result<StatusCode, ApiError> {
    let recipient = query.recipient.unwrap_or(claims.email);
    NotificationRepository::new(state.pool.clone())
        .mark_all_read(&recipient)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
