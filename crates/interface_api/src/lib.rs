//! HTTP API Layer
//!
//! This crate provides the REST API for the agency core system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each domain
//! - **Middleware**: Authentication, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Notify**: Best-effort outbound messaging, dispatched post-commit
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(pool, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;
pub mod notify;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_party::NotificationPort;

use crate::config::ApiConfig;
use crate::handlers::{billing, campaign, content, health, lead, party};
use crate::middleware::{audit_middleware, auth_middleware};
use crate::notify::HttpNotificationPort;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
    pub notifier: Arc<dyn NotificationPort>,
}

/// Creates the main API router with the HTTP notification adapter
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    let notifier = Arc::new(HttpNotificationPort::new(
        config.notify_email_url.clone(),
        config.notify_whatsapp_url.clone(),
    ));
    create_router_with_notifier(pool, config, notifier)
}

/// Creates the main API router with an explicit notification port
///
/// Tests pass the in-memory mock here.
pub fn create_router_with_notifier(
    pool: PgPool,
    config: ApiConfig,
    notifier: Arc<dyn NotificationPort>,
) -> Router {
    let state = AppState {
        pool,
        config,
        notifier,
    };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Lead routes
    let lead_routes = Router::new()
        .route("/", post(lead::create_lead))
        .route("/", get(lead::list_leads))
        .route("/:id", get(lead::get_lead))
        .route("/:id", put(lead::update_lead))
        .route("/:id", delete(lead::delete_lead))
        .route("/:id/status", put(lead::update_status))
        .route("/:id/notes", post(lead::add_note));

    // Quotation and payment routes
    let quotation_routes = Router::new()
        .route("/", post(billing::create_quotation))
        .route("/", get(billing::list_quotations))
        .route("/:id", get(billing::get_quotation))
        .route("/:id", put(billing::update_quotation))
        .route("/:id", delete(billing::delete_quotation))
        .route("/:id/issue", post(billing::issue_quotation))
        .route("/:id/accept", post(billing::accept_quotation))
        .route("/:id/decline", post(billing::decline_quotation))
        .route("/:id/payments", post(billing::record_payment))
        .route("/:id/payments", get(billing::list_payments));

    // Profile routes
    let profile_routes = Router::new()
        .route("/", post(party::create_profile))
        .route("/", get(party::list_profiles))
        .route("/:id", get(party::get_profile))
        .route("/:id", put(party::update_profile))
        .route("/:id", delete(party::delete_profile));

    // Agency routes
    let agency_routes = Router::new()
        .route("/", post(party::create_agency))
        .route("/", get(party::list_agencies))
        .route("/:id", get(party::get_agency))
        .route("/:id", put(party::update_agency));

    // Content routes
    let download_routes = Router::new()
        .route("/", post(content::create_download))
        .route("/", get(content::list_downloads))
        .route("/:id", get(content::get_download))
        .route("/:id", put(content::update_download))
        .route("/:id", delete(content::delete_download));

    let event_routes = Router::new()
        .route("/", post(content::create_event))
        .route("/", get(content::list_events))
        .route("/:id", get(content::get_event))
        .route("/:id", put(content::update_event))
        .route("/:id", delete(content::delete_event));

    let resource_routes = Router::new()
        .route("/", post(content::create_resource))
        .route("/", get(content::list_resources))
        .route("/:id", get(content::get_resource))
        .route("/:id", put(content::update_resource))
        .route("/:id", delete(content::delete_resource));

    let promotion_routes = Router::new()
        .route("/", post(content::create_promotion))
        .route("/", get(content::list_promotions))
        .route("/running", get(content::list_running_promotions))
        .route("/:id", get(content::get_promotion))
        .route("/:id", put(content::update_promotion))
        .route("/:id", delete(content::delete_promotion));

    let notification_routes = Router::new()
        .route("/", get(content::list_notifications))
        .route("/unread-count", get(content::unread_count))
        .route("/:id/read", post(content::mark_notification_read))
        .route("/read-all", post(content::mark_all_read));

    // Campaign form routes
    let form_routes = Router::new()
        .route("/", post(campaign::create_form))
        .route("/", get(campaign::list_forms))
        .route("/:slug", get(campaign::get_form))
        .route("/:slug", delete(campaign::delete_form))
        .route("/:slug/submissions", post(campaign::submit_form))
        .route("/:slug/submissions", get(campaign::list_submissions));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/leads", lead_routes)
        .nest("/quotations", quotation_routes)
        .nest("/profiles", profile_routes)
        .nest("/agencies", agency_routes)
        .nest("/downloads", download_routes)
        .nest("/events", event_routes)
        .nest("/resources", resource_routes)
        .nest("/promotions", promotion_routes)
        .nest("/notifications", notification_routes)
        .nest("/forms", form_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
