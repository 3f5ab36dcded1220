//! API middleware
//!
//! Two layers wrap every `/api/v1` route: bearer-token authentication
//! (outer) and request audit logging (inner, so the resolved user is
//! available to it).

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use crate::auth::{validate_token, Claims};
use crate::AppState;

/// Pulls the token out of an `Authorization: Bearer ...` header
fn bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Authentication layer
///
/// Rejects requests without a valid bearer token; on success the decoded
/// claims ride along in the request extensions for handlers and the audit
/// layer.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(token) = bearer_token(&request) else {
        warn!(uri = %request.uri(), "Request without bearer token");
        return Err(StatusCode::UNAUTHORIZED);
    };

    let claims = validate_token(token, &state.config.jwt_secret).map_err(|e| {
        warn!(uri = %request.uri(), error = %e, "Rejected bearer token");
        StatusCode::UNAUTHORIZED
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Audit logging layer
///
/// One line per API request: who did what, the response status, and how
/// long it took. Server errors log at warn so they stand out at the
/// default filter level.
pub async fn audit_middleware(
    State(_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user = request
        .extensions()
        .get::<Claims>()
        .map_or_else(|| "anonymous".to_string(), |c| c.email.clone());

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let status = response.status();

    if status.is_server_error() {
        warn!(
            method = %method,
            uri = %uri,
            user = %user,
            status = status.as_u16(),
            elapsed_ms,
            "API request failed"
        );
    } else {
        info!(
            method = %method,
            uri = %uri,
            user = %user,
            status = status.as_u16(),
            elapsed_ms,
            "API request"
        );
    }

    response
}
