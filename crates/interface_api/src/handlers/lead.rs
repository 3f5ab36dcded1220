//! Lead handlers
//!
//! Lead creation issues the next serial from the counter store. When the
//! lead lands with an agency straight away, the agency is told about it
//! post-commit (in-app row plus a WhatsApp ping); neither side effect can
//! reverse the insert.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{numbering::counter_names, AgencyId, LeadId};
use domain_content::{Notification, NotificationChannel};
use domain_lead::{Lead, LeadNote};
use domain_party::OutboundMessage;
use infra_db::repositories::content::NotificationRepository;
use infra_db::repositories::lead::{LeadFilter, LeadRepository};
use infra_db::repositories::party::AgencyRepository;
use infra_db::CounterStore;

use crate::auth::Claims;
use crate::dto::lead::*;
use crate::error::ApiError;
use crate::notify::spawn_whatsapp;
use crate::AppState;

/// Creates a new lead, issuing the next lead number
pub async fn create_lead(
    State(state): State<AppState>,
    Json(request): Json<CreateLeadRequest>,
) -> Result<(StatusCode, Json<LeadResponse>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let counters = CounterStore::new(state.pool.clone());
    let lead_number = counters
        .next_document_number(counter_names::LEAD, Utc::now().date_naive())
        .await?;

    let mut lead = Lead::new(
        lead_number,
        request.name,
        request.email,
        request.country_of_interest,
        request.study_preference,
        request.source,
    )?;
    if let Some(phone) = request.phone {
        lead = lead.with_phone(phone);
    }
    if let Some(agency_id) = request.agency_id {
        lead.assign_to(AgencyId::from(agency_id));
    }

    LeadRepository::new(state.pool.clone()).insert(&lead).await?;

    // Post-commit: tell the receiving agency, best-effort
    if let Some(agency_id) = lead.agency_id {
        notify_agency_of_lead(&state, agency_id, &lead).await;
    }

    Ok((StatusCode::CREATED, Json(lead.into())))
}

/// Writes the in-app notification row and pings the agency on WhatsApp.
/// Failures are logged and dropped; the lead is already persisted.
async fn notify_agency_of_lead(state: &AppState, agency_id: AgencyId, lead: &Lead) {
    let agency = match AgencyRepository::new(state.pool.clone()).get_by_id(agency_id).await {
        Ok(agency) => agency,
        Err(e) => {
            warn!(error = %e, "Could not load agency for lead notification");
            return;
        }
    };

    let in_app = Notification::new(
        &agency.contact_email,
        "New lead assigned",
        format!("Lead {} ({})", lead.lead_number, lead.name),
        NotificationChannel::InApp,
    )
    .with_link(format!("/leads/{}", Uuid::from(lead.id)));
    if let Err(e) = NotificationRepository::new(state.pool.clone()).insert(&in_app).await {
        warn!(error = %e, "Failed to store in-app notification");
    }

    if let Some(phone) = agency.phone {
        let message = OutboundMessage::new(
            vec![phone],
            format!("New lead {} assigned to {}", lead.lead_number, agency.name),
        )
        .with_link(format!("/leads/{}", Uuid::from(lead.id)));
        spawn_whatsapp(state.notifier.clone(), message);
    }
}

/// Lists leads, filtered by agency/status/email/country
pub async fn list_leads(
    State(state): State<AppState>,
    Query(query): Query<LeadQuery>,
) -> Result<Json<Vec<LeadResponse>>, ApiError> {
    let filter = LeadFilter {
        agency_id: query.agency_id.map(AgencyId::from),
        status: query.status,
        email: query.email,
        country: query.country,
    };

    let leads = LeadRepository::new(state.pool.clone()).list(&filter).await?;
    Ok(Json(leads.into_iter().map(LeadResponse::from).collect()))
}

/// Gets a lead by ID
pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LeadResponse>, ApiError> {
    let lead = LeadRepository::new(state.pool.clone())
        .get_by_id(LeadId::from(id))
        .await?;
    Ok(Json(lead.into()))
}

/// Applies a partial update to a lead
pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLeadRequest>,
) -> Result<Json<LeadResponse>, ApiError> {
    let repo = LeadRepository::new(state.pool.clone());
    let mut lead = repo.get_by_id(LeadId::from(id)).await?;

    if let Some(name) = request.name {
        lead.name = name;
    }
    if let Some(email) = request.email {
        lead.email = email;
    }
    if let Some(phone) = request.phone {
        lead.phone = Some(phone);
    }
    if let Some(country) = request.country_of_interest {
        lead.country_of_interest = country;
    }
    if let Some(preference) = request.study_preference {
        lead.study_preference = preference;
    }
    if let Some(agency_id) = request.agency_id {
        lead.assign_to(AgencyId::from(agency_id));
    }
    lead.updated_at = Utc::now();

    repo.update(&lead).await?;
    Ok(Json(lead.into()))
}

/// Moves a lead through its status workflow
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLeadStatusRequest>,
) -> Result<Json<LeadResponse>, ApiError> {
    let repo = LeadRepository::new(state.pool.clone());
    let mut lead = repo.get_by_id(LeadId::from(id)).await?;

    lead.update_status(request.status)?;
    repo.update(&lead).await?;
    Ok(Json(lead.into()))
}

/// Appends a counselor note, attributed to the caller
pub async fn add_note(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddNoteRequest>,
) -> Result<Json<LeadResponse>, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::Validation("note text cannot be empty".to_string()));
    }

    let repo = LeadRepository::new(state.pool.clone());
    let mut lead = repo.get_by_id(LeadId::from(id)).await?;

    lead.add_note(LeadNote::new(claims.email, request.text));
    repo.update(&lead).await?;
    Ok(Json(lead.into()))
}

/// Deletes a lead
pub async fn delete_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    LeadRepository::new(state.pool.clone())
        .delete(LeadId::from(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
