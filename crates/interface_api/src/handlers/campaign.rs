//! Campaign form handlers
//!
//! Form creation goes through the all-or-nothing repository transaction:
//! a duplicate slug or an invalid field definition persists nothing.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::FieldId;
use domain_campaign::{CampaignForm, FieldDefinition, Submission};
use infra_db::repositories::campaign::CampaignRepository;

use crate::auth::Claims;
use crate::dto::campaign::*;
use crate::error::ApiError;
use crate::AppState;

/// Creates a campaign form together with its field definitions
pub async fn create_form(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateFormRequest>,
) -> Result<(StatusCode, Json<FormResponse>), ApiError> {
    let fields = request
        .fields
        .into_iter()
        .map(|f| FieldDefinition {
            id: FieldId::new(),
            label: f.label,
            name: f.name,
            field_type: f.field_type,
            required: f.required,
            options: f.options,
            position: 0,
        })
        .collect();

    // Shape validation happens in the constructor, slug uniqueness inside
    // the creation transaction
    let form = CampaignForm::new(request.title, request.slug, claims.email, fields)?;

    CampaignRepository::new(state.pool.clone())
        .create_with_fields(&form)
        .await?;
    Ok((StatusCode::CREATED, Json(form.into())))
}

/// Lists all forms with their fields
pub async fn list_forms(
    State(state): State<AppState>,
) -> Result<Json<Vec<FormResponse>>, ApiError> {
    let forms = CampaignRepository::new(state.pool.clone()).list().await?;
    Ok(Json(forms.into_iter().map(FormResponse::from).collect()))
}

/// Gets a form by slug
pub async fn get_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<FormResponse>, ApiError> {
    let form = CampaignRepository::new(state.pool.clone())
        .get_by_slug(&slug)
        .await?;
    Ok(Json(form.into()))
}

/// Deletes a form; its fields and submissions cascade
pub async fn delete_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    let repo = CampaignRepository::new(state.pool.clone());
    let form = repo.get_by_slug(&slug).await?;
    repo.delete(form.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Accepts a visitor's answers to a form
pub async fn submit_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<SubmitFormRequest>,
) -> Result<(StatusCode, Json<SubmissionResponse>), ApiError> {
    let repo = CampaignRepository::new(state.pool.clone());
    let form = repo.get_by_slug(&slug).await?;

    let submission = Submission::new(&form, request.answers)?;
    repo.add_submission(&submission).await?;
    Ok((StatusCode::CREATED, Json(submission.into())))
}

/// Lists a form's submissions
pub async fn list_submissions(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<SubmissionResponse>>, ApiError> {
    let repo = CampaignRepository::new(state.pool.clone());
    let form = repo.get_by_slug(&slug).await?;

    let submissions = repo.list_submissions(form.id).await?;
    Ok(Json(
        submissions.into_iter().map(SubmissionResponse::from).collect(),
    ))
}
