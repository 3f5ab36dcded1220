//! Profile and agency handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{AgencyId, ProfileId};
use domain_party::{Agency, ProfileValidator, StudentProfile};
use infra_db::repositories::party::{AgencyRepository, ProfileFilter, ProfileRepository};

use crate::auth::{has_role, Claims};
use crate::dto::party::*;
use crate::error::ApiError;
use crate::AppState;

fn check_profile(profile: &StudentProfile) -> Result<(), ApiError> {
    let result = ProfileValidator::validate(profile);
    if result.is_valid {
        Ok(())
    } else {
        Err(ApiError::Validation(result.errors.join("; ")))
    }
}

/// Agency records are tenant state; only head-office admins touch them
fn require_admin(claims: &Claims) -> Result<(), ApiError> {
    if has_role(claims, "admin") {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "managing agencies requires the admin role".to_string(),
        ))
    }
}

/// Creates a new student profile
pub async fn create_profile(
    State(state): State<AppState>,
    Json(request): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let agency_id = AgencyId::from(request.agency_id);
    // The owning agency must exist
    AgencyRepository::new(state.pool.clone())
        .get_by_id(agency_id)
        .await?;

    let mut profile = StudentProfile::new(request.name, request.email, agency_id);
    profile.phone = request.phone;
    profile.date_of_birth = request.date_of_birth;
    profile.address = request.address;
    profile.education = request.education;
    profile.target_country = request.target_country;

    check_profile(&profile)?;

    ProfileRepository::new(state.pool.clone())
        .insert(&profile)
        .await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

/// Lists profiles, filtered by agency/email/target country
pub async fn list_profiles(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let filter = ProfileFilter {
        agency_id: query.agency_id.map(AgencyId::from),
        email: query.email,
        target_country: query.target_country,
    };

    let profiles = ProfileRepository::new(state.pool.clone())
        .list(&filter)
        .await?;
    Ok(Json(profiles.into_iter().map(ProfileResponse::from).collect()))
}

/// Gets a profile by ID
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = ProfileRepository::new(state.pool.clone())
        .get_by_id(ProfileId::from(id))
        .await?;
    Ok(Json(profile.into()))
}

/// Applies a partial update to a profile
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let repo = ProfileRepository::new(state.pool.clone());
    let mut profile = repo.get_by_id(ProfileId::from(id)).await?;

    if let Some(name) = request.name {
        profile.name = name;
    }
    if let Some(email) = request.email {
        profile.email = email;
    }
    if let Some(phone) = request.phone {
        profile.phone = Some(phone);
    }
    if let Some(date_of_birth) = request.date_of_birth {
        profile.date_of_birth = Some(date_of_birth);
    }
    if let Some(address) = request.address {
        profile.address = Some(address);
    }
    if let Some(education) = request.education {
        profile.education = education;
    }
    if let Some(target_country) = request.target_country {
        profile.target_country = Some(target_country);
    }
    if let Some(documents) = request.documents {
        profile.documents = documents;
    }
    profile.updated_at = Utc::now();

    check_profile(&profile)?;

    repo.update(&profile).await?;
    Ok(Json(profile.into()))
}

/// Deletes a profile
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ProfileRepository::new(state.pool.clone())
        .delete(ProfileId::from(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Creates a new agency (admin only)
pub async fn create_agency(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateAgencyRequest>,
) -> Result<(StatusCode, Json<AgencyResponse>), ApiError> {
    require_admin(&claims)?;
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let mut agency = Agency::new(request.name, request.country, request.contact_email);
    agency.phone = request.phone;
    agency.logo_url = request.logo_url;

    AgencyRepository::new(state.pool.clone())
        .insert(&agency)
        .await?;
    Ok((StatusCode::CREATED, Json(agency.into())))
}

/// Lists agencies, optionally by country
pub async fn list_agencies(
    State(state): State<AppState>,
    Query(query): Query<AgencyQuery>,
) -> Result<Json<Vec<AgencyResponse>>, ApiError> {
    let agencies = AgencyRepository::new(state.pool.clone())
        .list(query.country.as_deref())
        .await?;
    Ok(Json(agencies.into_iter().map(AgencyResponse::from).collect()))
}

/// Gets an agency by ID
pub async fn get_agency(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AgencyResponse>, ApiError> {
    let agency = AgencyRepository::new(state.pool.clone())
        .get_by_id(AgencyId::from(id))
        .await?;
    Ok(Json(agency.into()))
}

/// Applies a partial update to an agency (admin only)
pub async fn update_agency(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAgencyRequest>,
) -> Result<Json<AgencyResponse>, ApiError> {
    require_admin(&claims)?;
    let repo = AgencyRepository::new(state.pool.clone());
    let mut agency = repo.get_by_id(AgencyId::from(id)).await?;

    if let Some(name) = request.name {
        agency.name = name;
    }
    if let Some(country) = request.country {
        agency.country = country;
    }
    if let Some(contact_email) = request.contact_email {
        agency.contact_email = contact_email;
    }
    if let Some(phone) = request.phone {
        agency.phone = Some(phone);
    }
    if let Some(logo_url) = request.logo_url {
        agency.logo_url = Some(logo_url);
    }
    if let Some(status) = request.status {
        agency.status = status;
    }
    agency.updated_at = Utc::now();

    repo.update(&agency).await?;
    Ok(Json(agency.into()))
}
