//! Profile and agency DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{AgencyId, ProfileId};
use domain_party::{Address, Agency, AgencyStatus, DocumentLink, EducationEntry, StudentProfile};

/// Request body for creating a profile
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<Address>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    pub target_country: Option<String>,
    pub agency_id: Uuid,
}

/// Request body for a partial profile update
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<Address>,
    pub education: Option<Vec<EducationEntry>>,
    pub target_country: Option<String>,
    /// Documents are replaced wholesale when present (URLs come from the
    /// object store, uploaded by the client beforehand)
    pub documents: Option<Vec<DocumentLink>>,
}

/// Query parameters for profile listings
#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    pub agency_id: Option<Uuid>,
    pub email: Option<String>,
    pub target_country: Option<String>,
}

/// Query parameters for agency listings
#[derive(Debug, Default, Deserialize)]
pub struct AgencyQuery {
    pub country: Option<String>,
}

/// Profile representation returned to clients
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: ProfileId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<Address>,
    pub education: Vec<EducationEntry>,
    pub target_country: Option<String>,
    pub agency_id: AgencyId,
    pub documents: Vec<DocumentLink>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StudentProfile> for ProfileResponse {
    fn from(profile: StudentProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            phone: profile.phone,
            date_of_birth: profile.date_of_birth,
            address: profile.address,
            education: profile.education,
            target_country: profile.target_country,
            agency_id: profile.agency_id,
            documents: profile.documents,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Request body for creating an agency
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAgencyRequest {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "country cannot be empty"))]
    pub country: String,
    #[validate(email)]
    pub contact_email: String,
    pub phone: Option<String>,
    pub logo_url: Option<String>,
}

/// Request body for a partial agency update
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAgencyRequest {
    pub name: Option<String>,
    pub country: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub logo_url: Option<String>,
    pub status: Option<AgencyStatus>,
}

/// Agency representation returned to clients
#[derive(Debug, Serialize)]
pub struct AgencyResponse {
    pub id: AgencyId,
    pub name: String,
    pub country: String,
    pub contact_email: String,
    pub phone: Option<String>,
    pub logo_url: Option<String>,
    pub status: AgencyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Agency> for AgencyResponse {
    fn from(agency: Agency) -> Self {
        Self {
            id: agency.id,
            name: agency.name,
            country: agency.country,
            contact_email: agency.contact_email,
            phone: agency.phone,
            logo_url: agency.logo_url,
            status: agency.status,
            created_at: agency.created_at,
            updated_at: agency.updated_at,
        }
    }
}
