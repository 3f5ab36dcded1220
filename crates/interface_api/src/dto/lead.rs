//! Lead DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::LeadId;
use domain_lead::{Lead, LeadNote, LeadSource, LeadStatus, StudyPreference};

/// Request body for creating a lead
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLeadRequest {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "country cannot be empty"))]
    pub country_of_interest: String,
    pub study_preference: StudyPreference,
    pub source: LeadSource,
    pub agency_id: Option<Uuid>,
}

/// Request body for a partial lead update
#[derive(Debug, Default, Deserialize)]
pub struct UpdateLeadRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country_of_interest: Option<String>,
    pub study_preference: Option<StudyPreference>,
    pub agency_id: Option<Uuid>,
}

/// Request body for a status change
#[derive(Debug, Deserialize)]
pub struct UpdateLeadStatusRequest {
    pub status: LeadStatus,
}

/// Request body for appending a note
#[derive(Debug, Deserialize)]
pub struct AddNoteRequest {
    pub text: String,
}

/// Query parameters for lead listings
#[derive(Debug, Default, Deserialize)]
pub struct LeadQuery {
    pub agency_id: Option<Uuid>,
    pub status: Option<LeadStatus>,
    pub email: Option<String>,
    pub country: Option<String>,
}

/// Lead representation returned to clients
#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub id: LeadId,
    pub lead_number: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country_of_interest: String,
    pub study_preference: StudyPreference,
    pub source: LeadSource,
    pub agency_id: Option<Uuid>,
    pub status: LeadStatus,
    pub notes: Vec<LeadNote>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Lead> for LeadResponse {
    fn from(lead: Lead) -> Self {
        Self {
            id: lead.id,
            lead_number: lead.lead_number,
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            country_of_interest: lead.country_of_interest,
            study_preference: lead.study_preference,
            source: lead.source,
            agency_id: lead.agency_id.map(Uuid::from),
            status: lead.status,
            notes: lead.notes,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        }
    }
}
