//! Campaign form DTOs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{FieldId, FormId, SubmissionId};
use domain_campaign::{CampaignForm, FieldDefinition, FieldType, Submission};

/// One field of a form creation request
#[derive(Debug, Deserialize)]
pub struct FieldRequest {
    pub label: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Request body for creating a form with its fields
///
/// The author email comes from the caller's token, not the body.
#[derive(Debug, Deserialize)]
pub struct CreateFormRequest {
    pub title: String,
    pub slug: String,
    pub fields: Vec<FieldRequest>,
}

/// Field representation returned to clients
#[derive(Debug, Serialize)]
pub struct FieldResponse {
    pub id: FieldId,
    pub label: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    pub options: Vec<String>,
    pub position: i32,
}

impl From<FieldDefinition> for FieldResponse {
    fn from(field: FieldDefinition) -> Self {
        Self {
            id: field.id,
            label: field.label,
            name: field.name,
            field_type: field.field_type,
            required: field.required,
            options: field.options,
            position: field.position,
        }
    }
}

/// Form representation returned to clients
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub id: FormId,
    pub title: String,
    pub slug: String,
    pub author_email: String,
    pub active: bool,
    pub fields: Vec<FieldResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CampaignForm> for FormResponse {
    fn from(form: CampaignForm) -> Self {
        Self {
            id: form.id,
            title: form.title,
            slug: form.slug,
            author_email: form.author_email,
            active: form.active,
            fields: form.fields.into_iter().map(FieldResponse::from).collect(),
            created_at: form.created_at,
            updated_at: form.updated_at,
        }
    }
}

/// Request body for submitting answers to a form
#[derive(Debug, Deserialize)]
pub struct SubmitFormRequest {
    pub answers: BTreeMap<String, String>,
}

/// Submission representation returned to clients
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: SubmissionId,
    pub form_id: FormId,
    pub answers: BTreeMap<String, String>,
    pub submitted_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            form_id: submission.form_id,
            answers: submission.answers,
            submitted_at: submission.submitted_at,
        }
    }
}
