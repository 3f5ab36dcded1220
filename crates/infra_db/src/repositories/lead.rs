//! Lead repository implementation
//!
//! Leads are stored with their nested study preference and notes as JSONB;
//! everything the list screens filter on (agency, status, email, country)
//! is a proper column.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{AgencyId, LeadId};
use domain_lead::{Lead, LeadNote, StudyPreference};

use crate::error::DatabaseError;

/// Lead status, as stored in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "lead_status", rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
}

impl From<domain_lead::LeadStatus> for LeadStatus {
    fn from(status: domain_lead::LeadStatus) -> Self {
        match status {
            domain_lead::LeadStatus::New => LeadStatus::New,
            domain_lead::LeadStatus::Contacted => LeadStatus::Contacted,
            domain_lead::LeadStatus::Qualified => LeadStatus::Qualified,
            domain_lead::LeadStatus::Converted => LeadStatus::Converted,
            domain_lead::LeadStatus::Lost => LeadStatus::Lost,
        }
    }
}

impl From<LeadStatus> for domain_lead::LeadStatus {
    fn from(status: LeadStatus) -> Self {
        match status {
            LeadStatus::New => domain_lead::LeadStatus::New,
            LeadStatus::Contacted => domain_lead::LeadStatus::Contacted,
            LeadStatus::Qualified => domain_lead::LeadStatus::Qualified,
            LeadStatus::Converted => domain_lead::LeadStatus::Converted,
            LeadStatus::Lost => domain_lead::LeadStatus::Lost,
        }
    }
}

/// Lead source, as stored in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "lead_source", rename_all = "snake_case")]
pub enum LeadSource {
    Website,
    Referral,
    WalkIn,
    Campaign,
    SocialMedia,
    Other,
}

impl From<domain_lead::LeadSource> for LeadSource {
    fn from(source: domain_lead::LeadSource) -> Self {
        match source {
            domain_lead::LeadSource::Website => LeadSource::Website,
            domain_lead::LeadSource::Referral => LeadSource::Referral,
            domain_lead::LeadSource::WalkIn => LeadSource::WalkIn,
            domain_lead::LeadSource::Campaign => LeadSource::Campaign,
            domain_lead::LeadSource::SocialMedia => LeadSource::SocialMedia,
            domain_lead::LeadSource::Other => LeadSource::Other,
        }
    }
}

impl From<LeadSource> for domain_lead::LeadSource {
    fn from(source: LeadSource) -> Self {
        match source {
            LeadSource::Website => domain_lead::LeadSource::Website,
            LeadSource::Referral => domain_lead::LeadSource::Referral,
            LeadSource::WalkIn => domain_lead::LeadSource::WalkIn,
            LeadSource::Campaign => domain_lead::LeadSource::Campaign,
            LeadSource::SocialMedia => domain_lead::LeadSource::SocialMedia,
            LeadSource::Other => domain_lead::LeadSource::Other,
        }
    }
}

/// Database row representation of a lead
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeadRow {
    pub id: Uuid,
    pub lead_number: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country_of_interest: String,
    pub study_preference: Json<StudyPreference>,
    pub source: LeadSource,
    pub agency_id: Option<Uuid>,
    pub status: LeadStatus,
    pub notes: Json<Vec<LeadNote>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeadRow {
    /// Rebuilds the domain aggregate from the row
    pub fn into_domain(self) -> Lead {
        Lead {
            id: LeadId::from(self.id),
            lead_number: self.lead_number,
            name: self.name,
            email: self.email,
            phone: self.phone,
            country_of_interest: self.country_of_interest,
            study_preference: self.study_preference.0,
            source: self.source.into(),
            agency_id: self.agency_id.map(AgencyId::from),
            status: self.status.into(),
            notes: self.notes.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Optional filters for lead listings
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    /// Filter by owning agency
    pub agency_id: Option<AgencyId>,
    /// Filter by status
    pub status: Option<domain_lead::LeadStatus>,
    /// Filter by email (case-insensitive exact match)
    pub email: Option<String>,
    /// Filter by destination country
    pub country: Option<String>,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, lead_number, name, email, phone, country_of_interest,
           study_preference, source, agency_id, status, notes,
           created_at, updated_at
    FROM leads
"#;

/// Repository for lead persistence
#[derive(Debug, Clone)]
pub struct LeadRepository {
    pool: PgPool,
}

impl LeadRepository {
    /// Creates a new LeadRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new lead
    pub async fn insert(&self, lead: &Lead) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO leads (
                id, lead_number, name, email, phone, country_of_interest,
                study_preference, source, agency_id, status, notes,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(Uuid::from(lead.id))
        .bind(&lead.lead_number)
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(&lead.country_of_interest)
        .bind(Json(&lead.study_preference))
        .bind(LeadSource::from(lead.source))
        .bind(lead.agency_id.map(Uuid::from))
        .bind(LeadStatus::from(lead.status))
        .bind(Json(&lead.notes))
        .bind(lead.created_at)
        .bind(lead.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves a lead by its identifier
    pub async fn get_by_id(&self, id: LeadId) -> Result<Lead, DatabaseError> {
        let row: LeadRow = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Lead", id))?;

        Ok(row.into_domain())
    }

    /// Lists leads matching the filter, newest first
    pub async fn list(&self, filter: &LeadFilter) -> Result<Vec<Lead>, DatabaseError> {
        let rows: Vec<LeadRow> = sqlx::query_as(&format!(
            r#"
            {SELECT_COLUMNS}
            WHERE ($1::uuid IS NULL OR agency_id = $1)
              AND ($2::lead_status IS NULL OR status = $2)
              AND ($3::text IS NULL OR lower(email) = lower($3))
              AND ($4::text IS NULL OR country_of_interest = $4)
            ORDER BY created_at DESC
            "#
        ))
        .bind(filter.agency_id.map(Uuid::from))
        .bind(filter.status.map(LeadStatus::from))
        .bind(&filter.email)
        .bind(&filter.country)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LeadRow::into_domain).collect())
    }

    /// Updates a lead in full (last-write-wins)
    pub async fn update(&self, lead: &Lead) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE leads
            SET name = $2, email = $3, phone = $4, country_of_interest = $5,
                study_preference = $6, source = $7, agency_id = $8,
                status = $9, notes = $10, updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(lead.id))
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(&lead.country_of_interest)
        .bind(Json(&lead.study_preference))
        .bind(LeadSource::from(lead.source))
        .bind(lead.agency_id.map(Uuid::from))
        .bind(LeadStatus::from(lead.status))
        .bind(Json(&lead.notes))
        .bind(lead.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Lead", lead.id));
        }
        Ok(())
    }

    /// Deletes a lead
    pub async fn delete(&self, id: LeadId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Lead", id));
        }
        Ok(())
    }
}
