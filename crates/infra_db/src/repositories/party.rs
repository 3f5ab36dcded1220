//! Profile and agency repository implementations

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{AgencyId, ProfileId};
use domain_party::{Address, Agency, DocumentLink, EducationEntry, StudentProfile};

use crate::error::DatabaseError;

/// Agency status, as stored in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "agency_status", rename_all = "snake_case")]
pub enum AgencyStatus {
    Active,
    Suspended,
}

impl From<domain_party::AgencyStatus> for AgencyStatus {
    fn from(status: domain_party::AgencyStatus) -> Self {
        match status {
            domain_party::AgencyStatus::Active => AgencyStatus::Active,
            domain_party::AgencyStatus::Suspended => AgencyStatus::Suspended,
        }
    }
}

impl From<AgencyStatus> for domain_party::AgencyStatus {
    fn from(status: AgencyStatus) -> Self {
        match status {
            AgencyStatus::Active => domain_party::AgencyStatus::Active,
            AgencyStatus::Suspended => domain_party::AgencyStatus::Suspended,
        }
    }
}

/// Database row representation of a student profile
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<Json<Address>>,
    pub education: Json<Vec<EducationEntry>>,
    pub target_country: Option<String>,
    pub agency_id: Uuid,
    pub documents: Json<Vec<DocumentLink>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRow {
    /// Rebuilds the domain entity from the row
    pub fn into_domain(self) -> StudentProfile {
        StudentProfile {
            id: ProfileId::from(self.id),
            name: self.name,
            email: self.email,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            address: self.address.map(|a| a.0),
            education: self.education.0,
            target_country: self.target_country,
            agency_id: AgencyId::from(self.agency_id),
            documents: self.documents.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Optional filters for profile listings
#[derive(Debug, Clone, Default)]
pub struct ProfileFilter {
    /// Filter by owning agency
    pub agency_id: Option<AgencyId>,
    /// Filter by email (case-insensitive exact match)
    pub email: Option<String>,
    /// Filter by destination country
    pub target_country: Option<String>,
}

const PROFILE_COLUMNS: &str = r#"
    SELECT id, name, email, phone, date_of_birth, address, education,
           target_country, agency_id, documents, created_at, updated_at
    FROM profiles
"#;

/// Repository for student profile persistence
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Creates a new ProfileRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new profile
    pub async fn insert(&self, profile: &StudentProfile) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (
                id, name, email, phone, date_of_birth, address, education,
                target_country, agency_id, documents, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(Uuid::from(profile.id))
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(profile.date_of_birth)
        .bind(profile.address.as_ref().map(Json))
        .bind(Json(&profile.education))
        .bind(&profile.target_country)
        .bind(Uuid::from(profile.agency_id))
        .bind(Json(&profile.documents))
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves a profile by its identifier
    pub async fn get_by_id(&self, id: ProfileId) -> Result<StudentProfile, DatabaseError> {
        let row: ProfileRow = sqlx::query_as(&format!("{PROFILE_COLUMNS} WHERE id = $1"))
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Profile", id))?;

        Ok(row.into_domain())
    }

    /// Lists profiles matching the filter, newest first
    pub async fn list(&self, filter: &ProfileFilter) -> Result<Vec<StudentProfile>, DatabaseError> {
        let rows: Vec<ProfileRow> = sqlx::query_as(&format!(
            r#"
            {PROFILE_COLUMNS}
            WHERE ($1::uuid IS NULL OR agency_id = $1)
              AND ($2::text IS NULL OR lower(email) = lower($2))
              AND ($3::text IS NULL OR target_country = $3)
            ORDER BY created_at DESC
            "#
        ))
        .bind(filter.agency_id.map(Uuid::from))
        .bind(&filter.email)
        .bind(&filter.target_country)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProfileRow::into_domain).collect())
    }

    /// Updates a profile in full (last-write-wins)
    pub async fn update(&self, profile: &StudentProfile) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET name = $2, email = $3, phone = $4, date_of_birth = $5,
                address = $6, education = $7, target_country = $8,
                documents = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(profile.id))
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(profile.date_of_birth)
        .bind(profile.address.as_ref().map(Json))
        .bind(Json(&profile.education))
        .bind(&profile.target_country)
        .bind(Json(&profile.documents))
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Profile", profile.id));
        }
        Ok(())
    }

    /// Deletes a profile
    pub async fn delete(&self, id: ProfileId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Profile", id));
        }
        Ok(())
    }
}

/// Database row representation of an agency
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AgencyRow {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub contact_email: String,
    pub phone: Option<String>,
    pub logo_url: Option<String>,
    pub status: AgencyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AgencyRow {
    /// Rebuilds the domain entity from the row
    pub fn into_domain(self) -> Agency {
        Agency {
            id: AgencyId::from(self.id),
            name: self.name,
            country: self.country,
            contact_email: self.contact_email,
            phone: self.phone,
            logo_url: self.logo_url,
            status: self.status.into(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const AGENCY_COLUMNS: &str = r#"
    SELECT id, name, country, contact_email, phone, logo_url, status,
           created_at, updated_at
    FROM agencies
"#;

/// Repository for agency persistence
#[derive(Debug, Clone)]
pub struct AgencyRepository {
    pool: PgPool,
}

impl AgencyRepository {
    /// Creates a new AgencyRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new agency
    pub async fn insert(&self, agency: &Agency) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO agencies (
                id, name, country, contact_email, phone, logo_url, status,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::from(agency.id))
        .bind(&agency.name)
        .bind(&agency.country)
        .bind(&agency.contact_email)
        .bind(&agency.phone)
        .bind(&agency.logo_url)
        .bind(AgencyStatus::from(agency.status))
        .bind(agency.created_at)
        .bind(agency.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves an agency by its identifier
    pub async fn get_by_id(&self, id: AgencyId) -> Result<Agency, DatabaseError> {
        let row: AgencyRow = sqlx::query_as(&format!("{AGENCY_COLUMNS} WHERE id = $1"))
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Agency", id))?;

        Ok(row.into_domain())
    }

    /// Lists agencies, optionally restricted to one country
    pub async fn list(&self, country: Option<&str>) -> Result<Vec<Agency>, DatabaseError> {
        let rows: Vec<AgencyRow> = sqlx::query_as(&format!(
            r#"
            {AGENCY_COLUMNS}
            WHERE ($1::text IS NULL OR country = $1)
            ORDER BY name ASC
            "#
        ))
        .bind(country)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AgencyRow::into_domain).collect())
    }

    /// Updates an agency in full (last-write-wins)
    pub async fn update(&self, agency: &Agency) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE agencies
            SET name = $2, country = $3, contact_email = $4, phone = $5,
                logo_url = $6, status = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(agency.id))
        .bind(&agency.name)
        .bind(&agency.country)
        .bind(&agency.contact_email)
        .bind(&agency.phone)
        .bind(&agency.logo_url)
        .bind(AgencyStatus::from(agency.status))
        .bind(agency.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Agency", agency.id));
        }
        Ok(())
    }
}
