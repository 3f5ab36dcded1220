//! Campaign repository implementation
//!
//! A form and its field definitions are persisted together in a single
//! all-or-nothing transaction: the slug uniqueness check, the form insert,
//! and every field insert either all commit or none do. This is the only
//! multi-statement write in the system.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{FieldId, FormId, SubmissionId};
use domain_campaign::{CampaignForm, FieldDefinition, Submission};

use crate::error::DatabaseError;

/// Field type, as stored in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "field_type", rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Email,
    Phone,
    Number,
    Date,
    Textarea,
    Select,
    Checkbox,
}

impl From<domain_campaign::FieldType> for FieldType {
    fn from(field_type: domain_campaign::FieldType) -> Self {
        match field_type {
            domain_campaign::FieldType::Text => FieldType::Text,
            domain_campaign::FieldType::Email => FieldType::Email,
            domain_campaign::FieldType::Phone => FieldType::Phone,
            domain_campaign::FieldType::Number => FieldType::Number,
            domain_campaign::FieldType::Date => FieldType::Date,
            domain_campaign::FieldType::Textarea => FieldType::Textarea,
            domain_campaign::FieldType::Select => FieldType::Select,
            domain_campaign::FieldType::Checkbox => FieldType::Checkbox,
        }
    }
}

impl From<FieldType> for domain_campaign::FieldType {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text => domain_campaign::FieldType::Text,
            FieldType::Email => domain_campaign::FieldType::Email,
            FieldType::Phone => domain_campaign::FieldType::Phone,
            FieldType::Number => domain_campaign::FieldType::Number,
            FieldType::Date => domain_campaign::FieldType::Date,
            FieldType::Textarea => domain_campaign::FieldType::Textarea,
            FieldType::Select => domain_campaign::FieldType::Select,
            FieldType::Checkbox => domain_campaign::FieldType::Checkbox,
        }
    }
}

/// Database row for a campaign form (without its fields)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FormRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub author_email: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row for a field definition
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FieldRow {
    pub id: Uuid,
    pub form_id: Uuid,
    pub label: String,
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    pub options: Json<Vec<String>>,
    pub position: i32,
}

impl FieldRow {
    fn into_domain(self) -> FieldDefinition {
        FieldDefinition {
            id: FieldId::from(self.id),
            label: self.label,
            name: self.name,
            field_type: self.field_type.into(),
            required: self.required,
            options: self.options.0,
            position: self.position,
        }
    }
}

fn assemble(form: FormRow, fields: Vec<FieldRow>) -> CampaignForm {
    CampaignForm {
        id: FormId::from(form.id),
        title: form.title,
        slug: form.slug,
        author_email: form.author_email,
        fields: fields.into_iter().map(FieldRow::into_domain).collect(),
        active: form.active,
        created_at: form.created_at,
        updated_at: form.updated_at,
    }
}

/// Database row for a submission
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubmissionRow {
    pub id: Uuid,
    pub form_id: Uuid,
    pub answers: Json<BTreeMap<String, String>>,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionRow {
    fn into_domain(self) -> Submission {
        Submission {
            id: SubmissionId::from(self.id),
            form_id: FormId::from(self.form_id),
            answers: self.answers.0,
            submitted_at: self.submitted_at,
        }
    }
}

const FORM_COLUMNS: &str = r#"
    SELECT id, title, slug, author_email, active, created_at, updated_at
    FROM campaign_forms
"#;

const FIELD_COLUMNS: &str = r#"
    SELECT id, form_id, label, name, field_type, required, options, position
    FROM campaign_fields
"#;

/// Repository for campaign forms, fields, and submissions
#[derive(Debug, Clone)]
pub struct CampaignRepository {
    pool: PgPool,
}

impl CampaignRepository {
    /// Creates a new CampaignRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a form together with its field definitions, all or nothing.
    ///
    /// Checks slug uniqueness inside the transaction, then inserts the form
    /// and every field. Any failure (duplicate slug, constraint violation,
    /// storage error) aborts the whole operation with nothing persisted.
    /// The UNIQUE constraint on the slug column backs up the explicit check
    /// against a race between two concurrent creations.
    pub async fn create_with_fields(&self, form: &CampaignForm) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM campaign_forms WHERE slug = $1")
                .bind(&form.slug)
                .fetch_optional(&mut *tx)
                .await?;
        if existing.is_some() {
            return Err(DatabaseError::duplicate("CampaignForm", "slug", &form.slug));
        }

        sqlx::query(
            r#"
            INSERT INTO campaign_forms (
                id, title, slug, author_email, active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::from(form.id))
        .bind(&form.title)
        .bind(&form.slug)
        .bind(&form.author_email)
        .bind(form.active)
        .bind(form.created_at)
        .bind(form.updated_at)
        .execute(&mut *tx)
        .await?;

        for field in &form.fields {
            sqlx::query(
                r#"
                INSERT INTO campaign_fields (
                    id, form_id, label, name, field_type, required, options, position
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(Uuid::from(field.id))
            .bind(Uuid::from(form.id))
            .bind(&field.label)
            .bind(&field.name)
            .bind(FieldType::from(field.field_type))
            .bind(field.required)
            .bind(Json(&field.options))
            .bind(field.position)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Retrieves a form with its fields by identifier
    pub async fn get_by_id(&self, id: FormId) -> Result<CampaignForm, DatabaseError> {
        let form: FormRow = sqlx::query_as(&format!("{FORM_COLUMNS} WHERE id = $1"))
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("CampaignForm", id))?;

        let fields = self.fields_for(form.id).await?;
        Ok(assemble(form, fields))
    }

    /// Retrieves a form with its fields by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<CampaignForm, DatabaseError> {
        let form: FormRow = sqlx::query_as(&format!("{FORM_COLUMNS} WHERE slug = $1"))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("CampaignForm", slug))?;

        let fields = self.fields_for(form.id).await?;
        Ok(assemble(form, fields))
    }

    /// Lists all forms with their fields, newest first
    pub async fn list(&self) -> Result<Vec<CampaignForm>, DatabaseError> {
        let forms: Vec<FormRow> =
            sqlx::query_as(&format!("{FORM_COLUMNS} ORDER BY created_at DESC"))
                .fetch_all(&self.pool)
                .await?;

        let form_ids: Vec<Uuid> = forms.iter().map(|f| f.id).collect();
        let all_fields: Vec<FieldRow> = sqlx::query_as(&format!(
            "{FIELD_COLUMNS} WHERE form_id = ANY($1) ORDER BY position ASC"
        ))
        .bind(&form_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_form: BTreeMap<Uuid, Vec<FieldRow>> = BTreeMap::new();
        for field in all_fields {
            by_form.entry(field.form_id).or_default().push(field);
        }

        Ok(forms
            .into_iter()
            .map(|form| {
                let fields = by_form.remove(&form.id).unwrap_or_default();
                assemble(form, fields)
            })
            .collect())
    }

    /// Counts the field definitions of a form
    pub async fn field_count(&self, id: FormId) -> Result<i64, DatabaseError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT count(*) FROM campaign_fields WHERE form_id = $1")
                .bind(Uuid::from(id))
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Activates or deactivates a form
    pub async fn set_active(&self, id: FormId, active: bool) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE campaign_forms SET active = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(Uuid::from(id))
        .bind(active)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("CampaignForm", id));
        }
        Ok(())
    }

    /// Deletes a form; its fields and submissions cascade
    pub async fn delete(&self, id: FormId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM campaign_forms WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("CampaignForm", id));
        }
        Ok(())
    }

    /// Records a submission
    pub async fn add_submission(&self, submission: &Submission) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO campaign_submissions (id, form_id, answers, submitted_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::from(submission.id))
        .bind(Uuid::from(submission.form_id))
        .bind(Json(&submission.answers))
        .bind(submission.submitted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists submissions for a form, newest first
    pub async fn list_submissions(&self, form_id: FormId) -> Result<Vec<Submission>, DatabaseError> {
        let rows: Vec<SubmissionRow> = sqlx::query_as(
            r#"
            SELECT id, form_id, answers, submitted_at
            FROM campaign_submissions
            WHERE form_id = $1
            ORDER BY submitted_at DESC
            "#,
        )
        .bind(Uuid::from(form_id))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SubmissionRow::into_domain).collect())
    }

    async fn fields_for(&self, form_id: Uuid) -> Result<Vec<FieldRow>, DatabaseError> {
        let fields: Vec<FieldRow> = sqlx::query_as(&format!(
            "{FIELD_COLUMNS} WHERE form_id = $1 ORDER BY position ASC"
        ))
        .bind(form_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(fields)
    }
}
