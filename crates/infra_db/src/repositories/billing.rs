//! Quotation and payment repository implementations
//!
//! Quotation course and service items are JSONB sub-documents; the money
//! totals are NUMERIC columns alongside a currency code so finance exports
//! can sum them in SQL.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{AgencyId, Currency, Money, PaymentId, QuotationId};
use domain_billing::{CourseItem, Payment, Quotation, ServiceItem};

use crate::error::DatabaseError;

/// Quotation status, as stored in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "quotation_status", rename_all = "snake_case")]
pub enum QuotationStatus {
    Draft,
    Issued,
    Accepted,
    Declined,
    Expired,
}

impl From<domain_billing::QuotationStatus> for QuotationStatus {
    fn from(status: domain_billing::QuotationStatus) -> Self {
        match status {
            domain_billing::QuotationStatus::Draft => QuotationStatus::Draft,
            domain_billing::QuotationStatus::Issued => QuotationStatus::Issued,
            domain_billing::QuotationStatus::Accepted => QuotationStatus::Accepted,
            domain_billing::QuotationStatus::Declined => QuotationStatus::Declined,
            domain_billing::QuotationStatus::Expired => QuotationStatus::Expired,
        }
    }
}

impl From<QuotationStatus> for domain_billing::QuotationStatus {
    fn from(status: QuotationStatus) -> Self {
        match status {
            QuotationStatus::Draft => domain_billing::QuotationStatus::Draft,
            QuotationStatus::Issued => domain_billing::QuotationStatus::Issued,
            QuotationStatus::Accepted => domain_billing::QuotationStatus::Accepted,
            QuotationStatus::Declined => domain_billing::QuotationStatus::Declined,
            QuotationStatus::Expired => domain_billing::QuotationStatus::Expired,
        }
    }
}

/// Payment method, as stored in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    Card,
    Cash,
    Other,
}

impl From<domain_billing::PaymentMethod> for PaymentMethod {
    fn from(method: domain_billing::PaymentMethod) -> Self {
        match method {
            domain_billing::PaymentMethod::BankTransfer => PaymentMethod::BankTransfer,
            domain_billing::PaymentMethod::Card => PaymentMethod::Card,
            domain_billing::PaymentMethod::Cash => PaymentMethod::Cash,
            domain_billing::PaymentMethod::Other => PaymentMethod::Other,
        }
    }
}

impl From<PaymentMethod> for domain_billing::PaymentMethod {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::BankTransfer => domain_billing::PaymentMethod::BankTransfer,
            PaymentMethod::Card => domain_billing::PaymentMethod::Card,
            PaymentMethod::Cash => domain_billing::PaymentMethod::Cash,
            PaymentMethod::Other => domain_billing::PaymentMethod::Other,
        }
    }
}

/// Payment status, as stored in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Confirmed,
    Failed,
}

impl From<domain_billing::PaymentStatus> for PaymentStatus {
    fn from(status: domain_billing::PaymentStatus) -> Self {
        match status {
            domain_billing::PaymentStatus::Pending => PaymentStatus::Pending,
            domain_billing::PaymentStatus::Confirmed => PaymentStatus::Confirmed,
            domain_billing::PaymentStatus::Failed => PaymentStatus::Failed,
        }
    }
}

impl From<PaymentStatus> for domain_billing::PaymentStatus {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Pending => domain_billing::PaymentStatus::Pending,
            PaymentStatus::Confirmed => domain_billing::PaymentStatus::Confirmed,
            PaymentStatus::Failed => domain_billing::PaymentStatus::Failed,
        }
    }
}

/// Database row representation of a quotation
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QuotationRow {
    pub id: Uuid,
    pub quotation_number: String,
    pub student_name: String,
    pub student_email: String,
    pub agency_id: Uuid,
    pub currency: String,
    pub course: Json<CourseItem>,
    pub services: Json<Vec<ServiceItem>>,
    pub discount: Decimal,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub status: QuotationStatus,
    pub valid_until: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuotationRow {
    /// Rebuilds the domain aggregate from the row
    pub fn into_domain(self) -> Result<Quotation, DatabaseError> {
        let currency: Currency = self
            .currency
            .parse()
            .map_err(|e: core_kernel::MoneyError| DatabaseError::SerializationError(e.to_string()))?;

        Ok(Quotation {
            id: QuotationId::from(self.id),
            quotation_number: self.quotation_number,
            student_name: self.student_name,
            student_email: self.student_email,
            agency_id: AgencyId::from(self.agency_id),
            currency,
            course: self.course.0,
            services: self.services.0,
            discount: Money::new(self.discount, currency),
            subtotal: Money::new(self.subtotal, currency),
            total: Money::new(self.total, currency),
            status: self.status.into(),
            valid_until: self.valid_until,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Optional filters for quotation listings
#[derive(Debug, Clone, Default)]
pub struct QuotationFilter {
    /// Filter by issuing agency
    pub agency_id: Option<AgencyId>,
    /// Filter by status
    pub status: Option<domain_billing::QuotationStatus>,
    /// Filter by student email (case-insensitive exact match)
    pub student_email: Option<String>,
}

const QUOTATION_COLUMNS: &str = r#"
    SELECT id, quotation_number, student_name, student_email, agency_id,
           currency, course, services, discount, subtotal, total, status,
           valid_until, notes, created_at, updated_at
    FROM quotations
"#;

/// Repository for quotation persistence
#[derive(Debug, Clone)]
pub struct QuotationRepository {
    pool: PgPool,
}

impl QuotationRepository {
    /// Creates a new QuotationRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new quotation
    pub async fn insert(&self, quotation: &Quotation) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO quotations (
                id, quotation_number, student_name, student_email, agency_id,
                currency, course, services, discount, subtotal, total, status,
                valid_until, notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(Uuid::from(quotation.id))
        .bind(&quotation.quotation_number)
        .bind(&quotation.student_name)
        .bind(&quotation.student_email)
        .bind(Uuid::from(quotation.agency_id))
        .bind(quotation.currency.code())
        .bind(Json(&quotation.course))
        .bind(Json(&quotation.services))
        .bind(quotation.discount.amount())
        .bind(quotation.subtotal.amount())
        .bind(quotation.total.amount())
        .bind(QuotationStatus::from(quotation.status))
        .bind(quotation.valid_until)
        .bind(&quotation.notes)
        .bind(quotation.created_at)
        .bind(quotation.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves a quotation by its identifier
    pub async fn get_by_id(&self, id: QuotationId) -> Result<Quotation, DatabaseError> {
        let row: QuotationRow = sqlx::query_as(&format!("{QUOTATION_COLUMNS} WHERE id = $1"))
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Quotation", id))?;

        row.into_domain()
    }

    /// Retrieves a quotation by its human-readable number
    pub async fn get_by_number(&self, number: &str) -> Result<Quotation, DatabaseError> {
        let row: QuotationRow =
            sqlx::query_as(&format!("{QUOTATION_COLUMNS} WHERE quotation_number = $1"))
                .bind(number)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| DatabaseError::not_found("Quotation", number))?;

        row.into_domain()
    }

    /// Lists quotations matching the filter, newest first
    pub async fn list(&self, filter: &QuotationFilter) -> Result<Vec<Quotation>, DatabaseError> {
        let rows: Vec<QuotationRow> = sqlx::query_as(&format!(
            r#"
            {QUOTATION_COLUMNS}
            WHERE ($1::uuid IS NULL OR agency_id = $1)
              AND ($2::quotation_status IS NULL OR status = $2)
              AND ($3::text IS NULL OR lower(student_email) = lower($3))
            ORDER BY created_at DESC
            "#
        ))
        .bind(filter.agency_id.map(Uuid::from))
        .bind(filter.status.map(QuotationStatus::from))
        .bind(&filter.student_email)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(QuotationRow::into_domain).collect()
    }

    /// Updates a quotation in full (last-write-wins)
    pub async fn update(&self, quotation: &Quotation) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE quotations
            SET student_name = $2, student_email = $3, currency = $4,
                course = $5, services = $6, discount = $7, subtotal = $8,
                total = $9, status = $10, valid_until = $11, notes = $12,
                updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(quotation.id))
        .bind(&quotation.student_name)
        .bind(&quotation.student_email)
        .bind(quotation.currency.code())
        .bind(Json(&quotation.course))
        .bind(Json(&quotation.services))
        .bind(quotation.discount.amount())
        .bind(quotation.subtotal.amount())
        .bind(quotation.total.amount())
        .bind(QuotationStatus::from(quotation.status))
        .bind(quotation.valid_until)
        .bind(&quotation.notes)
        .bind(quotation.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Quotation", quotation.id));
        }
        Ok(())
    }

    /// Deletes a quotation
    pub async fn delete(&self, id: QuotationId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM quotations WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Quotation", id));
        }
        Ok(())
    }
}

/// Database row representation of a payment
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PaymentRow {
    pub id: Uuid,
    pub quotation_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub status: PaymentStatus,
    pub paid_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PaymentRow {
    /// Rebuilds the domain record from the row
    pub fn into_domain(self) -> Result<Payment, DatabaseError> {
        let currency: Currency = self
            .currency
            .parse()
            .map_err(|e: core_kernel::MoneyError| DatabaseError::SerializationError(e.to_string()))?;

        Ok(Payment {
            id: PaymentId::from(self.id),
            quotation_id: QuotationId::from(self.quotation_id),
            amount: Money::new(self.amount, currency),
            method: self.method.into(),
            reference: self.reference,
            status: self.status.into(),
            paid_at: self.paid_at,
            confirmed_at: self.confirmed_at,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

const PAYMENT_COLUMNS: &str = r#"
    SELECT id, quotation_id, amount, currency, method, reference, status,
           paid_at, confirmed_at, notes, created_at
    FROM payments
"#;

/// Repository for payment persistence
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new payment
    pub async fn insert(&self, payment: &Payment) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, quotation_id, amount, currency, method, reference,
                status, paid_at, confirmed_at, notes, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(Uuid::from(payment.id))
        .bind(Uuid::from(payment.quotation_id))
        .bind(payment.amount.amount())
        .bind(payment.amount.currency().code())
        .bind(PaymentMethod::from(payment.method))
        .bind(&payment.reference)
        .bind(PaymentStatus::from(payment.status))
        .bind(payment.paid_at)
        .bind(payment.confirmed_at)
        .bind(&payment.notes)
        .bind(payment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves a payment by its identifier
    pub async fn get_by_id(&self, id: PaymentId) -> Result<Payment, DatabaseError> {
        let row: PaymentRow = sqlx::query_as(&format!("{PAYMENT_COLUMNS} WHERE id = $1"))
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Payment", id))?;

        row.into_domain()
    }

    /// Lists all payments recorded against a quotation, oldest first
    pub async fn list_for_quotation(
        &self,
        quotation_id: QuotationId,
    ) -> Result<Vec<Payment>, DatabaseError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "{PAYMENT_COLUMNS} WHERE quotation_id = $1 ORDER BY created_at ASC"
        ))
        .bind(Uuid::from(quotation_id))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PaymentRow::into_domain).collect()
    }

    /// Updates a payment's status fields
    pub async fn update(&self, payment: &Payment) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = $2, confirmed_at = $3, reference = $4, notes = $5
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(payment.id))
        .bind(PaymentStatus::from(payment.status))
        .bind(payment.confirmed_at)
        .bind(&payment.reference)
        .bind(&payment.notes)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Payment", payment.id));
        }
        Ok(())
    }
}
