//! Quotation and payment DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{Currency, PaymentId, QuotationId};
use domain_billing::{
    CourseItem, Payment, PaymentMethod, PaymentStatus, Quotation, QuotationStatus, ServiceItem,
};

/// Course line of a quotation request
#[derive(Debug, Deserialize)]
pub struct CourseItemRequest {
    pub institution: String,
    pub course_name: String,
    pub fee: Decimal,
}

/// Service fee line of a quotation request
#[derive(Debug, Deserialize)]
pub struct ServiceItemRequest {
    pub label: String,
    pub amount: Decimal,
}

/// Request body for creating a quotation
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuotationRequest {
    #[validate(length(min = 1, message = "student name cannot be empty"))]
    pub student_name: String,
    #[validate(email)]
    pub student_email: String,
    pub agency_id: Uuid,
    pub currency: Currency,
    pub course: CourseItemRequest,
    #[serde(default)]
    pub services: Vec<ServiceItemRequest>,
    pub discount: Option<Decimal>,
    pub valid_until: NaiveDate,
    pub notes: Option<String>,
    /// Whether to email the student after creation (default true)
    #[serde(default = "default_notify")]
    pub notify: bool,
}

fn default_notify() -> bool {
    true
}

/// Request body for updating a draft quotation
#[derive(Debug, Default, Deserialize)]
pub struct UpdateQuotationRequest {
    pub services: Option<Vec<ServiceItemRequest>>,
    pub discount: Option<Decimal>,
    pub valid_until: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Query parameters for quotation listings
#[derive(Debug, Default, Deserialize)]
pub struct QuotationQuery {
    pub agency_id: Option<Uuid>,
    pub status: Option<QuotationStatus>,
    pub student_email: Option<String>,
}

/// Quotation representation returned to clients
#[derive(Debug, Serialize)]
pub struct QuotationResponse {
    pub id: QuotationId,
    pub quotation_number: String,
    pub student_name: String,
    pub student_email: String,
    pub agency_id: Uuid,
    pub currency: Currency,
    pub course: CourseItem,
    pub services: Vec<ServiceItem>,
    pub discount: Decimal,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub status: QuotationStatus,
    pub valid_until: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Quotation> for QuotationResponse {
    fn from(quotation: Quotation) -> Self {
        Self {
            id: quotation.id,
            quotation_number: quotation.quotation_number,
            student_name: quotation.student_name,
            student_email: quotation.student_email,
            agency_id: Uuid::from(quotation.agency_id),
            currency: quotation.currency,
            course: quotation.course,
            services: quotation.services,
            discount: quotation.discount.amount(),
            subtotal: quotation.subtotal.amount(),
            total: quotation.total.amount(),
            status: quotation.status,
            valid_until: quotation.valid_until,
            notes: quotation.notes,
            created_at: quotation.created_at,
            updated_at: quotation.updated_at,
        }
    }
}

/// Request body for recording a payment
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    /// Record the payment as already confirmed
    #[serde(default)]
    pub confirmed: bool,
}

/// Payment representation returned to clients
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: PaymentId,
    pub quotation_id: QuotationId,
    pub amount: Decimal,
    pub currency: Currency,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub status: PaymentStatus,
    pub paid_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            quotation_id: payment.quotation_id,
            amount: payment.amount.amount(),
            currency: payment.amount.currency(),
            method: payment.method,
            reference: payment.reference,
            status: payment.status,
            paid_at: payment.paid_at,
            confirmed_at: payment.confirmed_at,
            created_at: payment.created_at,
        }
    }
}

/// Payments for a quotation plus the running balance
#[derive(Debug, Serialize)]
pub struct PaymentSummaryResponse {
    pub quotation_id: QuotationId,
    pub total: Decimal,
    pub paid: Decimal,
    pub balance_due: Decimal,
    pub payments: Vec<PaymentResponse>,
}
