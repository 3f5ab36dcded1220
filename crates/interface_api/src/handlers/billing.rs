//! Quotation and payment handlers
//!
//! Quotation creation issues the next serial from the counter store and
//! composes the quotation number from it. The student email that follows a
//! successful creation is a post-commit side effect: its failure is logged
//! and never reverses the write.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{numbering::counter_names, AgencyId, Money, QuotationId};
use domain_billing::{CourseItem, Payment, Quotation, ServiceItem};
use domain_content::{Notification, NotificationChannel};
use domain_party::OutboundMessage;
use infra_db::repositories::billing::{PaymentRepository, QuotationFilter, QuotationRepository};
use infra_db::repositories::content::NotificationRepository;
use infra_db::repositories::party::AgencyRepository;
use infra_db::CounterStore;

use crate::dto::billing::*;
use crate::error::ApiError;
use crate::notify::spawn_email;
use crate::AppState;

/// Creates a new quotation, issuing the next quotation number
pub async fn create_quotation(
    State(state): State<AppState>,
    Json(request): Json<CreateQuotationRequest>,
) -> Result<(StatusCode, Json<QuotationResponse>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let agency_id = AgencyId::from(request.agency_id);
    let agency = AgencyRepository::new(state.pool.clone())
        .get_by_id(agency_id)
        .await?;

    let counters = CounterStore::new(state.pool.clone());
    let quotation_number = counters
        .next_document_number(counter_names::QUOTATION, Utc::now().date_naive())
        .await?;

    let course = CourseItem {
        institution: request.course.institution,
        course_name: request.course.course_name,
        fee: Money::new(request.course.fee, request.currency),
    };

    let mut quotation = Quotation::new(
        quotation_number,
        request.student_name,
        request.student_email,
        agency_id,
        course,
        request.valid_until,
    );
    for service in request.services {
        quotation.add_service(ServiceItem::new(
            service.label,
            Money::new(service.amount, request.currency),
        ))?;
    }
    if let Some(discount) = request.discount {
        quotation.set_discount(Money::new(discount, request.currency))?;
    }
    quotation.notes = request.notes;

    QuotationRepository::new(state.pool.clone())
        .insert(&quotation)
        .await?;

    // Post-commit side effects: an in-app notification for the agency and
    // an email to the student. Neither failure reverses the write.
    let in_app = Notification::new(
        &agency.contact_email,
        "Quotation created",
        format!(
            "Quotation {} for {} ({})",
            quotation.quotation_number, quotation.student_name, quotation.total
        ),
        NotificationChannel::InApp,
    )
    .with_link(format!("/quotations/{}", Uuid::from(quotation.id)));
    if let Err(e) = NotificationRepository::new(state.pool.clone())
        .insert(&in_app)
        .await
    {
        warn!(error = %e, "Failed to store in-app notification");
    }

    if request.notify {
        let message = OutboundMessage::new(
            vec![quotation.student_email.clone()],
            format!("Your quotation {}", quotation.quotation_number),
        )
        .with_link(format!("/quotations/{}", Uuid::from(quotation.id)));
        spawn_email(state.notifier.clone(), message);
    }

    Ok((StatusCode::CREATED, Json(quotation.into())))
}

/// Lists quotations, filtered by agency/status/student email
pub async fn list_quotations(
    State(state): State<AppState>,
    Query(query): Query<QuotationQuery>,
) -> Result<Json<Vec<QuotationResponse>>, ApiError> {
    let filter = QuotationFilter {
        agency_id: query.agency_id.map(AgencyId::from),
        status: query.status,
        student_email: query.student_email,
    };

    let quotations = QuotationRepository::new(state.pool.clone())
        .list(&filter)
        .await?;
    Ok(Json(
        quotations.into_iter().map(QuotationResponse::from).collect(),
    ))
}

/// Gets a quotation by ID
pub async fn get_quotation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuotationResponse>, ApiError> {
    let quotation = QuotationRepository::new(state.pool.clone())
        .get_by_id(QuotationId::from(id))
        .await?;
    Ok(Json(quotation.into()))
}

/// Updates a draft quotation's items, discount, validity, or notes
pub async fn update_quotation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateQuotationRequest>,
) -> Result<Json<QuotationResponse>, ApiError> {
    let repo = QuotationRepository::new(state.pool.clone());
    let mut quotation = repo.get_by_id(QuotationId::from(id)).await?;

    if let Some(services) = request.services {
        let items = services
            .into_iter()
            .map(|s| ServiceItem::new(s.label, Money::new(s.amount, quotation.currency)))
            .collect();
        quotation.replace_services(items)?;
    }
    if let Some(discount) = request.discount {
        quotation.set_discount(Money::new(discount, quotation.currency))?;
    }
    if let Some(valid_until) = request.valid_until {
        quotation.valid_until = valid_until;
        quotation.updated_at = Utc::now();
    }
    if let Some(notes) = request.notes {
        quotation.notes = Some(notes);
        quotation.updated_at = Utc::now();
    }

    repo.update(&quotation).await?;
    Ok(Json(quotation.into()))
}

/// Issues the quotation to the student
pub async fn issue_quotation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuotationResponse>, ApiError> {
    let repo = QuotationRepository::new(state.pool.clone());
    let mut quotation = repo.get_by_id(QuotationId::from(id)).await?;

    quotation.issue()?;
    repo.update(&quotation).await?;

    let message = OutboundMessage::new(
        vec![quotation.student_email.clone()],
        format!("Quotation {} issued", quotation.quotation_number),
    )
    .with_link(format!("/quotations/{}", Uuid::from(quotation.id)));
    spawn_email(state.notifier.clone(), message);

    Ok(Json(quotation.into()))
}

/// Records the student's acceptance
pub async fn accept_quotation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuotationResponse>, ApiError> {
    let repo = QuotationRepository::new(state.pool.clone());
    let mut quotation = repo.get_by_id(QuotationId::from(id)).await?;

    quotation.accept()?;
    repo.update(&quotation).await?;
    Ok(Json(quotation.into()))
}

/// Records the student's refusal
pub async fn decline_quotation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuotationResponse>, ApiError> {
    let repo = QuotationRepository::new(state.pool.clone());
    let mut quotation = repo.get_by_id(QuotationId::from(id)).await?;

    quotation.decline()?;
    repo.update(&quotation).await?;
    Ok(Json(quotation.into()))
}

/// Deletes a quotation
pub async fn delete_quotation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    QuotationRepository::new(state.pool.clone())
        .delete(QuotationId::from(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Records a payment against a quotation
pub async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>), ApiError> {
    let quotation = QuotationRepository::new(state.pool.clone())
        .get_by_id(QuotationId::from(id))
        .await?;

    if request.amount.is_sign_negative() || request.amount.is_zero() {
        return Err(ApiError::Validation(
            "payment amount must be positive".to_string(),
        ));
    }

    let mut payment = Payment::new(
        quotation.id,
        Money::new(request.amount, quotation.currency),
        request.method,
    );
    if let Some(reference) = request.reference {
        payment = payment.with_reference(reference);
    }
    if request.confirmed {
        payment.confirm();
    }

    PaymentRepository::new(state.pool.clone())
        .insert(&payment)
        .await?;
    Ok((StatusCode::CREATED, Json(payment.into())))
}

/// Lists a quotation's payments with the running balance
pub async fn list_payments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentSummaryResponse>, ApiError> {
    let quotation = QuotationRepository::new(state.pool.clone())
        .get_by_id(QuotationId::from(id))
        .await?;
    let payments = PaymentRepository::new(state.pool.clone())
        .list_for_quotation(quotation.id)
        .await?;

    let balance = quotation.balance_due(&payments);
    let paid = quotation.total - balance;

    Ok(Json(PaymentSummaryResponse {
        quotation_id: quotation.id,
        total: quotation.total.amount(),
        paid: paid.amount(),
        balance_due: balance.amount(),
        payments: payments.into_iter().map(PaymentResponse::from).collect(),
    }))
}
