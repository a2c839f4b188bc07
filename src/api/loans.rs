//! Loan endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    lending::{LoanOutcome, RefusalKind, RefusalReason},
    models::loan::{LoanDetails, LoanRequest},
    AppState,
};

/// Result of a loan request, granted or refused
#[derive(Debug, Serialize, ToSchema)]
pub struct LoanResponse {
    pub success: bool,
    pub message: String,
    pub isbn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Machine-readable refusal reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RefusalReason>,
}

impl LoanResponse {
    /// Status code and body for an outcome; refusals map by kind
    pub fn from_outcome(outcome: LoanOutcome) -> (StatusCode, Self) {
        match outcome {
            LoanOutcome::Granted(receipt) => (
                StatusCode::CREATED,
                LoanResponse {
                    success: true,
                    message: "Loan granted".to_string(),
                    isbn: receipt.isbn,
                    loan_id: Some(receipt.loan_id),
                    loan_date: Some(receipt.loan_date),
                    due_date: Some(receipt.due_date),
                    reason: None,
                },
            ),
            LoanOutcome::Refused(refusal) => {
                let status = match refusal.reason.kind() {
                    RefusalKind::NotFound => StatusCode::NOT_FOUND,
                    RefusalKind::PolicyViolation => StatusCode::UNPROCESSABLE_ENTITY,
                    RefusalKind::Conflict => StatusCode::CONFLICT,
                };
                (
                    status,
                    LoanResponse {
                        success: false,
                        message: refusal.reason.to_string(),
                        isbn: refusal.isbn,
                        loan_id: None,
                        loan_date: None,
                        due_date: None,
                        reason: Some(refusal.reason),
                    },
                )
            }
        }
    }
}

/// Request a loan, dated today
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 201, description = "Loan granted", body = LoanResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Material or borrower not found", body = LoanResponse),
        (status = 409, description = "Material already on loan", body = LoanResponse),
        (status = 422, description = "Lending rule forbids this loan", body = LoanResponse)
    )
)]
pub async fn create_loan(
    State(state): State<AppState>,
    Json(request): Json<LoanRequest>,
) -> AppResult<(StatusCode, Json<LoanResponse>)> {
    let outcome = state.services.loans.request_loan(request).await?;
    let (status, response) = LoanResponse::from_outcome(outcome);
    Ok((status, Json(response)))
}

/// Active loans of a material
#[utoipa::path(
    get,
    path = "/materials/{isbn}/loans",
    tag = "loans",
    params(
        ("isbn" = String, Path, description = "Material ISBN")
    ),
    responses(
        (status = 200, description = "Active loans (empty for unknown ISBN)", body = Vec<LoanDetails>)
    )
)]
pub async fn get_material_loans(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.active_loans_for_material(&isbn).await?;
    Ok(Json(loans))
}
