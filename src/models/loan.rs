//! Loan model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Loan record as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: Uuid,
    pub material_id: Uuid,
    pub borrower_id: Uuid,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
    pub active: bool,
}

/// Candidate loan: who wants what
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoanRequest {
    #[validate(length(min = 1, max = 32, message = "ISBN is required"))]
    pub isbn: String,
    #[validate(length(min = 1, max = 50, message = "Borrower identification must be 1 to 50 characters"))]
    pub borrower_identification: String,
}

/// Active loan with borrower data, for per-material listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanDetails {
    pub id: Uuid,
    pub isbn: String,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
    pub borrower_identification: String,
    pub borrower_name: String,
}
