//! Loan eligibility evaluation.
//!
//! A loan request runs through a fixed chain of guards, in this order:
//!
//! 1. the material exists
//! 2. the borrower exists
//! 3. the material's ISBN is not a digit palindrome (reference-only copies)
//! 4. the material has no active loan
//! 5. periodicals are not lent on Saturday or Sunday
//!
//! The first failing guard decides the refusal. Nothing is written unless
//! every guard passes.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{loan::Loan, material::MaterialType, LoanRequest},
    repository::{BorrowerStore, LoanStore, MaterialStore},
};

use super::{calendar, isbn, policy::LoanPolicy};

/// Broad category of a refusal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RefusalKind {
    NotFound,
    PolicyViolation,
    Conflict,
}

/// Why a loan was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RefusalReason {
    #[error("material not found")]
    MaterialNotFound,

    #[error("borrower not found")]
    BorrowerNotFound,

    #[error("material with a palindrome ISBN is for in-library use only")]
    ReferenceOnly,

    #[error("material is already on loan")]
    AlreadyOnLoan,

    #[error("periodical cannot be loaned on a weekend")]
    PeriodicalOnWeekend,
}

impl RefusalReason {
    pub fn kind(&self) -> RefusalKind {
        match self {
            RefusalReason::MaterialNotFound | RefusalReason::BorrowerNotFound => {
                RefusalKind::NotFound
            }
            RefusalReason::ReferenceOnly | RefusalReason::PeriodicalOnWeekend => {
                RefusalKind::PolicyViolation
            }
            RefusalReason::AlreadyOnLoan => RefusalKind::Conflict,
        }
    }
}

/// A granted loan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanReceipt {
    pub loan_id: Uuid,
    pub isbn: String,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// A refused loan, echoing the requested ISBN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanRefusal {
    pub isbn: String,
    pub reason: RefusalReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanOutcome {
    Granted(LoanReceipt),
    Refused(LoanRefusal),
}

impl LoanOutcome {
    fn refused(isbn: &str, reason: RefusalReason) -> Self {
        LoanOutcome::Refused(LoanRefusal {
            isbn: isbn.to_string(),
            reason,
        })
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, LoanOutcome::Granted(_))
    }
}

#[derive(Clone)]
pub struct EligibilityEvaluator {
    materials: Arc<dyn MaterialStore>,
    borrowers: Arc<dyn BorrowerStore>,
    loans: Arc<dyn LoanStore>,
    policy: LoanPolicy,
}

impl EligibilityEvaluator {
    pub fn new(
        materials: Arc<dyn MaterialStore>,
        borrowers: Arc<dyn BorrowerStore>,
        loans: Arc<dyn LoanStore>,
        policy: LoanPolicy,
    ) -> Self {
        Self {
            materials,
            borrowers,
            loans,
            policy,
        }
    }

    /// Decide on `request` as if made on `loan_date`, persisting the loan if granted.
    ///
    /// Refusals are `Ok(LoanOutcome::Refused(..))`; `Err` is reserved for
    /// store failures.
    pub async fn evaluate(&self, request: &LoanRequest, loan_date: NaiveDate) -> AppResult<LoanOutcome> {
        let requested = request.isbn.as_str();

        let Some(material) = self.materials.find_by_isbn(requested).await? else {
            return Ok(LoanOutcome::refused(requested, RefusalReason::MaterialNotFound));
        };

        let Some(borrower) = self
            .borrowers
            .find_by_identification(&request.borrower_identification)
            .await?
        else {
            return Ok(LoanOutcome::refused(requested, RefusalReason::BorrowerNotFound));
        };

        if isbn::is_palindrome(&material.isbn) {
            return Ok(LoanOutcome::refused(requested, RefusalReason::ReferenceOnly));
        }

        if self.loans.has_active_loan(material.id).await? {
            return Ok(LoanOutcome::refused(requested, RefusalReason::AlreadyOnLoan));
        }

        if material.material_type == MaterialType::Periodical && calendar::is_weekend(loan_date) {
            return Ok(LoanOutcome::refused(requested, RefusalReason::PeriodicalOnWeekend));
        }

        let business_days = self.policy.business_days(&material);
        let due_date = calendar::adjust_if_lands_on_weekend(calendar::compute_due_date(
            loan_date,
            business_days,
        ));

        let loan = Loan {
            id: Uuid::new_v4(),
            material_id: material.id,
            borrower_id: borrower.id,
            loan_date,
            due_date,
            active: true,
        };

        match self.loans.create(&loan).await {
            Ok(()) => {}
            // Another request took the material between the availability check and the insert
            Err(AppError::Conflict(_)) => {
                return Ok(LoanOutcome::refused(requested, RefusalReason::AlreadyOnLoan));
            }
            Err(e) => return Err(e),
        }

        tracing::info!(
            loan_id = %loan.id,
            isbn = %material.isbn,
            borrower = %borrower.identification,
            %loan_date,
            %due_date,
            business_days,
            "Loan granted"
        );

        Ok(LoanOutcome::Granted(LoanReceipt {
            loan_id: loan.id,
            isbn: material.isbn,
            loan_date,
            due_date,
        }))
    }
}
