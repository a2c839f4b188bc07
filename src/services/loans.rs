//! Loan management service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::AppResult,
    lending::{Clock, EligibilityEvaluator, LoanOutcome, LoanPolicy},
    models::loan::{LoanDetails, LoanRequest},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    evaluator: EligibilityEvaluator,
    clock: Arc<dyn Clock>,
}

impl LoansService {
    pub fn new(repository: Repository, policy: LoanPolicy, clock: Arc<dyn Clock>) -> Self {
        let evaluator = EligibilityEvaluator::new(
            repository.materials.clone(),
            repository.borrowers.clone(),
            repository.loans.clone(),
            policy,
        );
        Self {
            repository,
            evaluator,
            clock,
        }
    }

    /// Lend a material to a borrower, dated today
    pub async fn request_loan(&self, request: LoanRequest) -> AppResult<LoanOutcome> {
        request.validate()?;

        let today = self.clock.today();
        let outcome = self.evaluator.evaluate(&request, today).await?;

        if let LoanOutcome::Refused(refusal) = &outcome {
            tracing::info!(
                isbn = %refusal.isbn,
                borrower = %request.borrower_identification,
                reason = %refusal.reason,
                "Loan refused"
            );
        }

        Ok(outcome)
    }

    /// Active loans of a material; an unknown ISBN has none
    pub async fn active_loans_for_material(&self, isbn: &str) -> AppResult<Vec<LoanDetails>> {
        match self.repository.materials.find_by_isbn(isbn).await? {
            Some(material) => self.repository.loans.active_loans_for_material(material.id).await,
            None => Ok(Vec::new()),
        }
    }
}
