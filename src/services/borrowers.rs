//! Borrower registration service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::borrower::{Borrower, CreateBorrower},
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowersService {
    repository: Repository,
}

impl BorrowersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new borrower
    pub async fn register(&self, request: CreateBorrower) -> AppResult<Borrower> {
        request.validate()?;

        if self
            .repository
            .borrowers
            .find_by_identification(&request.identification)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "A borrower with identification {} already exists",
                request.identification
            )));
        }

        let borrower = Borrower {
            id: Uuid::new_v4(),
            identification: request.identification,
            name: request.name,
        };
        self.repository.borrowers.create(&borrower).await?;

        tracing::info!(id = %borrower.id, identification = %borrower.identification, "Borrower registered");
        Ok(borrower)
    }

    /// Get borrower by identification
    pub async fn get(&self, identification: &str) -> AppResult<Borrower> {
        self.repository
            .borrowers
            .find_by_identification(identification)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Borrower {} not found", identification))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn identification_is_unique_ignoring_case() {
        let service = BorrowersService::new(Repository::in_memory());
        service
            .register(CreateBorrower {
                identification: "CC-1020".to_string(),
                name: "Ada Lovelace".to_string(),
            })
            .await
            .unwrap();

        let err = service
            .register(CreateBorrower {
                identification: "cc-1020".to_string(),
                name: "Someone Else".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(service.get("Cc-1020").await.unwrap().name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn overlong_identification_fails_validation() {
        let service = BorrowersService::new(Repository::in_memory());
        let err = service
            .register(CreateBorrower {
                identification: "9".repeat(51),
                name: "Ada Lovelace".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
