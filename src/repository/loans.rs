//! Loans repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::loan::{Loan, LoanDetails},
};

use super::LoanStore;

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanStore for LoansRepository {
    async fn has_active_loan(&self, material_id: Uuid) -> AppResult<bool> {
        let on_loan: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM loans WHERE material_id = $1 AND active)",
        )
        .bind(material_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(on_loan)
    }

    async fn create(&self, loan: &Loan) -> AppResult<()> {
        // loans_one_active_per_material rejects a second active loan
        let result = sqlx::query(
            r#"
            INSERT INTO loans (id, material_id, borrower_id, loan_date, due_date, active)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(loan.id)
        .bind(loan.material_id)
        .bind(loan.borrower_id)
        .bind(loan.loan_date)
        .bind(loan.due_date)
        .bind(loan.active)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                tracing::warn!(material_id = %loan.material_id, "Lost race for an active loan");
                Err(AppError::Conflict(format!(
                    "Material {} already has an active loan",
                    loan.material_id
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn active_loans_for_material(&self, material_id: Uuid) -> AppResult<Vec<LoanDetails>> {
        let loans = sqlx::query_as::<_, LoanDetails>(
            r#"
            SELECT l.id, m.isbn, l.loan_date, l.due_date,
                   b.identification AS borrower_identification,
                   b.name AS borrower_name
            FROM loans l
            JOIN materials m ON m.id = l.material_id
            JOIN borrowers b ON b.id = l.borrower_id
            WHERE l.material_id = $1 AND l.active
            ORDER BY l.loan_date
            "#,
        )
        .bind(material_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }
}
