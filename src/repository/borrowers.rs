//! Borrowers repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::borrower::Borrower,
};

use super::BorrowerStore;

#[derive(Clone)]
pub struct BorrowersRepository {
    pool: Pool<Postgres>,
}

impl BorrowersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowerStore for BorrowersRepository {
    async fn find_by_identification(&self, identification: &str) -> AppResult<Option<Borrower>> {
        let borrower = sqlx::query_as::<_, Borrower>(
            "SELECT id, identification, name FROM borrowers WHERE LOWER(identification) = LOWER($1)",
        )
        .bind(identification)
        .fetch_optional(&self.pool)
        .await?;

        Ok(borrower)
    }

    async fn create(&self, borrower: &Borrower) -> AppResult<()> {
        let result = sqlx::query(
            "INSERT INTO borrowers (id, identification, name) VALUES ($1, $2, $3)",
        )
        .bind(borrower.id)
        .bind(&borrower.identification)
        .bind(&borrower.name)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Conflict(
                format!("A borrower with identification {} already exists", borrower.identification),
            )),
            Err(e) => Err(e.into()),
        }
    }
}
