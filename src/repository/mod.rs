//! Persistence collaborators of the lending engine.
//!
//! Each store is a trait so the engine can run against PostgreSQL, the
//! in-memory store, or a mock.

pub mod borrowers;
pub mod loans;
pub mod materials;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Borrower, Loan, LoanDetails, Material},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaterialStore: Send + Sync {
    /// Exact match on the stored identifier
    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Material>>;

    /// Fails with `Conflict` if the ISBN is already registered
    async fn create(&self, material: &Material) -> AppResult<()>;

    /// Fails with `NotFound` if absent, `Conflict` if loans still reference it
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowerStore: Send + Sync {
    /// Case-insensitive match on the identification
    async fn find_by_identification(&self, identification: &str) -> AppResult<Option<Borrower>>;

    /// Fails with `Conflict` if the identification is already registered
    async fn create(&self, borrower: &Borrower) -> AppResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanStore: Send + Sync {
    async fn has_active_loan(&self, material_id: Uuid) -> AppResult<bool>;

    /// Persist a new loan.
    ///
    /// Must fail with `Conflict`, atomically, when `loan` is active and the
    /// material already has an active loan.
    async fn create(&self, loan: &Loan) -> AppResult<()>;

    async fn active_loans_for_material(&self, material_id: Uuid) -> AppResult<Vec<LoanDetails>>;
}

/// Bundle of the three stores
#[derive(Clone)]
pub struct Repository {
    pub materials: Arc<dyn MaterialStore>,
    pub borrowers: Arc<dyn BorrowerStore>,
    pub loans: Arc<dyn LoanStore>,
}

impl Repository {
    /// Stores backed by the given PostgreSQL pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            materials: Arc::new(materials::MaterialsRepository::new(pool.clone())),
            borrowers: Arc::new(borrowers::BorrowersRepository::new(pool.clone())),
            loans: Arc::new(loans::LoansRepository::new(pool)),
        }
    }

    /// Stores sharing one fresh in-memory state
    pub fn in_memory() -> Self {
        let store = Arc::new(memory::InMemoryStore::default());
        Self {
            materials: store.clone(),
            borrowers: store.clone(),
            loans: store,
        }
    }
}
