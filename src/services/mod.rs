//! Business logic services

pub mod borrowers;
pub mod loans;
pub mod materials;

use std::sync::Arc;

use crate::{config::LendingConfig, lending::Clock, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub materials: materials::MaterialsService,
    pub borrowers: borrowers::BorrowersService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, lending: &LendingConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            materials: materials::MaterialsService::new(repository.clone()),
            borrowers: borrowers::BorrowersService::new(repository.clone()),
            loans: loans::LoansService::new(repository, lending.into(), clock),
        }
    }
}
