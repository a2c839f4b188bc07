//! In-memory implementation of the stores.
//!
//! Every operation takes one lock over the whole state, so the
//! check-and-insert in [`LoanStore::create`] is atomic.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Borrower, Loan, LoanDetails, Material},
};

use super::{BorrowerStore, LoanStore, MaterialStore};

#[derive(Default)]
struct State {
    materials: HashMap<Uuid, Material>,
    borrowers: HashMap<Uuid, Borrower>,
    loans: Vec<Loan>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    fn lock(&self) -> AppResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| AppError::Internal("In-memory store lock poisoned".to_string()))
    }

    /// Every loan ever stored, active or not
    pub fn loans(&self) -> AppResult<Vec<Loan>> {
        Ok(self.lock()?.loans.clone())
    }
}

#[async_trait]
impl MaterialStore for InMemoryStore {
    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Material>> {
        let state = self.lock()?;
        Ok(state.materials.values().find(|m| m.isbn == isbn).cloned())
    }

    async fn create(&self, material: &Material) -> AppResult<()> {
        let mut state = self.lock()?;
        if state.materials.values().any(|m| m.isbn == material.isbn) {
            return Err(AppError::Conflict(format!(
                "A material with ISBN {} already exists",
                material.isbn
            )));
        }
        state.materials.insert(material.id, material.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut state = self.lock()?;
        if !state.materials.contains_key(&id) {
            return Err(AppError::NotFound(format!("Material with id {} not found", id)));
        }
        if state.loans.iter().any(|l| l.material_id == id) {
            return Err(AppError::Conflict("Material still has loan records".to_string()));
        }
        state.materials.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl BorrowerStore for InMemoryStore {
    async fn find_by_identification(&self, identification: &str) -> AppResult<Option<Borrower>> {
        let state = self.lock()?;
        Ok(state
            .borrowers
            .values()
            .find(|b| b.identification.to_lowercase() == identification.to_lowercase())
            .cloned())
    }

    async fn create(&self, borrower: &Borrower) -> AppResult<()> {
        let mut state = self.lock()?;
        let wanted = borrower.identification.to_lowercase();
        if state
            .borrowers
            .values()
            .any(|b| b.identification.to_lowercase() == wanted)
        {
            return Err(AppError::Conflict(format!(
                "A borrower with identification {} already exists",
                borrower.identification
            )));
        }
        state.borrowers.insert(borrower.id, borrower.clone());
        Ok(())
    }
}

#[async_trait]
impl LoanStore for InMemoryStore {
    async fn has_active_loan(&self, material_id: Uuid) -> AppResult<bool> {
        let state = self.lock()?;
        Ok(state
            .loans
            .iter()
            .any(|l| l.material_id == material_id && l.active))
    }

    async fn create(&self, loan: &Loan) -> AppResult<()> {
        let mut state = self.lock()?;
        if loan.active
            && state
                .loans
                .iter()
                .any(|l| l.material_id == loan.material_id && l.active)
        {
            return Err(AppError::Conflict(format!(
                "Material {} already has an active loan",
                loan.material_id
            )));
        }
        state.loans.push(loan.clone());
        Ok(())
    }

    async fn active_loans_for_material(&self, material_id: Uuid) -> AppResult<Vec<LoanDetails>> {
        let state = self.lock()?;
        let Some(material) = state.materials.get(&material_id) else {
            return Ok(Vec::new());
        };

        let mut loans: Vec<LoanDetails> = state
            .loans
            .iter()
            .filter(|l| l.material_id == material_id && l.active)
            .filter_map(|l| {
                state.borrowers.get(&l.borrower_id).map(|b| LoanDetails {
                    id: l.id,
                    isbn: material.isbn.clone(),
                    loan_date: l.loan_date,
                    due_date: l.due_date,
                    borrower_identification: b.identification.clone(),
                    borrower_name: b.name.clone(),
                })
            })
            .collect();
        loans.sort_by_key(|l| l.loan_date);

        Ok(loans)
    }
}
