//! Data models

pub mod borrower;
pub mod loan;
pub mod material;

// Re-export commonly used types
pub use borrower::{Borrower, CreateBorrower};
pub use loan::{Loan, LoanDetails, LoanRequest};
pub use material::{CreateMaterial, Material, MaterialType};
