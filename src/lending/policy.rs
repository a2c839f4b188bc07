//! Loan length policy

use crate::{
    config::LendingConfig,
    models::material::{Material, MaterialType},
};

use super::isbn;

/// Loan lengths in business days, per material type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanPolicy {
    periodical_days: u32,
    book_days: u32,
    book_extended_days: u32,
    digit_sum_threshold: u32,
}

impl LoanPolicy {
    /// Number of business days `material` may be kept.
    ///
    /// Periodicals get a flat short loan. Books whose ISBN digit sum exceeds
    /// the threshold get the extended length.
    pub fn business_days(&self, material: &Material) -> u32 {
        match material.material_type {
            MaterialType::Periodical => self.periodical_days,
            MaterialType::Book if isbn::digit_sum(&material.isbn) > self.digit_sum_threshold => {
                self.book_extended_days
            }
            MaterialType::Book => self.book_days,
        }
    }
}

impl From<&LendingConfig> for LoanPolicy {
    fn from(config: &LendingConfig) -> Self {
        Self {
            periodical_days: config.periodical_days,
            book_days: config.book_days,
            book_extended_days: config.book_extended_days,
            digit_sum_threshold: config.digit_sum_threshold,
        }
    }
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self::from(&LendingConfig::default())
    }
}
