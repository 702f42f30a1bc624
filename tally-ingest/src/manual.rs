//! Manual transaction entry (one row at a time)

use chrono::NaiveDate;
use tally_core::{BudgetError, Result, Transaction};

/// Categories offered by the entry form. Free text is accepted too.
pub const SUGGESTED_CATEGORIES: [&str; 7] = [
    "Rent",
    "Groceries",
    "Dining",
    "Utilities",
    "Transport",
    "Entertainment",
    "Shopping",
];

/// Smallest amount the form accepts
pub const MIN_AMOUNT: f64 = 0.01;

/// A filled-in entry form
#[derive(Debug, Clone, PartialEq)]
pub struct ManualEntry {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: f64,
}

impl ManualEntry {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            category: category.into(),
            amount,
        }
    }

    /// Validate the form and produce a transaction
    pub fn into_transaction(self) -> Result<Transaction> {
        if !self.amount.is_finite() || self.amount < MIN_AMOUNT {
            return Err(BudgetError::InvalidInput(format!(
                "amount must be at least {MIN_AMOUNT:.2}, got {}",
                self.amount
            )));
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(BudgetError::InvalidInput("category is required".into()));
        }
        Ok(Transaction::new(self.date, self.description.trim(), category, self.amount))
    }
}
