//! Transaction and budget bucket types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single spending record, as uploaded or entered by hand
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Date of the transaction; CSV uploads may omit it
    pub date: Option<NaiveDate>,
    /// Free-text description (payee, memo)
    pub description: String,
    /// Free-text category label, resolved to a bucket on every pass
    pub category: String,
    /// Amount spent. Refunds may appear as negative values.
    pub amount: f64,
}

impl Transaction {
    /// Create a dated transaction
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            date: Some(date),
            description: description.into(),
            category: category.into(),
            amount,
        }
    }

    /// Create a transaction with no date
    pub fn undated(category: impl Into<String>, amount: f64) -> Self {
        Self {
            date: None,
            description: String::new(),
            category: category.into(),
            amount,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns true if this is a refund/credit (negative amount)
    pub fn is_refund(&self) -> bool {
        self.amount < 0.0
    }
}

/// The three 50/30/20 budget buckets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    #[serde(rename = "needs")]
    Needs,
    #[serde(rename = "wants")]
    Wants,
    #[serde(rename = "savings")]
    Savings,
}

impl Bucket {
    /// Display order used by every bucket series
    pub const ALL: [Bucket; 3] = [Bucket::Needs, Bucket::Wants, Bucket::Savings];

    /// Share of income this bucket should take
    pub fn target_ratio(&self) -> f64 {
        match self {
            Bucket::Needs => 0.50,
            Bucket::Wants => 0.30,
            Bucket::Savings => 0.20,
        }
    }

    /// Chart color
    pub fn color(&self) -> &'static str {
        match self {
            Bucket::Needs => "#EF553B",
            Bucket::Wants => "#AB63FA",
            Bucket::Savings => "#00CC96",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Needs => "Needs",
            Bucket::Wants => "Wants",
            Bucket::Savings => "Savings",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
