//! Error taxonomy shared by every tally crate

use thiserror::Error;

/// Failures scoped to a single interaction. None of them end a session.
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Malformed or unparseable transaction input
    #[error("Ingestion error: {0}")]
    Ingestion(String),

    /// Aggregation asked for with no usable transactions
    #[error("No transaction data: upload a CSV or add transactions first")]
    MissingData,

    /// The chat collaborator failed (network, quota, malformed response)
    #[error("Assistant error: {0}")]
    ExternalService(String),

    /// Benchmark table or config unavailable; degrades a feature only
    #[error("Configuration warning: {0}")]
    Configuration(String),

    /// A value outside its accepted range (manual entry, CLI args)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl BudgetError {
    /// Row-scoped ingestion failure; rows are numbered from 1 after the header
    pub fn row(row: usize, msg: impl std::fmt::Display) -> Self {
        BudgetError::Ingestion(format!("row {row}: {msg}"))
    }
}

pub type Result<T> = std::result::Result<T, BudgetError>;
