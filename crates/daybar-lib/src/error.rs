//! Error types for the report job.

use daybar_ledger::LedgerError;
use daybar_store::StoreError;
use daybar_types::DaybarError;
use thiserror::Error;

/// Result type for job operations.
pub type Result<T> = std::result::Result<T, EtlError>;

/// Errors that abort a run.
#[derive(Error, Debug)]
pub enum EtlError {
    /// Loading or saving the ledger failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A source or target store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A source file lacks a configured column.
    #[error("Source file '{key}' does not match the configured columns: {source}")]
    SourceSchema {
        /// The offending source key.
        key: String,
        /// The underlying error.
        source: DaybarError,
    },

    /// Tick data could not be decoded.
    #[error("Invalid source data: {0}")]
    Data(#[from] DaybarError),

    /// The report key timestamp pattern is not a valid strftime pattern.
    #[error("Invalid report key date format: '{0}'")]
    KeyDateFormat(String),
}
