//! Error types for the processed-date ledger.

use daybar_store::StoreError;
use thiserror::Error;

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur while loading or saving the ledger.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The stored ledger does not have exactly the expected columns.
    #[error("Malformed ledger '{key}': expected columns {expected:?}, found {found:?}")]
    Malformed {
        /// The ledger key.
        key: String,
        /// The required column set.
        expected: Vec<String>,
        /// The columns actually present.
        found: Vec<String>,
    },

    /// A ledger row holds a value that does not parse.
    #[error("Invalid ledger entry in '{key}' at row {row}, column '{column}': '{value}'")]
    InvalidEntry {
        /// The ledger key.
        key: String,
        /// Zero-based row index.
        row: usize,
        /// Column name.
        column: String,
        /// The offending value.
        value: String,
    },

    /// Storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}
