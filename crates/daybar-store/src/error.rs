//! Error types for blob storage.

use daybar_format::FormatError;
use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No object is stored under the key.
    #[error("Key not found: {0}")]
    NotFound(String),

    /// The key cannot be mapped onto the store.
    #[error("Invalid key: '{0}'")]
    InvalidKey(String),

    /// Underlying I/O failure.
    #[error("I/O error on '{key}': {source}")]
    Io {
        /// The key being accessed.
        key: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The requested table format is not one of the recognized formats.
    #[error("The file format '{0}' is not supported")]
    UnsupportedFormat(String),

    /// Stored bytes do not parse as the expected table format.
    #[error("Failed to decode '{key}': {source}")]
    Decode {
        /// The key being read.
        key: String,
        /// The underlying format error.
        source: FormatError,
    },

    /// A table could not be encoded.
    #[error("Failed to encode '{key}': {source}")]
    Encode {
        /// The key being written.
        key: String,
        /// The underlying format error.
        source: FormatError,
    },
}

impl StoreError {
    /// Returns true if this error signals a missing key.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
