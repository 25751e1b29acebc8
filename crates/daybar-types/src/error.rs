//! Error types for daybar.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for daybar data operations.
pub type Result<T> = std::result::Result<T, DaybarError>;

/// Errors that can occur while shaping tabular data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DaybarError {
    /// A required column is not present in the table.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A row does not have one cell per column.
    #[error("Row has {found} cells, table has {expected} columns")]
    RowWidth {
        /// Number of columns in the table.
        expected: usize,
        /// Number of cells in the offending row.
        found: usize,
    },

    /// Two tables with different column sets cannot be concatenated.
    #[error("Column mismatch: expected {expected:?}, found {found:?}")]
    ColumnMismatch {
        /// Columns of the receiving table.
        expected: Vec<String>,
        /// Columns of the appended table.
        found: Vec<String>,
    },

    /// A cell could not be decoded into the expected type.
    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        /// Column name.
        column: String,
        /// Zero-based row index.
        row: usize,
        /// Rendered cell value.
        value: String,
    },

    /// A day's summed traded volume does not fit a signed 64-bit integer.
    #[error("Traded volume overflow for {isin} on {date}")]
    VolumeOverflow {
        /// Security identifier.
        isin: String,
        /// Trading date.
        date: NaiveDate,
    },

    /// Invalid date or timestamp string.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Invalid date range.
    #[error(transparent)]
    DateRange(#[from] DateRangeError),
}

/// Error for invalid date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Start date is after end date.
    #[error("Invalid date range: {start} > {end}")]
    InvalidRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },
}
