//! Table format abstraction.

use bytes::Bytes;
use daybar_types::Table;
use std::io::Write;
use thiserror::Error;

use crate::CsvFormatter;

/// Stored table format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// Apache Parquet columnar format.
    Parquet,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }

    /// Picks the format for a stored key from its extension.
    ///
    /// Keys ending in `.parquet` are Parquet, everything else is CSV.
    #[must_use]
    pub fn for_key(key: &str) -> Self {
        if key.to_lowercase().ends_with(".parquet") {
            Self::Parquet
        } else {
            Self::Csv
        }
    }

    /// Encodes a table into bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the format is not compiled in.
    pub fn encode(&self, table: &Table) -> Result<Vec<u8>, FormatError> {
        let mut buffer = Vec::new();
        match self {
            Self::Csv => CsvFormatter::new().write_table(table, &mut buffer)?,
            Self::Parquet => {
                #[cfg(feature = "parquet")]
                crate::ParquetFormatter::new().write_table(table, &mut buffer)?;
                #[cfg(not(feature = "parquet"))]
                return Err(FormatError::UnknownFormat("parquet".into()));
            }
        }
        Ok(buffer)
    }

    /// Decodes a table from bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not valid for this format.
    pub fn decode(&self, data: Bytes) -> Result<Table, FormatError> {
        match self {
            Self::Csv => CsvFormatter::new().read_table(data),
            Self::Parquet => {
                #[cfg(feature = "parquet")]
                return crate::ParquetFormatter::new().read_table(data);
                #[cfg(not(feature = "parquet"))]
                Err(FormatError::UnknownFormat("parquet".into()))
            }
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" | "pq" | "columnar" => Ok(Self::Parquet),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown table format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Arrow/Parquet error.
    #[error("Parquet error: {0}")]
    Parquet(String),

    /// Data does not fit the table model.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Trait for table codecs.
pub trait Formatter: Send + Sync {
    /// Writes a table to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write + Send>(&self, table: &Table, writer: W) -> Result<(), FormatError>;

    /// Reads a table from stored bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be parsed.
    fn read_table(&self, data: Bytes) -> Result<Table, FormatError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("Parquet".parse::<OutputFormat>().unwrap(), OutputFormat::Parquet);
        assert_eq!("columnar".parse::<OutputFormat>().unwrap(), OutputFormat::Parquet);
        assert!(matches!(
            "xlsx".parse::<OutputFormat>(),
            Err(FormatError::UnknownFormat(f)) if f == "xlsx"
        ));
    }

    #[test]
    fn test_for_key() {
        assert_eq!(OutputFormat::for_key("meta_file.csv"), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::for_key("report1/xetra_daily_report_20210420.parquet"),
            OutputFormat::Parquet
        );
        assert_eq!(OutputFormat::for_key("no_extension"), OutputFormat::Csv);
    }

    #[test]
    fn test_extension_display() {
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert_eq!(OutputFormat::Parquet.to_string(), "parquet");
        assert_eq!(OutputFormat::default(), OutputFormat::Csv);
    }
}
