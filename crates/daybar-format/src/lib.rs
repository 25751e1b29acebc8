//! Table codecs for the daybar report job.
//!
//! This crate encodes and decodes [`daybar_types::Table`] values:
//!
//! - [`CsvFormatter`] - CSV format
//! - [`ParquetFormatter`] - Apache Parquet columnar format
//! - [`OutputFormat`] - Format selection by name or key extension

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;

#[cfg(feature = "parquet")]
mod parquet;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;
