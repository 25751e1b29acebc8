//! Incremental daily OHLCV reports over raw tick data.
//!
//! This is a facade crate that re-exports the daybar workspace crates and
//! adds [`DailyReportJob`], which runs one resolve, extract, aggregate and
//! load cycle.
//!
//! # Quick Start
//!
//! ```ignore
//! use daybar_lib::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let job = DailyReportJob::new(
//!         Arc::new(FsStore::new("./data/source")),
//!         Arc::new(FsStore::new("./data/target")),
//!         JobConfig::default(),
//!         SourceConfig::new(chrono::NaiveDate::from_ymd_opt(2021, 4, 1).unwrap()),
//!         TargetConfig::new("report1/xetra_daily_report", "parquet"),
//!     );
//!
//!     let summary = job.run(chrono::Utc::now().naive_utc()).await?;
//!     println!("Wrote {} report rows", summary.report_rows);
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod job;

pub use config::{
    DEFAULT_KEY_DATE_FORMAT, DEFAULT_META_KEY, HorizonEnd, JobConfig, SourceConfig, TargetConfig,
};
pub use error::{EtlError, Result};
pub use job::{DailyReportJob, RunId, RunSummary, SourceBatch};

// Re-export core types
pub use daybar_types::{
    Cell, DATE_FORMAT, DateRange, DateRangeError, DaybarError, SourceColumns, TIMESTAMP_FORMAT,
    Table, TargetColumns, TickRecord, parse_date, parse_timestamp,
};

// Re-export aggregation
pub use daybar_aggregate::{DailyAggregator, DailyReport, pct_change, round2};

// Re-export formatters
pub use daybar_format::{CsvFormatter, FormatError, Formatter, OutputFormat};

#[cfg(feature = "parquet")]
pub use daybar_format::ParquetFormatter;

// Re-export storage
pub use daybar_store::{BlobStore, FsStore, MemoryStore, StoreError, TableStore};

// Re-export ledger
pub use daybar_ledger::{
    ExtractionPlan, LedgerEntry, LedgerError, LedgerStore, MetaLedger, WatermarkResolver,
    sentinel_watermark,
};

/// Prelude module for convenient imports.
///
/// ```
/// use daybar_lib::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        DailyReportJob, EtlError, HorizonEnd, JobConfig, RunSummary, SourceConfig, TargetConfig,
    };

    pub use daybar_types::{DateRange, SourceColumns, Table, TargetColumns, TickRecord};

    pub use daybar_aggregate::{DailyAggregator, DailyReport};

    pub use daybar_format::OutputFormat;

    pub use daybar_store::{BlobStore, FsStore, MemoryStore, TableStore};

    pub use daybar_ledger::{ExtractionPlan, LedgerStore, MetaLedger, WatermarkResolver};
}
