//! Processed-date ledger for the daybar report job.
//!
//! - [`MetaLedger`] / [`LedgerStore`] - The persisted set of processed dates
//! - [`WatermarkResolver`] - Turns known dates into an [`ExtractionPlan`]

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod ledger;
mod watermark;

pub use error::{LedgerError, Result};
pub use ledger::{
    LEDGER_COLUMNS, LedgerEntry, LedgerStore, MetaLedger, PROCESS_TIMESTAMP_COLUMN,
    SOURCE_DATE_COLUMN,
};
pub use watermark::{ExtractionPlan, WatermarkResolver, sentinel_watermark};
