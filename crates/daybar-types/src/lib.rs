//! Core types for the daybar daily report job.
//!
//! This crate provides the fundamental data structures used throughout daybar:
//!
//! - [`TickRecord`] - One row of raw intraday trading data
//! - [`Table`] / [`Cell`] - Named-column tabular data exchanged with storage
//! - [`SourceColumns`] / [`TargetColumns`] - Configurable column names
//! - [`DateRange`] - Inclusive calendar date range with day iteration

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod columns;
mod date_range;
mod error;
mod table;
mod tick;

pub use columns::{SourceColumns, TargetColumns};
pub use date_range::{
    DATE_FORMAT, DateRange, DayIterator, TIMESTAMP_FORMAT, parse_date, parse_time,
    parse_timestamp, previous_day,
};
pub use error::{DateRangeError, DaybarError, Result};
pub use table::{Cell, Table};
pub use tick::TickRecord;
