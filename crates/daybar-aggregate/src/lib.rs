//! Daily OHLCV aggregation for the daybar report job.
//!
//! This crate turns intraday tick records into daily report rows:
//!
//! - [`TickGroups`] - Ticks grouped by (security, date)
//! - [`reduce`] - Independent per-group reducers
//! - [`DailyAggregator`] - Grouping, reduction, day-over-day change and watermark filter
//! - [`DailyReport`] - Daily report row

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod group;
pub mod reduce;
mod report;

pub use aggregator::{DailyAggregator, pct_change, round2};
pub use group::{GroupKey, TickGroups};
pub use report::DailyReport;
