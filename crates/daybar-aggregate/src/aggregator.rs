//! Tick-to-daily-report aggregation.

use chrono::NaiveDate;
use daybar_types::{DaybarError, Result, TickRecord};

use crate::DailyReport;
use crate::group::{GroupKey, TickGroups};
use crate::reduce::{first_by_time, last_by_time, max_high, min_low, sum_volume};

/// Daily report aggregator.
///
/// Reduces tick records to one [`DailyReport`] per (security, date) and
/// computes each row's percent change against the same security's previous
/// day. Rows dated before the watermark only seed that computation and are
/// not emitted.
#[derive(Debug, Clone, Copy)]
pub struct DailyAggregator {
    watermark: NaiveDate,
}

impl DailyAggregator {
    /// Creates a new aggregator emitting rows dated on or after `watermark`.
    #[must_use]
    pub const fn new(watermark: NaiveDate) -> Self {
        Self { watermark }
    }

    /// Returns the earliest date emitted.
    #[must_use]
    pub const fn watermark(&self) -> NaiveDate {
        self.watermark
    }

    /// Aggregates ticks into report rows ordered by security, then date.
    ///
    /// All numeric outputs are rounded with [`round2`].
    ///
    /// # Errors
    ///
    /// Returns [`DaybarError::VolumeOverflow`] if a day's summed volume does
    /// not fit an `i64`.
    pub fn aggregate(&self, ticks: &[TickRecord]) -> Result<Vec<DailyReport>> {
        let groups = TickGroups::from_ticks(ticks);
        let mut reports = Vec::with_capacity(groups.len());
        let mut previous: Option<(&GroupKey, f64)> = None;

        for (key, rows) in groups.iter() {
            let Some(day) = DayBuilder::reduce(key, rows)? else {
                continue;
            };

            let change_prev_pct = previous
                .filter(|(prev, _)| prev.isin == key.isin)
                .and_then(|(_, prior_open)| pct_change(day.open, prior_open));
            previous = Some((key, day.open));

            if key.date >= self.watermark {
                reports.push(day.finish(key, change_prev_pct));
            }
        }

        Ok(reports)
    }
}

/// Unrounded reduction of one (security, date) group.
#[derive(Debug)]
struct DayBuilder {
    open: f64,
    close: f64,
    low: f64,
    high: f64,
    volume: i64,
}

impl DayBuilder {
    /// Applies every reducer to the group, `None` if the group is empty.
    fn reduce(key: &GroupKey, rows: &[&TickRecord]) -> Result<Option<Self>> {
        let volume = sum_volume(rows).ok_or_else(|| DaybarError::VolumeOverflow {
            isin: key.isin.clone(),
            date: key.date,
        })?;
        let (Some(open), Some(close), Some(low), Some(high)) = (
            first_by_time(rows),
            last_by_time(rows),
            min_low(rows),
            max_high(rows),
        ) else {
            return Ok(None);
        };

        Ok(Some(Self {
            open,
            close,
            low,
            high,
            volume,
        }))
    }

    /// Finishes building and returns the rounded report row.
    fn finish(self, key: &GroupKey, change_prev_pct: Option<f64>) -> DailyReport {
        DailyReport {
            isin: key.isin.clone(),
            date: key.date,
            opening_price: round2(self.open),
            closing_price: round2(self.close),
            min_price: round2(self.low),
            max_price: round2(self.high),
            traded_volume: self.volume,
            change_prev_pct: change_prev_pct.map(round2),
        }
    }
}

/// Percent change from `previous` to `current`.
///
/// Returns `None` when the result is not finite (zero or non-finite `previous`).
#[must_use]
pub fn pct_change(current: f64, previous: f64) -> Option<f64> {
    let change = (current - previous) / previous * 100.0;
    change.is_finite().then_some(change)
}

/// Rounds to two decimals, ties to even on the binary value.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
