//! Watermark resolution.
//!
//! Given the dates already recorded in the ledger, decides which source
//! dates a run must fetch and from which date its output rows are kept.
//! Every non-empty plan starts one day before the watermark so the first
//! retained day has a prior opening price to compare against.

use chrono::NaiveDate;
use daybar_types::{DateRange, previous_day};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::warn;

/// Watermark reported when there is nothing left to process.
#[must_use]
pub fn sentinel_watermark() -> NaiveDate {
    NaiveDate::from_ymd_opt(2200, 1, 1).unwrap_or(NaiveDate::MAX)
}

/// The dates to fetch and the watermark for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionPlan {
    watermark: NaiveDate,
    dates: Vec<NaiveDate>,
}

impl ExtractionPlan {
    /// A plan with nothing to fetch.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            watermark: sentinel_watermark(),
            dates: Vec::new(),
        }
    }

    /// Earliest date whose output rows are retained.
    #[must_use]
    pub const fn watermark(&self) -> NaiveDate {
        self.watermark
    }

    /// Dates to fetch, ascending and contiguous.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns true if there is nothing to fetch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Fetched dates at or after the watermark. The baseline day is excluded.
    #[must_use]
    pub fn dates_to_record(&self) -> Vec<NaiveDate> {
        self.dates
            .iter()
            .copied()
            .filter(|d| *d >= self.watermark)
            .collect()
    }

    /// The fetched dates as a range, if any.
    #[must_use]
    pub fn fetch_range(&self) -> Option<DateRange> {
        let (first, last) = (self.dates.first()?, self.dates.last()?);
        DateRange::new(*first, *last).ok()
    }
}

/// Resolves extraction plans for a fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatermarkResolver {
    first_extract_date: NaiveDate,
    horizon_end: NaiveDate,
}

impl WatermarkResolver {
    /// Creates a resolver for the window `first_extract_date..=horizon_end`.
    #[must_use]
    pub const fn new(first_extract_date: NaiveDate, horizon_end: NaiveDate) -> Self {
        Self {
            first_extract_date,
            horizon_end,
        }
    }

    /// First date of interest.
    #[must_use]
    pub const fn first_extract_date(&self) -> NaiveDate {
        self.first_extract_date
    }

    /// Last candidate date.
    #[must_use]
    pub const fn horizon_end(&self) -> NaiveDate {
        self.horizon_end
    }

    /// Computes the plan from the ledger's known dates.
    ///
    /// `None` means no ledger exists: the whole window is fetched, baseline
    /// day included, and the watermark is the first extract date. Otherwise
    /// the watermark is the earliest in-window date missing from the ledger.
    ///
    /// A first extract date with no day before it has no baseline and
    /// resolves to an empty plan.
    #[must_use]
    pub fn resolve(&self, known_dates: Option<&BTreeSet<NaiveDate>>) -> ExtractionPlan {
        if self.horizon_end < self.first_extract_date {
            return ExtractionPlan::empty();
        }
        let Some(baseline) = previous_day(self.first_extract_date) else {
            warn!(
                first_extract_date = %self.first_extract_date,
                "No baseline day before first extract date"
            );
            return ExtractionPlan::empty();
        };
        let Ok(window) = DateRange::new(baseline, self.horizon_end) else {
            return ExtractionPlan::empty();
        };

        let Some(known) = known_dates else {
            return ExtractionPlan {
                watermark: self.first_extract_date,
                dates: window.days().collect(),
            };
        };

        // Pairs each candidate with the day before it, which becomes the fetch start.
        let first_missing = window
            .days()
            .zip(window.days().skip(1))
            .find(|(_, day)| !known.contains(day));
        match first_missing {
            Some((from, first_missing)) => ExtractionPlan {
                watermark: first_missing,
                dates: window.days().filter(|d| *d >= from).collect(),
            },
            None => ExtractionPlan::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn days(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        DateRange::new(from, to).unwrap().days().collect()
    }

    fn resolver() -> WatermarkResolver {
        WatermarkResolver::new(date(2021, 4, 1), date(2021, 4, 10))
    }

    #[test]
    fn test_no_ledger_bootstrap() {
        let plan = resolver().resolve(None);
        assert_eq!(plan.watermark(), date(2021, 4, 1));
        assert_eq!(plan.dates(), days(date(2021, 3, 31), date(2021, 4, 10)));
        assert_eq!(plan.dates_to_record(), days(date(2021, 4, 1), date(2021, 4, 10)));
    }

    #[test]
    fn test_fully_covered_is_idempotent() {
        let known: BTreeSet<_> = days(date(2021, 4, 1), date(2021, 4, 10)).into_iter().collect();
        let plan = resolver().resolve(Some(&known));
        assert!(plan.is_empty());
        assert_eq!(plan.watermark(), date(2200, 1, 1));
        assert!(plan.dates_to_record().is_empty());
        assert!(plan.fetch_range().is_none());
    }

    #[test]
    fn test_gap_reconstruction() {
        let known: BTreeSet<_> = days(date(2021, 4, 1), date(2021, 4, 10))
            .into_iter()
            .filter(|d| *d != date(2021, 4, 3) && *d != date(2021, 4, 4))
            .collect();
        let plan = resolver().resolve(Some(&known));

        assert_eq!(plan.watermark(), date(2021, 4, 3));
        assert_eq!(plan.dates(), days(date(2021, 4, 2), date(2021, 4, 10)));
        assert_eq!(plan.dates_to_record(), days(date(2021, 4, 3), date(2021, 4, 10)));
    }

    #[test]
    fn test_only_newest_day_missing() {
        let known: BTreeSet<_> = days(date(2021, 4, 1), date(2021, 4, 9)).into_iter().collect();
        let plan = resolver().resolve(Some(&known));

        assert_eq!(plan.watermark(), date(2021, 4, 10));
        assert_eq!(plan.dates(), [date(2021, 4, 9), date(2021, 4, 10)]);
        assert_eq!(
            plan.fetch_range().unwrap(),
            DateRange::new(date(2021, 4, 9), date(2021, 4, 10)).unwrap()
        );
    }

    #[test]
    fn test_baseline_day_in_ledger_is_ignored() {
        // Only the baseline day is known, so everything is still missing.
        let known: BTreeSet<_> = [date(2021, 3, 31)].into_iter().collect();
        let plan = resolver().resolve(Some(&known));
        assert_eq!(plan.watermark(), date(2021, 4, 1));
        assert_eq!(plan.dates().first(), Some(&date(2021, 3, 31)));
    }

    #[test]
    fn test_empty_ledger_matches_bootstrap() {
        let known = BTreeSet::new();
        assert_eq!(resolver().resolve(Some(&known)), resolver().resolve(None));
    }

    #[test]
    fn test_horizon_before_first_date() {
        let resolver = WatermarkResolver::new(date(2021, 4, 10), date(2021, 4, 1));
        assert!(resolver.resolve(None).is_empty());
    }

    #[test]
    fn test_horizon_on_first_date() {
        let resolver = WatermarkResolver::new(date(2021, 4, 10), date(2021, 4, 10));
        let plan = resolver.resolve(None);
        assert_eq!(plan.dates(), [date(2021, 4, 9), date(2021, 4, 10)]);
        assert_eq!(plan.dates_to_record(), [date(2021, 4, 10)]);
    }

    #[test]
    fn test_watermark_never_before_first_date() {
        let known: BTreeSet<_> = [date(2021, 4, 5)].into_iter().collect();
        for plan in [resolver().resolve(None), resolver().resolve(Some(&known))] {
            assert!(plan.watermark() >= resolver().first_extract_date());
            assert_eq!(Some(plan.dates()[0]), previous_day(plan.watermark()));
        }
    }

    #[test]
    fn test_first_date_without_baseline() {
        let resolver = WatermarkResolver::new(NaiveDate::MIN, date(2021, 4, 10));
        assert!(resolver.resolve(None).is_empty());
        assert_eq!(resolver.resolve(None).watermark(), sentinel_watermark());
    }
}
