//! Per-group reducers.
//!
//! Each reducer takes the rows of one (security, date) group. The price
//! reducers return `None` for an empty group.

use daybar_types::TickRecord;

/// Start price of the earliest tick. Ties keep the first in input order.
#[must_use]
pub fn first_by_time(rows: &[&TickRecord]) -> Option<f64> {
    rows.iter().min_by_key(|t| t.time).map(|t| t.open)
}

/// Start price of the latest tick. Ties keep the last in input order.
#[must_use]
pub fn last_by_time(rows: &[&TickRecord]) -> Option<f64> {
    rows.iter().max_by_key(|t| t.time).map(|t| t.open)
}

/// Lowest low price.
#[must_use]
pub fn min_low(rows: &[&TickRecord]) -> Option<f64> {
    rows.iter().map(|t| t.low).reduce(f64::min)
}

/// Highest high price.
#[must_use]
pub fn max_high(rows: &[&TickRecord]) -> Option<f64> {
    rows.iter().map(|t| t.high).reduce(f64::max)
}

/// Total traded volume, `None` if it does not fit an `i64`.
#[must_use]
pub fn sum_volume(rows: &[&TickRecord]) -> Option<i64> {
    rows.iter().try_fold(0_i64, |total, t| {
        total.checked_add(i64::try_from(t.volume).ok()?)
    })
}
