//! Daily report row.

use chrono::NaiveDate;
use daybar_types::{Cell, DATE_FORMAT, Table, TargetColumns};
use serde::{Deserialize, Serialize};

/// One row of the daily report: a security's OHLCV summary for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    /// Security identifier.
    pub isin: String,
    /// Trading date.
    pub date: NaiveDate,
    /// Start price of the day's earliest tick.
    pub opening_price: f64,
    /// Start price of the day's latest tick.
    pub closing_price: f64,
    /// Lowest price of the day.
    pub min_price: f64,
    /// Highest price of the day.
    pub max_price: f64,
    /// Total traded volume of the day.
    pub traded_volume: i64,
    /// Percent change of the opening price versus the security's previous
    /// report row, absent for its first row.
    pub change_prev_pct: Option<f64>,
}

impl DailyReport {
    /// Encodes report rows as a table with the configured column names.
    #[must_use]
    pub fn to_table(rows: &[Self], columns: &TargetColumns) -> Table {
        Table::from_rows(
            columns.ordered(),
            rows.iter().map(|row| {
                [
                    Cell::from(row.isin.as_str()),
                    Cell::from(row.date.format(DATE_FORMAT).to_string()),
                    Cell::Float(row.opening_price),
                    Cell::Float(row.closing_price),
                    Cell::Float(row.min_price),
                    Cell::Float(row.max_price),
                    Cell::Int(row.traded_volume),
                    Cell::from(row.change_prev_pct),
                ]
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_table() {
        let row = DailyReport {
            isin: "AT0000A0E9W5".into(),
            date: NaiveDate::from_ymd_opt(2021, 4, 17).unwrap(),
            opening_price: 20.21,
            closing_price: 18.27,
            min_price: 18.21,
            max_price: 21.34,
            traded_volume: 1088,
            change_prev_pct: None,
        };
        let table = DailyReport::to_table(&[row], &TargetColumns::default());

        assert_eq!(table.columns().len(), 8);
        assert_eq!(table.columns()[2], "OpeningPriceEur");
        assert_eq!(table.rows()[0][1], Cell::from("2021-04-17"));
        assert_eq!(table.rows()[0][6], Cell::Int(1088));
        assert_eq!(table.rows()[0][7], Cell::Null);
    }

    #[test]
    fn test_to_table_keeps_large_volume() {
        let row = DailyReport {
            isin: "AT0000A0E9W5".into(),
            date: NaiveDate::from_ymd_opt(2021, 4, 17).unwrap(),
            opening_price: 20.21,
            closing_price: 18.27,
            min_price: 18.21,
            max_price: 21.34,
            traded_volume: i64::MAX,
            change_prev_pct: Some(1.83),
        };
        let table = DailyReport::to_table(&[row], &TargetColumns::default());
        assert_eq!(table.rows()[0][6], Cell::Int(i64::MAX));
        assert!(DailyReport::to_table(&[], &TargetColumns::default()).is_empty());
    }
}
