//! Tick record representation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::date_range::{parse_date, parse_time};
use crate::{Cell, DaybarError, Result, SourceColumns, Table};

/// One row of raw intraday trading data for a security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Security identifier (ISIN).
    pub isin: String,
    /// Trading date.
    pub date: NaiveDate,
    /// Trade time within the day.
    pub time: NaiveTime,
    /// Price at the start of the interval.
    pub open: f64,
    /// Lowest price in the interval.
    pub low: f64,
    /// Highest price in the interval.
    pub high: f64,
    /// Volume traded in the interval.
    pub volume: u64,
}

impl TickRecord {
    /// Creates a new tick record.
    #[must_use]
    pub fn new(
        isin: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
        open: f64,
        low: f64,
        high: f64,
        volume: u64,
    ) -> Self {
        Self {
            isin: isin.into(),
            date,
            time,
            open,
            low,
            high,
            volume,
        }
    }

    /// Decodes tick records from a table using the configured column names.
    ///
    /// Columns outside the projection are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a projected column is missing or a cell cannot be decoded.
    pub fn from_table(table: &Table, columns: &SourceColumns) -> Result<Vec<Self>> {
        let projected = table.select(&columns.projection())?;
        let names = projected.columns();

        projected
            .rows()
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                let invalid = |idx: usize| DaybarError::InvalidValue {
                    column: names[idx].clone(),
                    row,
                    value: cells[idx].to_string(),
                };
                let text = |idx: usize| match &cells[idx] {
                    Cell::Null => None,
                    cell => Some(cell.to_string()),
                };

                let isin = text(0).ok_or_else(|| invalid(0))?;
                let date = text(1)
                    .and_then(|s| parse_date(&s).ok())
                    .ok_or_else(|| invalid(1))?;
                let time = text(2)
                    .and_then(|s| parse_time(&s))
                    .ok_or_else(|| invalid(2))?;
                let open = cells[3].to_f64().ok_or_else(|| invalid(3))?;
                let low = cells[4].to_f64().ok_or_else(|| invalid(4))?;
                let high = cells[5].to_f64().ok_or_else(|| invalid(5))?;
                let volume = cells[6].to_u64().ok_or_else(|| invalid(6))?;

                Ok(Self::new(isin, date, time, open, low, high, volume))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xetra_table() -> Table {
        let mut table = Table::new([
            "ISIN",
            "Mnemonic",
            "Date",
            "Time",
            "StartPrice",
            "EndPrice",
            "MinPrice",
            "MaxPrice",
            "TradedVolume",
        ]);
        table
            .push_row(
                [
                    "AT0000A0E9W5",
                    "SANT",
                    "2021-04-15",
                    "12:00",
                    "20.19",
                    "18.45",
                    "18.20",
                    "20.33",
                    "877",
                ]
                .map(Cell::from)
                .to_vec(),
            )
            .unwrap();
        table
    }

    #[test]
    fn test_from_table_projects_and_parses() {
        let ticks = TickRecord::from_table(&xetra_table(), &SourceColumns::default()).unwrap();

        assert_eq!(ticks.len(), 1);
        let tick = &ticks[0];
        assert_eq!(tick.isin, "AT0000A0E9W5");
        assert_eq!(tick.date, NaiveDate::from_ymd_opt(2021, 4, 15).unwrap());
        assert_eq!(tick.time, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert!((tick.open - 20.19).abs() < 1e-10);
        assert!((tick.low - 18.20).abs() < 1e-10);
        assert!((tick.high - 20.33).abs() < 1e-10);
        assert_eq!(tick.volume, 877);
    }

    #[test]
    fn test_from_table_missing_column() {
        let table = xetra_table().select(&["ISIN", "Date"]).unwrap();
        let err = TickRecord::from_table(&table, &SourceColumns::default()).unwrap_err();
        assert_eq!(err, DaybarError::MissingColumn("Time".into()));
    }

    #[test]
    fn test_from_table_invalid_price() {
        let mut table = Table::new(SourceColumns::default().projection());
        table
            .push_row(
                ["AT0000A0E9W5", "2021-04-15", "12:00", "n/a", "1", "2", "3"]
                    .map(Cell::from)
                    .to_vec(),
            )
            .unwrap();

        let err = TickRecord::from_table(&table, &SourceColumns::default()).unwrap_err();
        assert_eq!(
            err,
            DaybarError::InvalidValue {
                column: "StartPrice".into(),
                row: 0,
                value: "n/a".into(),
            }
        );
    }
}
