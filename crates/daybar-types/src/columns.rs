//! Source and target column naming.

use serde::{Deserialize, Serialize};

/// Column names of the raw tick files.
///
/// Defaults to the Deutsche Börse Xetra public data set layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceColumns {
    /// Security identifier column.
    pub isin: String,
    /// Trading date column.
    pub date: String,
    /// Trade time column.
    pub time: String,
    /// Interval start price column.
    pub start_price: String,
    /// Interval low price column.
    pub min_price: String,
    /// Interval high price column.
    pub max_price: String,
    /// Interval traded volume column.
    pub traded_volume: String,
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            isin: "ISIN".into(),
            date: "Date".into(),
            time: "Time".into(),
            start_price: "StartPrice".into(),
            min_price: "MinPrice".into(),
            max_price: "MaxPrice".into(),
            traded_volume: "TradedVolume".into(),
        }
    }
}

impl SourceColumns {
    /// Returns the columns the aggregation reads, in record order.
    #[must_use]
    pub fn projection(&self) -> [&str; 7] {
        [
            &self.isin,
            &self.date,
            &self.time,
            &self.start_price,
            &self.min_price,
            &self.max_price,
            &self.traded_volume,
        ]
    }
}

/// Column names of the daily report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetColumns {
    /// Security identifier column.
    pub isin: String,
    /// Report date column.
    pub date: String,
    /// Opening price column.
    pub opening_price: String,
    /// Closing price column.
    pub closing_price: String,
    /// Daily minimum price column.
    pub min_price: String,
    /// Daily maximum price column.
    pub max_price: String,
    /// Daily traded volume column.
    pub daily_traded_volume: String,
    /// Percent change versus the previous day's opening price.
    pub change_prev_closing: String,
}

impl Default for TargetColumns {
    fn default() -> Self {
        Self {
            isin: "ISIN".into(),
            date: "Date".into(),
            opening_price: "OpeningPriceEur".into(),
            closing_price: "ClosingPriceEur".into(),
            min_price: "MinimumPriceEur".into(),
            max_price: "MaximumPriceEur".into(),
            daily_traded_volume: "DailyTradedVolume".into(),
            change_prev_closing: "ChangePrevClosing%".into(),
        }
    }
}

impl TargetColumns {
    /// Returns the report columns in output order.
    #[must_use]
    pub fn ordered(&self) -> [&str; 8] {
        [
            &self.isin,
            &self.date,
            &self.opening_price,
            &self.closing_price,
            &self.min_price,
            &self.max_price,
            &self.daily_traded_volume,
            &self.change_prev_closing,
        ]
    }
}
