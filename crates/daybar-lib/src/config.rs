//! Job configuration types.

use chrono::{NaiveDate, NaiveDateTime};
use daybar_types::{DATE_FORMAT, DaybarError, SourceColumns, TargetColumns, parse_date};
use serde::{Deserialize, Serialize};

/// Default ledger key in the target store.
pub const DEFAULT_META_KEY: &str = "meta_file.csv";

/// Default timestamp pattern appended to report keys.
pub const DEFAULT_KEY_DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Last candidate date of the extraction window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HorizonEnd {
    /// The run's own date.
    #[default]
    Today,
    /// A fixed date.
    Date(NaiveDate),
}

impl HorizonEnd {
    /// Resolves the horizon against the run time.
    #[must_use]
    pub fn resolve(&self, now: NaiveDateTime) -> NaiveDate {
        match self {
            Self::Today => now.date(),
            Self::Date(date) => *date,
        }
    }
}

impl std::fmt::Display for HorizonEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Today => write!(f, "today"),
            Self::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

impl std::str::FromStr for HorizonEnd {
    type Err = DaybarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("today") {
            Ok(Self::Today)
        } else {
            parse_date(s).map(Self::Date)
        }
    }
}

impl TryFrom<String> for HorizonEnd {
    type Error = DaybarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HorizonEnd> for String {
    fn from(value: HorizonEnd) -> Self {
        value.to_string()
    }
}

/// Ledger location and window end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Ledger key in the target store.
    pub meta_key: String,
    /// Last candidate date.
    pub horizon_end: HorizonEnd,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            meta_key: DEFAULT_META_KEY.to_string(),
            horizon_end: HorizonEnd::Today,
        }
    }
}

/// Where the raw tick files come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// First date of interest.
    pub first_extract_date: NaiveDate,
    /// Column names of the tick files.
    #[serde(default)]
    pub columns: SourceColumns,
}

impl SourceConfig {
    /// Creates a source configuration with the default column names.
    #[must_use]
    pub fn new(first_extract_date: NaiveDate) -> Self {
        Self {
            first_extract_date,
            columns: SourceColumns::default(),
        }
    }
}

/// Where and how the report is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Report key prefix, e.g. `report1/xetra_daily_report`.
    pub key: String,
    /// `chrono` strftime pattern for the run timestamp in the key.
    #[serde(default = "default_key_date_format")]
    pub key_date_format: String,
    /// Format name: `csv` or `parquet`.
    #[serde(default = "default_format")]
    pub format: String,
    /// Report column names.
    #[serde(default)]
    pub columns: TargetColumns,
}

impl TargetConfig {
    /// Creates a target configuration with default key pattern and columns.
    #[must_use]
    pub fn new(key: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            key_date_format: default_key_date_format(),
            format: format.into(),
            columns: TargetColumns::default(),
        }
    }
}

fn default_key_date_format() -> String {
    DEFAULT_KEY_DATE_FORMAT.to_string()
}

fn default_format() -> String {
    "csv".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_parse() {
        assert_eq!("today".parse::<HorizonEnd>().unwrap(), HorizonEnd::Today);
        assert_eq!(" Today ".parse::<HorizonEnd>().unwrap(), HorizonEnd::Today);
        assert_eq!(
            "2022-03-20".parse::<HorizonEnd>().unwrap(),
            HorizonEnd::Date(NaiveDate::from_ymd_opt(2022, 3, 20).unwrap())
        );
        assert!("tomorrow".parse::<HorizonEnd>().is_err());
    }

    #[test]
    fn test_horizon_resolve() {
        let now = NaiveDate::from_ymd_opt(2021, 4, 20)
            .unwrap()
            .and_hms_opt(10, 12, 33)
            .unwrap();
        let fixed = NaiveDate::from_ymd_opt(2022, 3, 20).unwrap();

        assert_eq!(HorizonEnd::Today.resolve(now), now.date());
        assert_eq!(HorizonEnd::Date(fixed).resolve(now), fixed);
    }

    #[test]
    fn test_horizon_display_roundtrip() {
        for horizon in [
            HorizonEnd::Today,
            HorizonEnd::Date(NaiveDate::from_ymd_opt(2022, 3, 20).unwrap()),
        ] {
            assert_eq!(horizon.to_string().parse::<HorizonEnd>().unwrap(), horizon);
        }
    }

    #[test]
    fn test_target_defaults() {
        let target = TargetConfig::new("report1/xetra_daily_report", "parquet");
        assert_eq!(target.key_date_format, DEFAULT_KEY_DATE_FORMAT);
        assert_eq!(target.columns.opening_price, "OpeningPriceEur");
    }
}
