//! TOML configuration for the daybar CLI.

use anyhow::{Context, Result};
use daybar_lib::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::logging::LogFormat;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AppConfig {
    pub(crate) store: StoreConfig,
    #[serde(default)]
    pub(crate) job: JobConfig,
    pub(crate) source: SourceConfig,
    pub(crate) target: TargetConfig,
    #[serde(default)]
    pub(crate) logging: LoggingConfig,
}

/// Local directories backing the source and target stores.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StoreConfig {
    pub(crate) source_root: PathBuf,
    pub(crate) target_root: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoggingConfig {
    #[serde(default = "default_level")]
    pub(crate) level: String,
    #[serde(default)]
    pub(crate) format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::Pretty,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub(crate) fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Builds the report job over filesystem stores.
    pub(crate) fn job(&self) -> DailyReportJob {
        DailyReportJob::new(
            Arc::new(FsStore::new(&self.store.source_root)),
            Arc::new(FsStore::new(&self.store.target_root)),
            self.job.clone(),
            self.source.clone(),
            self.target.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    const FULL: &str = r#"
        [store]
        source_root = "./data/source"
        target_root = "./data/target"

        [job]
        meta_key = "meta/meta_file.csv"
        horizon_end = "2022-03-20"

        [source]
        first_extract_date = "2021-04-01"

        [source.columns]
        isin = "Isin"

        [target]
        key = "report1/xetra_daily_report"
        key_date_format = "%Y%m%d"
        format = "parquet"

        [logging]
        level = "debug"
        format = "json"
    "#;

    const MINIMAL: &str = r#"
        [store]
        source_root = "src"
        target_root = "trg"

        [source]
        first_extract_date = "2021-04-01"

        [target]
        key = "report1/xetra_daily_report"
    "#;

    #[test]
    fn test_config_deserialize() {
        let config: AppConfig = toml::from_str(FULL).unwrap();

        assert_eq!(config.store.source_root, PathBuf::from("./data/source"));
        assert_eq!(config.job.meta_key, "meta/meta_file.csv");
        assert_eq!(
            config.job.horizon_end,
            HorizonEnd::Date(NaiveDate::from_ymd_opt(2022, 3, 20).unwrap())
        );
        assert_eq!(
            config.source.first_extract_date,
            NaiveDate::from_ymd_opt(2021, 4, 1).unwrap()
        );
        assert_eq!(config.source.columns.isin, "Isin");
        assert_eq!(config.source.columns.date, "Date");
        assert_eq!(config.target.format, "parquet");
        assert_eq!(config.target.key_date_format, "%Y%m%d");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = toml::from_str(MINIMAL).unwrap();

        assert_eq!(config.job.meta_key, "meta_file.csv");
        assert_eq!(config.job.horizon_end, HorizonEnd::Today);
        assert_eq!(config.source.columns, SourceColumns::default());
        assert_eq!(config.target.format, "csv");
        assert_eq!(config.target.key_date_format, "%Y%m%d_%H%M%S");
        assert_eq!(config.target.columns, TargetColumns::default());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_invalid_horizon() {
        let toml = MINIMAL.replace(
            "[source]",
            "[job]\nhorizon_end = \"next week\"\n\n[source]",
        );
        assert!(toml::from_str::<AppConfig>(&toml).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.target.key, "report1/xetra_daily_report");
        assert!(AppConfig::load(file.path().with_extension("missing")).is_err());
    }
}
