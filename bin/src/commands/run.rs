//! Run command implementation.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::config::AppConfig;
use crate::display::{print_json, print_summary};

/// Run the report job once.
pub(crate) async fn run(config: &AppConfig, json: bool) -> Result<()> {
    let summary = config
        .job()
        .run(Utc::now().naive_utc())
        .await
        .context("Report job failed")?;

    if json {
        print_json(&summary)
    } else {
        print_summary(&summary);
        Ok(())
    }
}
