//! Plan command implementation.
//!
//! Resolves what the next run would fetch. Nothing is read from the source
//! store and nothing is written.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::config::AppConfig;
use crate::display::{print_json, print_plan};

/// Show the extraction plan for a run now.
pub(crate) async fn plan(config: &AppConfig, json: bool) -> Result<()> {
    let plan = config
        .job()
        .plan(Utc::now().naive_utc())
        .await
        .context("Failed to resolve the extraction plan")?;

    if json {
        print_json(&plan)
    } else {
        print_plan(&plan);
        Ok(())
    }
}
