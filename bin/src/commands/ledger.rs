//! Ledger command implementation.

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::display::{print_json, print_ledger};

/// Show the processed-date ledger.
pub(crate) async fn ledger(config: &AppConfig, json: bool) -> Result<()> {
    let job = config.job();
    let store = job.ledger();
    let ledger = store
        .load()
        .await
        .with_context(|| format!("Failed to load ledger {}", store.key()))?
        .unwrap_or_default();

    if json {
        print_json(ledger.entries())
    } else {
        print_ledger(store.key(), &ledger);
        Ok(())
    }
}
