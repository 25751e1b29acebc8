//! Output formatting for the daybar CLI.

use anyhow::Result;
use daybar_lib::{DATE_FORMAT, TIMESTAMP_FORMAT, prelude::*};
use serde::Serialize;

/// Print any serializable value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print an extraction plan.
pub(crate) fn print_plan(plan: &ExtractionPlan) {
    let Some(range) = plan.fetch_range() else {
        println!("Nothing to process: every date up to the horizon is in the ledger.");
        return;
    };

    println!("Watermark:     {}", plan.watermark().format(DATE_FORMAT));
    println!("Fetch range:   {range} ({} days)", range.total_days());
    println!("To record:     {} dates", plan.dates_to_record().len());
}

/// Print the outcome of a run.
pub(crate) fn print_summary(summary: &RunSummary) {
    println!("Run:           {}", summary.run_id);
    print_plan(&summary.plan);
    if summary.is_noop() {
        return;
    }

    println!(
        "Source:        {} files, {} rows ({} incomplete rows dropped)",
        summary.source_files, summary.source_rows, summary.dropped_rows
    );
    match &summary.report_key {
        Some(key) => println!("Report:        {} rows -> {key}", summary.report_rows),
        None => println!("Report:        no rows, nothing written"),
    }
    println!("Recorded:      {} dates", summary.recorded_dates.len());
}

/// Print ledger rows as a table.
pub(crate) fn print_ledger(key: &str, ledger: &MetaLedger) {
    println!("Ledger {key}: {} entries", ledger.len());
    println!("{:<12} {:<20}", "SOURCE DATE", "PROCESSED AT");
    println!("{}", "-".repeat(33));
    for entry in ledger.entries() {
        println!(
            "{:<12} {:<20}",
            entry.source_date.format(DATE_FORMAT),
            entry.processed_at.format(TIMESTAMP_FORMAT)
        );
    }
}
