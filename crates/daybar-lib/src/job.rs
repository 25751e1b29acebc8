//! The incremental daily report job.

use chrono::{NaiveDate, NaiveDateTime};
use daybar_aggregate::{DailyAggregator, DailyReport};
use daybar_format::OutputFormat;
use daybar_ledger::{ExtractionPlan, LedgerStore, MetaLedger, WatermarkResolver};
use daybar_store::{BlobStore, TableStore};
use daybar_types::{DATE_FORMAT, Table, TickRecord};
use serde::Serialize;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

use crate::{EtlError, JobConfig, Result, SourceConfig, TargetConfig};

/// Unique identifier of one run.
pub type RunId = Uuid;

/// Projected, complete source rows gathered for a plan.
#[derive(Debug, Clone, Default)]
pub struct SourceBatch {
    /// Source rows projected onto the configured source columns.
    pub table: Table,
    /// Number of source files read.
    pub files: usize,
    /// Rows removed for holding an absent value.
    pub dropped_rows: usize,
}

/// Outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Run identifier, also attached to the run's log span.
    pub run_id: RunId,
    /// The resolved plan.
    pub plan: ExtractionPlan,
    /// Number of source files read.
    pub source_files: usize,
    /// Number of complete source rows aggregated.
    pub source_rows: usize,
    /// Rows removed for holding an absent value.
    pub dropped_rows: usize,
    /// Number of report rows produced.
    pub report_rows: usize,
    /// Key the report was written to, if anything was written.
    pub report_key: Option<String>,
    /// Dates appended to the ledger.
    pub recorded_dates: Vec<NaiveDate>,
}

impl RunSummary {
    const fn skipped(run_id: RunId, plan: ExtractionPlan) -> Self {
        Self {
            run_id,
            plan,
            source_files: 0,
            source_rows: 0,
            dropped_rows: 0,
            report_rows: 0,
            report_key: None,
            recorded_dates: Vec::new(),
        }
    }

    /// Returns true if the run found nothing to process.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.plan.is_empty()
    }
}

/// Extracts raw ticks for missing dates, aggregates them into the daily
/// report, writes the report and records the processed dates.
///
/// Runs of the same job must not overlap: the ledger is read once at the
/// start and rewritten at the end, so concurrent runs race on it.
#[derive(Debug, Clone)]
pub struct DailyReportJob {
    source: TableStore,
    target: TableStore,
    ledger: LedgerStore,
    job: JobConfig,
    source_config: SourceConfig,
    target_config: TargetConfig,
}

impl DailyReportJob {
    /// Creates a job reading ticks from `source` and writing the report and
    /// ledger to `target`.
    #[must_use]
    pub fn new(
        source: Arc<dyn BlobStore>,
        target: Arc<dyn BlobStore>,
        job: JobConfig,
        source_config: SourceConfig,
        target_config: TargetConfig,
    ) -> Self {
        let target = TableStore::new(target);
        let ledger = LedgerStore::new(target.clone(), job.meta_key.clone());
        Self {
            source: TableStore::new(source),
            target,
            ledger,
            job,
            source_config,
            target_config,
        }
    }

    /// Returns the ledger handle.
    #[must_use]
    pub const fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    /// Returns the resolver for a run at `now`.
    #[must_use]
    pub fn resolver(&self, now: NaiveDateTime) -> WatermarkResolver {
        WatermarkResolver::new(
            self.source_config.first_extract_date,
            self.job.horizon_end.resolve(now),
        )
    }

    /// Loads the ledger and resolves the plan for a run at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be loaded or is malformed.
    pub async fn plan(&self, now: NaiveDateTime) -> Result<ExtractionPlan> {
        let ledger = self.ledger.load().await?;
        Ok(self.plan_with(ledger.as_ref(), now))
    }

    fn plan_with(&self, ledger: Option<&MetaLedger>, now: NaiveDateTime) -> ExtractionPlan {
        let known = ledger.map(MetaLedger::known_dates);
        self.resolver(now).resolve(known.as_ref())
    }

    /// Reads every source file listed under each date's `YYYY-MM-DD` prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or lacks a configured column.
    pub async fn extract(&self, dates: &[NaiveDate]) -> Result<SourceBatch> {
        let projection = self.source_config.columns.projection();
        let mut batch = SourceBatch {
            table: Table::new(projection),
            ..SourceBatch::default()
        };

        for date in dates {
            let prefix = date.format(DATE_FORMAT).to_string();
            for key in self.source.list(&prefix).await? {
                let raw = self.source.read_table(&key).await?;
                batch.files += 1;
                if raw.is_empty() {
                    debug!(key, "Skipping source file without rows");
                    continue;
                }

                let mut rows = raw
                    .select(&projection)
                    .map_err(|source| EtlError::SourceSchema {
                        key: key.clone(),
                        source,
                    })?;
                batch.dropped_rows += rows.retain_complete();
                batch.table.extend(rows)?;
            }
        }

        info!(
            files = batch.files,
            rows = batch.table.len(),
            dropped = batch.dropped_rows,
            "Extracted source data"
        );
        Ok(batch)
    }

    /// Decodes the source rows and aggregates them from `watermark` on.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cell cannot be decoded or a day's total
    /// volume overflows.
    pub fn transform(&self, table: &Table, watermark: NaiveDate) -> Result<Vec<DailyReport>> {
        if table.is_empty() {
            info!("No source rows, nothing to aggregate");
            return Ok(Vec::new());
        }

        let ticks = TickRecord::from_table(table, &self.source_config.columns)?;
        let reports = DailyAggregator::new(watermark).aggregate(&ticks)?;
        info!(ticks = ticks.len(), rows = reports.len(), %watermark, "Aggregated daily report");
        Ok(reports)
    }

    /// Builds the report key `{key}_{timestamp}.{ext}` for a run at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`EtlError::KeyDateFormat`] if the timestamp pattern is invalid.
    pub fn report_key(&self, now: NaiveDateTime) -> Result<String> {
        let target = &self.target_config;
        let mut stamp = String::new();
        write!(stamp, "{}", now.format(&target.key_date_format))
            .map_err(|_| EtlError::KeyDateFormat(target.key_date_format.clone()))?;

        let extension = target.format.parse::<OutputFormat>().map_or_else(
            |_| target.format.to_lowercase(),
            |format| format.extension().to_string(),
        );
        Ok(format!("{}_{stamp}.{extension}", target.key))
    }

    /// Runs the job once at `now`.
    ///
    /// The ledger is written last, only after the report write succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails. Nothing is recorded in the ledger
    /// for a failed run.
    pub async fn run(&self, now: NaiveDateTime) -> Result<RunSummary> {
        let run_id = Uuid::new_v4();
        let span = info_span!("run", %run_id);
        self.run_inner(run_id, now).instrument(span).await
    }

    async fn run_inner(&self, run_id: RunId, now: NaiveDateTime) -> Result<RunSummary> {
        let ledger = self.ledger.load().await?;
        let plan = self.plan_with(ledger.as_ref(), now);
        let Some(range) = plan.fetch_range() else {
            info!("All dates up to the horizon are already processed");
            return Ok(RunSummary::skipped(run_id, plan));
        };
        info!(%range, watermark = %plan.watermark(), "Resolved extraction plan");

        let batch = self.extract(plan.dates()).await?;
        let reports = self.transform(&batch.table, plan.watermark())?;

        let report_key = self.report_key(now)?;
        let table = DailyReport::to_table(&reports, &self.target_config.columns);
        let written = self
            .target
            .write_table(&table, &report_key, &self.target_config.format)
            .await?;

        let recorded_dates = plan.dates_to_record();
        self.ledger
            .append_and_save(ledger, &recorded_dates, now)
            .await?;

        info!(rows = reports.len(), written, "Run finished");
        Ok(RunSummary {
            run_id,
            source_files: batch.files,
            source_rows: batch.table.len(),
            dropped_rows: batch.dropped_rows,
            report_rows: reports.len(),
            report_key: written.then_some(report_key),
            recorded_dates,
            plan,
        })
    }
}
