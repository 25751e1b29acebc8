//! The meta ledger of processed source dates.

use chrono::{NaiveDate, NaiveDateTime};
use daybar_store::TableStore;
use daybar_types::{Cell, DATE_FORMAT, TIMESTAMP_FORMAT, Table, parse_date, parse_timestamp};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::{LedgerError, Result};

/// Column holding the processed source date.
pub const SOURCE_DATE_COLUMN: &str = "source_date";

/// Column holding the time the date was processed.
pub const PROCESS_TIMESTAMP_COLUMN: &str = "process_timestamp";

/// The exact ledger column set, in write order.
pub const LEDGER_COLUMNS: [&str; 2] = [SOURCE_DATE_COLUMN, PROCESS_TIMESTAMP_COLUMN];

/// Format name the ledger is always persisted in.
const LEDGER_FORMAT: &str = "csv";

/// One processed source date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    /// The source date that was incorporated into a report.
    pub source_date: NaiveDate,
    /// When the run that incorporated it finished aggregating.
    pub processed_at: NaiveDateTime,
}

/// Ordered ledger rows.
///
/// Duplicates are kept; consumers treat the ledger as a set of dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaLedger {
    entries: Vec<LedgerEntry>,
}

impl MetaLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the rows in stored order.
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the distinct processed source dates.
    #[must_use]
    pub fn known_dates(&self) -> BTreeSet<NaiveDate> {
        self.entries.iter().map(|e| e.source_date).collect()
    }

    /// Checks that `table` has exactly the ledger column set, in any order.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Malformed`] on any missing or extra column.
    pub fn validate(table: &Table, key: &str) -> Result<()> {
        if table.has_column_set(&LEDGER_COLUMNS) {
            Ok(())
        } else {
            Err(LedgerError::Malformed {
                key: key.to_string(),
                expected: LEDGER_COLUMNS.iter().map(ToString::to_string).collect(),
                found: table.columns().to_vec(),
            })
        }
    }

    /// Builds a ledger from a stored table.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Malformed`] if the column set is wrong and
    /// [`LedgerError::InvalidEntry`] if a date or timestamp does not parse.
    pub fn from_table(table: &Table, key: &str) -> Result<Self> {
        Self::validate(table, key)?;
        let date_idx = table
            .column_index(SOURCE_DATE_COLUMN)
            .unwrap_or_default();
        let ts_idx = table
            .column_index(PROCESS_TIMESTAMP_COLUMN)
            .unwrap_or_default();

        let invalid = |row: usize, column: &str, cell: &Cell| LedgerError::InvalidEntry {
            key: key.to_string(),
            row,
            column: column.to_string(),
            value: cell.to_string(),
        };

        let entries = table
            .rows()
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                let date_cell = &cells[date_idx];
                let ts_cell = &cells[ts_idx];
                let source_date = date_cell
                    .as_str()
                    .and_then(|s| parse_date(s).ok())
                    .ok_or_else(|| invalid(row, SOURCE_DATE_COLUMN, date_cell))?;
                let processed_at = ts_cell
                    .as_str()
                    .and_then(|s| parse_timestamp(s).ok())
                    .ok_or_else(|| invalid(row, PROCESS_TIMESTAMP_COLUMN, ts_cell))?;
                Ok(LedgerEntry {
                    source_date,
                    processed_at,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    /// Encodes the ledger as a table with the ledger columns.
    #[must_use]
    pub fn to_table(&self) -> Table {
        Table::from_rows(
            LEDGER_COLUMNS,
            self.entries.iter().map(|entry| {
                [
                    Cell::Str(entry.source_date.format(DATE_FORMAT).to_string()),
                    Cell::Str(entry.processed_at.format(TIMESTAMP_FORMAT).to_string()),
                ]
            }),
        )
    }

    /// Appends `dates`, all stamped with `processed_at`.
    pub fn append(&mut self, dates: &[NaiveDate], processed_at: NaiveDateTime) {
        self.entries.extend(dates.iter().map(|&source_date| LedgerEntry {
            source_date,
            processed_at,
        }));
    }
}

/// A [`MetaLedger`] persisted under one key of a table store.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    tables: TableStore,
    key: String,
}

impl LedgerStore {
    /// Creates a ledger handle for `key`.
    #[must_use]
    pub fn new(tables: TableStore, key: impl Into<String>) -> Self {
        Self {
            tables,
            key: key.into(),
        }
    }

    /// Returns the ledger key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads and validates the ledger. `None` means no ledger exists yet.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Malformed`] or [`LedgerError::InvalidEntry`]
    /// for a bad ledger and [`LedgerError::Store`] for storage failures.
    pub async fn load(&self) -> Result<Option<MetaLedger>> {
        match self.tables.read_table(&self.key).await {
            Ok(table) => {
                let ledger = MetaLedger::from_table(&table, &self.key)?;
                debug!(key = %self.key, rows = ledger.len(), "Loaded ledger");
                Ok(Some(ledger))
            }
            Err(e) if e.is_not_found() => {
                info!(key = %self.key, "No ledger found");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Appends `new_dates` to `existing` and writes the whole ledger back.
    ///
    /// Empty `new_dates` writes nothing. Returns the ledger as stored.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Store`] if the write fails.
    pub async fn append_and_save(
        &self,
        existing: Option<MetaLedger>,
        new_dates: &[NaiveDate],
        processed_at: NaiveDateTime,
    ) -> Result<MetaLedger> {
        let mut ledger = existing.unwrap_or_default();
        if new_dates.is_empty() {
            debug!(key = %self.key, "No new dates to record");
            return Ok(ledger);
        }

        ledger.append(new_dates, processed_at);
        self.tables
            .write_table(&ledger.to_table(), &self.key, LEDGER_FORMAT)
            .await?;
        info!(key = %self.key, added = new_dates.len(), total = ledger.len(), "Ledger updated");
        Ok(ledger)
    }
}
