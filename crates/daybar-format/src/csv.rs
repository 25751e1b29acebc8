//! CSV table format.

use bytes::Bytes;
use daybar_types::{Cell, Table};
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter.
///
/// The first record is the header; empty fields decode as [`Cell::Null`],
/// every other field as [`Cell::Str`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    /// Creates a new CSV formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Formatter for CsvFormatter {
    fn write_table<W: Write + Send>(&self, table: &Table, writer: W) -> Result<(), FormatError> {
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record(table.columns())?;
        for row in table.rows() {
            wtr.write_record(row.iter().map(ToString::to_string))?;
        }
        wtr.flush()?;

        Ok(())
    }

    fn read_table(&self, data: Bytes) -> Result<Table, FormatError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_ref());

        let mut table = Table::new(rdr.headers()?.iter());
        for record in rdr.records() {
            let row = record?
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Null
                    } else {
                        Cell::from(field)
                    }
                })
                .collect();
            table
                .push_row(row)
                .map_err(|e| FormatError::Decode(e.to_string()))?;
        }

        Ok(table)
    }
}
