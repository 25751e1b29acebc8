//! Apache Parquet table format.

use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray, UInt32Array, UInt64Array,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use daybar_types::{Cell, Table};
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Parquet formatter.
///
/// Column types are inferred from the cells: all-integer columns become
/// `Int64`, numeric columns `Float64`, everything else `Utf8`. Every
/// column is nullable. Files are SNAPPY-compressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParquetFormatter;

/// Rows per row group.
const ROW_GROUP_SIZE: usize = 100_000;

impl ParquetFormatter {
    /// Creates a new Parquet formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Creates the Arrow schema for a table.
    fn schema_for(table: &Table) -> Schema {
        let fields: Vec<Field> = table
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let data_type = infer_type(table.rows().iter().map(|row| &row[idx]));
                Field::new(name, data_type, true)
            })
            .collect();
        Schema::new(fields)
    }

    /// Converts a slice of rows to an Arrow RecordBatch.
    fn rows_to_batch(
        schema: &Arc<Schema>,
        rows: &[Vec<Cell>],
    ) -> Result<RecordBatch, FormatError> {
        let arrays: Vec<ArrayRef> = schema
            .fields()
            .iter()
            .enumerate()
            .map(|(idx, field)| column_array(field.data_type(), rows.iter().map(|row| &row[idx])))
            .collect();

        RecordBatch::try_new(Arc::clone(schema), arrays)
            .map_err(|e| FormatError::Parquet(e.to_string()))
    }
}

/// Infers the narrowest Arrow type that holds every non-null cell.
fn infer_type<'a>(cells: impl Iterator<Item = &'a Cell>) -> DataType {
    let mut data_type: Option<DataType> = None;
    for cell in cells {
        data_type = match (cell, data_type) {
            (Cell::Null, current) => current,
            (Cell::Str(_), _) => return DataType::Utf8,
            (Cell::Int(_), None | Some(DataType::Int64)) => Some(DataType::Int64),
            (Cell::Int(_) | Cell::Float(_), _) => Some(DataType::Float64),
        };
    }
    data_type.unwrap_or(DataType::Utf8)
}

fn column_array<'a>(data_type: &DataType, cells: impl Iterator<Item = &'a Cell>) -> ArrayRef {
    match data_type {
        DataType::Int64 => Arc::new(Int64Array::from(
            cells
                .map(|c| match c {
                    Cell::Int(i) => Some(*i),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        DataType::Float64 => Arc::new(Float64Array::from(
            cells.map(Cell::to_f64).collect::<Vec<_>>(),
        )),
        _ => Arc::new(StringArray::from(
            cells
                .map(|c| (!c.is_null()).then(|| c.to_string()))
                .collect::<Vec<_>>(),
        )),
    }
}

/// Reads one cell out of a decoded Arrow column.
fn array_cell(array: &dyn Array, row: usize) -> Result<Cell, FormatError> {
    if array.is_null(row) {
        return Ok(Cell::Null);
    }

    macro_rules! cell_from {
        ($array_type:ty, $variant:expr) => {
            array
                .as_any()
                .downcast_ref::<$array_type>()
                .map(|a| $variant(a.value(row)))
        };
    }

    let cell = match array.data_type() {
        DataType::Utf8 => cell_from!(StringArray, |v: &str| Cell::Str(v.to_string())),
        DataType::LargeUtf8 => cell_from!(LargeStringArray, |v: &str| Cell::Str(v.to_string())),
        DataType::Int64 => cell_from!(Int64Array, Cell::Int),
        DataType::Int32 => cell_from!(Int32Array, |v: i32| Cell::Int(i64::from(v))),
        DataType::UInt32 => cell_from!(UInt32Array, |v: u32| Cell::Int(i64::from(v))),
        DataType::UInt64 => array
            .as_any()
            .downcast_ref::<UInt64Array>()
            .map(|a| {
                let value = a.value(row);
                i64::try_from(value)
                    .map(Cell::Int)
                    .map_err(|_| FormatError::Decode(format!("value {value} exceeds Int64")))
            })
            .transpose()?,
        DataType::Float64 => cell_from!(Float64Array, Cell::Float),
        DataType::Float32 => cell_from!(Float32Array, |v: f32| Cell::Float(f64::from(v))),
        other => {
            return Err(FormatError::Decode(format!(
                "unsupported column type {other}"
            )));
        }
    };

    cell.ok_or_else(|| FormatError::Decode("column type mismatch".into()))
}

impl Formatter for ParquetFormatter {
    fn write_table<W: Write + Send>(&self, table: &Table, writer: W) -> Result<(), FormatError> {
        let schema = Arc::new(Self::schema_for(table));
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .set_max_row_group_size(ROW_GROUP_SIZE)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, Arc::clone(&schema), Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        // Write in batches
        for chunk in table.rows().chunks(ROW_GROUP_SIZE) {
            let batch = Self::rows_to_batch(&schema, chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }

    fn read_table(&self, data: Bytes) -> Result<Table, FormatError> {
        let builder = ParquetRecordBatchReaderBuilder::try_new(data)
            .map_err(|e| FormatError::Parquet(e.to_string()))?;
        let columns: Vec<String> = builder
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        let reader = builder
            .build()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        let mut table = Table::new(columns);
        for batch in reader {
            let batch = batch.map_err(|e| FormatError::Parquet(e.to_string()))?;
            for row in 0..batch.num_rows() {
                let cells = batch
                    .columns()
                    .iter()
                    .map(|array| array_cell(array.as_ref(), row))
                    .collect::<Result<Vec<_>, _>>()?;
                table
                    .push_row(cells)
                    .map_err(|e| FormatError::Decode(e.to_string()))?;
            }
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_table() -> Table {
        let mut table = Table::new(["ISIN", "Date", "OpeningPriceEur", "DailyTradedVolume", "ChangePrevClosing%"]);
        table
            .push_row(vec![
                "AT0000A0E9W5".into(),
                "2021-04-17".into(),
                Cell::Float(20.21),
                Cell::Int(1088),
                Cell::Null,
            ])
            .unwrap();
        table
            .push_row(vec![
                "AT0000A0E9W5".into(),
                "2021-04-18".into(),
                Cell::Float(20.58),
                Cell::Int(10286),
                Cell::Float(1.83),
            ])
            .unwrap();
        table
    }

    #[test]
    fn test_parquet_magic_bytes() {
        let mut output = Vec::new();
        ParquetFormatter::new()
            .write_table(&report_table(), &mut output)
            .unwrap();

        // Parquet files start with "PAR1" magic bytes
        assert!(output.len() > 4);
        assert_eq!(&output[0..4], b"PAR1");
    }

    #[test]
    fn test_schema_inference() {
        let schema = ParquetFormatter::schema_for(&report_table());
        assert_eq!(schema.fields().len(), 5);
        assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
        assert_eq!(schema.field(2).data_type(), &DataType::Float64);
        assert_eq!(schema.field(3).data_type(), &DataType::Int64);
        assert_eq!(schema.field(4).data_type(), &DataType::Float64);
    }

    #[test]
    fn test_mixed_numeric_widens_to_float() {
        let cells = [Cell::Int(1), Cell::Null, Cell::Float(2.5)];
        assert_eq!(infer_type(cells.iter()), DataType::Float64);
        assert_eq!(infer_type([Cell::Null].iter()), DataType::Utf8);
    }

    #[test]
    fn test_read_back_written_table() {
        let mut output = Vec::new();
        ParquetFormatter::new()
            .write_table(&report_table(), &mut output)
            .unwrap();

        let table = ParquetFormatter::new().read_table(Bytes::from(output)).unwrap();
        assert_eq!(table, report_table());
    }

    fn unsigned_parquet(values: Vec<u64>) -> Bytes {
        let schema = Arc::new(Schema::new(vec![Field::new("TradedVolume", DataType::UInt64, false)]));
        let batch = RecordBatch::try_new(
            Arc::clone(&schema),
            vec![Arc::new(UInt64Array::from(values)) as ArrayRef],
        )
        .unwrap();

        let mut output = Vec::new();
        let mut writer = ArrowWriter::try_new(&mut output, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        Bytes::from(output)
    }

    #[test]
    fn test_read_unsigned_volume() {
        let table = ParquetFormatter::new()
            .read_table(unsigned_parquet(vec![1035, 1028]))
            .unwrap();
        assert_eq!(table.rows()[1][0], Cell::Int(1028));
    }

    #[test]
    fn test_unsigned_volume_beyond_int64_is_rejected() {
        let result = ParquetFormatter::new().read_table(unsigned_parquet(vec![u64::MAX]));
        assert!(matches!(result, Err(FormatError::Decode(msg)) if msg.contains("exceeds Int64")));
    }
}
