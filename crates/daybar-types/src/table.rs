//! Named-column tabular data.

use std::collections::HashSet;

use crate::{DaybarError, Result};

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing value.
    Null,
    /// Text value.
    Str(String),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
}

impl Cell {
    /// Returns true if the cell holds no value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text value, if this is a text cell.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Interprets the cell as a float, parsing text cells.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Str(s) => s.trim().parse().ok(),
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
        }
    }

    /// Interprets the cell as a non-negative integer, parsing text cells.
    ///
    /// Floats with a zero fractional part are accepted.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        match self {
            Self::Null => None,
            Self::Str(s) => {
                let s = s.trim();
                s.parse::<u64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole_u64))
            }
            Self::Int(i) => u64::try_from(*i).ok(),
            Self::Float(f) => whole_u64(*f),
        }
    }
}

fn whole_u64(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64).then_some(f as u64)
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Str(s) => write!(f, "{s}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// An ordered sequence of records sharing a set of named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates an empty table with the given columns.
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Creates a table from fixed-width rows.
    ///
    /// Every row has exactly one cell per column by construction.
    #[must_use]
    pub fn from_rows<const N: usize, S, R>(columns: [S; N], rows: R) -> Self
    where
        S: Into<String>,
        R: IntoIterator<Item = [Cell; N]>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: rows.into_iter().map(Vec::from).collect(),
        }
    }

    /// Appends a row.
    ///
    /// # Errors
    ///
    /// Returns [`DaybarError::RowWidth`] if the row does not have one cell per column.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(DaybarError::RowWidth {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Returns the column names in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the index of a column by name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the index of a column by name, failing if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`DaybarError::MissingColumn`] if no column has that name.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| DaybarError::MissingColumn(name.to_string()))
    }

    /// Returns true if the table's column set equals `expected`, ignoring order.
    #[must_use]
    pub fn has_column_set(&self, expected: &[&str]) -> bool {
        let actual: HashSet<&str> = self.columns.iter().map(String::as_str).collect();
        let expected: HashSet<&str> = expected.iter().copied().collect();
        actual.len() == self.columns.len() && actual == expected
    }

    /// Projects the table onto the named columns, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`DaybarError::MissingColumn`] if any column is absent.
    pub fn select(&self, names: &[&str]) -> Result<Self> {
        let indices = names
            .iter()
            .map(|name| self.require_column(name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            columns: names.iter().map(|n| (*n).to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        })
    }

    /// Removes every row holding a [`Cell::Null`]. Returns how many were removed.
    pub fn retain_complete(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !row.iter().any(Cell::is_null));
        before - self.rows.len()
    }

    /// Appends the rows of `other`, reordering its columns to match this table.
    ///
    /// An empty column list on `self` adopts the columns of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`DaybarError::ColumnMismatch`] if the column sets differ.
    pub fn extend(&mut self, other: Self) -> Result<()> {
        if self.columns.is_empty() && self.rows.is_empty() {
            *self = other;
            return Ok(());
        }

        let names: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        if !other.has_column_set(&names) {
            return Err(DaybarError::ColumnMismatch {
                expected: self.columns.clone(),
                found: other.columns,
            });
        }

        let aligned = other.select(&names)?;
        self.rows.extend(aligned.rows);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(["ISIN", "Date", "StartPrice"]);
        table
            .push_row(vec!["AT0000A0E9W5".into(), "2021-04-17".into(), 20.21.into()])
            .unwrap();
        table
            .push_row(vec!["AT0000A0E9W5".into(), "2021-04-18".into(), Cell::Null])
            .unwrap();
        table
    }

    #[test]
    fn test_push_row_width() {
        let mut table = Table::new(["a", "b"]);
        let err = table.push_row(vec![Cell::Int(1)]).unwrap_err();
        assert_eq!(
            err,
            DaybarError::RowWidth {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_from_rows() {
        let table = Table::from_rows(
            ["source_date", "process_timestamp"],
            [["2021-04-17".into(), "2021-04-20 10:12:33".into()]],
        );
        assert_eq!(table.columns(), ["source_date", "process_timestamp"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0][1], Cell::from("2021-04-20 10:12:33"));

        let empty = Table::from_rows(["a", "b"], std::iter::empty::<[Cell; 2]>());
        assert!(empty.is_empty());
        assert_eq!(empty.columns().len(), 2);
    }

    #[test]
    fn test_column_set_ignores_order() {
        let table = sample();
        assert!(table.has_column_set(&["StartPrice", "ISIN", "Date"]));
        assert!(!table.has_column_set(&["ISIN", "Date"]));
        assert!(!table.has_column_set(&["ISIN", "Date", "EndPrice"]));
    }

    #[test]
    fn test_column_set_rejects_duplicates() {
        let table = Table::new(["a", "a"]);
        assert!(!table.has_column_set(&["a"]));
    }

    #[test]
    fn test_select() {
        let table = sample().select(&["Date", "ISIN"]).unwrap();
        assert_eq!(table.columns(), ["Date", "ISIN"]);
        assert_eq!(table.rows()[0][0], Cell::from("2021-04-17"));
        assert!(matches!(
            sample().select(&["Missing"]),
            Err(DaybarError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_retain_complete() {
        let mut table = sample();
        assert_eq!(table.retain_complete(), 1);
        assert_eq!(table.len(), 1);
        assert_eq!(table.retain_complete(), 0);
    }

    #[test]
    fn test_extend_aligns_columns() {
        let mut table = sample();
        let mut other = Table::new(["StartPrice", "Date", "ISIN"]);
        other
            .push_row(vec![18.27.into(), "2021-04-19".into(), "DE000A0D6554".into()])
            .unwrap();

        table.extend(other).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[2][0], Cell::from("DE000A0D6554"));
        assert_eq!(table.rows()[2][2], Cell::Float(18.27));
    }

    #[test]
    fn test_extend_into_empty_adopts_columns() {
        let mut table = Table::default();
        table.extend(sample()).unwrap();
        assert_eq!(table, sample());
    }

    #[test]
    fn test_extend_mismatch() {
        let mut table = sample();
        let other = Table::new(["wrong_column"]);
        assert!(matches!(
            table.extend(other),
            Err(DaybarError::ColumnMismatch { .. })
        ));
    }

    #[test]
    fn test_cell_conversions() {
        assert_eq!(Cell::from(" 20.19 ").to_f64(), Some(20.19));
        assert_eq!(Cell::Int(877).to_f64(), Some(877.0));
        assert_eq!(Cell::from("877").to_u64(), Some(877));
        assert_eq!(Cell::from("877.0").to_u64(), Some(877));
        assert_eq!(Cell::Float(877.5).to_u64(), None);
        assert_eq!(Cell::Int(-1).to_u64(), None);
        assert_eq!(Cell::from(None::<f64>), Cell::Null);
        assert_eq!(Cell::Null.to_string(), "");
        assert_eq!(Cell::Float(1.83).to_string(), "1.83");
    }
}
