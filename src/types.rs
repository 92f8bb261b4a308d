//! Core data model types.
//!
//! Tabular uploads are parsed into an in-memory [`Table`]: an ordered list of named [`Column`]s,
//! each holding either numeric or text cells. The column type is inferred once at parse time and
//! decides which cleaning operations apply to it.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::{SweepError, SweepResult};

/// Logical data type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// 64-bit floating point numbers.
    Numeric,
    /// UTF-8 strings.
    Text,
}

/// A single cell value, as seen when reading a [`Table`] row by row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// Numeric cell.
    Number(f64),
    /// Text cell.
    Text(String),
}

/// Formats missing cells as an empty string and numbers in their shortest round-trip form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Number(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Typed cell storage for one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Numeric cells; `None` marks a missing value.
    Numeric(Vec<Option<f64>>),
    /// Text cells; `None` marks a missing value.
    Text(Vec<Option<String>>),
}

impl ColumnData {
    /// Number of cells.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    /// Returns `true` if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Logical type of the cells.
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnData::Numeric(_) => DataType::Numeric,
            ColumnData::Text(_) => DataType::Text,
        }
    }

    /// Returns the cell at `idx` as a [`Value`], if in range.
    pub fn get(&self, idx: usize) -> Option<Value> {
        match self {
            ColumnData::Numeric(v) => v.get(idx).map(|c| c.map_or(Value::Null, Value::Number)),
            ColumnData::Text(v) => v
                .get(idx)
                .map(|c| c.clone().map_or(Value::Null, Value::Text)),
        }
    }

    /// Number of missing cells.
    pub fn null_count(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Text(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    fn take(&self, indices: &[usize]) -> Self {
        match self {
            ColumnData::Numeric(v) => ColumnData::Numeric(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Text(v) => {
                ColumnData::Text(indices.iter().map(|&i| v[i].clone()).collect())
            }
        }
    }
}

/// A named, typed column of a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name (unique within its table).
    pub name: String,
    /// Cell storage.
    pub data: ColumnData,
}

impl Column {
    /// Create a numeric column.
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    /// Create a text column.
    pub fn text<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values.into_iter().map(|v| v.map(Into::into)).collect()),
        }
    }

    /// Logical type of the column.
    pub fn data_type(&self) -> DataType {
        self.data.data_type()
    }

    /// Returns `true` if the column holds numbers.
    pub fn is_numeric(&self) -> bool {
        self.data_type() == DataType::Numeric
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// In-memory tabular data with a defined column order and row order.
///
/// Invariants (checked by [`Table::new`]): every column has the same number of cells, and column
/// names are unique. A table may have zero columns and still report a row count (for example,
/// after selecting no columns).
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Create a table from columns, validating equal lengths and unique names.
    pub fn new(columns: Vec<Column>) -> SweepResult<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        Self::with_row_count(columns, row_count)
    }

    /// Create a table with an explicit row count (needed for zero-column tables).
    pub fn with_row_count(columns: Vec<Column>, row_count: usize) -> SweepResult<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for col in &columns {
            if col.len() != row_count {
                return Err(SweepError::malformed(format!(
                    "column '{}' has {} rows, expected {}",
                    col.name,
                    col.len(),
                    row_count
                )));
            }
            if !seen.insert(col.name.as_str()) {
                return Err(SweepError::malformed(format!(
                    "duplicate column name '{}'",
                    col.name
                )));
            }
        }
        Ok(Self { columns, row_count })
    }

    /// Columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Consume the table, returning its columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Iterate column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Returns a column by name, if present.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns row `idx` as values in column order.
    pub fn row(&self, idx: usize) -> Option<Vec<Value>> {
        if idx >= self.row_count {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| c.data.get(idx).unwrap_or(Value::Null))
                .collect(),
        )
    }

    /// Iterate rows in order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.row_count).filter_map(|i| self.row(i))
    }

    /// Returns a table with the first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        let indices: Vec<usize> = (0..self.row_count.min(n)).collect();
        self.take_rows(&indices)
    }

    /// Create a new table by applying `mapper` to the cells of every column.
    ///
    /// Column names and order are preserved.
    ///
    /// # Panics
    ///
    /// Panics if `mapper` returns a column with a different length than the row count.
    pub fn map_columns<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(&Column) -> ColumnData,
    {
        let columns = self
            .columns
            .iter()
            .map(|col| {
                let data = mapper(col);
                assert!(
                    data.len() == self.row_count,
                    "mapped column length {} does not match row count {}",
                    data.len(),
                    self.row_count
                );
                Column {
                    name: col.name.clone(),
                    data,
                }
            })
            .collect();

        Self {
            columns,
            row_count: self.row_count,
        }
    }

    /// Copy the given columns (in the given order) into a new table with the same rows.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range.
    pub(crate) fn take_columns(&self, indices: &[usize]) -> Self {
        Self {
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
            row_count: self.row_count,
        }
    }

    /// Gather the given rows (in the given order) into a new table.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range.
    pub(crate) fn take_rows(&self, indices: &[usize]) -> Self {
        Self {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    data: c.data.take(indices),
                })
                .collect(),
            row_count: indices.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, DataType, Table, Value};

    fn sample_table() -> Table {
        Table::new(vec![
            Column::numeric("id", vec![Some(1.0), Some(2.0), None]),
            Column::text("name", vec![Some("a"), None, Some("c")]),
        ])
        .unwrap()
    }

    #[test]
    fn rows_are_read_in_column_order() {
        let t = sample_table();
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.column_count(), 2);
        assert_eq!(
            t.row(0),
            Some(vec![Value::Number(1.0), Value::Text("a".to_string())])
        );
        assert_eq!(t.row(2), Some(vec![Value::Null, Value::Text("c".to_string())]));
        assert_eq!(t.row(3), None);
        assert_eq!(t.columns()[1].data_type(), DataType::Text);
    }

    #[test]
    fn new_rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::numeric("a", vec![Some(1.0)]),
            Column::numeric("b", vec![Some(1.0), Some(2.0)]),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("column 'b' has 2 rows, expected 1"));
    }

    #[test]
    fn new_rejects_duplicate_names() {
        let err = Table::new(vec![
            Column::numeric("a", vec![Some(1.0)]),
            Column::text("a", vec![Some("x")]),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate column name 'a'"));
    }

    #[test]
    fn head_bounds_rows() {
        let t = sample_table();
        assert_eq!(t.head(2).row_count(), 2);
        assert_eq!(t.head(10).row_count(), 3);
        assert_eq!(t.head(0).row_count(), 0);
    }

    #[test]
    #[should_panic(expected = "mapped column length")]
    fn map_columns_panics_on_wrong_length() {
        let t = sample_table();
        let _ = t.map_columns(|_| super::ColumnData::Numeric(vec![None]));
    }

    #[test]
    fn value_display_formats_numbers_compactly() {
        assert_eq!(Value::Number(4.0).to_string(), "4");
        assert_eq!(Value::Number(98.5).to_string(), "98.5");
        assert_eq!(Value::Null.to_string(), "");
    }
}
