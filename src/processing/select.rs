//! Column selection.

use serde::Serialize;

use crate::error::{SweepError, SweepResult};
use crate::types::Table;

/// Ordered set of column names to keep.
///
/// Repeated names collapse to their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnSelection {
    names: Vec<String>,
}

impl ColumnSelection {
    /// Create a selection from names, in order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !out.contains(&name) {
                out.push(name);
            }
        }
        Self { names: out }
    }

    /// Select every column of `table`, in table order.
    pub fn all(table: &Table) -> Self {
        Self::new(table.column_names())
    }

    /// Selected names, in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of selected names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check that every selected name exists in `table`.
    pub fn validate(&self, table: &Table) -> SweepResult<()> {
        match self.names.iter().find(|n| table.index_of(n).is_none()) {
            Some(missing) => Err(SweepError::Selection {
                column: missing.clone(),
                available: table.column_names().map(str::to_string).collect(),
            }),
            None => Ok(()),
        }
    }

    /// Drop names that are no longer columns of `table`. Returns `true` if anything was dropped.
    pub fn retain_existing(&mut self, table: &Table) -> bool {
        let before = self.names.len();
        self.names.retain(|n| table.index_of(n).is_some());
        self.names.len() != before
    }
}

/// Returns a new [`Table`] with only the selected columns, in selection order.
///
/// An empty selection yields a zero-column table with the same row count. A name that is not a
/// column of `table` is a [`SweepError::Selection`].
pub fn select_columns(table: &Table, selection: &ColumnSelection) -> SweepResult<Table> {
    selection.validate(table)?;
    let columns = selection
        .names()
        .iter()
        .filter_map(|name| table.column(name).cloned())
        .collect();
    Table::with_row_count(columns, table.row_count())
}

#[cfg(test)]
mod tests {
    use super::{select_columns, ColumnSelection};
    use crate::error::SweepError;
    use crate::types::{Column, Table};

    fn sample_table() -> Table {
        Table::new(vec![
            Column::numeric("a", vec![Some(1.0), Some(2.0)]),
            Column::text("b", vec![Some("x"), None]),
            Column::numeric("c", vec![None, Some(3.0)]),
        ])
        .unwrap()
    }

    #[test]
    fn selects_in_selection_order() {
        let t = sample_table();
        let out = select_columns(&t, &ColumnSelection::new(["c", "a"])).unwrap();
        assert_eq!(out.column_names().collect::<Vec<_>>(), vec!["c", "a"]);
        assert_eq!(out.row_count(), 2);
    }

    #[test]
    fn full_selection_is_identity() {
        let t = sample_table();
        assert_eq!(select_columns(&t, &ColumnSelection::all(&t)).unwrap(), t);
    }

    #[test]
    fn empty_selection_keeps_row_count() {
        let t = sample_table();
        let out = select_columns(&t, &ColumnSelection::default()).unwrap();
        assert_eq!(out.column_count(), 0);
        assert_eq!(out.row_count(), 2);
    }

    #[test]
    fn unknown_column_is_rejected() {
        let t = sample_table();
        let err = select_columns(&t, &ColumnSelection::new(["a", "zzz"])).unwrap_err();
        match err {
            SweepError::Selection { column, available } => {
                assert_eq!(column, "zzz");
                assert_eq!(available, vec!["a", "b", "c"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn repeated_names_collapse() {
        let sel = ColumnSelection::new(["a", "b", "a"]);
        assert_eq!(sel.names(), ["a", "b"]);
    }

    #[test]
    fn retain_existing_drops_vanished_names() {
        let t = sample_table();
        let mut sel = ColumnSelection::new(["a", "gone"]);
        assert!(sel.retain_existing(&t));
        assert_eq!(sel.names(), ["a"]);
        assert!(!sel.retain_existing(&t));
    }
}
