//! Numeric projection used for charts.

use crate::types::Table;

/// Returns the first `max_series` numeric columns of `table`, in column order.
///
/// A table without numeric columns yields an empty (zero-column) projection; the caller decides
/// how to tell the user. The projection is a read-only copy for display.
pub fn numeric_projection(table: &Table, max_series: usize) -> Table {
    let indices: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_numeric())
        .map(|(idx, _)| idx)
        .take(max_series)
        .collect();
    table.take_columns(&indices)
}

#[cfg(test)]
mod tests {
    use super::numeric_projection;
    use crate::types::{Column, Table};

    #[test]
    fn takes_first_two_numeric_columns() {
        let t = Table::new(vec![
            Column::text("name", vec![Some("a")]),
            Column::numeric("x", vec![Some(1.0)]),
            Column::numeric("y", vec![Some(2.0)]),
            Column::numeric("z", vec![Some(3.0)]),
        ])
        .unwrap();
        let p = numeric_projection(&t, 2);
        assert_eq!(p.column_names().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(p.row_count(), 1);
    }

    #[test]
    fn no_numeric_columns_gives_empty_projection() {
        let t = Table::new(vec![Column::text("name", vec![Some("a"), Some("b")])]).unwrap();
        let p = numeric_projection(&t, 2);
        assert_eq!(p.column_count(), 0);
    }
}
