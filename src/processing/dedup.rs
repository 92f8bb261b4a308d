//! Duplicate row removal.

use std::collections::HashSet;

use crate::types::{Table, Value};

/// Hashable identity of a cell. Numbers compare by value, so `-0.0` and `0.0` are the same cell.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey {
    Null,
    Number(u64),
    Text(String),
}

impl From<Value> for CellKey {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellKey::Null,
            Value::Number(v) if v == 0.0 => CellKey::Number(0f64.to_bits()),
            Value::Number(v) => CellKey::Number(v.to_bits()),
            Value::Text(s) => CellKey::Text(s),
        }
    }
}

/// Returns a new [`Table`] without rows that repeat an earlier row across all columns.
///
/// The first occurrence of each row survives and survivors keep their relative order. The input
/// is not modified. Applying it twice gives the same result as applying it once.
pub fn remove_duplicates(table: &Table) -> Table {
    let mut seen: HashSet<Vec<CellKey>> = HashSet::with_capacity(table.row_count());
    let keep: Vec<usize> = table
        .rows()
        .enumerate()
        .filter_map(|(idx, row)| {
            let key: Vec<CellKey> = row.into_iter().map(CellKey::from).collect();
            seen.insert(key).then_some(idx)
        })
        .collect();

    tracing::debug!(
        rows = table.row_count(),
        removed = table.row_count() - keep.len(),
        "removed duplicate rows"
    );
    table.take_rows(&keep)
}

#[cfg(test)]
mod tests {
    use super::remove_duplicates;
    use crate::types::{Column, Table, Value};

    fn table_with_dupes() -> Table {
        Table::new(vec![
            Column::numeric("n", vec![Some(1.0), Some(1.0), Some(2.0), Some(1.0), None, None]),
            Column::text("s", vec![Some("x"), Some("x"), Some("y"), Some("z"), None, None]),
        ])
        .unwrap()
    }

    #[test]
    fn keeps_first_occurrence_in_order() {
        let out = remove_duplicates(&table_with_dupes());
        assert_eq!(
            out.rows().collect::<Vec<_>>(),
            vec![
                vec![Value::Number(1.0), Value::Text("x".to_string())],
                vec![Value::Number(2.0), Value::Text("y".to_string())],
                vec![Value::Number(1.0), Value::Text("z".to_string())],
                vec![Value::Null, Value::Null],
            ]
        );
    }

    #[test]
    fn is_idempotent() {
        let once = remove_duplicates(&table_with_dupes());
        let twice = remove_duplicates(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn signed_zero_is_one_value() {
        let t = Table::new(vec![Column::numeric("n", vec![Some(0.0), Some(-0.0)])]).unwrap();
        assert_eq!(remove_duplicates(&t).row_count(), 1);
    }

    #[test]
    fn input_is_left_untouched() {
        let t = table_with_dupes();
        let _ = remove_duplicates(&t);
        assert_eq!(t.row_count(), 6);
    }
}
