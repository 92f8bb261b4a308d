//! CSV serialization.

use crate::error::SweepResult;
use crate::types::Table;

use super::{export_error, ExportFormat};

/// Serialize `table` as comma-delimited text with a header row and no index column.
///
/// Missing cells are written as empty fields. A zero-column table serializes to an empty buffer.
pub fn write_csv_bytes(table: &Table) -> SweepResult<Vec<u8>> {
    if table.column_count() == 0 {
        return Ok(Vec::new());
    }

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(table.column_names())
        .map_err(|e| export_error(ExportFormat::Csv, e))?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(|v| v.to_string()))
            .map_err(|e| export_error(ExportFormat::Csv, e))?;
    }
    wtr.into_inner()
        .map_err(|e| export_error(ExportFormat::Csv, e.error()))
}

#[cfg(test)]
mod tests {
    use super::write_csv_bytes;
    use crate::types::{Column, Table};

    #[test]
    fn writes_header_and_rows_without_index() {
        let t = Table::new(vec![
            Column::numeric("a", vec![Some(1.0), Some(2.5)]),
            Column::text("b", vec![None, Some("x, y")]),
        ])
        .unwrap();
        let out = String::from_utf8(write_csv_bytes(&t).unwrap()).unwrap();
        assert_eq!(out, "a,b\n1,\n2.5,\"x, y\"\n");
    }

    #[test]
    fn zero_columns_is_empty() {
        let t = Table::with_row_count(vec![], 3).unwrap();
        assert!(write_csv_bytes(&t).unwrap().is_empty());
    }
}
