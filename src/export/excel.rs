#![cfg(feature = "excel")]

use rust_xlsxwriter::{Workbook, Worksheet};

use crate::error::{SweepError, SweepResult};
use crate::types::{Table, Value};

use super::{export_error, ExportFormat};

/// Serialize `table` as a single-worksheet `.xlsx` workbook with a header row and no index column.
///
/// Behavior:
/// - Numbers are written as numeric cells, text as string cells, missing cells are left blank
/// - Infinite numbers, over-long strings, or tables larger than a worksheet are export errors
pub fn write_xlsx_bytes(table: &Table) -> SweepResult<Vec<u8>> {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    write_sheet(ws, table)?;
    wb.save_to_buffer().map_err(|e| export_error(ExportFormat::Xlsx, e))
}

fn write_sheet(ws: &mut Worksheet, table: &Table) -> SweepResult<()> {
    for (col_idx, name) in table.column_names().enumerate() {
        let col = col_num(col_idx)?;
        ws.write_string(0, col, name)
            .map_err(|e| export_error(ExportFormat::Xlsx, e))?;
    }

    for (row_idx0, row) in table.rows().enumerate() {
        // Header occupies row 0.
        let r = row_num(row_idx0 + 1)?;
        for (col_idx, value) in row.iter().enumerate() {
            let c = col_num(col_idx)?;
            write_cell(ws, r, c, value)?;
        }
    }
    Ok(())
}

fn write_cell(ws: &mut Worksheet, row: u32, col: u16, value: &Value) -> SweepResult<()> {
    let result = match value {
        Value::Null => return Ok(()),
        Value::Number(v) if !v.is_finite() => {
            return Err(export_error(
                ExportFormat::Xlsx,
                format!("cell ({row}, {col}) holds {v}, which a worksheet cannot store"),
            ));
        }
        Value::Number(v) => ws.write_number(row, col, *v),
        Value::Text(s) => ws.write_string(row, col, s),
    };
    result
        .map(|_| ())
        .map_err(|e| export_error(ExportFormat::Xlsx, e))
}

fn col_num(idx: usize) -> SweepResult<u16> {
    u16::try_from(idx).map_err(|_| too_large("columns", idx))
}

fn row_num(idx: usize) -> SweepResult<u32> {
    u32::try_from(idx).map_err(|_| too_large("rows", idx))
}

fn too_large(what: &str, idx: usize) -> SweepError {
    export_error(
        ExportFormat::Xlsx,
        format!("too many {what} for a worksheet (index {idx})"),
    )
}
