#![cfg(feature = "excel")]

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, ExcelDateTime, Range, Reader};

use crate::error::{SweepError, SweepResult};
use crate::types::Table;

use super::infer::{is_missing_token, normalize_headers, ColumnBuilder, RawCell};

/// Parse an `.xlsx` workbook held in memory into a [`Table`].
///
/// Behavior:
/// - Uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row
/// - A column is numeric when every non-empty cell is a number; other cells are kept as text
/// - Empty cells, error cells and NA-token strings are missing
/// - Date cells become ISO text (`2024-01-15`, `2024-01-15 08:30:00`), durations `H:MM:SS`
pub fn parse_xlsx_bytes(bytes: &[u8]) -> SweepResult<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SweepError::malformed("workbook has no sheets"))?;
    let range = workbook.worksheet_range(&first)?;

    parse_sheet_range(&first, &range)
}

fn parse_sheet_range(sheet: &str, range: &Range<Data>) -> SweepResult<Table> {
    let header_row_idx = range
        .rows()
        .position(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .ok_or_else(|| {
            SweepError::malformed(format!(
                "sheet '{sheet}' has no non-empty rows (no header row found)"
            ))
        })?;

    let mut rows = range.rows().skip(header_row_idx);
    let header_cells: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_to_header_string).collect())
        .unwrap_or_default();

    let names = normalize_headers(header_cells);
    let mut builders: Vec<ColumnBuilder> = names.into_iter().map(ColumnBuilder::new).collect();

    for row in rows {
        for (idx, builder) in builders.iter_mut().enumerate() {
            let cell = row.get(idx).unwrap_or(&Data::Empty);
            builder.push(convert_cell(cell));
        }
    }

    Table::new(builders.into_iter().map(ColumnBuilder::finish).collect())
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Empty => "".to_string(),
        Data::DateTime(dt) => datetime_text(dt),
        other => other.to_string(),
    }
}

fn convert_cell(c: &Data) -> RawCell {
    match c {
        Data::Empty | Data::Error(_) => RawCell::Missing,
        Data::Int(i) => RawCell::Number {
            value: *i as f64,
            raw: i.to_string(),
        },
        Data::Float(f) if f.is_nan() => RawCell::Missing,
        Data::Float(f) => RawCell::Number {
            value: *f,
            raw: f.to_string(),
        },
        Data::String(s) if is_missing_token(s) => RawCell::Missing,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Bool(b) => RawCell::Text(b.to_string()),
        Data::DateTime(dt) => RawCell::Text(datetime_text(dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
    }
}

fn datetime_text(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        if let Some(d) = dt.as_duration() {
            let secs = d.num_seconds();
            let sign = if secs < 0 { "-" } else { "" };
            let secs = secs.abs();
            return format!("{sign}{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60);
        }
    } else if let Some(dt) = dt.as_datetime() {
        let text = dt.format("%Y-%m-%d %H:%M:%S").to_string();
        return match text.strip_suffix(" 00:00:00") {
            Some(date) => date.to_string(),
            None => text,
        };
    }
    // Out of chrono's range; keep the serial value.
    dt.to_string()
}
