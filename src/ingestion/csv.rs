//! CSV parsing.

use crate::error::{SweepError, SweepResult};
use crate::types::Table;

use super::infer::{normalize_headers, ColumnBuilder, RawCell};

/// Parse CSV bytes into a [`Table`].
///
/// Rules:
///
/// - The first record is the header; an input without one is malformed.
/// - Missing cells are blanks or NA tokens (see [`super::infer::NA_TOKENS`]).
/// - A column is numeric when all its non-missing values parse as numbers.
/// - Short rows are padded with missing cells; a row longer than the header is an error.
pub fn parse_csv_bytes(bytes: &[u8]) -> SweepResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    parse_csv_from_reader(&mut rdr)
}

/// Parse CSV data from an existing CSV reader. The reader must be configured with headers.
pub fn parse_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> SweepResult<Table> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(SweepError::malformed("no columns to parse (missing header row)"));
    }
    let names = normalize_headers(headers.iter());

    let mut builders: Vec<ColumnBuilder> = names.into_iter().map(ColumnBuilder::new).collect();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        if record.len() > builders.len() {
            return Err(SweepError::ParseError {
                row: user_row,
                column: format!("#{}", builders.len() + 1),
                raw: record.get(builders.len()).unwrap_or_default().to_string(),
                message: format!("expected {} fields, saw {}", builders.len(), record.len()),
            });
        }

        for (idx, builder) in builders.iter_mut().enumerate() {
            let cell = match record.get(idx) {
                Some(raw) => RawCell::from_text(raw),
                None => RawCell::Missing,
            };
            builder.push(cell);
        }
    }

    Table::new(builders.into_iter().map(ColumnBuilder::finish).collect())
}
