//! Column type inference shared by the CSV and XLSX parsers.

use crate::types::{Column, ColumnData};

/// Cell contents treated as missing, in addition to the empty string.
pub const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns `true` if `raw` (trimmed) is empty or an NA token.
pub fn is_missing_token(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || NA_TOKENS.contains(&trimmed)
}

/// Parses a trimmed number. NaN spellings are not numbers here; they are missing.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// A cell as read from the source, before the column type is decided.
#[derive(Debug, Clone)]
pub(crate) enum RawCell {
    Missing,
    Number { value: f64, raw: String },
    Text(String),
}

impl RawCell {
    /// Classify a textual cell.
    pub(crate) fn from_text(raw: &str) -> Self {
        if is_missing_token(raw) {
            return RawCell::Missing;
        }
        match parse_number(raw) {
            Some(value) => RawCell::Number {
                value,
                raw: raw.to_owned(),
            },
            None => RawCell::Text(raw.to_owned()),
        }
    }
}

/// Accumulates raw cells for one column and decides its type at the end.
#[derive(Debug)]
pub(crate) struct ColumnBuilder {
    name: String,
    cells: Vec<RawCell>,
}

impl ColumnBuilder {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            cells: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, cell: RawCell) {
        self.cells.push(cell);
    }

    /// Numeric if every non-missing cell is a number (an all-missing column is numeric),
    /// otherwise text with the original cell contents.
    pub(crate) fn finish(self) -> Column {
        let numeric = self
            .cells
            .iter()
            .all(|c| matches!(c, RawCell::Missing | RawCell::Number { .. }));

        let data = if numeric {
            ColumnData::Numeric(
                self.cells
                    .into_iter()
                    .map(|c| match c {
                        RawCell::Number { value, .. } => Some(value),
                        _ => None,
                    })
                    .collect(),
            )
        } else {
            ColumnData::Text(
                self.cells
                    .into_iter()
                    .map(|c| match c {
                        RawCell::Missing => None,
                        RawCell::Number { raw, .. } => Some(raw),
                        RawCell::Text(s) => Some(s),
                    })
                    .collect(),
            )
        };

        Column {
            name: self.name,
            data,
        }
    }
}

/// Make header names usable as unique column names.
///
/// Blank names become `Unnamed: {index}`; repeats get `.1`, `.2`, ... appended.
pub(crate) fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for (idx, name) in raw.into_iter().enumerate() {
        let name = name.as_ref().trim_start_matches('\u{feff}');
        let base = if name.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name.to_owned()
        };

        let mut candidate = base.clone();
        let mut suffix = 1usize;
        while out.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        out.push(candidate);
    }
    out
}
