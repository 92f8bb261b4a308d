//! Export of tables to downloadable CSV / XLSX buffers.
//!
//! [`export_table`] serializes a [`crate::types::Table`] into memory and names the result after the
//! uploaded file:
//!
//! ```rust
//! use data_sweeper::export::{export_table, ExportFormat, ExportRequest};
//! use data_sweeper::types::{Column, Table};
//!
//! # fn main() -> Result<(), data_sweeper::SweepError> {
//! let table = Table::new(vec![
//!     Column::numeric("a", vec![Some(1.0), None]),
//!     Column::text("b", vec![Some("x"), Some("y")]),
//! ])?;
//! let artifact = export_table(&table, &ExportRequest::new(ExportFormat::Csv), "report.XLSX")?;
//! assert_eq!(artifact.file_name, "report.csv");
//! assert_eq!(artifact.mime_type, "text/csv");
//! assert_eq!(artifact.bytes, b"a,b\n1,x\n,y\n");
//! # Ok(())
//! # }
//! ```

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SweepError, SweepResult};
use crate::types::Table;

/// MIME type of CSV exports.
pub const CSV_MIME: &str = "text/csv";
/// MIME type of XLSX exports.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Target format of an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// Excel workbook.
    Xlsx,
}

impl ExportFormat {
    /// Canonical extension, with the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => ".csv",
            ExportFormat::Xlsx => ".xlsx",
        }
    }

    /// MIME type of the serialized buffer.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_MIME,
            ExportFormat::Xlsx => XLSX_MIME,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Xlsx => "Excel",
        })
    }
}

/// A request to export the current table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportRequest {
    /// Target format.
    pub format: ExportFormat,
}

impl ExportRequest {
    /// Create a request for `format`.
    pub fn new(format: ExportFormat) -> Self {
        Self { format }
    }
}

/// A serialized table ready to be offered as a download.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ExportArtifact {
    /// Serialized content.
    #[serde(rename = "size_bytes", serialize_with = "serialize_len")]
    pub bytes: Vec<u8>,
    /// Suggested file name.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime_type: &'static str,
}

impl ExportArtifact {
    /// Size of the serialized content.
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

fn serialize_len<S: serde::Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(bytes.len() as u64)
}

impl fmt::Debug for ExportArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportArtifact")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

/// Serialize `table` as requested and name the buffer after `original_name`.
///
/// Fails with [`SweepError::Export`] when the table holds values the format cannot represent.
pub fn export_table(
    table: &Table,
    request: &ExportRequest,
    original_name: &str,
) -> SweepResult<ExportArtifact> {
    let bytes = match request.format {
        ExportFormat::Csv => csv::write_csv_bytes(table)?,
        ExportFormat::Xlsx => write_xlsx_dispatch(table)?,
    };
    tracing::debug!(
        format = %request.format,
        rows = table.row_count(),
        columns = table.column_count(),
        bytes = bytes.len(),
        "serialized table"
    );

    Ok(ExportArtifact {
        bytes,
        file_name: derived_file_name(original_name, request.format),
        mime_type: request.format.mime_type(),
    })
}

/// Replace the last extension of `original_name` (any case) with the format's extension.
///
/// A name without extension gets one appended.
pub fn derived_file_name(original_name: &str, format: ExportFormat) -> String {
    let stem = match original_name.rfind('.') {
        Some(idx) if idx > 0 => &original_name[..idx],
        _ => original_name,
    };
    format!("{stem}{}", format.extension())
}

pub(crate) fn export_error(format: ExportFormat, message: impl fmt::Display) -> SweepError {
    SweepError::Export {
        format: format.to_string(),
        message: message.to_string(),
    }
}

fn write_xlsx_dispatch(table: &Table) -> SweepResult<Vec<u8>> {
    // Avoid unused warnings when the feature is off.
    let _ = table;

    #[cfg(feature = "excel")]
    {
        excel::write_xlsx_bytes(table)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(export_error(
            ExportFormat::Xlsx,
            SweepError::FeatureDisabled { feature: "excel" },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{derived_file_name, ExportFormat, CSV_MIME, XLSX_MIME};

    #[test]
    fn derived_names_swap_the_last_extension() {
        assert_eq!(derived_file_name("report.csv", ExportFormat::Xlsx), "report.xlsx");
        assert_eq!(derived_file_name("report.xlsx", ExportFormat::Csv), "report.csv");
        assert_eq!(derived_file_name("DATA.CSV", ExportFormat::Xlsx), "DATA.xlsx");
        assert_eq!(derived_file_name("q1.csv.csv", ExportFormat::Csv), "q1.csv.csv");
        assert_eq!(derived_file_name("noext", ExportFormat::Csv), "noext.csv");
        assert_eq!(derived_file_name(".hidden", ExportFormat::Csv), ".hidden.csv");
    }

    #[test]
    fn mime_types_match_formats() {
        assert_eq!(ExportFormat::Csv.mime_type(), CSV_MIME);
        assert_eq!(ExportFormat::Xlsx.mime_type(), XLSX_MIME);
        assert_eq!(ExportFormat::Xlsx.to_string(), "Excel");
    }
}
