//! Unified parsing entrypoint.
//!
//! Most callers should use [`parse_upload`], which classifies an [`UploadedFile`] by extension and
//! parses it into an in-memory [`crate::types::Table`].
//!
//! - Only [`FileKind::TabularCsv`] and [`FileKind::TabularXlsx`] parse into tables.
//! - If an observer is configured in [`SweepOptions`], success/failure/alerts are reported to it.

use crate::config::SweepOptions;
use crate::error::{SweepError, SweepResult};
use crate::types::Table;

use super::classify::FileKind;
use super::observability::{SweepContext, SweepSeverity, SweepStage, TableStats};
use super::upload::UploadedFile;

/// Parse raw bytes of the given tabular kind into a [`Table`].
///
/// # Examples
///
/// ```rust
/// use data_sweeper::ingestion::{parse_table, FileKind};
/// use data_sweeper::types::Value;
///
/// # fn main() -> Result<(), data_sweeper::SweepError> {
/// let table = parse_table(b"a,b\n1,x\n", FileKind::TabularCsv)?;
/// assert_eq!(table.row(0), Some(vec![Value::Number(1.0), Value::Text("x".to_string())]));
/// # Ok(())
/// # }
/// ```
pub fn parse_table(bytes: &[u8], kind: FileKind) -> SweepResult<Table> {
    match kind {
        FileKind::TabularCsv => super::csv::parse_csv_bytes(bytes),
        FileKind::TabularXlsx => parse_xlsx_dispatch(bytes),
        other => Err(SweepError::malformed(format!(
            "{other} files do not contain tables"
        ))),
    }
}

/// Parse an upload, reporting the outcome to the configured observer.
///
/// When an observer is configured, this function reports:
///
/// - `on_parsed` on success, with row/column counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
pub fn parse_upload(file: &UploadedFile, options: &SweepOptions) -> SweepResult<Table> {
    let ctx = SweepContext {
        file_name: file.name().to_string(),
        kind: file.kind(),
        stage: SweepStage::Parse,
    };

    let result = parse_table(file.bytes(), ctx.kind);
    match &result {
        Ok(table) => {
            if let Some(obs) = options.observer.as_ref() {
                obs.on_parsed(
                    &ctx,
                    TableStats {
                        rows: table.row_count(),
                        columns: table.column_count(),
                    },
                );
            }
        }
        Err(e) => report_failure(options, &ctx, e),
    }
    result
}

/// Report a failure to the configured observer, alerting at or above the threshold.
pub(crate) fn report_failure(options: &SweepOptions, ctx: &SweepContext, error: &SweepError) {
    if let Some(obs) = options.observer.as_ref() {
        let sev = SweepSeverity::for_error(error);
        obs.on_failure(ctx, sev, error);
        if sev >= options.alert_at_or_above {
            obs.on_alert(ctx, sev, error);
        }
    }
}

fn parse_xlsx_dispatch(bytes: &[u8]) -> SweepResult<Table> {
    // Avoid unused warnings when the feature is off.
    let _ = bytes;

    #[cfg(feature = "excel")]
    {
        super::excel::parse_xlsx_bytes(bytes)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(SweepError::FeatureDisabled { feature: "excel" })
    }
}
