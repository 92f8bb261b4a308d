use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type SweepResult<T> = Result<T, SweepError>;

/// Error type returned by parsing, selection and export functions.
///
/// Every variant is local to the file or the action that produced it; callers surface it and move
/// on to the next file.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An input glob pattern could not be compiled.
    #[error("invalid input pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[cfg(feature = "excel")]
    /// Spreadsheet parsing error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV parsing error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input does not have the structure of the claimed tabular format.
    #[error("malformed input: {message}")]
    Malformed { message: String },

    /// A single record could not be read.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A requested column does not exist in the current table.
    #[error("unknown column '{column}'. available={available:?}")]
    Selection { column: String, available: Vec<String> },

    /// Serializing a table to the requested format failed.
    #[error("failed to export as {format}: {message}")]
    Export { format: String, message: String },

    /// The operation needs a cargo feature that this build does not have.
    #[error("{feature} support not enabled (enable cargo feature '{feature}')")]
    FeatureDisabled { feature: &'static str },
}

/// Coarse classification of a [`SweepError`], matching where it is recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Reading input from disk failed.
    Io,
    /// Raw bytes could not be interpreted as the claimed tabular format. Scope: one file.
    Parse,
    /// A column selection named an unknown column. Scope: one action.
    Selection,
    /// Serialization to an export format failed. Scope: one export action.
    Export,
}

impl SweepError {
    /// Returns the recovery category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SweepError::Io(_) | SweepError::Pattern(_) => ErrorCategory::Io,
            SweepError::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => ErrorCategory::Io,
                _ => ErrorCategory::Parse,
            },
            #[cfg(feature = "excel")]
            SweepError::Excel(_) => ErrorCategory::Parse,
            SweepError::Malformed { .. } | SweepError::ParseError { .. } => ErrorCategory::Parse,
            SweepError::FeatureDisabled { .. } => ErrorCategory::Parse,
            SweepError::Selection { .. } => ErrorCategory::Selection,
            SweepError::Export { .. } => ErrorCategory::Export,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        SweepError::Malformed {
            message: message.into(),
        }
    }
}
