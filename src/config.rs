//! Pipeline configuration.

use std::fmt;
use std::sync::Arc;

use crate::ingestion::{SweepObserver, SweepSeverity};

/// Default number of rows shown in a tabular preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;
/// Default number of characters shown for text-like files.
pub const DEFAULT_TEXT_PREVIEW_CHARS: usize = 1000;
/// Default number of numeric columns charted.
pub const DEFAULT_CHART_SERIES: usize = 2;

/// Options controlling the pipeline.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct SweepOptions {
    /// Rows shown in tabular previews.
    pub preview_rows: usize,
    /// Characters shown in text previews.
    pub text_preview_chars: usize,
    /// Maximum numeric columns in the visualization projection.
    pub chart_series: usize,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn SweepObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: SweepSeverity,
}

impl fmt::Debug for SweepOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SweepOptions")
            .field("preview_rows", &self.preview_rows)
            .field("text_preview_chars", &self.text_preview_chars)
            .field("chart_series", &self.chart_series)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            text_preview_chars: DEFAULT_TEXT_PREVIEW_CHARS,
            chart_series: DEFAULT_CHART_SERIES,
            observer: None,
            alert_at_or_above: SweepSeverity::Critical,
        }
    }
}
