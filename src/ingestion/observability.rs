use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ErrorCategory, SweepError};

use super::classify::FileKind;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SweepSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (action rejected, state unchanged).
    Warning,
    /// Error-level event (a file or export failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

impl SweepSeverity {
    /// Severity for a failed operation.
    pub fn for_error(error: &SweepError) -> Self {
        match error.category() {
            ErrorCategory::Io => SweepSeverity::Critical,
            ErrorCategory::Parse | ErrorCategory::Export => SweepSeverity::Error,
            ErrorCategory::Selection => SweepSeverity::Warning,
        }
    }
}

/// Pipeline stage an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepStage {
    /// Reading raw bytes into a table.
    Parse,
    /// Column selection.
    Select,
    /// Serialization to CSV/XLSX.
    Export,
}

/// Context about the file an event refers to.
#[derive(Debug, Clone)]
pub struct SweepContext {
    /// Uploaded file name.
    pub file_name: String,
    /// Classification of the file.
    pub kind: FileKind,
    /// Stage that produced the event.
    pub stage: SweepStage,
}

/// Minimal stats reported on successful parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    /// Number of parsed rows.
    pub rows: usize,
    /// Number of parsed columns.
    pub columns: usize,
}

/// Observer interface for pipeline outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait SweepObserver: Send + Sync {
    /// Called when a tabular file was parsed.
    fn on_parsed(&self, _ctx: &SweepContext, _stats: TableStats) {}

    /// Called when an export produced a download.
    fn on_exported(&self, _ctx: &SweepContext, _file_name: &str, _bytes: usize) {}

    /// Called when an operation fails.
    fn on_failure(&self, _ctx: &SweepContext, _severity: SweepSeverity, _error: &SweepError) {}

    /// Called when a failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &SweepContext, severity: SweepSeverity, error: &SweepError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn SweepObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn SweepObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl SweepObserver for CompositeObserver {
    fn on_parsed(&self, ctx: &SweepContext, stats: TableStats) {
        for o in &self.observers {
            o.on_parsed(ctx, stats);
        }
    }

    fn on_exported(&self, ctx: &SweepContext, file_name: &str, bytes: usize) {
        for o in &self.observers {
            o.on_exported(ctx, file_name, bytes);
        }
    }

    fn on_failure(&self, ctx: &SweepContext, severity: SweepSeverity, error: &SweepError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &SweepContext, severity: SweepSeverity, error: &SweepError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Emits pipeline events as `tracing` events.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl SweepObserver for TracingObserver {
    fn on_parsed(&self, ctx: &SweepContext, stats: TableStats) {
        tracing::info!(
            file = %ctx.file_name,
            kind = %ctx.kind,
            rows = stats.rows,
            columns = stats.columns,
            "parsed table"
        );
    }

    fn on_exported(&self, ctx: &SweepContext, file_name: &str, bytes: usize) {
        tracing::info!(file = %ctx.file_name, output = file_name, bytes, "exported table");
    }

    fn on_failure(&self, ctx: &SweepContext, severity: SweepSeverity, error: &SweepError) {
        match severity {
            SweepSeverity::Info => {
                tracing::info!(
                    file = %ctx.file_name, stage = ?ctx.stage, %error, "operation failed"
                )
            }
            SweepSeverity::Warning => {
                tracing::warn!(
                    file = %ctx.file_name, stage = ?ctx.stage, %error, "operation rejected"
                )
            }
            SweepSeverity::Error | SweepSeverity::Critical => {
                tracing::error!(
                    file = %ctx.file_name,
                    stage = ?ctx.stage,
                    ?severity,
                    %error,
                    "operation failed"
                )
            }
        }
    }

    fn on_alert(&self, ctx: &SweepContext, severity: SweepSeverity, error: &SweepError) {
        tracing::error!(
            alert = true,
            file = %ctx.file_name,
            stage = ?ctx.stage,
            ?severity,
            %error,
            "operation failed"
        );
    }
}

/// Appends pipeline events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl SweepObserver for FileObserver {
    fn on_parsed(&self, ctx: &SweepContext, stats: TableStats) {
        self.append_line(&format!(
            "{} parsed kind={} file={} rows={} columns={}",
            unix_ts(),
            ctx.kind,
            ctx.file_name,
            stats.rows,
            stats.columns
        ));
    }

    fn on_exported(&self, ctx: &SweepContext, file_name: &str, bytes: usize) {
        self.append_line(&format!(
            "{} exported file={} output={} bytes={}",
            unix_ts(),
            ctx.file_name,
            file_name,
            bytes
        ));
    }

    fn on_failure(&self, ctx: &SweepContext, severity: SweepSeverity, error: &SweepError) {
        self.append_line(&format!(
            "{} fail severity={:?} stage={:?} file={} err={}",
            unix_ts(),
            severity,
            ctx.stage,
            ctx.file_name,
            error
        ));
    }

    fn on_alert(&self, ctx: &SweepContext, severity: SweepSeverity, error: &SweepError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} stage={:?} file={} err={}",
            unix_ts(),
            severity,
            ctx.stage,
            ctx.file_name,
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
