//! Per-file pipeline state.

use crate::config::SweepOptions;
use crate::error::SweepResult;
use crate::export::ExportFormat;
use crate::ingestion::{parse_upload, FileKind, UploadedFile};
use crate::processing::{select_columns, ColumnSelection};
use crate::types::Table;

/// The working table of one file, with a version bumped on every replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedTable {
    version: u64,
    table: Table,
}

impl VersionedTable {
    /// Wrap a freshly parsed table as version 0.
    pub fn new(table: Table) -> Self {
        Self { version: 0, table }
    }

    /// Current version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Current table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Replace the table with a new version.
    pub fn replace(&mut self, table: Table) {
        self.table = table;
        self.version += 1;
    }
}

/// Controls and data of a parsed tabular file.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularState {
    /// Full working table (all columns).
    pub working: VersionedTable,
    /// Columns kept for charts and exports.
    pub selection: ColumnSelection,
    /// Whether cleaning actions are enabled.
    pub cleaning_enabled: bool,
    /// Whether the chart is shown.
    pub show_chart: bool,
    /// Target of the next conversion.
    pub export_format: ExportFormat,
}

impl TabularState {
    /// Initial state: every column selected, all toggles off, CSV as target.
    pub fn new(table: Table) -> Self {
        Self {
            selection: ColumnSelection::all(&table),
            working: VersionedTable::new(table),
            cleaning_enabled: false,
            show_chart: false,
            export_format: ExportFormat::default(),
        }
    }

    /// The working table restricted to the current selection.
    pub fn view(&self) -> SweepResult<Table> {
        select_columns(self.working.table(), &self.selection)
    }
}

/// What the pipeline holds for an uploaded file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileContent {
    /// Parsed CSV/XLSX.
    Tabular(TabularState),
    /// Tabular file whose bytes could not be parsed; holds the error message.
    ParseFailed(String),
    /// Image shown as-is.
    Image,
    /// Text shown as an excerpt.
    Text,
    /// Accepted but not previewable.
    Unsupported,
}

/// One uploaded file and its state in the session.
#[derive(Debug, Clone)]
pub struct FileSession {
    file: UploadedFile,
    kind: FileKind,
    content: FileContent,
}

impl FileSession {
    /// Classify `file` and parse it if it is tabular. Parse failures are kept, not returned.
    pub fn open(file: UploadedFile, options: &SweepOptions) -> Self {
        let kind = file.kind();
        let content = match kind {
            FileKind::TabularCsv | FileKind::TabularXlsx => match parse_upload(&file, options) {
                Ok(table) => FileContent::Tabular(TabularState::new(table)),
                Err(e) => FileContent::ParseFailed(e.to_string()),
            },
            FileKind::Image => FileContent::Image,
            FileKind::TextLike => FileContent::Text,
            FileKind::Unsupported => FileContent::Unsupported,
        };
        Self {
            file,
            kind,
            content,
        }
    }

    /// The upload.
    pub fn file(&self) -> &UploadedFile {
        &self.file
    }

    /// File name.
    pub fn name(&self) -> &str {
        self.file.name()
    }

    /// Classification.
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// Current content state.
    pub fn content(&self) -> &FileContent {
        &self.content
    }

    /// Tabular state, if this file parsed into a table.
    pub fn tabular(&self) -> Option<&TabularState> {
        match &self.content {
            FileContent::Tabular(state) => Some(state),
            _ => None,
        }
    }

    pub(crate) fn content_mut(&mut self) -> &mut FileContent {
        &mut self.content
    }
}
