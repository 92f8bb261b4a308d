//! Display commands sent to the rendering collaborator.

use serde::Serialize;

use crate::export::ExportArtifact;
use crate::types::Value;

/// One numeric series of a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Column name.
    pub name: String,
    /// One bar per row; missing cells have no bar.
    pub values: Vec<Option<f64>>,
}

/// A display command. The renderer decides how it looks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderCommand {
    /// A labelled value, e.g. `File Size: 1.25 KB`.
    KeyValue { key: String, value: String },
    /// A section heading.
    Subheader { text: String },
    /// The first rows of a table.
    TablePreview {
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
        total_rows: usize,
        version: u64,
    },
    /// An uploaded image.
    Image {
        caption: String,
        #[serde(skip)]
        bytes: Vec<u8>,
        size_bytes: usize,
    },
    /// A bounded excerpt of a text file.
    Code { content: String, truncated: bool },
    /// A bar chart of up to two numeric series.
    BarChart { series: Vec<ChartSeries> },
    /// Non-fatal problem.
    Warning { message: String },
    /// Failed operation.
    Error { message: String },
    /// Completed operation.
    Success { message: String },
}

impl RenderCommand {
    pub(crate) fn key_value(key: &str, value: impl Into<String>) -> Self {
        RenderCommand::KeyValue {
            key: key.to_string(),
            value: value.into(),
        }
    }

    pub(crate) fn subheader(text: impl Into<String>) -> Self {
        RenderCommand::Subheader { text: text.into() }
    }

    pub(crate) fn warning(message: impl Into<String>) -> Self {
        RenderCommand::Warning {
            message: message.into(),
        }
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        RenderCommand::Error {
            message: message.into(),
        }
    }

    pub(crate) fn success(message: impl Into<String>) -> Self {
        RenderCommand::Success {
            message: message.into(),
        }
    }
}

/// The rendering and download collaborator.
///
/// `scope` is the name of the file a command belongs to, or `None` for session-wide messages.
pub trait Renderer {
    /// Display a command.
    fn render(&mut self, scope: Option<&str>, command: RenderCommand);

    /// Offer an export to the user as a downloadable file.
    fn download(&mut self, scope: &str, label: &str, artifact: ExportArtifact);
}

/// A rendered command with its scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEntry {
    /// File the command belongs to.
    pub file: Option<String>,
    /// The command.
    #[serde(flatten)]
    pub command: RenderCommand,
}

/// A download offered to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadOffer {
    /// File the export was made from.
    pub file: String,
    /// Button label.
    pub label: String,
    /// The export.
    pub artifact: ExportArtifact,
}

/// A renderer that records everything, for tests and machine-readable output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transcript {
    /// Rendered commands, in order.
    pub entries: Vec<TranscriptEntry>,
    /// Offered downloads, in order.
    pub downloads: Vec<DownloadOffer>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands rendered for `file`.
    pub fn commands_for<'a>(&'a self, file: &'a str) -> impl Iterator<Item = &'a RenderCommand> {
        self.entries
            .iter()
            .filter(move |e| e.file.as_deref() == Some(file))
            .map(|e| &e.command)
    }

    /// Messages of all warning commands, in order.
    pub fn warnings(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match &e.command {
                RenderCommand::Warning { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Messages of all error commands, in order.
    pub fn errors(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match &e.command {
                RenderCommand::Error { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Messages of all success commands, in order.
    pub fn successes(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match &e.command {
                RenderCommand::Success { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.downloads.clear();
    }
}

impl Renderer for Transcript {
    fn render(&mut self, scope: Option<&str>, command: RenderCommand) {
        self.entries.push(TranscriptEntry {
            file: scope.map(str::to_string),
            command,
        });
    }

    fn download(&mut self, scope: &str, label: &str, artifact: ExportArtifact) {
        self.downloads.push(DownloadOffer {
            file: scope.to_string(),
            label: label.to_string(),
            artifact,
        });
    }
}
