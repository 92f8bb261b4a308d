//! The per-file ingestion-and-transformation pipeline.
//!
//! A [`Sweeper`] holds one [`FileSession`] per uploaded file. It decides, per file, which preview
//! to render, which cleaning operations are legal and which export formats are offered. All
//! output goes to a [`Renderer`]; all input arrives as [`ScopedEvent`]s.
//!
//! Each event is applied to the named file only and the file is re-rendered afterwards. Errors
//! never escape a file: they are rendered and reported to the configured observer.
//!
//! ```rust
//! use data_sweeper::config::SweepOptions;
//! use data_sweeper::export::ExportFormat;
//! use data_sweeper::ingestion::UploadedFile;
//! use data_sweeper::processing::CleaningRequest;
//! use data_sweeper::session::{ScopedEvent, Sweeper, Transcript, UserEvent};
//!
//! let mut sweeper = Sweeper::new(SweepOptions::default());
//! let mut out = Transcript::new();
//! sweeper.upload([UploadedFile::new("report.csv", "a,b\n1,\n2,4\n")], &mut out);
//!
//! for event in [
//!     UserEvent::SetCleaningEnabled(true),
//!     UserEvent::Clean(CleaningRequest::FillMissingNumeric),
//!     UserEvent::ChooseExportFormat(ExportFormat::Xlsx),
//!     UserEvent::Convert,
//! ] {
//!     let _ = sweeper.handle(ScopedEvent::new("report.csv", event), &mut out);
//! }
//! sweeper.finish(&mut out);
//!
//! assert_eq!(out.downloads[0].artifact.file_name, "report.xlsx");
//! ```

mod event;
mod file;
mod render;

pub use event::{ScopedEvent, UserEvent};
pub use file::{FileContent, FileSession, TabularState, VersionedTable};
pub use render::{
    ChartSeries, DownloadOffer, RenderCommand, Renderer, Transcript, TranscriptEntry,
};

use crate::config::SweepOptions;
use crate::error::SweepError;
use crate::export::{export_table, ExportRequest};
use crate::ingestion::unified::report_failure;
use crate::ingestion::{display_extension, FileKind, SweepContext, SweepStage, UploadedFile};
use crate::processing::{apply_cleaning, numeric_projection, CleaningRequest, ColumnSelection};
use crate::types::ColumnData;

/// Whether an event changed anything.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event was accepted (the file may have a new state).
    Applied,
    /// The event was rejected; the file state is unchanged.
    Rejected,
}

/// Session over a batch of uploaded files.
#[derive(Debug, Default)]
pub struct Sweeper {
    options: SweepOptions,
    sessions: Vec<FileSession>,
}

impl Sweeper {
    /// Create an empty session.
    pub fn new(options: SweepOptions) -> Self {
        Self {
            options,
            sessions: Vec::new(),
        }
    }

    /// Options in effect.
    pub fn options(&self) -> &SweepOptions {
        &self.options
    }

    /// Files in upload order.
    pub fn sessions(&self) -> &[FileSession] {
        &self.sessions
    }

    /// A file by name.
    pub fn session(&self, file_name: &str) -> Option<&FileSession> {
        self.sessions.iter().find(|s| s.name() == file_name)
    }

    /// Accept uploads, one after another, and render each.
    ///
    /// A file whose name is already loaded is skipped with a warning, since events are addressed
    /// by file name.
    pub fn upload<I, R>(&mut self, files: I, renderer: &mut R)
    where
        I: IntoIterator<Item = UploadedFile>,
        R: Renderer + ?Sized,
    {
        for file in files {
            if self.session(file.name()).is_some() {
                renderer.render(
                    Some(file.name()),
                    RenderCommand::warning(format!(
                        "A file named {} is already loaded; skipping this upload.",
                        file.name()
                    )),
                );
                continue;
            }

            let session = FileSession::open(file, &self.options);
            tracing::debug!(file = session.name(), kind = %session.kind(), "opened upload");
            render_file(&self.options, &session, renderer);
            self.sessions.push(session);
        }
    }

    /// Apply one user event to the file it names, then re-render that file.
    pub fn handle<R>(&mut self, event: ScopedEvent, renderer: &mut R) -> EventOutcome
    where
        R: Renderer + ?Sized,
    {
        let ScopedEvent { file_name, event } = event;
        let Some(session) = self.sessions.iter_mut().find(|s| s.name() == file_name) else {
            renderer.render(
                None,
                RenderCommand::warning(format!("No uploaded file named {file_name}.")),
            );
            return EventOutcome::Rejected;
        };

        let outcome = apply_event(&self.options, session, event, renderer);
        render_file(&self.options, session, renderer);
        outcome
    }

    /// Close the batch.
    pub fn finish<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.render(
            None,
            RenderCommand::success("All files processed successfully!"),
        );
    }
}

fn apply_event<R>(
    options: &SweepOptions,
    session: &mut FileSession,
    event: UserEvent,
    renderer: &mut R,
) -> EventOutcome
where
    R: Renderer + ?Sized,
{
    let name = session.name().to_string();
    let kind = session.kind();

    let state = match session.content_mut() {
        FileContent::Tabular(state) => state,
        FileContent::ParseFailed(_) => {
            renderer.render(
                Some(&name),
                RenderCommand::warning(format!(
                    "{name} could not be read as a table; no data operations are available."
                )),
            );
            return EventOutcome::Rejected;
        }
        _ => {
            renderer.render(
                Some(&name),
                RenderCommand::warning(format!(
                    "{name} is not a tabular file; no data operations are available."
                )),
            );
            return EventOutcome::Rejected;
        }
    };

    let ctx = |stage| SweepContext {
        file_name: name.clone(),
        kind,
        stage,
    };

    match event {
        UserEvent::SetCleaningEnabled(on) => state.cleaning_enabled = on,
        UserEvent::SetVisualization(on) => state.show_chart = on,
        UserEvent::ChooseExportFormat(format) => state.export_format = format,

        UserEvent::Clean(request) => {
            if !state.cleaning_enabled {
                renderer.render(
                    Some(&name),
                    RenderCommand::warning(format!(
                        "Enable data cleaning for {name} before running cleaning actions."
                    )),
                );
                return EventOutcome::Rejected;
            }

            let cleaned = apply_cleaning(state.working.table(), request);
            state.working.replace(cleaned);
            if state.selection.retain_existing(state.working.table()) {
                tracing::debug!(file = %name, "dropped selected columns that no longer exist");
            }
            let message = match request {
                CleaningRequest::RemoveDuplicates => "Duplicates removed!",
                CleaningRequest::FillMissingNumeric => "Missing values have been filled!",
            };
            renderer.render(Some(&name), RenderCommand::success(message));
        }

        UserEvent::SelectColumns(names) => {
            let selection = ColumnSelection::new(names);
            if let Err(e) = selection.validate(state.working.table()) {
                report_failure(options, &ctx(SweepStage::Select), &e);
                renderer.render(
                    Some(&name),
                    RenderCommand::warning(format!("Selection not applied: {e}")),
                );
                return EventOutcome::Rejected;
            }
            state.selection = selection;
        }

        UserEvent::Convert => {
            let request = ExportRequest::new(state.export_format);
            let result = state
                .view()
                .and_then(|view| export_table(&view, &request, &name));
            match result {
                Ok(artifact) => {
                    if let Some(obs) = options.observer.as_ref() {
                        obs.on_exported(
                            &ctx(SweepStage::Export),
                            &artifact.file_name,
                            artifact.size_bytes(),
                        );
                    }
                    let label = format!("Download {name} as {}", request.format);
                    renderer.download(&name, &label, artifact);
                }
                Err(e) => {
                    report_failure(options, &ctx(SweepStage::Export), &e);
                    renderer.render(
                        Some(&name),
                        RenderCommand::error(format!("Conversion failed: {e}")),
                    );
                    return EventOutcome::Rejected;
                }
            }
        }
    }

    EventOutcome::Applied
}

fn render_file<R>(options: &SweepOptions, session: &FileSession, renderer: &mut R)
where
    R: Renderer + ?Sized,
{
    let name = session.name();
    let scope = Some(name);
    let file = session.file();

    renderer.render(scope, RenderCommand::key_value("File Name", name));
    renderer.render(
        scope,
        RenderCommand::key_value(
            "File Size",
            format!("{:.2} KB", file.size_bytes() as f64 / 1024.0),
        ),
    );
    renderer.render(
        scope,
        RenderCommand::key_value("File Type", display_extension(name)),
    );

    match session.content() {
        FileContent::Tabular(state) => {
            render_tabular(options, session.kind(), name, state, renderer)
        }
        FileContent::ParseFailed(message) => renderer.render(
            scope,
            RenderCommand::error(format!("Could not read {name}: {message}")),
        ),
        FileContent::Image => renderer.render(
            scope,
            RenderCommand::Image {
                caption: format!("Uploaded Image: {name}"),
                bytes: file.bytes().to_vec(),
                size_bytes: file.size_bytes(),
            },
        ),
        FileContent::Text => render_text(options, name, file, renderer),
        FileContent::Unsupported => renderer.render(
            scope,
            RenderCommand::warning(format!(
                "Uploaded {} file is accepted, but not directly previewable.",
                display_extension(name)
            )),
        ),
    }
}

fn render_text<R>(options: &SweepOptions, name: &str, file: &UploadedFile, renderer: &mut R)
where
    R: Renderer + ?Sized,
{
    match std::str::from_utf8(file.bytes()) {
        Ok(text) => {
            let mut chars = text.chars();
            let content: String = chars.by_ref().take(options.text_preview_chars).collect();
            let truncated = chars.next().is_some();
            renderer.render(Some(name), RenderCommand::subheader("File Content:"));
            renderer.render(Some(name), RenderCommand::Code { content, truncated });
        }
        Err(e) => renderer.render(
            Some(name),
            RenderCommand::warning(format!("{name} is not valid UTF-8 text ({e}).")),
        ),
    }
}

fn render_tabular<R>(
    options: &SweepOptions,
    kind: FileKind,
    name: &str,
    state: &TabularState,
    renderer: &mut R,
) where
    R: Renderer + ?Sized,
{
    let scope = Some(name);
    let table = state.working.table();
    let preview = table.head(options.preview_rows);

    let title = match kind {
        FileKind::TabularXlsx => "Preview of Excel File:",
        _ => "Preview of CSV File:",
    };
    renderer.render(scope, RenderCommand::subheader(title));
    renderer.render(
        scope,
        RenderCommand::TablePreview {
            columns: preview.column_names().map(str::to_string).collect(),
            rows: preview.rows().collect(),
            total_rows: table.row_count(),
            version: state.working.version(),
        },
    );

    renderer.render(
        scope,
        RenderCommand::key_value("Selected Columns", state.selection.names().join(", ")),
    );

    if state.show_chart {
        match state.view() {
            Ok(view) => {
                let projection = numeric_projection(&view, options.chart_series);
                if projection.column_count() == 0 {
                    renderer.render(
                        scope,
                        RenderCommand::warning(format!(
                            "No numeric columns found in {name} for visualization."
                        )),
                    );
                } else {
                    let series = projection
                        .columns()
                        .iter()
                        .filter_map(|c| match &c.data {
                            ColumnData::Numeric(values) => Some(ChartSeries {
                                name: c.name.clone(),
                                values: values.clone(),
                            }),
                            ColumnData::Text(_) => None,
                        })
                        .collect();
                    renderer.render(scope, RenderCommand::BarChart { series });
                }
            }
            Err(e) => render_selection_error(name, &e, renderer),
        }
    }

    renderer.render(
        scope,
        RenderCommand::key_value("Convert To", state.export_format.to_string()),
    );
}

fn render_selection_error<R>(name: &str, error: &SweepError, renderer: &mut R)
where
    R: Renderer + ?Sized,
{
    renderer.render(
        Some(name),
        RenderCommand::warning(format!("Current selection is not usable: {error}")),
    );
}
