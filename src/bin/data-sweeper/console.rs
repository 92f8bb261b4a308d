//! Terminal and JSON renderers for the CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use data_sweeper::export::ExportArtifact;
use data_sweeper::session::{ChartSeries, RenderCommand, Renderer, Transcript};
use data_sweeper::types::Value;

const BAR_WIDTH: usize = 40;
const CHART_ROWS: usize = 20;

/// Writes offered downloads into an output directory.
#[derive(Debug)]
pub struct DownloadWriter {
    out_dir: PathBuf,
    force: bool,
    written: Vec<PathBuf>,
    failures: usize,
}

impl DownloadWriter {
    pub fn new(out_dir: impl Into<PathBuf>, force: bool) -> Self {
        Self {
            out_dir: out_dir.into(),
            force,
            written: Vec::new(),
            failures: 0,
        }
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Number of downloads that could not be written.
    pub fn failures(&self) -> usize {
        self.failures
    }

    fn save(&mut self, artifact: &ExportArtifact) -> Option<PathBuf> {
        match write_artifact(&self.out_dir, artifact, self.force) {
            Ok(path) => {
                let bytes = artifact.size_bytes();
                tracing::info!(path = %path.display(), bytes, "wrote download");
                self.written.push(path.clone());
                Some(path)
            }
            Err(e) => {
                tracing::error!(
                    file = %artifact.file_name,
                    error = %format!("{e:#}"),
                    "could not write download"
                );
                self.failures += 1;
                None
            }
        }
    }
}

fn write_artifact(
    out_dir: &Path,
    artifact: &ExportArtifact,
    force: bool,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let path = out_dir.join(&artifact.file_name);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    std::fs::write(&path, &artifact.bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Human-readable output on a terminal.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    downloads: DownloadWriter,
    current_scope: Option<String>,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, downloads: DownloadWriter) -> Self {
        Self {
            out,
            downloads,
            current_scope: None,
        }
    }

    pub fn into_downloads(self) -> DownloadWriter {
        self.downloads
    }

    fn print(&mut self, scope: Option<&str>, command: &RenderCommand) -> io::Result<()> {
        if scope != self.current_scope.as_deref() {
            if let Some(name) = scope {
                writeln!(self.out, "\n== {name} ==")?;
            } else {
                writeln!(self.out)?;
            }
            self.current_scope = scope.map(str::to_string);
        }

        match command {
            RenderCommand::KeyValue { key, value } => writeln!(self.out, "{key}: {value}"),
            RenderCommand::Subheader { text } => writeln!(self.out, "\n{text}"),
            RenderCommand::TablePreview {
                columns,
                rows,
                total_rows,
                version,
            } => {
                write_table(&mut self.out, columns, rows)?;
                writeln!(
                    self.out,
                    "({} of {total_rows} rows, version {version})",
                    rows.len()
                )
            }
            RenderCommand::Image {
                caption,
                size_bytes,
                ..
            } => writeln!(self.out, "[image] {caption} ({size_bytes} bytes)"),
            RenderCommand::Code { content, truncated } => {
                writeln!(self.out, "{content}")?;
                if *truncated {
                    writeln!(self.out, "...")?;
                }
                Ok(())
            }
            RenderCommand::BarChart { series } => write_chart(&mut self.out, series),
            RenderCommand::Warning { message } => writeln!(self.out, "warning: {message}"),
            RenderCommand::Error { message } => writeln!(self.out, "error: {message}"),
            RenderCommand::Success { message } => writeln!(self.out, "{message}"),
        }
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, scope: Option<&str>, command: RenderCommand) {
        if let Err(e) = self.print(scope, &command) {
            tracing::warn!(error = %e, "could not write to output");
        }
    }

    fn download(&mut self, scope: &str, label: &str, artifact: ExportArtifact) {
        if let Some(path) = self.downloads.save(&artifact) {
            self.render(
                Some(scope),
                RenderCommand::KeyValue {
                    key: label.to_string(),
                    value: path.display().to_string(),
                },
            );
        }
    }
}

/// Records the session and writes downloads; printed as JSON at the end.
#[derive(Debug)]
pub struct JsonRenderer {
    transcript: Transcript,
    downloads: DownloadWriter,
}

impl JsonRenderer {
    pub fn new(downloads: DownloadWriter) -> Self {
        Self {
            transcript: Transcript::new(),
            downloads,
        }
    }

    pub fn finish<W: Write>(self, out: W) -> anyhow::Result<DownloadWriter> {
        serde_json::to_writer_pretty(out, &self.transcript).context("writing transcript")?;
        Ok(self.downloads)
    }
}

impl Renderer for JsonRenderer {
    fn render(&mut self, scope: Option<&str>, command: RenderCommand) {
        self.transcript.render(scope, command);
    }

    fn download(&mut self, scope: &str, label: &str, artifact: ExportArtifact) {
        if self.downloads.save(&artifact).is_some() {
            self.transcript.download(scope, label, artifact);
        }
    }
}

fn write_table<W: Write>(out: &mut W, columns: &[String], rows: &[Vec<Value>]) -> io::Result<()> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| r.iter().map(ToString::to_string).collect())
        .collect();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    writeln!(out, "{}", pad_line(columns.iter().map(String::as_str), &widths))?;
    writeln!(
        out,
        "{}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-")
    )?;
    for row in &cells {
        writeln!(out, "{}", pad_line(row.iter().map(String::as_str), &widths))?;
    }
    Ok(())
}

fn pad_line<'a>(values: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    values
        .zip(widths)
        .map(|(v, &w)| format!("{v:<w$}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn write_chart<W: Write>(out: &mut W, series: &[ChartSeries]) -> io::Result<()> {
    let max = series
        .iter()
        .flat_map(|s| s.values.iter().flatten())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));

    for s in series {
        writeln!(out, "{}", s.name)?;
        for (row, value) in s.values.iter().take(CHART_ROWS).enumerate() {
            match value {
                Some(v) => {
                    let len = if max > 0.0 {
                        ((v.abs() / max) * BAR_WIDTH as f64).round() as usize
                    } else {
                        0
                    };
                    writeln!(out, "{row:>4} {:<width$} {v}", "#".repeat(len), width = BAR_WIDTH)?;
                }
                None => writeln!(out, "{row:>4}")?,
            }
        }
        if s.values.len() > CHART_ROWS {
            writeln!(out, "     ... {} more rows", s.values.len() - CHART_ROWS)?;
        }
    }
    Ok(())
}
