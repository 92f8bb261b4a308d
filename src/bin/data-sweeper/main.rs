//! Data Sweeper CLI

mod args;
mod console;

use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use data_sweeper::config::SweepOptions;
use data_sweeper::ingestion::{
    discover_inputs, CompositeObserver, FileObserver, SweepObserver, TracingObserver, UploadedFile,
};
use data_sweeper::session::{Renderer, ScopedEvent, Sweeper, UserEvent};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use args::Cli;
use console::{ConsoleRenderer, DownloadWriter, JsonRenderer};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();

    let options = build_options(&cli);
    let uploads = load_uploads(&cli.inputs)?;
    let events = build_events(&cli, &uploads)?;
    tracing::debug!(files = uploads.len(), events = events.len(), "starting session");

    let downloads = DownloadWriter::new(&cli.out_dir, cli.force);
    let downloads = if cli.json {
        let mut renderer = JsonRenderer::new(downloads);
        run_session(options, uploads, events, &mut renderer);
        let downloads = renderer.finish(io::stdout().lock())?;
        println!();
        downloads
    } else {
        let mut renderer = ConsoleRenderer::new(io::stdout().lock(), downloads);
        run_session(options, uploads, events, &mut renderer);
        renderer.into_downloads()
    };

    tracing::debug!(written = downloads.written().len(), "session finished");
    if downloads.failures() > 0 {
        bail!("{} download(s) could not be written", downloads.failures());
    }
    Ok(())
}

fn build_options(cli: &Cli) -> SweepOptions {
    let mut observers: Vec<Arc<dyn SweepObserver>> = vec![Arc::new(TracingObserver)];
    if let Some(path) = &cli.event_log {
        observers.push(Arc::new(FileObserver::new(path)));
    }

    SweepOptions {
        preview_rows: cli.preview_rows,
        text_preview_chars: cli.text_chars,
        chart_series: cli.chart_series,
        observer: Some(Arc::new(CompositeObserver::new(observers))),
        ..Default::default()
    }
}

fn load_uploads(inputs: &[String]) -> Result<Vec<UploadedFile>> {
    let paths = discover_inputs(inputs).context("resolving inputs")?;
    if paths.is_empty() {
        bail!("no files matched {}", inputs.join(", "));
    }

    let mut uploads = Vec::with_capacity(paths.len());
    for path in paths {
        match UploadedFile::from_path(&path) {
            Ok(file) => uploads.push(file),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "skipping unreadable file")
            }
        }
    }
    Ok(uploads)
}

fn build_events(cli: &Cli, uploads: &[UploadedFile]) -> Result<Vec<ScopedEvent>> {
    if let Some(path) = &cli.events {
        return read_events(path);
    }

    let mut per_file = Vec::new();
    if !cli.clean.is_empty() {
        per_file.push(UserEvent::SetCleaningEnabled(true));
        per_file.extend(cli.clean.iter().map(|c| UserEvent::Clean((*c).into())));
    }
    if let Some(names) = &cli.select {
        per_file.push(UserEvent::SelectColumns(names.clone()));
    }
    if cli.chart {
        per_file.push(UserEvent::SetVisualization(true));
    }
    if let Some(format) = cli.convert {
        per_file.push(UserEvent::ChooseExportFormat(format.into()));
        per_file.push(UserEvent::Convert);
    }

    Ok(uploads
        .iter()
        .filter(|f| f.kind().is_tabular())
        .flat_map(|f| {
            per_file
                .iter()
                .map(|e| ScopedEvent::new(f.name(), e.clone()))
        })
        .collect())
}

fn read_events(path: &Path) -> Result<Vec<ScopedEvent>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading events from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing events in {}", path.display()))
}

fn run_session<R: Renderer>(
    options: SweepOptions,
    uploads: Vec<UploadedFile>,
    events: Vec<ScopedEvent>,
    renderer: &mut R,
) {
    let mut sweeper = Sweeper::new(options);
    sweeper.upload(uploads, renderer);
    for event in events {
        let file = event.file_name.clone();
        let outcome = sweeper.handle(event, renderer);
        tracing::debug!(%file, ?outcome, "handled event");
    }
    sweeper.finish(renderer);
}
