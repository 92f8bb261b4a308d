//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use data_sweeper::config::{DEFAULT_CHART_SERIES, DEFAULT_PREVIEW_ROWS, DEFAULT_TEXT_PREVIEW_CHARS};
use data_sweeper::export::ExportFormat;
use data_sweeper::processing::CleaningRequest;

#[derive(Parser, Debug)]
#[command(name = "data-sweeper")]
#[command(about = "Data Sweeper - preview, clean, chart and convert your files")]
#[command(
    long_about = r#"Data Sweeper - preview, clean, chart and convert your files

USAGE:
  data-sweeper data.csv notes.txt            # Preview files
  data-sweeper 'reports/*.xlsx' --clean dedup,fill-missing
  data-sweeper data.csv --select id,score --chart
  data-sweeper data.csv --convert xlsx --out-dir out/
  data-sweeper data.csv --events session.json --json

Actions given as flags apply to every tabular file, in this order:
clean, select, chart, convert. An --events file replays per-file
interactions instead, e.g.
  [{"file_name": "data.csv", "event": {"type": "convert"}}]"#
)]
#[command(version)]
pub struct Cli {
    /// Files, directories (walked recursively) or glob patterns to upload
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Cleaning actions to run, in order
    #[arg(long, value_enum, value_delimiter = ',')]
    pub clean: Vec<CleanArg>,

    /// Columns to keep, in order
    #[arg(long, value_delimiter = ',')]
    pub select: Option<Vec<String>>,

    /// Show a bar chart of the first numeric columns
    #[arg(long)]
    pub chart: bool,

    /// Convert tabular files and write the result to --out-dir
    #[arg(long, value_enum)]
    pub convert: Option<FormatArg>,

    /// JSON file with a list of per-file events to replay
    #[arg(long, conflicts_with_all = ["clean", "select", "chart", "convert"])]
    pub events: Option<PathBuf>,

    /// Directory for converted files
    #[arg(long, env = "DATA_SWEEPER_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Overwrite existing files in --out-dir
    #[arg(long)]
    pub force: bool,

    /// Rows shown in table previews
    #[arg(long, env = "DATA_SWEEPER_PREVIEW_ROWS", default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub preview_rows: usize,

    /// Characters shown for text files
    #[arg(long, env = "DATA_SWEEPER_TEXT_CHARS", default_value_t = DEFAULT_TEXT_PREVIEW_CHARS)]
    pub text_chars: usize,

    /// Numeric columns shown in charts
    #[arg(long, env = "DATA_SWEEPER_CHART_SERIES", default_value_t = DEFAULT_CHART_SERIES)]
    pub chart_series: usize,

    /// Print the session transcript as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Append pipeline events to this log file
    #[arg(long, env = "DATA_SWEEPER_EVENT_LOG")]
    pub event_log: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CleanArg {
    /// Remove duplicate rows
    Dedup,
    /// Fill missing numeric values with the column mean
    FillMissing,
}

impl From<CleanArg> for CleaningRequest {
    fn from(arg: CleanArg) -> Self {
        match arg {
            CleanArg::Dedup => CleaningRequest::RemoveDuplicates,
            CleanArg::FillMissing => CleaningRequest::FillMissingNumeric,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Xlsx => ExportFormat::Xlsx,
        }
    }
}
