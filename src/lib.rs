//! `data-sweeper` previews uploaded files, cleans tabular data, charts numeric columns and
//! converts tables between CSV and XLSX.
//!
//! The primary entrypoint is [`session::Sweeper`], which takes a batch of
//! [`ingestion::UploadedFile`]s, decides per file what to render, and applies user events
//! (cleaning, column selection, charting, conversion) to the file they name.
//!
//! ## What you can upload
//!
//! Any file is accepted. What happens next depends on the extension (case-insensitive):
//!
//! - **CSV** (`.csv`) and **Excel** (`.xlsx`, requires the default Cargo feature `excel`): parsed
//!   into a [`types::Table`], previewed, and offered for cleaning and conversion
//! - **Images** (`.png`, `.jpg`, `.jpeg`): shown with a caption
//! - **Text** (`.txt`, `.json`, `.html`): the first 1000 characters are shown
//! - anything else: accepted with a warning, not previewed
//!
//! **Column types:**
//!
//! Each column of a [`types::Table`] is either [`types::DataType::Numeric`] or
//! [`types::DataType::Text`], inferred once at parse time: a column is numeric when every
//! non-missing value is a number. Blank cells and the usual NA spellings (`NA`, `N/A`, `null`, ...)
//! are missing ([`types::Value::Null`]).
//!
//! ## Quick example: parse, clean, export
//!
//! ```rust
//! use data_sweeper::export::{export_table, ExportFormat, ExportRequest};
//! use data_sweeper::ingestion::{parse_table, FileKind};
//! use data_sweeper::processing::{fill_missing_numeric, remove_duplicates};
//!
//! # fn main() -> Result<(), data_sweeper::SweepError> {
//! let kind = FileKind::classify("report.csv");
//! let table = parse_table(b"a,b\n1,\n1,\n2,4\n", kind)?;
//!
//! let cleaned = fill_missing_numeric(&remove_duplicates(&table));
//! let artifact = export_table(&cleaned, &ExportRequest::new(ExportFormat::Csv), "report.csv")?;
//! assert_eq!(artifact.bytes, b"a,b\n1,4\n2,4\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: uploads, classification, CSV/XLSX parsing and observers
//! - [`types`]: the in-memory table model
//! - [`processing`]: dedup, mean-imputation, column selection, numeric projection
//! - [`export`]: CSV/XLSX serialization with derived file names and MIME types
//! - [`session`]: the per-file pipeline driven by user events
//! - [`config`]: pipeline options
//! - [`error`]: the error type shared by all of the above
//!
//! ### Failure scope
//!
//! - Parse errors affect only their file; the rest of the batch goes on.
//! - A selection naming an unknown column is rejected and the previous selection stays.
//! - A failed export affects only that conversion; the table is unchanged.

pub mod config;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod processing;
pub mod session;
pub mod types;

pub use error::{ErrorCategory, SweepError, SweepResult};
