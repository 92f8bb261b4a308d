//! Ingestion: uploads, classification and parsing.
//!
//! Most callers should use [`parse_upload`] (from [`unified`]) which:
//!
//! - classifies the upload by file extension ([`FileKind`])
//! - parses CSV/XLSX content into an in-memory [`crate::types::Table`]
//! - optionally reports success/failure/alerts to a [`SweepObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`excel`] (feature `excel`)

pub mod classify;
pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod infer;
pub mod observability;
pub mod unified;
pub mod upload;

pub use classify::{display_extension, extension_of, FileKind};
pub use observability::{
    CompositeObserver, FileObserver, SweepContext, SweepObserver, SweepSeverity, SweepStage,
    TableStats, TracingObserver,
};
pub use unified::{parse_table, parse_upload};
pub use upload::{discover_inputs, UploadedFile};
