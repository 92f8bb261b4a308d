//! In-memory table transformations.
//!
//! Every function here is pure: it borrows a [`crate::types::Table`] and returns a new one. The
//! caller decides whether the result replaces its working table.
//!
//! Currently implemented:
//!
//! - [`remove_duplicates()`]: drop repeated rows, keeping first occurrences
//! - [`fill_missing_numeric()`]: mean-imputation for numeric columns
//! - [`select_columns()`]: keep a [`ColumnSelection`] of columns, in selection order
//! - [`numeric_projection()`]: the first numeric columns, for charts
//!
//! ## Example: clean, then select
//!
//! ```rust
//! use data_sweeper::processing::{
//!     apply_cleaning, select_columns, CleaningRequest, ColumnSelection,
//! };
//! use data_sweeper::types::{Column, Table, Value};
//!
//! # fn main() -> Result<(), data_sweeper::SweepError> {
//! let table = Table::new(vec![
//!     Column::numeric("a", vec![Some(1.0), Some(1.0), Some(2.0)]),
//!     Column::numeric("b", vec![None, None, Some(4.0)]),
//! ])?;
//!
//! let deduped = apply_cleaning(&table, CleaningRequest::RemoveDuplicates);
//! assert_eq!(deduped.row_count(), 2);
//!
//! let filled = apply_cleaning(&deduped, CleaningRequest::FillMissingNumeric);
//! assert_eq!(filled.row(0), Some(vec![Value::Number(1.0), Value::Number(4.0)]));
//!
//! let only_b = select_columns(&filled, &ColumnSelection::new(["b"]))?;
//! assert_eq!(only_b.column_count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod dedup;
pub mod impute;
pub mod project;
pub mod select;

use serde::{Deserialize, Serialize};

use crate::types::Table;

pub use dedup::remove_duplicates;
pub use impute::fill_missing_numeric;
pub use project::numeric_projection;
pub use select::{select_columns, ColumnSelection};

/// A user-requested cleaning operation on one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningRequest {
    /// See [`remove_duplicates()`].
    RemoveDuplicates,
    /// See [`fill_missing_numeric()`].
    FillMissingNumeric,
}

/// Apply a [`CleaningRequest`] to `table`, returning the cleaned copy.
pub fn apply_cleaning(table: &Table, request: CleaningRequest) -> Table {
    match request {
        CleaningRequest::RemoveDuplicates => remove_duplicates(table),
        CleaningRequest::FillMissingNumeric => fill_missing_numeric(table),
    }
}
