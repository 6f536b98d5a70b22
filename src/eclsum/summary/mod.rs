//! The summary semantic layer.
//!
//! Maps the column-oriented vectors of a summary (`.SMSPEC` plus `.UNSMRY`
//! or `.Snnnn`) onto fully qualified column identifiers, filters void
//! columns, and streams the report-step/ministep rows into a dense matrix.

pub mod classify;
pub mod matrix;
pub mod spec;

pub use classify::{identifies, partial_identifiers, Qualifier};
pub use matrix::{read_rows, ColumnPlan};
pub use spec::{smspec_keywords, LgrValues, RuntimeMonitor, Smspec, StartDate, Timestamp};
