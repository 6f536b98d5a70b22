//! Reader for binary output files produced by reservoir simulators in the
//! Eclipse family (`.SMSPEC`, `.UNSMRY`, `.Snnnn`).
//!
//! The files are Fortran unformatted-sequential records carrying tagged,
//! typed, block-segmented arrays ("keywords"). This crate reads them in two
//! layers:
//!
//! - The keyword layer: [`open`] a file and pull [`RawArray`]s off it with
//!   [`ArrayReader::next_array`] until the stream is exhausted.
//! - The summary layer: load a specification with [`Smspec::load`], derive
//!   the qualified [`ColumnPlan`] with [`Smspec::columns`], and stream a
//!   data file into a row matrix with [`read_rows`].
//!
//! ```no_run
//! use eclsum_reader::{open, read_rows, Smspec};
//!
//! # fn main() -> eclsum_reader::Result<()> {
//! let spec = Smspec::load("CASE.SMSPEC")?;
//! let plan = spec.columns(":");
//!
//! let mut arrays = open("CASE.UNSMRY")?;
//! let mut matrix = Vec::new();
//! let rows = read_rows(&mut arrays, &plan, |rows| {
//!     matrix.resize(rows * plan.row_size(), 0);
//!     Ok(matrix.as_mut_slice())
//! })?;
//! # let _ = rows;
//! # Ok(())
//! # }
//! ```
//!
//! Reading is forward-only and single-threaded; a reader owns its stream
//! and scratch buffers exclusively. All errors surface to the caller;
//! nothing is silently recovered.

pub mod eclsum;

pub use eclsum::summary::{
    identifies, partial_identifiers, read_rows, smspec_keywords, ColumnPlan, LgrValues,
    Qualifier, RuntimeMonitor, Smspec, StartDate, Timestamp,
};
pub use eclsum::types::error::{EclError, Result};
pub use eclsum::types::models::{RawArray, Simulator, TypeTag, UnitSystem};
pub use eclsum::{open, ArrayReader, RecordReader};
