//! Core reader for Eclipse-family binary output files.

pub mod arrays;
pub mod codec;
pub mod f77;
pub mod summary;
pub mod types;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;

pub use arrays::ArrayReader;
pub use f77::RecordReader;
pub use types::error::{EclError, Result};
pub use types::models::{RawArray, Simulator, TypeTag, UnitSystem};

/// Open a reader over an Eclipse binary file.
///
/// The returned reader yields arrays in on-disk order until the stream is
/// exhausted. A path that cannot be opened is `InvalidArgs`.
pub fn open(path: impl AsRef<Path>) -> Result<ArrayReader<BufReader<File>>> {
    let path = path.as_ref();
    info!("Opening Eclipse file: {}", path.display());
    let file = File::open(path)
        .map_err(|e| EclError::InvalidArgs(format!("could not open file '{}': {}", path.display(), e)))?;
    Ok(ArrayReader::new(BufReader::new(file)))
}
