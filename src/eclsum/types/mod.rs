pub mod error;
pub mod models;

pub use error::{EclError, Result};
pub use models::{RawArray, Simulator, TypeTag, UnitSystem};
