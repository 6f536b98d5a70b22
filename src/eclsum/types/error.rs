//! Custom error types for the eclsum-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum EclError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The stream ended in the middle of a record or array.
    #[error("unexpected end of file while reading {context}")]
    UnexpectedEof { context: &'static str },

    /// The head and tail length markers of a Fortran record disagree.
    #[error("head/tail mismatch: head ({head}) != tail ({tail})")]
    HeadTailMismatch { head: i32, tail: i32 },

    /// A record length marker is negative.
    #[error("negative record length marker: {0}")]
    NegativeRecordLength(i32),

    /// A keyword header record is malformed.
    #[error("malformed keyword header: {0}")]
    HeaderError(String),

    /// An argument is invalid, e.g. an unknown type tag or a bad path.
    #[error("invalid argument: {0}")]
    InvalidArgs(String),

    /// The type tag is recognised but reading it is not supported.
    #[error("unsupported type tag: {0}")]
    Unsupported(String),

    /// An array body decoded more or fewer elements than its header declared.
    #[error("array '{keyword}' not terminated correctly: {remaining} elements outstanding")]
    ArrayNotTerminated { keyword: String, remaining: i64 },

    /// The summary protocol was violated (wrong keyword, wrong type, bad order).
    #[error("broken summary file: {0}")]
    BrokenFile(String),

    /// The allocator callback returned a buffer of the wrong size.
    #[error("allocated buffer has wrong size: expected {expected} bytes, got {actual}")]
    AllocSize { expected: usize, actual: usize },
}

impl EclError {
    /// Stable string tag for this error kind.
    ///
    /// These tags are part of the public contract and will not change
    /// between releases, unlike the display messages.
    pub fn code(&self) -> &'static str {
        match self {
            EclError::Io(_) => "Io",
            EclError::UnexpectedEof { .. } => "UnexpectedEof",
            EclError::HeadTailMismatch { .. } => "HeadTailMismatch",
            EclError::NegativeRecordLength(_) => "HeadTailMismatch",
            EclError::HeaderError(_) => "HeaderError",
            EclError::InvalidArgs(_) => "InvalidArgs",
            EclError::Unsupported(_) => "Unsupported",
            EclError::ArrayNotTerminated { .. } => "ArrayNotTerminated",
            EclError::BrokenFile(_) => "BrokenFile",
            EclError::AllocSize { .. } => "AllocSize",
        }
    }
}

/// A convenience `Result` type alias using the crate's `EclError` type.
pub type Result<T> = std::result::Result<T, EclError>;
