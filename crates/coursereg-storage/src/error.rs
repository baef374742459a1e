//! Storage error types for coursereg-storage.

use std::io;
use std::path::PathBuf;

use coursereg_core::CoreError;
use thiserror::Error;

/// Errors produced by store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A table rule was violated (not found, duplicate, full, invalid field).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The registration file could not be opened, read or written.
    #[error("cannot access '{path}': {source}")]
    IoUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line of the registration file does not have the record shape.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
}

