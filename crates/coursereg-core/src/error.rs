//! Core error types for coursereg-core.
//!
//! Every business-rule failure of the table is a matchable variant; none of
//! them leave the table in a modified state.

use crate::id::CourseId;
use thiserror::Error;

/// Which text field of a record a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Code,
    Status,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Code => f.write_str("code"),
            FieldKind::Status => f.write_str("status"),
        }
    }
}

/// Errors produced by [`CourseTable`](crate::table::CourseTable) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No record with the given id exists.
    #[error("course with ID {id} not found")]
    NotFound { id: CourseId },

    /// A record with the given id already exists.
    #[error("course with ID {id} already exists")]
    DuplicateId { id: CourseId },

    /// The table already holds `capacity` records.
    #[error("course list is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    /// A code or status value cannot be stored in the line format.
    #[error("invalid {field}: {reason}")]
    InvalidField { field: FieldKind, reason: &'static str },
}
