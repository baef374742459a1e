//! Data model for the course registration manager.
//!
//! - [`id`]: the [`CourseId`] key newtype
//! - [`field`]: bounded, delimiter-free text fields ([`CourseCode`], [`CourseStatus`])
//! - [`course`]: the [`Course`] record
//! - [`table`]: [`CourseTable`], the capacity-bounded ordered collection
//! - [`error`]: [`CoreError`] for business-rule failures

pub mod course;
pub mod error;
pub mod field;
pub mod id;
pub mod table;

// Re-export commonly used types
pub use course::Course;
pub use error::{CoreError, FieldKind};
pub use field::{BoundedText, CourseCode, CourseStatus, CODE_MAX_LEN, FIELD_DELIMITER, STATUS_MAX_LEN};
pub use id::CourseId;
pub use table::{CourseTable, DEFAULT_CAPACITY};
