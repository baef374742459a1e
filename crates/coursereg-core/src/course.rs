//! The course record.

use std::fmt;

use serde::Serialize;

use crate::error::{CoreError, FieldKind};
use crate::field::{CourseCode, CourseStatus};
use crate::id::CourseId;

/// One registration record: an id with its course code and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub id: CourseId,
    pub code: CourseCode,
    pub status: CourseStatus,
}

impl Course {
    /// Builds a record from raw text, truncating code and status to their
    /// bounds.
    pub fn new(id: CourseId, code: &str, status: &str) -> Result<Self, CoreError> {
        Ok(Course {
            id,
            code: parse_code(code)?,
            status: parse_status(status)?,
        })
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID={}, Code={}, Status={}", self.id, self.code, self.status)
    }
}

pub(crate) fn parse_code(raw: &str) -> Result<CourseCode, CoreError> {
    CourseCode::try_new(raw).map_err(|reason| CoreError::InvalidField {
        field: FieldKind::Code,
        reason,
    })
}

pub(crate) fn parse_status(raw: &str) -> Result<CourseStatus, CoreError> {
    CourseStatus::try_new(raw).map_err(|reason| CoreError::InvalidField {
        field: FieldKind::Status,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_search_output() {
        let course = Course::new(CourseId(1), "CS101", "Active").unwrap();
        assert_eq!(course.to_string(), "ID=1, Code=CS101, Status=Active");
    }

    #[test]
    fn invalid_field_names_the_field() {
        let err = Course::new(CourseId(1), "CS101", "Act,ive").unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidField {
                field: FieldKind::Status,
                reason: "must not contain ','",
            }
        );
        assert_eq!(err.to_string(), "invalid status: must not contain ','");
    }

    #[test]
    fn serializes_fields_as_plain_values() {
        let course = Course::new(CourseId(3), "MATH1", "Closed").unwrap();
        let json = serde_json::to_string(&course).unwrap();
        assert_eq!(json, r#"{"id":3,"code":"MATH1","status":"Closed"}"#);
    }
}
