//! Human-readable output: the course table and per-condition messages.

use std::io::{self, Write};

use coursereg_core::{CoreError, Course};
use coursereg_storage::StorageError;

/// Writes the course table, or `(no courses)` when empty.
pub fn write_table<W: Write>(out: &mut W, courses: &[Course]) -> io::Result<()> {
    if courses.is_empty() {
        return writeln!(out, "(no courses)");
    }
    writeln!(out, "ID | Code        | Status")?;
    writeln!(out, "--------------------------")?;
    for course in courses {
        writeln!(out, "{:<3}| {:<11} | {}", course.id, course.code, course.status)?;
    }
    Ok(())
}

pub fn found(course: &Course) -> String {
    format!("Found: {course}")
}

/// Message shown for a refused table operation.
pub fn core_error(err: &CoreError) -> String {
    match err {
        CoreError::NotFound { id } => format!("Course with ID {id} not found."),
        CoreError::DuplicateId { id } => format!("Course with ID {id} already exists."),
        CoreError::CapacityExceeded { .. } => "Course list is full.".to_string(),
        CoreError::InvalidField { field, reason } => format!("Invalid {field}: {reason}."),
    }
}

pub fn storage_error(err: &StorageError) -> String {
    match err {
        StorageError::Core(core) => core_error(core),
        StorageError::IoUnavailable { path, source } => {
            format!("Could not access '{}': {}.", path.display(), source)
        }
        StorageError::MalformedRecord { line, reason } => {
            format!("Malformed record on line {line}: {reason}.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursereg_core::CourseId;

    fn render(courses: &[Course]) -> String {
        let mut buf = Vec::new();
        write_table(&mut buf, courses).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn table_layout() {
        let courses = vec![
            Course::new(CourseId(1), "CS101", "Active").unwrap(),
            Course::new(CourseId(1024), "ENGINEERING101", "Closed").unwrap(),
        ];
        insta::assert_snapshot!(render(&courses), @r"
        ID | Code        | Status
        --------------------------
        1  | CS101       | Active
        1024| ENGINEERING101 | Closed
        ");
    }

    #[test]
    fn empty_table() {
        assert_eq!(render(&[]), "(no courses)\n");
    }

    #[test]
    fn messages() {
        let id = CourseId(9);
        assert_eq!(
            core_error(&CoreError::NotFound { id }),
            "Course with ID 9 not found."
        );
        assert_eq!(
            core_error(&CoreError::DuplicateId { id }),
            "Course with ID 9 already exists."
        );
        assert_eq!(
            core_error(&CoreError::CapacityExceeded { capacity: 2 }),
            "Course list is full."
        );
        let course = Course::new(id, "CS1", "Active").unwrap();
        assert_eq!(found(&course), "Found: ID=9, Code=CS1, Status=Active");
    }
}
