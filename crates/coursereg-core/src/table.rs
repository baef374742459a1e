//! The bounded, ordered in-memory course table.
//!
//! [`CourseTable`] keeps records in insertion order. Lookups are linear
//! scans; removal shifts every later record one slot forward, so survivors
//! keep their relative order. The table never grows past its capacity and
//! never holds two records with the same id.

use crate::course::{parse_code, parse_status, Course};
use crate::error::CoreError;
use crate::id::CourseId;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 512;

/// Capacity-bounded collection of course records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseTable {
    courses: Vec<Course>,
    capacity: usize,
}

impl CourseTable {
    /// Creates an empty table with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table holding at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        CourseTable {
            courses: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.courses.len() >= self.capacity
    }

    /// Position of the record with `id`, if any.
    pub fn find_by_id(&self, id: CourseId) -> Option<usize> {
        self.courses.iter().position(|c| c.id == id)
    }

    /// Returns the record with `id`.
    pub fn get(&self, id: CourseId) -> Result<&Course, CoreError> {
        self.find_by_id(id)
            .map(|idx| &self.courses[idx])
            .ok_or(CoreError::NotFound { id })
    }

    /// Appends a new record built from raw text.
    ///
    /// Checked in order: capacity, duplicate id, field validity. Code and
    /// status are truncated to their bounds.
    pub fn add(&mut self, id: CourseId, code: &str, status: &str) -> Result<(), CoreError> {
        self.check_room_for(id)?;
        let course = Course::new(id, code, status)?;
        self.courses.push(course);
        Ok(())
    }

    /// Appends an already-built record, under the same capacity and
    /// uniqueness rules as [`add`](Self::add).
    pub fn insert(&mut self, course: Course) -> Result<(), CoreError> {
        self.check_room_for(course.id)?;
        self.courses.push(course);
        Ok(())
    }

    /// Overwrites code and status of the record with `id` in place.
    ///
    /// Both values are validated before either is written.
    pub fn update(&mut self, id: CourseId, code: &str, status: &str) -> Result<(), CoreError> {
        let idx = self.find_by_id(id).ok_or(CoreError::NotFound { id })?;
        let code = parse_code(code)?;
        let status = parse_status(status)?;
        let course = &mut self.courses[idx];
        course.code = code;
        course.status = status;
        Ok(())
    }

    /// Removes the record with `id`, shifting later records forward.
    pub fn remove(&mut self, id: CourseId) -> Result<Course, CoreError> {
        let idx = self.find_by_id(id).ok_or(CoreError::NotFound { id })?;
        Ok(self.courses.remove(idx))
    }

    /// Drops every record, keeping the capacity.
    pub fn clear(&mut self) {
        self.courses.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Course> {
        self.courses.iter()
    }

    pub fn as_slice(&self) -> &[Course] {
        &self.courses
    }

    /// Owned snapshot of the records in storage order.
    pub fn to_vec(&self) -> Vec<Course> {
        self.courses.clone()
    }

    fn check_room_for(&self, id: CourseId) -> Result<(), CoreError> {
        if self.is_full() {
            return Err(CoreError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        if self.find_by_id(id).is_some() {
            return Err(CoreError::DuplicateId { id });
        }
        Ok(())
    }
}

impl Default for CourseTable {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a CourseTable {
    type Item = &'a Course;
    type IntoIter = std::slice::Iter<'a, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.courses.iter()
    }
}
