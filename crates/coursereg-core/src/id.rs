//! Key newtype for course records.
//!
//! The inner `i32` matches the width of the id column in existing
//! registration files.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identifier of a course record within a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub i32);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward so width/alignment flags apply to the number.
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i32> for CourseId {
    fn from(value: i32) -> Self {
        CourseId(value)
    }
}

/// Parses a decimal id, tolerating surrounding blanks.
impl FromStr for CourseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i32>().map(CourseId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prints_inner_value() {
        assert_eq!(format!("{}", CourseId(7)), "7");
        assert_eq!(format!("{:<3}|", CourseId(7)), "7  |");
    }

    #[test]
    fn parse_tolerates_blanks_and_sign() {
        assert_eq!(" 42 ".parse::<CourseId>().unwrap(), CourseId(42));
        assert_eq!("-3".parse::<CourseId>().unwrap(), CourseId(-3));
        assert!("4x".parse::<CourseId>().is_err());
        assert!("".parse::<CourseId>().is_err());
    }

    #[test]
    fn serde_is_transparent() {
        let json = serde_json::to_string(&CourseId(10)).unwrap();
        assert_eq!(json, "10");
        let back: CourseId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CourseId(10));
    }
}
