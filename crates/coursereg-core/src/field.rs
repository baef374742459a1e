//! Bounded text fields of a course record.
//!
//! A [`BoundedText<MAX>`] holds at most `MAX` characters and never contains
//! the field delimiter or a line break, so any stored value can be written
//! to and read back from the line format unchanged. Overlong input is
//! truncated on construction rather than rejected.

use std::fmt;

use serde::Serialize;

/// Separator between the fields of a persisted record.
pub const FIELD_DELIMITER: char = ',';

/// Maximum stored length of a course code, in characters.
pub const CODE_MAX_LEN: usize = 31;

/// Maximum stored length of a course status, in characters.
pub const STATUS_MAX_LEN: usize = 31;

/// Text value truncated to at most `MAX` characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BoundedText<const MAX: usize>(String);

/// Course code, e.g. `CS101`.
pub type CourseCode = BoundedText<CODE_MAX_LEN>;

/// Registration status, e.g. `Active` or `Closed`.
pub type CourseStatus = BoundedText<STATUS_MAX_LEN>;

impl<const MAX: usize> BoundedText<MAX> {
    /// Maximum number of characters kept.
    pub const MAX_LEN: usize = MAX;

    /// Truncates `raw` to `MAX` characters and validates what is kept.
    ///
    /// Returns the reason on failure: the kept text must be non-empty and
    /// free of `,`, `\n` and `\r`.
    pub fn try_new(raw: &str) -> Result<Self, &'static str> {
        let kept = match raw.char_indices().nth(MAX) {
            Some((cut, _)) => &raw[..cut],
            None => raw,
        };
        if kept.is_empty() {
            return Err("must not be empty");
        }
        if kept.contains(FIELD_DELIMITER) {
            return Err("must not contain ','");
        }
        if kept.contains(&['\n', '\r'][..]) {
            return Err("must not contain a line break");
        }
        Ok(BoundedText(kept.to_string()))
    }

    /// Whether `raw` is longer than `MAX` characters and would be cut.
    pub fn would_truncate(raw: &str) -> bool {
        raw.chars().nth(MAX).is_some()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<const MAX: usize> AsRef<str> for BoundedText<MAX> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<const MAX: usize> fmt::Display for BoundedText<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` keeps width flags working for table output.
        f.pad(&self.0)
    }
}

impl<const MAX: usize> PartialEq<&str> for BoundedText<MAX> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_values_are_kept_verbatim() {
        let code = CourseCode::try_new("CS101").unwrap();
        assert_eq!(code, "CS101");
        assert!(!CourseCode::would_truncate("CS101"));
    }

    #[test]
    fn overlong_values_are_cut_to_max_chars() {
        let raw = "A".repeat(40);
        assert!(CourseCode::would_truncate(&raw));
        let code = CourseCode::try_new(&raw).unwrap();
        assert_eq!(code.as_str().len(), CODE_MAX_LEN);
    }

    #[test]
    fn exact_bound_is_not_truncated() {
        let raw = "B".repeat(STATUS_MAX_LEN);
        assert!(!CourseStatus::would_truncate(&raw));
        assert_eq!(CourseStatus::try_new(&raw).unwrap().as_str(), raw);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let raw = "é".repeat(35);
        let text = BoundedText::<4>::try_new(&raw).unwrap();
        assert_eq!(text.as_str(), "éééé");
    }

    #[test]
    fn delimiter_and_line_breaks_are_rejected() {
        assert_eq!(CourseCode::try_new("CS,1"), Err("must not contain ','"));
        assert_eq!(CourseCode::try_new("CS\n1"), Err("must not contain a line break"));
        assert_eq!(CourseCode::try_new("CS1\r"), Err("must not contain a line break"));
        assert_eq!(CourseCode::try_new(""), Err("must not be empty"));
    }

    #[test]
    fn delimiter_past_the_bound_is_cut_off() {
        let raw = format!("{},tail", "C".repeat(CODE_MAX_LEN));
        let code = CourseCode::try_new(&raw).unwrap();
        assert_eq!(code.as_str(), "C".repeat(CODE_MAX_LEN));
    }

    #[test]
    fn display_honours_width() {
        let code = CourseCode::try_new("CS1").unwrap();
        assert_eq!(format!("{:<6}|", code), "CS1   |");
    }
}
