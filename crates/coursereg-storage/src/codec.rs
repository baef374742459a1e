//! Line format of the registration file.
//!
//! Each record is one line `id,code,status` terminated by `\n`. Reading
//! stops at the first line that does not have this shape; everything
//! before it is kept. Blank lines are skipped and a trailing `\r` is
//! ignored.

use std::io::{self, BufRead, Write};

use coursereg_core::{
    Course, CourseCode, CourseId, CourseStatus, CourseTable, CoreError, FIELD_DELIMITER,
};

use crate::error::StorageError;

/// Outcome of reading a registration file into a table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Records now in the table.
    pub loaded: usize,
    /// Why reading stopped before the end of the file, if it did.
    pub halted: Option<LoadHalt>,
}

/// Reason a load stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadHalt {
    /// Line `line` (1-based) is not a valid record; it and everything after
    /// it were skipped.
    Malformed { line: usize, reason: String },
    /// The table filled up while records remained.
    CapacityReached,
}

/// Formats one record as a line, without the terminator.
pub fn encode_line(course: &Course) -> String {
    format!(
        "{}{d}{}{d}{}",
        course.id,
        course.code,
        course.status,
        d = FIELD_DELIMITER
    )
}

/// Writes every record as one `\n`-terminated line. Returns the number
/// of records written.
pub fn write_records<'a, W, I>(mut out: W, courses: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Course>,
{
    let mut written = 0;
    for course in courses {
        writeln!(out, "{}", encode_line(course))?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}

/// Parses a single line into a record. `line_no` is only used for the
/// error.
pub fn parse_line(line: &str, line_no: usize) -> Result<Course, StorageError> {
    parse_fields(line).map_err(|reason| StorageError::MalformedRecord {
        line: line_no,
        reason,
    })
}

fn parse_fields(line: &str) -> Result<Course, String> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    let [id, code, status] = fields.as_slice() else {
        return Err(format!("expected 3 fields, found {}", fields.len()));
    };

    let id: CourseId = id.parse().map_err(|_| format!("invalid id '{}'", id))?;
    if CourseCode::would_truncate(code) || CourseStatus::would_truncate(status) {
        tracing::debug!(%id, "truncating overlong field read from disk");
    }
    let code = CourseCode::try_new(code).map_err(|reason| format!("code {reason}"))?;
    let status = CourseStatus::try_new(status).map_err(|reason| format!("status {reason}"))?;

    Ok(Course { id, code, status })
}

/// Appends records read from `input` to `table` until the input ends, a
/// malformed line is met, or the table is full.
///
/// Only I/O failures are returned as errors; format problems (including a
/// line that is not valid UTF-8) end the read and are described in the
/// report.
pub fn read_records<R: BufRead>(mut input: R, table: &mut CourseTable) -> io::Result<LoadReport> {
    let mut halted = None;
    let mut raw = Vec::new();
    let mut line_no = 0;

    loop {
        raw.clear();
        if input.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        line_no += 1;
        let bytes = raw.strip_suffix(b"\n").unwrap_or(&raw[..]);
        if bytes.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        if table.is_full() {
            halted = Some(LoadHalt::CapacityReached);
            break;
        }

        if let Err(err) = insert_line(table, bytes, line_no) {
            let (line, reason) = match err {
                StorageError::MalformedRecord { line, reason } => (line, reason),
                other => (line_no, other.to_string()),
            };
            halted = Some(LoadHalt::Malformed { line, reason });
            break;
        }
    }

    Ok(LoadReport {
        loaded: table.len(),
        halted,
    })
}

/// Decodes, parses and inserts one line. A repeated id counts as a
/// malformed record.
fn insert_line(table: &mut CourseTable, bytes: &[u8], line_no: usize) -> Result<(), StorageError> {
    let line = std::str::from_utf8(bytes).map_err(|_| StorageError::MalformedRecord {
        line: line_no,
        reason: "invalid UTF-8".to_string(),
    })?;
    let course = parse_line(line, line_no)?;
    table.insert(course).map_err(|err| StorageError::MalformedRecord {
        line: line_no,
        reason: match err {
            CoreError::DuplicateId { id } => format!("duplicate id {id}"),
            other => other.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_of(rows: &[(i32, &str, &str)]) -> CourseTable {
        let mut table = CourseTable::new();
        for &(id, code, status) in rows {
            table.add(CourseId(id), code, status).unwrap();
        }
        table
    }

    fn read(text: &str, capacity: usize) -> (CourseTable, LoadReport) {
        let mut table = CourseTable::with_capacity(capacity);
        let report = read_records(text.as_bytes(), &mut table).unwrap();
        (table, report)
    }

    #[test]
    fn written_file_layout() {
        let table = table_of(&[(1, "CS101", "Active"), (20, "MATH 2", "Closed")]);
        let mut buf = Vec::new();
        let written = write_records(&mut buf, &table).unwrap();
        assert_eq!(written, 2);

        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with('\n'));
        insta::assert_snapshot!(text, @r"
        1,CS101,Active
        20,MATH 2,Closed
        ");
    }

    #[test]
    fn empty_table_writes_nothing() {
        let mut buf = Vec::new();
        assert_eq!(write_records(&mut buf, &CourseTable::new()).unwrap(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn parse_line_accepts_padded_id_and_crlf() {
        let course = parse_line(" 12,CS1,Active\r", 1).unwrap();
        assert_eq!(course.id, CourseId(12));
        assert_eq!(course.code, "CS1");
        assert_eq!(course.status, "Active");
    }

    #[test]
    fn parse_line_rejects_wrong_shapes() {
        let cases = [
            ("bad-line", "expected 3 fields, found 1"),
            ("1,CS1", "expected 3 fields, found 2"),
            ("1,CS1,Active,extra", "expected 3 fields, found 4"),
            ("x,CS1,Active", "invalid id 'x'"),
            ("1,,Active", "code must not be empty"),
            ("1,CS1,", "status must not be empty"),
        ];
        for (line, expected) in cases {
            match parse_line(line, 4) {
                Err(StorageError::MalformedRecord { line: 4, reason }) => {
                    assert_eq!(reason, expected, "line {line:?}")
                }
                other => panic!("expected malformed record for {line:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn reading_stops_at_first_malformed_line() {
        let (table, report) = read("10,CS1,Active\nbad-line\n20,CS2,Closed\n", 512);
        assert_eq!(report.loaded, 1);
        assert_eq!(
            report.halted,
            Some(LoadHalt::Malformed {
                line: 2,
                reason: "expected 3 fields, found 1".into(),
            })
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(CourseId(10)).unwrap().code, "CS1");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let (table, report) = read("\n1,A,S\n\n   \n2,B,S", 512);
        assert_eq!(report.halted, None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn duplicate_id_halts_reading() {
        let (table, report) = read("1,A,S\n1,B,S\n2,C,S\n", 512);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(CourseId(1)).unwrap().code, "A");
        assert_eq!(
            report.halted,
            Some(LoadHalt::Malformed {
                line: 2,
                reason: "duplicate id 1".into(),
            })
        );
    }

    #[test]
    fn capacity_halts_reading() {
        let (table, report) = read("1,A,S\n2,B,S\n3,C,S\n", 2);
        assert_eq!(table.len(), 2);
        assert_eq!(report.halted, Some(LoadHalt::CapacityReached));
    }

    #[test]
    fn exactly_full_file_is_not_a_halt() {
        let (table, report) = read("1,A,S\n2,B,S\n", 2);
        assert_eq!(table.len(), 2);
        assert_eq!(report.halted, None);
    }

    #[test]
    fn overlong_fields_are_truncated_on_read() {
        let line = format!("1,{},{}", "C".repeat(40), "S".repeat(33));
        let course = parse_line(&line, 1).unwrap();
        assert_eq!(course.code.as_str().len(), coursereg_core::CODE_MAX_LEN);
        assert_eq!(course.status.as_str().len(), coursereg_core::STATUS_MAX_LEN);
    }

    #[test]
    fn invalid_utf8_line_halts_but_keeps_earlier_records() {
        let mut table = CourseTable::new();
        let bytes: &[u8] = b"10,CS1,Active\n11,CS2,Active\n12,CS3,Caf\xe9\n13,CS4,Closed\n";
        let report = read_records(bytes, &mut table).unwrap();

        let ids: Vec<_> = table.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![10, 11]);
        assert_eq!(
            report.halted,
            Some(LoadHalt::Malformed {
                line: 3,
                reason: "invalid UTF-8".into(),
            })
        );
    }

    #[test]
    fn line_numbers_count_blank_lines() {
        let (_, report) = read("1,A,S\n\nbroken\n", 512);
        assert!(matches!(report.halted, Some(LoadHalt::Malformed { line: 3, .. })));
    }
}
