//! One-shot subcommands: load the file, apply one operation, save if the
//! table changed.

use std::io::{self, Write};

use coursereg_core::{CoreError, CourseId};
use coursereg_storage::{CourseStore, StorageError};
use thiserror::Error;

use crate::render;

/// Exit code for a refused table operation (not found, duplicate, full,
/// invalid field).
pub const EXIT_REFUSED: i32 = 1;
/// Exit code for an unreadable or unwritable registration file.
pub const EXIT_IO: i32 = 3;

/// A single store operation requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List { json: bool },
    Search { id: CourseId, json: bool },
    Add { id: CourseId, code: String, status: String },
    Update { id: CourseId, code: String, status: String },
    Delete { id: CourseId },
}

impl Operation {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Operation::Add { .. } | Operation::Update { .. } | Operation::Delete { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        CommandError::Storage(StorageError::Core(err))
    }
}

impl CommandError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Storage(StorageError::Core(_)) => EXIT_REFUSED,
            CommandError::Storage(_) | CommandError::Output(_) => EXIT_IO,
            CommandError::Json(_) => EXIT_REFUSED,
        }
    }

    /// Text shown to the user on stderr.
    pub fn message(&self) -> String {
        match self {
            CommandError::Storage(err) => render::storage_error(err),
            other => other.to_string(),
        }
    }
}

/// Applies `op` to an already loaded store, writing results to `out`.
pub fn execute<W: Write>(
    store: &mut CourseStore,
    op: &Operation,
    out: &mut W,
) -> Result<(), CommandError> {
    match op {
        Operation::List { json: false } => render::write_table(out, store.table().as_slice())?,
        Operation::List { json: true } => {
            writeln!(out, "{}", serde_json::to_string_pretty(&store.list())?)?
        }
        Operation::Search { id, json } => {
            let course = store.search(*id)?;
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&course)?)?;
            } else {
                writeln!(out, "{}", render::found(&course))?;
            }
        }
        Operation::Add { id, code, status } => {
            store.add(*id, code, status)?;
            writeln!(out, "Course added.")?;
        }
        Operation::Update { id, code, status } => {
            store.update(*id, code, status)?;
            writeln!(out, "Course updated.")?;
        }
        Operation::Delete { id } => {
            store.delete(*id)?;
            writeln!(out, "Course deleted.")?;
        }
    }

    if op.mutates() {
        let saved = store.save()?;
        writeln!(
            out,
            "Saved {saved} record(s) to '{}'.",
            store.path().display()
        )?;
    }
    Ok(())
}
