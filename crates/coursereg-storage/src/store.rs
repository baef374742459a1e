//! [`CourseStore`]: the course table bound to its registration file.
//!
//! The table only changes through the CRUD methods and `load`; nothing is
//! written to disk until [`CourseStore::save`] is called.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use coursereg_core::{Course, CourseCode, CourseId, CourseStatus, CourseTable, CoreError};

use crate::codec::{read_records, write_records, LoadHalt, LoadReport};
use crate::config::StoreConfig;
use crate::error::StorageError;

/// Course table plus the file it is loaded from and saved to.
#[derive(Debug, Clone)]
pub struct CourseStore {
    table: CourseTable,
    path: PathBuf,
}

impl CourseStore {
    /// Creates an empty store for `config`. Call [`load`](Self::load) to
    /// read the file.
    pub fn new(config: StoreConfig) -> Self {
        CourseStore {
            table: CourseTable::with_capacity(config.capacity),
            path: config.path,
        }
    }

    /// Creates a store and loads its file.
    ///
    /// An unreadable file is not fatal: the store is returned empty along
    /// with the error so the caller can report it.
    pub fn open(config: StoreConfig) -> (Self, Result<LoadReport, StorageError>) {
        let mut store = Self::new(config);
        let loaded = store.load();
        (store, loaded)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn table(&self) -> &CourseTable {
        &self.table
    }

    /// Replaces the in-memory records with the contents of the file.
    ///
    /// A missing file yields an empty table. Reading stops at the first
    /// malformed line or when the table is full; see [`LoadReport`].
    pub fn load(&mut self) -> Result<LoadReport, StorageError> {
        self.table.clear();

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no registration file, starting empty");
                return Ok(LoadReport::default());
            }
            Err(source) => return Err(self.io_unavailable(source)),
        };

        let report = match read_records(BufReader::new(file), &mut self.table) {
            Ok(report) => report,
            Err(source) => {
                self.table.clear();
                return Err(self.io_unavailable(source));
            }
        };

        match &report.halted {
            Some(LoadHalt::Malformed { line, reason }) => tracing::warn!(
                path = %self.path.display(),
                line,
                %reason,
                "stopped loading at malformed record"
            ),
            Some(LoadHalt::CapacityReached) => tracing::warn!(
                path = %self.path.display(),
                capacity = self.table.capacity(),
                "stopped loading, course list is full"
            ),
            None => {}
        }
        tracing::info!(path = %self.path.display(), loaded = report.loaded, "loaded courses");
        Ok(report)
    }

    /// Overwrites the file with every record in table order. Returns the
    /// number of records written.
    pub fn save(&self) -> Result<usize, StorageError> {
        let file = File::create(&self.path).map_err(|source| self.io_unavailable(source))?;
        let written = write_records(BufWriter::new(file), &self.table)
            .map_err(|source| self.io_unavailable(source))?;
        tracing::info!(path = %self.path.display(), written, "saved courses");
        Ok(written)
    }

    /// Position of the record with `id` in table order.
    pub fn find_by_id(&self, id: CourseId) -> Option<usize> {
        self.table.find_by_id(id)
    }

    /// Adds a record; code and status longer than their bounds are cut.
    pub fn add(&mut self, id: CourseId, code: &str, status: &str) -> Result<(), CoreError> {
        log_truncation(id, code, status);
        self.table.add(id, code, status)?;
        tracing::debug!(%id, "added course");
        Ok(())
    }

    /// Copy of the record with `id`.
    pub fn search(&self, id: CourseId) -> Result<Course, CoreError> {
        self.table.get(id).cloned()
    }

    /// Replaces code and status of the record with `id`.
    pub fn update(&mut self, id: CourseId, code: &str, status: &str) -> Result<(), CoreError> {
        log_truncation(id, code, status);
        self.table.update(id, code, status)?;
        tracing::debug!(%id, "updated course");
        Ok(())
    }

    /// Removes the record with `id` and returns it.
    pub fn delete(&mut self, id: CourseId) -> Result<Course, CoreError> {
        let removed = self.table.remove(id)?;
        tracing::debug!(%id, "deleted course");
        Ok(removed)
    }

    /// Snapshot of all records in table order.
    pub fn list(&self) -> Vec<Course> {
        self.table.to_vec()
    }

    fn io_unavailable(&self, source: io::Error) -> StorageError {
        StorageError::IoUnavailable {
            path: self.path.clone(),
            source,
        }
    }
}

fn log_truncation(id: CourseId, code: &str, status: &str) {
    if CourseCode::would_truncate(code) {
        tracing::debug!(%id, max = CourseCode::MAX_LEN, "truncating course code");
    }
    if CourseStatus::would_truncate(status) {
        tracing::debug!(%id, max = CourseStatus::MAX_LEN, "truncating course status");
    }
}
