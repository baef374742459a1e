//! File persistence for the course table.
//!
//! [`CourseStore`] owns a [`CourseTable`](coursereg_core::CourseTable) and
//! the path of its registration file. Records are kept one per line as
//! `id,code,status`.
//!
//! # Modules
//!
//! - [`error`]: StorageError covering I/O and malformed-file failures
//! - [`codec`]: line encoding and decoding of records
//! - [`config`]: StoreConfig (file path and capacity) from the environment
//! - [`store`]: CourseStore with load/save and the CRUD surface

pub mod codec;
pub mod config;
pub mod error;
pub mod store;

pub use codec::{LoadHalt, LoadReport};
pub use config::StoreConfig;
pub use error::StorageError;
pub use store::CourseStore;
