//! Store configuration.
//!
//! Reads from environment variables:
//! - `COURSEREG_FILE`: registration file path (default: "regs.txt")
//! - `COURSEREG_CAPACITY`: maximum number of records (default: 512)

use std::path::PathBuf;

use coursereg_core::DEFAULT_CAPACITY;

/// Default registration file, relative to the working directory.
pub const DEFAULT_FILE: &str = "regs.txt";

pub const FILE_ENV: &str = "COURSEREG_FILE";
pub const CAPACITY_ENV: &str = "COURSEREG_CAPACITY";

/// Where records are persisted and how many the table may hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub capacity: usize,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        StoreConfig {
            path: path.into(),
            capacity,
        }
    }

    /// Builds a config from `COURSEREG_FILE` and `COURSEREG_CAPACITY`,
    /// falling back to the defaults for unset or unusable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup(FILE_ENV)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE));

        let capacity = match lookup(CAPACITY_ENV) {
            None => DEFAULT_CAPACITY,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        "ignoring unusable {CAPACITY_ENV}, using {DEFAULT_CAPACITY}"
                    );
                    DEFAULT_CAPACITY
                }
            },
        };

        StoreConfig { path, capacity }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(DEFAULT_FILE, DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = StoreConfig::from_lookup(lookup_in(&[]));
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.path, PathBuf::from("regs.txt"));
        assert_eq!(config.capacity, 512);
    }

    #[test]
    fn reads_both_variables() {
        let config = StoreConfig::from_lookup(lookup_in(&[
            ("COURSEREG_FILE", "/tmp/courses.txt"),
            ("COURSEREG_CAPACITY", "16"),
        ]));
        assert_eq!(config.path, PathBuf::from("/tmp/courses.txt"));
        assert_eq!(config.capacity, 16);
    }

    #[test]
    fn bad_capacity_falls_back() {
        for raw in ["zero", "0", "-4", ""] {
            let config = StoreConfig::from_lookup(lookup_in(&[("COURSEREG_CAPACITY", raw)]));
            assert_eq!(config.capacity, DEFAULT_CAPACITY, "value {raw:?}");
        }
    }
}
