//! Roster configuration.

use crate::persist::{Store, DEFAULT_DATA_FILE};
use std::path::PathBuf;

/// Environment variable naming the snapshot file.
pub const DATA_FILE_ENV: &str = "CHARSHEET_FILE";

/// Configuration for a roster session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    /// Where the roster snapshot lives.
    pub data_file: PathBuf,
}

impl RosterConfig {
    pub fn new() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }

    /// Defaults, with `CHARSHEET_FILE` applied when set and non-empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let config = Self::new();
        match lookup(DATA_FILE_ENV) {
            Some(path) if !path.trim().is_empty() => config.with_data_file(path),
            _ => config,
        }
    }

    /// Set the snapshot file.
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    pub fn store(&self) -> Store {
        Store::new(&self.data_file)
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self::new()
    }
}
