//! Roster persistence.
//!
//! The whole roster is stored as one pretty-printed JSON array. Every save
//! rewrites the file in full; there is no append, backup or atomic rename,
//! so a failed write can leave the file truncated until the next save.

use crate::character::Character;
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Default snapshot file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "characters.json";

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistError {
    /// The snapshot file the failure concerns.
    pub fn path(&self) -> &Path {
        match self {
            PersistError::Io { path, .. } | PersistError::Json { path, .. } => path,
        }
    }

    /// Whether the file was readable but did not hold a character list,
    /// including content that is not valid UTF-8.
    pub fn is_malformed(&self) -> bool {
        matches!(self, PersistError::Json { .. })
    }
}

/// The snapshot file holding the serialized roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every character from the snapshot.
    ///
    /// A missing file is an empty roster, not an error. A file that exists
    /// but does not parse is reported and left untouched on disk.
    pub async fn load(&self) -> Result<Vec<Character>, PersistError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No snapshot at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(PersistError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let characters: Vec<Character> =
            serde_json::from_slice(&content).map_err(|source| PersistError::Json {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            "Loaded {} characters from {}",
            characters.len(),
            self.path.display()
        );
        Ok(characters)
    }

    /// Overwrite the snapshot with the full roster.
    pub async fn save(&self, characters: &[Character]) -> Result<(), PersistError> {
        let content = to_snapshot(characters).map_err(|source| PersistError::Json {
            path: self.path.clone(),
            source,
        })?;

        fs::write(&self.path, content)
            .await
            .map_err(|source| PersistError::Io {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            "Saved {} characters to {}",
            characters.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

/// Render the roster the way it is written to disk (two-space indentation).
pub fn to_snapshot(characters: &[Character]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(characters)
}
