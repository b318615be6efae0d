//! Persistence for the single best score.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

const HIGH_SCORE_FILE: &str = "high_score.json";
const FALLBACK_DIR: &str = ".timed-quiz";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode high score for {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Where the high score lives. A disabled store keeps nothing on disk.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: Option<PathBuf>,
}

impl HighScoreStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A store that never touches the filesystem.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// Per-user data directory, falling back to `./.timed-quiz`.
    pub fn default_path() -> PathBuf {
        data_dir().join(HIGH_SCORE_FILE)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the stored high score. A missing file counts as 0.
    pub fn load(&self) -> Result<u32, StorageError> {
        let Some(path) = &self.path else {
            return Ok(0);
        };

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no stored high score");
                return Ok(0);
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: path.clone(),
                    source,
                });
            }
        };

        let record: HighScoreRecord =
            serde_json::from_str(&content).map_err(|source| StorageError::Decode {
                path: path.clone(),
                source,
            })?;
        Ok(record.high_score)
    }

    pub fn save(&self, high_score: u32) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let io_err = |source: io::Error| StorageError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score }).map_err(
            |source| StorageError::Encode {
                path: path.clone(),
                source,
            },
        )?;
        fs::write(path, json).map_err(io_err)?;

        info!(path = %path.display(), high_score, "saved high score");
        Ok(())
    }
}

/// Per-user data directory for everything the quiz writes.
pub fn data_dir() -> PathBuf {
    ProjectDirs::from("dev", "timed-quiz", "timed-quiz")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR))
}
