//! Session storage module
//!
//! This module persists the login session (auth token and API location)
//! in the system's standard config directory. Data is serialized to JSON
//! format for storage.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SESSION_FILE: &str = "session.json";

/// Errors that can occur during session storage operations
#[derive(Debug, Error)]
pub enum SessionError {
    /// Failed to determine config directory location
    #[error("Failed to determine config directory location")]
    ConfigDirectoryNotFound,

    /// Failed to create or access config directory
    #[error("Failed to create config directory at {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    /// Failed to read the session file
    #[error("Failed to read session file {path}: {source}")]
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write the session file
    #[error("Failed to write session file {path}: {source}")]
    WriteFailed { path: PathBuf, source: io::Error },

    /// Failed to remove the session file
    #[error("Failed to remove session file {path}: {source}")]
    RemoveFailed { path: PathBuf, source: io::Error },

    /// The session file exists but is not valid JSON
    #[error("Failed to deserialize session file {path}: {source}")]
    DeserializationFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to serialize the session
    #[error("Failed to serialize session: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// A logged-in session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Value sent verbatim as the `Authorization` header
    pub token: String,
    /// API root the token was issued for; `None` means the default
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Persistent storage for a single [`Session`]
pub struct SessionStore {
    /// The directory holding the session file
    dir: PathBuf,
}

impl SessionStore {
    /// Opens the session store in the platform config directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn open() -> Result<Self, SessionError> {
        let proj_dirs = directories::ProjectDirs::from("academy", "infinum", "show-details")
            .ok_or(SessionError::ConfigDirectoryNotFound)?;

        Self::at(proj_dirs.config_dir())
    }

    /// Opens a session store rooted at the given directory.
    pub fn at(dir: &Path) -> Result<Self, SessionError> {
        fs::create_dir_all(dir).map_err(|e| SessionError::DirectoryCreationFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn file_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Loads the stored session, or `None` if nobody is logged in.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let file_path = self.file_path();

        if !file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&file_path).map_err(|e| SessionError::ReadFailed {
            path: file_path.clone(),
            source: e,
        })?;

        let session =
            serde_json::from_str(&content).map_err(|e| SessionError::DeserializationFailed {
                path: file_path,
                source: e,
            })?;

        Ok(Some(session))
    }

    /// Stores the session, replacing any previous one.
    pub fn store(&self, session: &Session) -> Result<(), SessionError> {
        let file_path = self.file_path();
        let content = serde_json::to_string_pretty(session)?;

        fs::write(&file_path, content).map_err(|e| SessionError::WriteFailed {
            path: file_path,
            source: e,
        })
    }

    /// Removes the stored session. Clearing an empty store is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        let file_path = self.file_path();

        match fs::remove_file(&file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::RemoveFailed {
                path: file_path,
                source: e,
            }),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
