//! State file on disk.
//!
//! Saves go through a sibling `<name>.tmp` file that is flushed and then
//! renamed over the target, so readers only ever see a complete file.

use powerwatch_core::PersistedState;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to read state {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("state file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write state {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StateError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StateError::Read { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

pub fn load_state(path: &Path) -> Result<PersistedState, StateError> {
    let s = fs::read_to_string(path).map_err(|source| StateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&s).map_err(|source| StateError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Load prior state; a missing or unreadable file counts as no prior state.
pub fn load_or_default(path: &Path) -> PersistedState {
    match load_state(path) {
        Ok(state) => state,
        Err(e) if e.is_not_found() => {
            debug!(path = %path.display(), "no state file yet");
            PersistedState::default()
        }
        Err(e) => {
            warn!(error = %e, "ignoring unreadable state");
            PersistedState::default()
        }
    }
}

pub fn save_state(path: &Path, state: &PersistedState) -> Result<(), StateError> {
    let tmp = write_temp(path, state)?;
    commit(&tmp, path)
}

pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// First half of a save: the new contents land next to the target.
pub(crate) fn write_temp(path: &Path, state: &PersistedState) -> Result<PathBuf, StateError> {
    let write_err = |source: io::Error| StateError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(write_err)?;
    }

    let json = serde_json::to_string_pretty(state)?;
    let tmp = temp_path(path);
    let mut file = File::create(&tmp).map_err(write_err)?;
    file.write_all(json.as_bytes()).map_err(write_err)?;
    file.sync_all().map_err(write_err)?;
    Ok(tmp)
}

/// Second half of a save: atomically replace the target.
pub(crate) fn commit(tmp: &Path, path: &Path) -> Result<(), StateError> {
    fs::rename(tmp, path).map_err(|source| StateError::Write {
        path: path.to_path_buf(),
        source,
    })
}
