//! The state file on disk.
//!
//! Writes go to a temporary file in the same directory which is then
//! renamed over `state.json`, so a crash mid-write never leaves a
//! half-written file behind. A file that could not be read is moved aside
//! to `state.json.corrupt` (or the next free `state.json.corrupt.N`)
//! before the first save replaces it.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use gitpet_types::PetState;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::error::StoreError;
use crate::merge::merge_state;
use crate::{LoadOrigin, LoadedState, StateStore};

/// Directory name under the per-user configuration directory.
pub const APP_DIR_NAME: &str = "git-pet";

/// File name of the state document.
pub const STATE_FILE_NAME: &str = "state.json";

/// Extension appended to an unreadable state file when it is set aside.
pub const CORRUPT_EXTENSION: &str = "corrupt";

/// Resolve the directory holding the state file.
///
/// `home_override` (from `GIT_PET_HOME`) wins; otherwise
/// `<config dir>/git-pet`, e.g. `~/.config/git-pet` on Linux.
pub fn default_state_dir(home_override: Option<&Path>) -> Result<PathBuf, StoreError> {
    if let Some(dir) = home_override {
        return Ok(dir.to_path_buf());
    }
    dirs::config_dir()
        .map(|base| base.join(APP_DIR_NAME))
        .ok_or(StoreError::NoStateDir)
}

/// JSON file-backed [`StateStore`].
#[derive(Debug)]
pub struct JsonStateStore {
    path: PathBuf,
    /// Set when the last load found an unreadable file that has not been
    /// set aside yet.
    unreadable_on_disk: bool,
}

impl JsonStateStore {
    /// A store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            unreadable_on_disk: false,
        }
    }

    /// A store backed by `state.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STATE_FILE_NAME))
    }

    /// Path of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable state file is moved before it is replaced.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(CORRUPT_EXTENSION);
        PathBuf::from(name)
    }

    /// The first backup name not already taken: `state.json.corrupt`, then
    /// `state.json.corrupt.1`, `.2`, ... Earlier backups are never replaced.
    fn free_backup_path(&self) -> Result<PathBuf, StoreError> {
        let first = self.backup_path();
        if !first.exists() {
            return Ok(first);
        }
        (1..=u32::MAX)
            .map(|n| {
                let mut name = first.as_os_str().to_owned();
                name.push(format!(".{n}"));
                PathBuf::from(name)
            })
            .find(|candidate| !candidate.exists())
            .ok_or_else(|| StoreError::io(&first, ErrorKind::AlreadyExists.into()))
    }

    fn recover(&mut self, now: DateTime<Utc>, reason: String) -> LoadedState {
        warn!(path = %self.path.display(), reason = %reason, "state file unreadable, using defaults");
        self.unreadable_on_disk = true;
        LoadedState {
            state: PetState::new(now),
            origin: LoadOrigin::Recovered { reason },
        }
    }

    fn set_aside_unreadable(&mut self) -> Result<(), StoreError> {
        if !self.unreadable_on_disk {
            return Ok(());
        }
        if self.path.exists() {
            let backup = self.free_backup_path()?;
            fs::rename(&self.path, &backup).map_err(|e| StoreError::io(&self.path, e))?;
            warn!(backup = %backup.display(), "preserved unreadable state file");
        }
        self.unreadable_on_disk = false;
        Ok(())
    }
}

impl StateStore for JsonStateStore {
    fn load(&mut self, now: DateTime<Utc>) -> LoadedState {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no state file yet, hatching a new pet");
                self.unreadable_on_disk = false;
                return LoadedState {
                    state: PetState::new(now),
                    origin: LoadOrigin::Fresh,
                };
            }
            Err(e) => return self.recover(now, e.to_string()),
        };

        let raw = match serde_json::from_str(&text) {
            Ok(raw) => raw,
            Err(e) => return self.recover(now, e.to_string()),
        };

        match merge_state(raw, now) {
            Ok(merged) => {
                self.unreadable_on_disk = false;
                debug!(
                    path = %self.path.display(),
                    repairs = merged.repairs.len(),
                    "state loaded"
                );
                LoadedState {
                    state: merged.state,
                    origin: LoadOrigin::Stored {
                        repairs: merged.repairs,
                    },
                }
            }
            Err(e) => self.recover(now, e.to_string()),
        }
    }

    fn save(&mut self, state: &PetState) -> Result<(), StoreError> {
        if let Err(e) = state.validate() {
            warn!(error = %e, "refusing to save invalid state");
            return Err(StoreError::Invalid(e));
        }
        let mut json = serde_json::to_string_pretty(state)?;
        json.push('\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;

        self.set_aside_unreadable()?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| StoreError::io(&dir, e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)?;

        debug!(path = %self.path.display(), bytes = json.len(), "state saved");
        Ok(())
    }
}
