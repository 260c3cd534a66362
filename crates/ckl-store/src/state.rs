//! Manager state persisted between invocations (`<data_dir>/state.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::persist::write_bytes_atomic;

pub const STATE_FILE: &str = "state.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManagerState {
    /// Name of the active checklist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
}

impl ManagerState {
    #[must_use]
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(STATE_FILE)
    }

    /// Read the state file. A missing file is an empty state.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file exists but cannot be read, and
    /// `StoreError::StateRead` if it is not valid TOML.
    pub fn load(data_dir: &Path) -> Result<Self, StoreError> {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        Ok(toml::from_str(&raw)?)
    }

    /// # Errors
    ///
    /// Returns `StoreError::StateWrite` or `StoreError::Io` on failure.
    pub fn save(&self, data_dir: &Path) -> Result<(), StoreError> {
        let raw = toml::to_string(self)?;
        write_bytes_atomic(&Self::path(data_dir), raw.trim_end().as_bytes())
    }
}
