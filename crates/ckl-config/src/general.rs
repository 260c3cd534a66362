//! General application configuration.

use std::path::{Path, PathBuf};

use ckl_core::enums::ViewKind;
use serde::{Deserialize, Serialize};

/// Directory name used under the platform data directory.
pub const APP_DIR_NAME: &str = "checklist-plus";

const fn default_repaint() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Where checklist JSON files live. Empty means the platform data dir.
    #[serde(default)]
    pub data_dir: String,

    /// Where markdown exports go. Empty means `<data_dir>/exports`.
    #[serde(default)]
    pub export_dir: String,

    /// View the shell starts in.
    #[serde(default)]
    pub default_view: ViewKind,

    /// Re-render the active view after each shell mutation.
    #[serde(default = "default_repaint")]
    pub repaint: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            export_dir: String::new(),
            default_view: ViewKind::Checklist,
            repaint: default_repaint(),
        }
    }
}

impl GeneralConfig {
    /// Resolve the checklist directory, falling back to the platform data dir.
    #[must_use]
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        if self.data_dir.is_empty() {
            dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME))
        } else {
            Some(expand_home(&self.data_dir))
        }
    }

    /// Resolve the export directory for a given data directory.
    #[must_use]
    pub fn resolved_export_dir(&self, data_dir: &Path) -> PathBuf {
        if self.export_dir.is_empty() {
            data_dir.join("exports")
        } else {
            expand_home(&self.export_dir)
        }
    }
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}
