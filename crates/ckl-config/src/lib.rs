//! # ckl-config
//!
//! Layered configuration loading for Checklist++ using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CHECKLIST_*` prefix, `__` as separator)
//! 2. Project-level `.checklist.toml`
//! 3. User-level `~/.config/checklist-plus/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CHECKLIST_LIMITS__TODO` -> `limits.todo`,
//! `CHECKLIST_GENERAL__DATA_DIR` -> `general.data_dir`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use ckl_config::CklConfig;
//!
//! let config = CklConfig::load_with_dotenv().expect("config");
//! println!("WIP limit: {}", config.limits.progress);
//! ```

mod display;
mod error;
mod general;
mod limits;

pub use display::DisplayConfig;
pub use error::ConfigError;
pub use general::{APP_DIR_NAME, GeneralConfig};
pub use limits::LimitsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file name, looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = ".checklist.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CHECKLIST_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CklConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl CklConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values that would make the tool unusable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(field) = self.limits.first_zero_field() {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                reason: String::from("must be greater than zero"),
            });
        }
        Ok(())
    }

    /// Resolved checklist directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoDataDir` when nothing is configured and the
    /// platform has no data directory.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        self.general
            .resolved_data_dir()
            .ok_or(ConfigError::NoDataDir)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR_NAME).join("config.toml"))
    }
}
