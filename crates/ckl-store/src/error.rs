//! Storage error types for ckl-store.

use std::path::Path;

use ckl_core::errors::CoreError;
use thiserror::Error;

/// Errors from checklist store and manager operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Task-level rule violation or lookup failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A checklist with this name already exists.
    #[error("Checklist already exists: {name}")]
    Conflict { name: String },

    /// A persisted or imported file is not a valid checklist.
    #[error("Invalid checklist file {path}: {reason}")]
    Format { path: String, reason: String },

    /// Filesystem read or write failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Serializing a checklist to JSON failed.
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The manager state file could not be parsed.
    #[error("Invalid state file: {0}")]
    StateRead(#[from] toml::de::Error),

    /// The manager state could not be encoded.
    #[error("Failed to encode state file: {0}")]
    StateWrite(#[from] toml::ser::Error),
}

/// The five error kinds surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Format,
    Io,
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn format(path: &Path, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    /// Classify this error for presentation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Core(CoreError::NotFound { .. }) => ErrorKind::NotFound,
            Self::Core(CoreError::Validation(_) | CoreError::InvalidTransition { .. }) => {
                ErrorKind::Validation
            }
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Format { .. } | Self::StateRead(_) => ErrorKind::Format,
            Self::Io { .. } | Self::Serialize(_) | Self::StateWrite(_) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_classify_by_variant() {
        let not_found = StoreError::from(CoreError::task_not_found(3));
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let invalid = StoreError::from(CoreError::Validation(String::from("bad")));
        assert_eq!(invalid.kind(), ErrorKind::Validation);

        let edge = StoreError::from(CoreError::InvalidTransition {
            entity_type: String::from("task"),
            id: String::from("1"),
            from: String::from("done"),
            to: String::from("beyond done"),
        });
        assert_eq!(edge.kind(), ErrorKind::Validation);
    }

    #[test]
    fn storage_errors_classify_by_variant() {
        let conflict = StoreError::Conflict {
            name: String::from("work"),
        };
        assert_eq!(conflict.kind(), ErrorKind::Conflict);

        let format = StoreError::format(Path::new("x.json"), "not json");
        assert_eq!(format.kind(), ErrorKind::Format);
        assert!(format.to_string().contains("x.json"));

        let io = StoreError::io(
            Path::new("x.json"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(io.kind(), ErrorKind::Io);
    }
}
