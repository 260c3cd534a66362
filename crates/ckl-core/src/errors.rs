//! Cross-cutting error types for Checklist++.
//!
//! Errors raised by the task state rules in this crate. Storage-level errors
//! (`StoreError`) live in `ckl-store`.

use thiserror::Error;

/// Errors that can be raised by any Checklist++ crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A kanban move was attempted past the edge of the board.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation (empty title, out-of-range progress, ...).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for a missing task.
    #[must_use]
    pub fn task_not_found(id: u64) -> Self {
        Self::NotFound {
            entity_type: String::from("task"),
            id: id.to_string(),
        }
    }

    /// Shorthand for a missing checklist.
    #[must_use]
    pub fn checklist_not_found(name: &str) -> Self {
        Self::NotFound {
            entity_type: String::from("checklist"),
            id: name.to_string(),
        }
    }
}
