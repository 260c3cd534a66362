//! Errors raised while checking checklist JSON against its schema.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// No schema is registered under this name.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// The document broke its schema; one message per violation.
    #[error("Validation failed: {}", errors.join("; "))]
    ValidationFailed { errors: Vec<String> },

    /// A registered schema could not be compiled into a validator.
    #[error("Schema generation error: {0}")]
    Generation(String),
}
