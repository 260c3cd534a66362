//! # ckl-schema
//!
//! JSON Schema generation, validation, and registry for Checklist++.
//!
//! Entity types are defined in `ckl-core` with `#[derive(JsonSchema)]`.
//! This crate builds their schemas and validates external JSON (imported
//! checklist files) before it is deserialized. The `ckl schema` command
//! exports the same schemas for editors and other tooling.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
