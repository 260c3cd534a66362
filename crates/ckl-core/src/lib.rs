//! # ckl-core
//!
//! Core types, task state rules, and error types for Checklist++.
//!
//! This crate provides the foundational types shared across all Checklist++ crates:
//! - Entity structs (tasks and the on-disk checklist file)
//! - Priority, kanban status, view and action enums
//! - Cross-cutting error types
//! - CLI response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
