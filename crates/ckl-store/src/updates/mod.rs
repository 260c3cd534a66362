//! Update builder types for task edits.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields are applied to the task.

pub mod task;
