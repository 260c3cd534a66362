//! CLI response types returned as JSON by `ckl` commands.
//!
//! These structs define the shape of JSON output for commands like
//! `ckl checklist list`, `ckl checklist summary`, `ckl undo`, `ckl task start`,
//! `ckl checklist import`, and `ckl export`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Task;
use crate::enums::Action;

/// Counts and totals for one checklist.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChecklistSummary {
    pub name: String,
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub todo: usize,
    /// Share of completed tasks, rounded down, 0 for an empty checklist.
    pub percent_complete: u8,
    pub elapsed_ms: u64,
}

/// One row of `ckl checklist list`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChecklistEntry {
    pub name: String,
    pub active: bool,
    pub total: usize,
    pub completed: usize,
}

/// Response from `ckl task start` / `ckl task stop`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimerResponse {
    pub task: Task,
    /// `false` when the timer was already in the requested state.
    pub changed: bool,
}

/// Response from `ckl undo`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UndoResponse {
    pub checklist: String,
    /// The reverted action, `None` when there was nothing to undo.
    pub undone: Option<Action>,
}

/// Response from `ckl checklist import`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportResponse {
    pub name: String,
    pub tasks: usize,
    pub source: String,
}

/// Response from `ckl export`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportResponse {
    pub checklist: String,
    pub path: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
}
