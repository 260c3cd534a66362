//! Kanban column and task name limits.

use serde::{Deserialize, Serialize};

const fn default_todo() -> usize {
    10
}

const fn default_progress() -> usize {
    3
}

const fn default_done() -> usize {
    10
}

const fn default_taskname() -> usize {
    40
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct LimitsConfig {
    /// WIP limit of the Todo column.
    #[serde(default = "default_todo")]
    pub todo: usize,

    /// WIP limit of the In Progress column.
    #[serde(default = "default_progress")]
    pub progress: usize,

    /// Display cap of the Done column.
    #[serde(default = "default_done")]
    pub done: usize,

    /// Maximum task title length accepted by the CLI.
    #[serde(default = "default_taskname")]
    pub taskname: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            todo: default_todo(),
            progress: default_progress(),
            done: default_done(),
            taskname: default_taskname(),
        }
    }
}

impl LimitsConfig {
    /// First field that is zero, if any.
    #[must_use]
    pub const fn first_zero_field(&self) -> Option<&'static str> {
        if self.todo == 0 {
            Some("limits.todo")
        } else if self.progress == 0 {
            Some("limits.progress")
        } else if self.done == 0 {
            Some("limits.done")
        } else if self.taskname == 0 {
            Some("limits.taskname")
        } else {
            None
        }
    }
}
