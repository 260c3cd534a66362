//! Single-level undo history.

use ckl_core::entities::Task;
use ckl_core::enums::Action;
use serde::{Deserialize, Serialize};

/// Task sequence captured before a mutating operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UndoEntry {
    pub action: Action,
    pub tasks: Vec<Task>,
}

/// Holds zero or one snapshot. Recording replaces the previous snapshot and
/// taking it empties the history, so two undos in a row never re-apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoHistory {
    entry: Option<UndoEntry>,
}

impl UndoHistory {
    #[must_use]
    pub const fn from_entry(entry: Option<UndoEntry>) -> Self {
        Self { entry }
    }

    pub fn record(&mut self, entry: UndoEntry) {
        self.entry = Some(entry);
    }

    pub const fn take(&mut self) -> Option<UndoEntry> {
        self.entry.take()
    }

    #[must_use]
    pub const fn peek(&self) -> Option<&UndoEntry> {
        self.entry.as_ref()
    }

    #[must_use]
    pub fn pending_action(&self) -> Option<Action> {
        self.entry.as_ref().map(|entry| entry.action)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}
