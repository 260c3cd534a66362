use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Task;
use crate::errors::CoreError;

/// Current on-disk format version of a checklist file.
pub const CHECKLIST_FILE_VERSION: u32 = 1;

/// On-disk representation of one checklist (`<data_dir>/<name>.json`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ChecklistFile {
    pub version: u32,
    pub name: String,
    /// Next id to hand out. Ids are never reused, even after deletion.
    pub next_id: u64,
    pub tasks: Vec<Task>,
}

impl ChecklistFile {
    #[must_use]
    pub fn empty(name: &str) -> Self {
        Self {
            version: CHECKLIST_FILE_VERSION,
            name: name.to_string(),
            next_id: 1,
            tasks: Vec::new(),
        }
    }

    /// Build a file from a bare task list, deriving `next_id` from the ids.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the highest id is `u64::MAX` and
    /// no id is left to allocate.
    pub fn from_tasks(name: &str, tasks: Vec<Task>) -> Result<Self, CoreError> {
        let next_id = match tasks.iter().map(|t| t.id).max() {
            Some(max) => id_after(max)?,
            None => 1,
        };
        Ok(Self {
            version: CHECKLIST_FILE_VERSION,
            name: name.to_string(),
            next_id,
            tasks,
        })
    }

    /// Check id uniqueness, id allocation, and every task's invariants.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` describing the first problem found.
    pub fn check_invariants(&self) -> Result<(), CoreError> {
        if self.version != CHECKLIST_FILE_VERSION {
            return Err(CoreError::Validation(format!(
                "unsupported checklist file version {}",
                self.version
            )));
        }
        let mut seen = HashSet::with_capacity(self.tasks.len());
        for task in &self.tasks {
            if !seen.insert(task.id) {
                return Err(CoreError::Validation(format!(
                    "duplicate task id {}",
                    task.id
                )));
            }
            if task.id == 0 || task.id >= self.next_id {
                return Err(CoreError::Validation(format!(
                    "task id {} is outside the allocated range 1..{}",
                    task.id, self.next_id
                )));
            }
            task.check_invariants()?;
        }
        Ok(())
    }
}

/// The id allocated after `id`.
///
/// # Errors
///
/// Returns `CoreError::Validation` when the id space is exhausted.
pub fn id_after(id: u64) -> Result<u64, CoreError> {
    id.checked_add(1)
        .ok_or_else(|| CoreError::Validation(format!("task id {id} leaves no id to allocate")))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::enums::Priority;

    fn task(id: u64) -> Task {
        Task::new(id, "task", Priority::Medium, Utc::now()).unwrap()
    }

    #[test]
    fn from_tasks_allocates_past_highest_id() {
        let file = ChecklistFile::from_tasks("work", vec![task(3), task(7)]).unwrap();
        assert_eq!(file.next_id, 8);
        assert!(file.check_invariants().is_ok());
    }

    #[test]
    fn from_empty_tasks_starts_at_one() {
        assert_eq!(ChecklistFile::from_tasks("x", Vec::new()).unwrap().next_id, 1);
        assert_eq!(ChecklistFile::empty("x").next_id, 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut file = ChecklistFile::from_tasks("work", vec![task(1), task(2)]).unwrap();
        file.tasks[1].id = 1;
        assert!(file.check_invariants().is_err());
    }

    #[test]
    fn unallocated_ids_are_rejected() {
        let mut file = ChecklistFile::from_tasks("work", vec![task(1)]).unwrap();
        file.next_id = 1;
        assert!(file.check_invariants().is_err());
    }

    #[test]
    fn highest_possible_id_cannot_allocate_a_successor() {
        let err = ChecklistFile::from_tasks("work", vec![task(u64::MAX)]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(id_after(41).unwrap(), 42);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut file = ChecklistFile::empty("work");
        file.version = 99;
        assert!(file.check_invariants().is_err());
    }
}
