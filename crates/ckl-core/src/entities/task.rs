use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Priority, TaskStatus};
use crate::errors::CoreError;

/// Highest accepted progress percentage.
pub const MAX_PROGRESS: u8 = 100;

/// A single to-do item with priority, completion, progress, and timer metadata.
///
/// `completed`, `progress == 100`, and `status == Done` always agree. All
/// mutators below keep that coupling; [`Task::check_invariants`] verifies it
/// for data read from disk.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Task {
    pub id: u64,
    #[schemars(length(min = 1))]
    pub title: String,
    pub priority: Priority,
    pub completed: bool,
    #[schemars(range(max = 100))]
    pub progress: u8,
    pub status: TaskStatus,
    /// Accumulated timer duration in milliseconds.
    pub elapsed_ms: u64,
    /// Set while the timer is running.
    pub timer_started_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a fresh, incomplete task.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the title is blank.
    pub fn new(
        id: u64,
        title: &str,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            id,
            title: validate_title(title)?,
            priority,
            completed: false,
            progress: 0,
            status: TaskStatus::Todo,
            elapsed_ms: 0,
            timer_started_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    #[must_use]
    pub const fn timer_running(&self) -> bool {
        self.timer_started_at.is_some()
    }

    /// Elapsed time including the currently running segment, if any.
    #[must_use]
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> u64 {
        self.elapsed_ms + self.timer_started_at.map_or(0, |start| span_ms(start, now))
    }

    pub fn rename(&mut self, title: &str, now: DateTime<Utc>) -> Result<(), CoreError> {
        self.title = validate_title(title)?;
        self.updated_at = now;
        Ok(())
    }

    pub fn set_priority(&mut self, priority: Priority, now: DateTime<Utc>) {
        self.priority = priority;
        self.updated_at = now;
    }

    /// Mark the task done. A running timer is stopped first so its time is kept.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.stop_timer(now);
        self.completed = true;
        self.progress = MAX_PROGRESS;
        self.status = TaskStatus::Done;
        self.updated_at = now;
    }

    /// Reopen the task. Progress resets to 0.
    pub fn uncomplete(&mut self, now: DateTime<Utc>) {
        self.completed = false;
        self.progress = 0;
        self.status = TaskStatus::Todo;
        self.updated_at = now;
    }

    /// Set the progress percentage, keeping completion in sync.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `pct` is above 100.
    pub fn set_progress(&mut self, pct: u8, now: DateTime<Utc>) -> Result<(), CoreError> {
        if pct > MAX_PROGRESS {
            return Err(CoreError::Validation(format!(
                "progress must be between 0 and {MAX_PROGRESS}, got {pct}"
            )));
        }
        if pct == MAX_PROGRESS {
            self.complete(now);
            return Ok(());
        }

        if self.completed {
            self.completed = false;
            self.status = if pct > 0 {
                TaskStatus::InProgress
            } else {
                TaskStatus::Todo
            };
        } else if pct > 0 && self.status == TaskStatus::Todo {
            self.status = TaskStatus::InProgress;
        }
        self.progress = pct;
        self.updated_at = now;
        Ok(())
    }

    /// Start the timer. Returns `false` when it was already running.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a completed task.
    pub fn start_timer(&mut self, now: DateTime<Utc>) -> Result<bool, CoreError> {
        if self.completed {
            return Err(CoreError::Validation(format!(
                "task {} is already completed",
                self.id
            )));
        }
        if self.timer_running() {
            return Ok(false);
        }
        self.timer_started_at = Some(now);
        if self.status == TaskStatus::Todo {
            self.status = TaskStatus::InProgress;
        }
        self.updated_at = now;
        Ok(true)
    }

    /// Stop the timer and bank the running segment. Returns `false` when it
    /// was not running.
    pub fn stop_timer(&mut self, now: DateTime<Utc>) -> bool {
        let Some(start) = self.timer_started_at.take() else {
            return false;
        };
        self.elapsed_ms += span_ms(start, now);
        self.updated_at = now;
        true
    }

    /// Move one kanban column to the right. Entering `Done` completes the task.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` when already in the last column.
    pub fn promote(&mut self, now: DateTime<Utc>) -> Result<TaskStatus, CoreError> {
        let next = self.status.next().ok_or_else(|| self.edge_error("beyond done"))?;
        if next == TaskStatus::Done {
            self.complete(now);
        } else {
            self.status = next;
            self.updated_at = now;
        }
        Ok(next)
    }

    /// Move one kanban column to the left. Leaving `Done` reopens the task.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` when already in the first column.
    pub fn regress(&mut self, now: DateTime<Utc>) -> Result<TaskStatus, CoreError> {
        let previous = self
            .status
            .previous()
            .ok_or_else(|| self.edge_error("before todo"))?;
        if self.completed {
            self.uncomplete(now);
        }
        self.status = previous;
        self.updated_at = now;
        Ok(previous)
    }

    /// Verify the completion coupling and field ranges of a task read from disk.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` describing the first violation.
    pub fn check_invariants(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "task {} has an empty title",
                self.id
            )));
        }
        if self.progress > MAX_PROGRESS {
            return Err(CoreError::Validation(format!(
                "task {} has progress {} above {MAX_PROGRESS}",
                self.id, self.progress
            )));
        }
        let done = self.progress == MAX_PROGRESS;
        if self.completed != done || self.completed != (self.status == TaskStatus::Done) {
            return Err(CoreError::Validation(format!(
                "task {} has inconsistent completed={}, progress={}, status={}",
                self.id, self.completed, self.progress, self.status
            )));
        }
        Ok(())
    }

    fn edge_error(&self, to: &str) -> CoreError {
        CoreError::InvalidTransition {
            entity_type: String::from("task"),
            id: self.id.to_string(),
            from: self.status.to_string(),
            to: to.to_string(),
        }
    }
}

fn validate_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(String::from(
            "task title must not be empty",
        )));
    }
    Ok(trimmed.to_string())
}

fn span_ms(start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    u64::try_from((end - start).num_milliseconds()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap()
    }

    fn task() -> Task {
        Task::new(1, "Write spec", Priority::Medium, t0()).unwrap()
    }

    #[test]
    fn new_task_has_defaults() {
        let task = task();
        assert_eq!(task.id, 1);
        assert_eq!(task.title, "Write spec");
        assert!(!task.completed);
        assert_eq!(task.progress, 0);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.elapsed_ms, 0);
        assert!(!task.timer_running());
        assert!(task.check_invariants().is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn new_task_rejects_blank_titles(#[case] title: &str) {
        let err = Task::new(1, title, Priority::Low, t0()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn complete_forces_full_progress() {
        let mut task = task();
        task.set_progress(40, t0()).unwrap();
        task.complete(t0());
        assert!(task.completed);
        assert_eq!(task.progress, 100);
        assert_eq!(task.status, TaskStatus::Done);
    }

    #[test]
    fn uncomplete_resets_progress_to_zero() {
        let mut task = task();
        task.complete(t0());
        task.uncomplete(t0());
        assert!(!task.completed);
        assert_eq!(task.progress, 0);
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[test]
    fn full_progress_implies_completed() {
        let mut task = task();
        task.set_progress(100, t0()).unwrap();
        assert!(task.completed);
        assert_eq!(task.status, TaskStatus::Done);
    }

    #[rstest]
    #[case(0, TaskStatus::Todo)]
    #[case(1, TaskStatus::InProgress)]
    #[case(99, TaskStatus::InProgress)]
    fn partial_progress_reopens_completed_task(#[case] pct: u8, #[case] status: TaskStatus) {
        let mut task = task();
        task.complete(t0());
        task.set_progress(pct, t0()).unwrap();
        assert!(!task.completed);
        assert_eq!(task.progress, pct);
        assert_eq!(task.status, status);
        assert!(task.check_invariants().is_ok());
    }

    #[test]
    fn progress_above_hundred_is_rejected_without_change() {
        let mut task = task();
        let before = task.clone();
        let err = task.set_progress(101, t0()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(task, before);
    }

    #[test]
    fn timer_accumulates_exact_duration() {
        let mut task = task();
        assert!(task.start_timer(t0()).unwrap());
        assert!(task.stop_timer(t0() + Duration::milliseconds(1_500)));
        assert_eq!(task.elapsed_ms, 1_500);
        assert_eq!(task.status, TaskStatus::InProgress);
    }

    #[test]
    fn double_start_does_not_double_count() {
        let mut task = task();
        assert!(task.start_timer(t0()).unwrap());
        assert!(!task.start_timer(t0() + Duration::seconds(5)).unwrap());
        task.stop_timer(t0() + Duration::seconds(10));
        assert_eq!(task.elapsed_ms, 10_000);
    }

    #[test]
    fn stopping_a_stopped_timer_is_a_noop() {
        let mut task = task();
        let before = task.clone();
        assert!(!task.stop_timer(t0() + Duration::seconds(3)));
        assert_eq!(task, before);
    }

    #[test]
    fn completed_task_refuses_timer() {
        let mut task = task();
        task.complete(t0());
        assert!(matches!(
            task.start_timer(t0()),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn completing_banks_running_timer() {
        let mut task = task();
        task.start_timer(t0()).unwrap();
        task.complete(t0() + Duration::seconds(2));
        assert!(!task.timer_running());
        assert_eq!(task.elapsed_ms, 2_000);
    }

    #[test]
    fn elapsed_at_includes_running_segment() {
        let mut task = task();
        task.elapsed_ms = 1_000;
        task.start_timer(t0()).unwrap();
        assert_eq!(task.elapsed_at(t0() + Duration::seconds(4)), 5_000);
    }

    #[test]
    fn promote_walks_to_done_and_completes() {
        let mut task = task();
        assert_eq!(task.promote(t0()).unwrap(), TaskStatus::InProgress);
        assert!(!task.completed);
        assert_eq!(task.promote(t0()).unwrap(), TaskStatus::Done);
        assert!(task.completed);
        assert_eq!(task.progress, 100);
        assert!(matches!(
            task.promote(t0()),
            Err(CoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn regress_out_of_done_reopens() {
        let mut task = task();
        task.complete(t0());
        assert_eq!(task.regress(t0()).unwrap(), TaskStatus::InProgress);
        assert!(!task.completed);
        assert_eq!(task.progress, 0);
        assert!(task.check_invariants().is_ok());
        assert_eq!(task.regress(t0()).unwrap(), TaskStatus::Todo);
        assert!(matches!(
            task.regress(t0()),
            Err(CoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn invariants_reject_disagreeing_completion() {
        let mut task = task();
        task.completed = true;
        assert!(task.check_invariants().is_err());

        let mut task = self::task();
        task.progress = 100;
        assert!(task.check_invariants().is_err());
    }
}
