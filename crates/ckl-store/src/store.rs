//! One checklist backed by one JSON file.
//!
//! Every mutating method follows this protocol:
//! 1. Snapshot the task sequence
//! 2. Apply the mutation (validation happens here)
//! 3. On failure restore the snapshot (and the id counter) and return the error
//! 4. On success record the snapshot as the undo entry and write the file

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ckl_core::entities::{ChecklistFile, MAX_PROGRESS, Task, id_after};
use ckl_core::enums::{Action, Priority, TaskStatus};
use ckl_core::errors::CoreError;
use ckl_core::responses::{ChecklistSummary, ImportResponse, TimerResponse};

use crate::clock::Clock;
use crate::error::StoreError;
use crate::import::read_markdown;
use crate::persist::{read_checklist, read_json, remove_if_exists, write_json_atomic};
use crate::undo::{UndoEntry, UndoHistory};
use crate::updates::task::TaskUpdate;

/// Progress given to markdown items under `In Progress` that carry none.
pub const DEFAULT_IN_PROGRESS: u8 = 50;

/// Directory under the data dir holding pending undo snapshots.
pub const UNDO_DIR: &str = ".undo";

/// A named checklist: its tasks, its undo history, and where it lives on disk.
#[derive(Debug)]
pub struct ChecklistStore {
    file: ChecklistFile,
    data_dir: PathBuf,
    history: UndoHistory,
    clock: Arc<dyn Clock>,
}

impl ChecklistStore {
    /// Create an empty checklist and write it to `<data_dir>/<name>.json`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be written.
    pub fn create(data_dir: &Path, name: &str, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        Self::from_file(data_dir, ChecklistFile::empty(name), clock)
    }

    /// Wrap an already validated checklist file and write it to disk.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be written.
    pub fn from_file(
        data_dir: &Path,
        file: ChecklistFile,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StoreError> {
        let store = Self {
            file,
            data_dir: data_dir.to_path_buf(),
            history: UndoHistory::default(),
            clock,
        };
        store.save()?;
        Ok(store)
    }

    /// Load `<data_dir>/<name>.json` together with its pending undo snapshot.
    ///
    /// The checklist is keyed by file name; a mismatching `name` field inside
    /// the file is overwritten in memory. A corrupt undo sidecar is ignored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be read and
    /// `StoreError::Format` if it is not a valid checklist.
    pub fn open(data_dir: &Path, name: &str, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let path = checklist_path(data_dir, name);
        let mut file = read_checklist(&path)?;
        file.name = name.to_string();

        let sidecar = undo_path(data_dir, name);
        let history = if sidecar.exists() {
            match read_json::<UndoEntry>(&sidecar) {
                Ok(entry) => UndoHistory::from_entry(Some(entry)),
                Err(e) => {
                    tracing::warn!(path = %sidecar.display(), error = %e, "ignoring unreadable undo snapshot");
                    UndoHistory::default()
                }
            }
        } else {
            UndoHistory::default()
        };

        tracing::debug!(name, tasks = file.tasks.len(), "loaded checklist");
        Ok(Self {
            file,
            data_dir: data_dir.to_path_buf(),
            history,
            clock,
        })
    }

    // -- Accessors ----------------------------------------------------------

    #[must_use]
    pub fn name(&self) -> &str {
        &self.file.name
    }

    #[must_use]
    pub fn path(&self) -> PathBuf {
        checklist_path(&self.data_dir, &self.file.name)
    }

    #[must_use]
    pub const fn file(&self) -> &ChecklistFile {
        &self.file
    }

    /// Tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.file.tasks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.file.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file.tasks.is_empty()
    }

    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.file.next_id
    }

    #[must_use]
    pub fn pending_undo(&self) -> Option<Action> {
        self.history.pending_action()
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // -- Queries ------------------------------------------------------------

    /// Look up a task by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` (wrapped) if no task has this id.
    pub fn get(&self, id: u64) -> Result<&Task, StoreError> {
        self.file
            .tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::task_not_found(id).into())
    }

    /// Tasks ordered High, Medium, Low. Ties keep insertion order.
    #[must_use]
    pub fn sorted_by_priority(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.file.tasks.iter().collect();
        tasks.sort_by_key(|t| t.priority.rank());
        tasks
    }

    #[must_use]
    pub fn summary(&self) -> ChecklistSummary {
        let now = self.clock.now();
        let count = |status: TaskStatus| self.file.tasks.iter().filter(|t| t.status == status).count();
        let total = self.file.tasks.len();
        let completed = self.file.tasks.iter().filter(|t| t.completed).count();
        let percent_complete = if total == 0 {
            0
        } else {
            u8::try_from(completed * 100 / total).unwrap_or(100)
        };
        ChecklistSummary {
            name: self.file.name.clone(),
            total,
            completed,
            in_progress: count(TaskStatus::InProgress),
            todo: count(TaskStatus::Todo),
            percent_complete,
            elapsed_ms: self.file.tasks.iter().map(|t| t.elapsed_at(now)).sum(),
        }
    }

    // -- Mutations ----------------------------------------------------------

    /// Append a new task with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty title or when no id is left
    /// to allocate.
    pub fn add(&mut self, title: &str, priority: Priority) -> Result<Task, StoreError> {
        let task = self.mutate(Action::Add, |file, now| {
            let task = Task::new(file.next_id, title, priority, now)?;
            file.next_id = id_after(file.next_id)?;
            file.tasks.push(task.clone());
            Ok(task)
        })?;
        tracing::debug!(checklist = %self.file.name, id = task.id, "added task");
        Ok(task)
    }

    /// Change a task's title and/or priority.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and a validation error for an
    /// empty update or an empty title.
    pub fn edit(&mut self, id: u64, update: TaskUpdate) -> Result<Task, StoreError> {
        if update.is_empty() {
            return Err(CoreError::Validation(String::from("nothing to update")).into());
        }
        self.mutate_task(Action::Edit, id, |task, now| {
            if let Some(title) = update.title.as_deref() {
                task.rename(title, now)?;
            }
            if let Some(priority) = update.priority {
                task.set_priority(priority, now);
            }
            Ok(())
        })
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn complete(&mut self, id: u64) -> Result<Task, StoreError> {
        self.mutate_task(Action::Complete, id, |task, now| {
            task.complete(now);
            Ok(())
        })
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn uncomplete(&mut self, id: u64) -> Result<Task, StoreError> {
        self.mutate_task(Action::Uncomplete, id, |task, now| {
            task.uncomplete(now);
            Ok(())
        })
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and a validation error when
    /// `pct` is above 100.
    pub fn set_progress(&mut self, id: u64, pct: u8) -> Result<Task, StoreError> {
        self.mutate_task(Action::SetProgress, id, |task, now| {
            task.set_progress(pct, now).map_err(Into::into)
        })
    }

    /// Start a task's timer. Starting a running timer changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and a validation error for a
    /// completed task.
    pub fn start_timer(&mut self, id: u64) -> Result<TimerResponse, StoreError> {
        let current = self.get(id)?;
        if current.timer_running() {
            return Ok(TimerResponse {
                task: current.clone(),
                changed: false,
            });
        }
        let task = self.mutate_task(Action::StartTimer, id, |task, now| {
            task.start_timer(now)?;
            Ok(())
        })?;
        Ok(TimerResponse {
            task,
            changed: true,
        })
    }

    /// Stop a task's timer and bank the elapsed time. Stopping a stopped
    /// timer changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn stop_timer(&mut self, id: u64) -> Result<TimerResponse, StoreError> {
        let current = self.get(id)?;
        if !current.timer_running() {
            return Ok(TimerResponse {
                task: current.clone(),
                changed: false,
            });
        }
        let task = self.mutate_task(Action::StopTimer, id, |task, now| {
            task.stop_timer(now);
            Ok(())
        })?;
        Ok(TimerResponse {
            task,
            changed: true,
        })
    }

    /// Remove a task and return it. Its id is not handed out again.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn delete(&mut self, id: u64) -> Result<Task, StoreError> {
        self.mutate(Action::Delete, |file, _| {
            let idx = file
                .tasks
                .iter()
                .position(|t| t.id == id)
                .ok_or_else(|| CoreError::task_not_found(id))?;
            Ok(file.tasks.remove(idx))
        })
    }

    /// Remove every task. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be written.
    pub fn clear(&mut self) -> Result<usize, StoreError> {
        self.mutate(Action::Clear, |file, _| {
            let removed = file.tasks.len();
            file.tasks.clear();
            Ok(removed)
        })
    }

    /// Move a task one kanban column to the right.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `InvalidTransition` for a
    /// task already in `Done`.
    pub fn promote(&mut self, id: u64) -> Result<Task, StoreError> {
        self.mutate_task(Action::Promote, id, |task, now| {
            task.promote(now)?;
            Ok(())
        })
    }

    /// Move a task one kanban column to the left.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `InvalidTransition` for a
    /// task already in `Todo`.
    pub fn regress(&mut self, id: u64) -> Result<Task, StoreError> {
        self.mutate_task(Action::Regress, id, |task, now| {
            task.regress(now)?;
            Ok(())
        })
    }

    /// Append the task items of a markdown file as new tasks.
    ///
    /// Items are added in document order with fresh ids. A checked box or
    /// the `Done` column completes the task; otherwise it keeps its column
    /// and any exported progress, defaulting to 50% in `InProgress`. The
    /// whole import is one undoable action.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be read,
    /// `StoreError::Format` if it holds no task items, and a validation
    /// error when the id space runs out.
    pub fn import_markdown(&mut self, path: &Path) -> Result<ImportResponse, StoreError> {
        let items = read_markdown(path)?;
        let count = self.mutate(Action::ImportMarkdown, |file, now| {
            for item in &items {
                let mut task = Task::new(file.next_id, &item.title, item.priority, now)?;
                file.next_id = id_after(file.next_id)?;
                task.elapsed_ms = item.elapsed_ms;

                let progress = item.progress.unwrap_or(match item.status {
                    TaskStatus::InProgress => DEFAULT_IN_PROGRESS,
                    TaskStatus::Todo | TaskStatus::Done => 0,
                });
                if item.completed || item.status == TaskStatus::Done || progress >= MAX_PROGRESS {
                    task.complete(now);
                } else {
                    task.progress = progress;
                    task.status = item.status;
                }
                file.tasks.push(task);
            }
            Ok(items.len())
        })?;

        tracing::info!(checklist = %self.file.name, path = %path.display(), tasks = count, "imported markdown");
        Ok(ImportResponse {
            name: self.file.name.clone(),
            tasks: count,
            source: path.display().to_string(),
        })
    }

    /// Revert the most recent mutation. Returns `None` when there is nothing
    /// to undo.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the restored state cannot be written.
    pub fn undo(&mut self) -> Result<Option<Action>, StoreError> {
        let Some(entry) = self.history.take() else {
            return Ok(None);
        };
        self.file.tasks = entry.tasks;
        self.save()?;
        tracing::debug!(checklist = %self.file.name, action = %entry.action, "undid action");
        Ok(Some(entry.action))
    }

    // -- Persistence --------------------------------------------------------

    /// Write the checklist file and sync the undo sidecar with the history.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` or `StoreError::Serialize` on failure.
    pub fn save(&self) -> Result<(), StoreError> {
        write_json_atomic(&self.path(), &self.file)?;
        let sidecar = undo_path(&self.data_dir, &self.file.name);
        match self.history.peek() {
            Some(entry) => write_json_atomic(&sidecar, entry)?,
            None => remove_if_exists(&sidecar)?,
        }
        tracing::debug!(checklist = %self.file.name, "saved checklist");
        Ok(())
    }

    /// Delete this checklist's file and undo sidecar.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if a file exists but cannot be removed.
    pub fn remove_files(&self) -> Result<(), StoreError> {
        remove_if_exists(&self.path())?;
        remove_if_exists(&undo_path(&self.data_dir, &self.file.name))
    }

    fn mutate<T>(
        &mut self,
        action: Action,
        op: impl FnOnce(&mut ChecklistFile, DateTime<Utc>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let snapshot = self.file.tasks.clone();
        let next_id = self.file.next_id;
        let now = self.clock.now();
        match op(&mut self.file, now) {
            Ok(value) => {
                self.history.record(UndoEntry {
                    action,
                    tasks: snapshot,
                });
                self.save()?;
                Ok(value)
            }
            Err(e) => {
                self.file.tasks = snapshot;
                self.file.next_id = next_id;
                Err(e)
            }
        }
    }

    fn mutate_task(
        &mut self,
        action: Action,
        id: u64,
        op: impl FnOnce(&mut Task, DateTime<Utc>) -> Result<(), StoreError>,
    ) -> Result<Task, StoreError> {
        self.mutate(action, |file, now| {
            let task = file
                .tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| CoreError::task_not_found(id))?;
            op(task, now)?;
            Ok(task.clone())
        })
    }
}

/// `<data_dir>/<name>.json`
#[must_use]
pub fn checklist_path(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(format!("{name}.json"))
}

/// `<data_dir>/.undo/<name>.json`
#[must_use]
pub fn undo_path(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(UNDO_DIR).join(format!("{name}.json"))
}
