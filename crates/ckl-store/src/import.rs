//! Reading external checklist documents.
//!
//! JSON comes in two shapes: a full checklist file object, or a bare array
//! of task records. Both are schema-validated before deserializing.
//!
//! Markdown is read as GitHub-style task items (`- [ ]` / `- [x]`) grouped
//! under `## Todo`, `## In Progress` and `## Done` headings, the layout
//! written by [`crate::export::export_markdown`].

use std::fs;
use std::path::Path;

use ckl_core::entities::{ChecklistFile, MAX_PROGRESS, Task, id_after};
use ckl_core::enums::{Priority, TaskStatus};
use ckl_schema::SchemaRegistry;
use serde_json::Value;

use crate::error::StoreError;

/// Parse and validate an external checklist file, naming it `name`.
///
/// `next_id` is raised past the highest imported id if the document's own
/// counter is behind.
///
/// # Errors
///
/// Returns `StoreError::Io` if the file cannot be read and
/// `StoreError::Format` if it is not JSON, fails schema validation, or
/// violates a checklist invariant such as duplicate ids.
pub fn parse_external(
    path: &Path,
    name: &str,
    registry: &SchemaRegistry,
) -> Result<ChecklistFile, StoreError> {
    let raw = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let value: Value =
        serde_json::from_str(&raw).map_err(|e| StoreError::format(path, e.to_string()))?;

    registry
        .validate_checklist_document(&value)
        .map_err(|e| StoreError::format(path, e.to_string()))?;

    let mut file = if value.is_array() {
        let tasks: Vec<Task> =
            serde_json::from_value(value).map_err(|e| StoreError::format(path, e.to_string()))?;
        ChecklistFile::from_tasks(name, tasks).map_err(|e| StoreError::format(path, e.to_string()))?
    } else {
        let mut file: ChecklistFile =
            serde_json::from_value(value).map_err(|e| StoreError::format(path, e.to_string()))?;
        if let Some(max) = file.tasks.iter().map(|t| t.id).max() {
            let floor = id_after(max).map_err(|e| StoreError::format(path, e.to_string()))?;
            file.next_id = file.next_id.max(floor);
        }
        file
    };
    file.name = name.to_string();

    file.check_invariants()
        .map_err(|e| StoreError::format(path, e.to_string()))?;
    Ok(file)
}

/// One task item read from a markdown checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownTask {
    pub title: String,
    pub priority: Priority,
    /// Column heading the item appeared under.
    pub status: TaskStatus,
    /// `- [x]`
    pub completed: bool,
    /// From an exported `Progress: N%` detail, when present.
    pub progress: Option<u8>,
    pub elapsed_ms: u64,
}

/// Read the task items of a markdown file.
///
/// # Errors
///
/// Returns `StoreError::Io` if the file cannot be read and
/// `StoreError::Format` if it holds no task items.
pub fn read_markdown(path: &Path) -> Result<Vec<MarkdownTask>, StoreError> {
    let raw = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let items = parse_markdown(&raw);
    if items.is_empty() {
        return Err(StoreError::format(path, "no task items found"));
    }
    Ok(items)
}

/// Collect task items from markdown text.
///
/// Items before the first column heading land in `Todo`; other headings
/// leave the column unchanged. A leading 🔴, 🟡 or 🟢 sets the priority
/// (Medium otherwise), and the `(**Priority: P**, Progress: N%, Time: S.SSs)`
/// detail written by the exporter is read back.
#[must_use]
pub fn parse_markdown(text: &str) -> Vec<MarkdownTask> {
    let mut status = TaskStatus::Todo;
    let mut items = Vec::new();

    for line in text.lines().map(str::trim) {
        if let Some(heading) = line.strip_prefix("## ") {
            if let Some(column) = column_heading(heading) {
                status = column;
            }
            continue;
        }

        let (completed, text) = if let Some(rest) = line.strip_prefix("- [ ] ") {
            (false, rest)
        } else if let Some(rest) = line
            .strip_prefix("- [x] ")
            .or_else(|| line.strip_prefix("- [X] "))
        {
            (true, rest)
        } else {
            continue;
        };

        let (mut priority, text) = priority_marker(text.trim());
        let (title, progress, elapsed_ms) = match exported_details(text) {
            Some(details) => {
                priority = details.priority;
                (details.title, Some(details.progress), details.elapsed_ms)
            }
            None => (text, None, 0),
        };
        if title.is_empty() {
            continue;
        }

        items.push(MarkdownTask {
            title: title.to_string(),
            priority,
            status,
            completed,
            progress,
            elapsed_ms,
        });
    }
    items
}

fn column_heading(heading: &str) -> Option<TaskStatus> {
    match heading.trim().to_lowercase().as_str() {
        "todo" | "to do" => Some(TaskStatus::Todo),
        "in progress" | "in_progress" | "progress" => Some(TaskStatus::InProgress),
        "done" => Some(TaskStatus::Done),
        _ => None,
    }
}

fn priority_marker(text: &str) -> (Priority, &str) {
    for (marker, priority) in [
        ('🔴', Priority::High),
        ('🟡', Priority::Medium),
        ('🟢', Priority::Low),
    ] {
        if let Some(rest) = text.strip_prefix(marker) {
            return (priority, rest.trim_start());
        }
    }
    (Priority::Medium, text)
}

struct ExportedDetails<'a> {
    title: &'a str,
    priority: Priority,
    progress: u8,
    elapsed_ms: u64,
}

/// Split `title (**Priority: High**, Progress: 40%, Time: 1.50s)`.
fn exported_details(text: &str) -> Option<ExportedDetails<'_>> {
    let (title, details) = text.rsplit_once(" (**Priority: ")?;
    let details = details.strip_suffix(')')?;
    let (priority, rest) = details.split_once("**, Progress: ")?;
    let (progress, time) = rest.split_once("%, Time: ")?;

    let priority = match priority {
        "High" => Priority::High,
        "Medium" => Priority::Medium,
        "Low" => Priority::Low,
        _ => return None,
    };
    let progress = progress.parse::<u8>().ok().filter(|p| *p <= MAX_PROGRESS)?;
    let secs = time.strip_suffix('s')?.parse::<f64>().ok()?;
    Some(ExportedDetails {
        title: title.trim_end(),
        priority,
        progress,
        elapsed_ms: millis(secs)?,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn millis(secs: f64) -> Option<u64> {
    (secs.is_finite() && secs >= 0.0).then(|| (secs * 1000.0).round() as u64)
}
