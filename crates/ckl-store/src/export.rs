//! Markdown export of a checklist.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ckl_core::enums::TaskStatus;
use ckl_core::responses::ExportResponse;

use crate::error::StoreError;
use crate::kanban::KanbanBoard;
use crate::persist::write_bytes_atomic;
use crate::store::ChecklistStore;

/// Render the checklist as markdown grouped by kanban column, followed by a
/// YAML metadata block.
#[must_use]
pub fn export_markdown(store: &ChecklistStore, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Checklist: {}\n", store.name());
    let _ = writeln!(out, "*Generated on {}*\n", now.format("%Y-%m-%d %H:%M:%S"));

    let board = KanbanBoard::build(store);
    for status in TaskStatus::ALL {
        let column = board.column(status);
        if column.is_empty() {
            continue;
        }
        let _ = writeln!(out, "## {}\n", status.label());
        for task in column {
            let checkbox = if task.completed { "- [x]" } else { "- [ ]" };
            let _ = writeln!(
                out,
                "{checkbox} {} (**Priority: {}**, Progress: {}%, Time: {:.2}s)",
                task.title,
                task.priority.label(),
                task.progress,
                seconds(task.elapsed_at(now)),
            );
        }
        out.push('\n');
    }

    let summary = store.summary();
    out.push_str("## Metadata\n\n```yaml\n");
    let _ = writeln!(out, "checklist_name: {}", store.name());
    let _ = writeln!(out, "date_exported: {}", now.to_rfc3339());
    let _ = writeln!(out, "total_tasks: {}", summary.total);
    let _ = writeln!(out, "completed_tasks: {}", summary.completed);
    out.push_str("```\n");
    out
}

/// `<dir>/<name>_<YYYYmmdd_HHMMSS>.md`
#[must_use]
pub fn export_path(dir: &Path, name: &str, now: DateTime<Utc>) -> PathBuf {
    dir.join(format!("{name}_{}.md", now.format("%Y%m%d_%H%M%S")))
}

/// Write the markdown export of `store` into `dir`.
///
/// # Errors
///
/// Returns `StoreError::Io` if the directory or file cannot be written.
pub fn write_export(store: &ChecklistStore, dir: &Path) -> Result<ExportResponse, StoreError> {
    let now = store.now();
    let path = export_path(dir, store.name(), now);
    write_bytes_atomic(&path, export_markdown(store, now).trim_end().as_bytes())?;
    tracing::info!(checklist = store.name(), path = %path.display(), "exported checklist");

    let summary = store.summary();
    Ok(ExportResponse {
        checklist: store.name().to_string(),
        path: path.display().to_string(),
        total_tasks: summary.total,
        completed_tasks: summary.completed,
    })
}

/// Milliseconds as fractional seconds.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}
