//! Kanban board view, side by side or stacked.

use std::fmt::Write as _;

use ckl_config::LimitsConfig;
use ckl_core::entities::Task;
use ckl_core::enums::{Priority, TaskStatus};
use ckl_store::KanbanBoard;

use super::DisplayPrefs;
use super::color::{Paint, paint_if};
use super::list::shorten;

const DEFAULT_TERM_WIDTH: usize = 80;
const MIN_COLUMN_WIDTH: usize = 12;
const SEPARATOR: &str = " | ";

/// Render the board followed by any WIP limit warnings.
#[must_use]
pub fn render_kanban(
    board: &KanbanBoard<'_>,
    limits: &LimitsConfig,
    prefs: &DisplayPrefs,
    term_width: Option<usize>,
) -> String {
    let mut out = paint_if("Kanban Board", Paint::Bold, prefs.color);
    out.push('\n');
    if prefs.kanban_horizontal {
        render_horizontal(&mut out, board, limits, term_width.unwrap_or(DEFAULT_TERM_WIDTH));
    } else {
        render_vertical(&mut out, board, limits, prefs);
    }
    for warning in board.limit_warnings(limits) {
        let _ = writeln!(out, "{}", paint_if(&format!("Warning: {warning}"), Paint::Yellow, prefs.color));
    }
    out
}

/// The visible slice of a column plus its overflow suffix. Only `Done` is
/// capped.
fn visible<'b, 'a>(
    board: &'b KanbanBoard<'a>,
    status: TaskStatus,
    limits: &LimitsConfig,
) -> (&'b [&'a Task], String) {
    let column = board.column(status);
    if status != TaskStatus::Done {
        return (column, String::new());
    }
    let limit = KanbanBoard::limit(status, limits);
    if column.len() > limit {
        (&column[..limit], format!(" (+{} more)", column.len() - limit))
    } else {
        (column, String::new())
    }
}

fn render_horizontal(out: &mut String, board: &KanbanBoard<'_>, limits: &LimitsConfig, width: usize) {
    let columns = TaskStatus::ALL.len();
    let col_width = MIN_COLUMN_WIDTH.max(
        width.saturating_sub(SEPARATOR.len() * (columns - 1)) / columns,
    );

    let shown: Vec<(&[&Task], String)> = TaskStatus::ALL
        .iter()
        .map(|&status| visible(board, status, limits))
        .collect();

    let header = TaskStatus::ALL
        .iter()
        .zip(&shown)
        .map(|(status, (_, suffix))| center(&format!("{}{suffix}", status.label()), col_width))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let _ = writeln!(out, "{}", header.trim_end());
    let _ = writeln!(out, "{}", "-".repeat(header.chars().count()));

    let rows = shown.iter().map(|(tasks, _)| tasks.len()).max().unwrap_or(0);
    for row in 0..rows {
        let line = shown
            .iter()
            .map(|(tasks, _)| {
                let cell = tasks.get(row).map_or_else(String::new, |task| {
                    format!("{}. {}", task.id, shorten(&task.title, col_width.saturating_sub(4)))
                });
                format!("{cell:<col_width$}")
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

fn render_vertical(
    out: &mut String,
    board: &KanbanBoard<'_>,
    limits: &LimitsConfig,
    prefs: &DisplayPrefs,
) {
    for status in TaskStatus::ALL {
        let (tasks, suffix) = visible(board, status, limits);
        let _ = writeln!(out, "\n{}{suffix}:", status.label());
        if tasks.is_empty() {
            out.push_str("  (empty)\n");
        }
        for task in tasks {
            let marker = if task.priority == Priority::High {
                format!("{} ", paint_if("!", Paint::Red, prefs.color))
            } else {
                String::new()
            };
            let _ = writeln!(
                out,
                "  {}. {marker}{}",
                task.id,
                shorten(&task.title, limits.taskname)
            );
        }
    }
}

fn center(text: &str, width: usize) -> String {
    format!("{text:^width$}")
}
