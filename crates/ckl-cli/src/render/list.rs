//! Checklist view: detailed, simple, and one-line task lines.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use ckl_core::entities::Task;
use ckl_store::export::seconds;

use super::DisplayPrefs;
use super::color::{Paint, paint_if, priority_paint};

/// Title width of the one-line view.
pub const ONE_LINE_TITLE_WIDTH: usize = 30;

/// Render `tasks` in display order under a `Checklist: <name>` heading.
#[must_use]
pub fn render_list(name: &str, tasks: &[&Task], now: DateTime<Utc>, prefs: &DisplayPrefs) -> String {
    let mut out = paint_if(&format!("Checklist: {name}"), Paint::Bold, prefs.color);
    out.push('\n');
    if tasks.is_empty() {
        out.push_str("No tasks yet. Add a task to get started!\n");
        return out;
    }
    for task in tasks {
        out.push_str(&render_task(task, now, prefs));
    }
    out
}

/// One task in the style selected by `prefs`. Always ends with a newline.
#[must_use]
pub fn render_task(task: &Task, now: DateTime<Utc>, prefs: &DisplayPrefs) -> String {
    let mark = status_mark(task, prefs.color);
    let color = priority_paint(task.priority);
    let secs = seconds(task.elapsed_at(now));

    if prefs.simple_view {
        return format!("{}. [{mark}] {}\n", task.id, task.title);
    }

    if prefs.one_line {
        let initial = &task.priority.label()[..1];
        let pri = paint_if(&format!("Pri: {initial}"), color, prefs.color);
        return format!(
            "{}. [{mark}] {} - {pri} - Time: {secs:.0}s - Prog: {}%\n",
            task.id,
            shorten(&task.title, ONE_LINE_TITLE_WIDTH),
            task.progress
        );
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}. [{mark}] {}", task.id, task.title);
    let pri = paint_if(
        &format!("Priority: {}", task.priority.label()),
        color,
        prefs.color,
    );
    let _ = writeln!(
        out,
        "   {pri} - Time Spent: {secs:.2} seconds - Progress: {}%",
        task.progress
    );
    out
}

/// Cut `text` to at most `width` characters, ending in `...` when cut.
#[must_use]
pub fn shorten(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

fn status_mark(task: &Task, color: bool) -> String {
    if task.completed {
        paint_if("✓", Paint::BrightGreen, color)
    } else {
        paint_if("✗", Paint::Red, color)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use ckl_core::enums::Priority;
    use pretty_assertions::assert_eq;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    fn prefs() -> DisplayPrefs {
        DisplayPrefs {
            color: false,
            simple_view: false,
            one_line: false,
            menu_visible: true,
            kanban: false,
            kanban_horizontal: true,
        }
    }

    fn task() -> Task {
        let mut task = Task::new(3, "Write spec", Priority::High, t0()).unwrap();
        task.elapsed_ms = 1_234;
        task.set_progress(40, t0()).unwrap();
        task
    }

    #[test]
    fn detailed_view_has_two_lines() {
        let out = render_task(&task(), t0(), &prefs());
        assert_eq!(
            out,
            "3. [✗] Write spec\n   Priority: High - Time Spent: 1.23 seconds - Progress: 40%\n"
        );
    }

    #[test]
    fn simple_view_hides_details() {
        let prefs = DisplayPrefs {
            simple_view: true,
            ..prefs()
        };
        let mut task = task();
        task.complete(t0());
        assert_eq!(render_task(&task, t0(), &prefs), "3. [✓] Write spec\n");
    }

    #[test]
    fn one_line_view_truncates_long_titles() {
        let prefs = DisplayPrefs {
            one_line: true,
            ..prefs()
        };
        let mut task = task();
        task.title = "An extremely long task title that keeps going".to_string();
        assert_eq!(
            render_task(&task, t0(), &prefs),
            "3. [✗] An extremely long task titl... - Pri: H - Time: 1s - Prog: 40%\n"
        );
    }

    #[test]
    fn running_timer_counts_toward_time() {
        let mut task = task();
        task.start_timer(t0()).unwrap();
        let out = render_task(&task, t0() + Duration::seconds(2), &prefs());
        assert!(out.contains("Time Spent: 3.23 seconds"));
    }

    #[test]
    fn color_paints_priority_and_mark() {
        let prefs = DisplayPrefs {
            color: true,
            ..prefs()
        };
        let out = render_task(&task(), t0(), &prefs);
        assert!(out.contains("\u{1b}[31mPriority: High\u{1b}[0m"));
        assert!(out.contains("[\u{1b}[31m✗\u{1b}[0m]"));
    }

    #[test]
    fn empty_list_has_hint() {
        let out = render_list("work", &[], t0(), &prefs());
        assert_eq!(out, "Checklist: work\nNo tasks yet. Add a task to get started!\n");
    }

    #[test]
    fn shorten_keeps_short_text() {
        assert_eq!(shorten("short", 30), "short");
        assert_eq!(shorten("abcdefghij", 8), "abcde...");
    }
}
