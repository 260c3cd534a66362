//! Menu entries and the parser from one input line to a [`MenuCommand`].

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::bail;
use ckl_core::enums::ViewKind;

/// One shell action. `None` arguments are asked for interactively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuCommand {
    Show,
    View(ViewKind),
    Add(Option<String>),
    Complete(Option<u64>),
    Uncomplete(Option<u64>),
    StartTimer(Option<u64>),
    StopTimer(Option<u64>),
    SetProgress(Option<u64>),
    Edit(Option<u64>),
    Delete(Option<u64>),
    Undo,
    Clear,
    Promote(Option<u64>),
    Regress(Option<u64>),
    ListChecklists,
    CreateChecklist,
    SwitchChecklist,
    DeleteChecklist,
    DeleteAllChecklists,
    Import(Option<PathBuf>),
    ImportMarkdown(Option<PathBuf>),
    Export,
    ToggleColor,
    ToggleSimpleView,
    ToggleOneLine,
    ToggleMenu,
    ToggleKanban,
    ToggleKanbanAlignment,
    Help,
    Quit,
}

/// Menu labels; entry `n` is selected by typing `n + 1`.
pub const MENU_ITEMS: [&str; 28] = [
    "View Checklist",
    "Add Task",
    "Mark Task as Completed",
    "Mark Task as Incomplete",
    "Start Task Timer",
    "Stop Task Timer",
    "Set Task Progress",
    "Edit Task",
    "Delete Task",
    "Undo Last Action",
    "Clear Checklist",
    "Promote Task",
    "Regress Task",
    "List Checklists",
    "Create Checklist",
    "Switch Checklist",
    "Delete Checklist",
    "Delete All Checklists",
    "Load External Checklist",
    "Export to Markdown",
    "Import from Markdown",
    "Toggle Color Coding",
    "Toggle Simplified View",
    "Toggle One-Line Display",
    "Toggle Menu Visibility",
    "Toggle Kanban View",
    "Toggle Kanban Alignment (horizontal/vertical)",
    "Exit",
];

pub const SHORT_HELP: &str = "\
Checklist++ Commands:
  s, show              - Show current view (checklist/kanban)
  a, add <text>        - Add a new task
  m, mark <id>         - Mark a task as completed
  d, delete <id>       - Delete a task
  p, promote <id>      - Promote a task to the next column
  r, regress <id>      - Move a task back to previous column
  u, undo              - Undo the last change
  v, view <type>       - Switch view (checklist/kanban)
  e, export            - Export the checklist to markdown
  i, import <file>     - Import a JSON checklist
  im, import-md <file> - Append tasks from a markdown file
  h, help              - Show this help
  q, quit              - Exit";

/// The numbered menu as printed before each prompt.
#[must_use]
pub fn render_menu() -> String {
    let mut out = String::from("\nMenu:\n");
    for (index, label) in MENU_ITEMS.iter().enumerate() {
        let _ = writeln!(out, "{}. {label}", index + 1);
    }
    out
}

/// Parse one line of shell input. Blank input yields `None`.
///
/// # Errors
///
/// Unknown commands, out-of-range menu numbers and malformed task ids.
pub fn parse(line: &str) -> anyhow::Result<Option<MenuCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if let Ok(number) = line.parse::<usize>() {
        return match from_number(number) {
            Some(command) => Ok(Some(command)),
            None => bail!("Invalid option {number}. Choose 1-{}.", MENU_ITEMS.len()),
        };
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));
    let rest = (!rest.is_empty()).then_some(rest);

    let command = match word.to_lowercase().as_str() {
        "s" | "show" => MenuCommand::Show,
        "a" | "add" => MenuCommand::Add(rest.map(str::to_string)),
        "m" | "mark" => MenuCommand::Complete(task_id(rest)?),
        "d" | "delete" => MenuCommand::Delete(task_id(rest)?),
        "p" | "promote" => MenuCommand::Promote(task_id(rest)?),
        "r" | "regress" => MenuCommand::Regress(task_id(rest)?),
        "u" | "undo" => MenuCommand::Undo,
        "v" | "view" => MenuCommand::View(view_kind(rest)?),
        "e" | "export" => MenuCommand::Export,
        "i" | "import" => MenuCommand::Import(rest.map(PathBuf::from)),
        "im" | "import-md" => MenuCommand::ImportMarkdown(rest.map(PathBuf::from)),
        "h" | "help" => MenuCommand::Help,
        "q" | "quit" | "exit" => MenuCommand::Quit,
        _ => bail!("Unknown command '{word}'. Type 'h' for help."),
    };
    Ok(Some(command))
}

#[must_use]
pub fn from_number(number: usize) -> Option<MenuCommand> {
    let command = match number {
        1 => MenuCommand::Show,
        2 => MenuCommand::Add(None),
        3 => MenuCommand::Complete(None),
        4 => MenuCommand::Uncomplete(None),
        5 => MenuCommand::StartTimer(None),
        6 => MenuCommand::StopTimer(None),
        7 => MenuCommand::SetProgress(None),
        8 => MenuCommand::Edit(None),
        9 => MenuCommand::Delete(None),
        10 => MenuCommand::Undo,
        11 => MenuCommand::Clear,
        12 => MenuCommand::Promote(None),
        13 => MenuCommand::Regress(None),
        14 => MenuCommand::ListChecklists,
        15 => MenuCommand::CreateChecklist,
        16 => MenuCommand::SwitchChecklist,
        17 => MenuCommand::DeleteChecklist,
        18 => MenuCommand::DeleteAllChecklists,
        19 => MenuCommand::Import(None),
        20 => MenuCommand::Export,
        21 => MenuCommand::ImportMarkdown(None),
        22 => MenuCommand::ToggleColor,
        23 => MenuCommand::ToggleSimpleView,
        24 => MenuCommand::ToggleOneLine,
        25 => MenuCommand::ToggleMenu,
        26 => MenuCommand::ToggleKanban,
        27 => MenuCommand::ToggleKanbanAlignment,
        28 => MenuCommand::Quit,
        _ => return None,
    };
    Some(command)
}

/// Parse a task id argument. Missing means "ask for it".
fn task_id(raw: Option<&str>) -> anyhow::Result<Option<u64>> {
    raw.map(parse_id).transpose()
}

pub fn parse_id(raw: &str) -> anyhow::Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(id) => Ok(id),
        Err(_) => bail!("Please provide a valid task number, got '{}'.", raw.trim()),
    }
}

fn view_kind(raw: Option<&str>) -> anyhow::Result<ViewKind> {
    match raw.map(str::to_lowercase).as_deref() {
        Some("k" | "kanban") => Ok(ViewKind::Kanban),
        Some("c" | "checklist") => Ok(ViewKind::Checklist),
        _ => bail!("Unknown view type. Use 'checklist' or 'kanban'."),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1", MenuCommand::Show)]
    #[case("2", MenuCommand::Add(None))]
    #[case("11", MenuCommand::Clear)]
    #[case("21", MenuCommand::ImportMarkdown(None))]
    #[case("28", MenuCommand::Quit)]
    #[case("a Write spec", MenuCommand::Add(Some(String::from("Write spec"))))]
    #[case("add   Write   spec  ", MenuCommand::Add(Some(String::from("Write   spec"))))]
    #[case("m 3", MenuCommand::Complete(Some(3)))]
    #[case("M 3", MenuCommand::Complete(Some(3)))]
    #[case("d 1", MenuCommand::Delete(Some(1)))]
    #[case("p 2", MenuCommand::Promote(Some(2)))]
    #[case("r", MenuCommand::Regress(None))]
    #[case("s", MenuCommand::Show)]
    #[case("u", MenuCommand::Undo)]
    #[case("h", MenuCommand::Help)]
    #[case("q", MenuCommand::Quit)]
    #[case("exit", MenuCommand::Quit)]
    #[case("v kanban", MenuCommand::View(ViewKind::Kanban))]
    #[case("i /tmp/ext.json", MenuCommand::Import(Some(PathBuf::from("/tmp/ext.json"))))]
    #[case("im notes.md", MenuCommand::ImportMarkdown(Some(PathBuf::from("notes.md"))))]
    fn parses_menu_numbers_and_short_commands(#[case] line: &str, #[case] expected: MenuCommand) {
        assert_eq!(parse(line).unwrap(), Some(expected));
    }

    #[test]
    fn blank_input_is_nothing() {
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[rstest]
    #[case("0")]
    #[case("29")]
    #[case("zz")]
    #[case("m one")]
    #[case("v sideways")]
    fn rejects_bad_input(#[case] line: &str) {
        assert!(parse(line).is_err());
    }

    #[test]
    fn every_menu_item_has_a_command() {
        for number in 1..=MENU_ITEMS.len() {
            assert!(from_number(number).is_some(), "menu item {number} unmapped");
        }
        assert_eq!(from_number(MENU_ITEMS.len() + 1), None);
    }

    #[test]
    fn menu_lists_numbered_items() {
        let menu = render_menu();
        assert!(menu.contains("1. View Checklist\n"));
        assert!(menu.contains("28. Exit\n"));
    }
}
