//! Interactive menu shell: the default `ckl` mode.
//!
//! Each line is parsed by [`menu::parse`] into a [`MenuCommand`] and applied
//! by [`execute`]. Errors are printed and the loop asks again.

pub mod menu;
pub mod prompt;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use ckl_core::enums::{Priority, TaskStatus, ViewKind};
use ckl_store::export::{seconds, write_export};
use ckl_store::{ChecklistStore, KanbanBoard, StoreError, TaskUpdateBuilder};

use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::title::fit_title;
use crate::context::AppContext;
use crate::render::DisplayPrefs;
use crate::render::kanban::render_kanban;
use crate::render::list::render_list;
use crate::ui;

pub use menu::MenuCommand;
pub use prompt::Prompt;

const BANNER: &str = "Checklist++";

/// Whether the loop keeps reading after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Shell state: the application context plus the runtime display toggles.
#[derive(Debug)]
pub struct Session<'a> {
    pub ctx: &'a mut AppContext,
    pub prefs: DisplayPrefs,
    pub term_width: Option<usize>,
}

impl<'a> Session<'a> {
    pub const fn new(ctx: &'a mut AppContext, prefs: DisplayPrefs, term_width: Option<usize>) -> Self {
        Self {
            ctx,
            prefs,
            term_width,
        }
    }

    fn active(&self) -> anyhow::Result<&ChecklistStore> {
        Ok(self.ctx.manager.active()?)
    }

    fn active_mut(&mut self) -> anyhow::Result<&mut ChecklistStore> {
        Ok(self.ctx.manager.active_mut()?)
    }

    /// The active checklist in the current view.
    pub fn render_view(&self) -> anyhow::Result<String> {
        let store = self.active()?;
        Ok(match self.prefs.view() {
            ViewKind::Kanban => render_kanban(
                &KanbanBoard::build(store),
                &self.ctx.config.limits,
                &self.prefs,
                self.term_width,
            ),
            ViewKind::Checklist => render_list(
                store.name(),
                &store.sorted_by_priority(),
                store.now(),
                &self.prefs,
            ),
        })
    }

    fn show<R: BufRead, W: Write>(&self, prompt: &mut Prompt<R, W>) -> anyhow::Result<()> {
        prompt.print(&self.render_view()?)?;
        Ok(())
    }

    fn repaint<R: BufRead, W: Write>(&self, prompt: &mut Prompt<R, W>) -> anyhow::Result<()> {
        if self.ctx.config.general.repaint {
            self.show(prompt)?;
        }
        Ok(())
    }
}

/// Run the shell on the process terminal.
pub fn run(ctx: &mut AppContext) -> anyhow::Result<()> {
    let ui = ui::prefs();
    let prefs = DisplayPrefs::from_config(&ctx.config, ui.color);
    let mut session = Session::new(ctx, prefs, ui.term_width);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompt = Prompt::new(stdin.lock(), stdout.lock());
    run_loop(&mut session, &mut prompt)
}

/// Show the current view, then read and execute commands until `quit` or
/// end of input.
pub fn run_loop<R: BufRead, W: Write>(
    session: &mut Session<'_>,
    prompt: &mut Prompt<R, W>,
) -> anyhow::Result<()> {
    prompt.say(BANNER)?;
    session.show(prompt)?;

    loop {
        if session.prefs.menu_visible {
            prompt.print(&menu::render_menu())?;
        }
        let Some(line) = prompt.ask("Choose an option (or enter shortcut command): ")? else {
            break;
        };
        let outcome = menu::parse(&line).and_then(|command| match command {
            Some(command) => execute(command, session, prompt),
            None => Ok(Flow::Continue),
        });
        match outcome {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(error) => {
                tracing::debug!(error = %error, input = %line, "shell command failed");
                prompt.say(&format!("Error: {error:#}"))?;
            }
        }
    }
    Ok(())
}

/// Apply one command to the session.
///
/// # Errors
///
/// Typed store errors, unparseable answers, and I/O errors on the prompt.
#[allow(clippy::too_many_lines)]
pub fn execute<R: BufRead, W: Write>(
    command: MenuCommand,
    session: &mut Session<'_>,
    prompt: &mut Prompt<R, W>,
) -> anyhow::Result<Flow> {
    match command {
        MenuCommand::Show => session.show(prompt)?,
        MenuCommand::View(kind) => {
            session.prefs.kanban = kind == ViewKind::Kanban;
            session.show(prompt)?;
        }
        MenuCommand::Add(title) => add_task(title, session, prompt)?,
        MenuCommand::Complete(id) => {
            let id = task_id(id, "Enter the task number to mark as completed: ", prompt)?;
            let task = session.active_mut()?.complete(id)?;
            prompt.say(&format!("Task '{}' marked as completed.", task.title))?;
            session.repaint(prompt)?;
        }
        MenuCommand::Uncomplete(id) => {
            let id = task_id(id, "Enter the task number to mark as incomplete: ", prompt)?;
            let task = session.active_mut()?.uncomplete(id)?;
            prompt.say(&format!("Task '{}' marked as incomplete.", task.title))?;
            session.repaint(prompt)?;
        }
        MenuCommand::StartTimer(id) => {
            let id = task_id(id, "Enter the number of the task to start: ", prompt)?;
            let response = session.active_mut()?.start_timer(id)?;
            if response.changed {
                prompt.say(&format!("Started tracking time for task: {}", response.task.title))?;
            } else {
                prompt.say(&format!("Timer for '{}' is already running.", response.task.title))?;
            }
        }
        MenuCommand::StopTimer(id) => {
            let id = task_id(id, "Enter the number of the task to stop: ", prompt)?;
            let response = session.active_mut()?.stop_timer(id)?;
            if response.changed {
                prompt.say(&format!(
                    "Stopped tracking time for task: {}, Time Spent: {:.2} seconds",
                    response.task.title,
                    seconds(response.task.elapsed_ms)
                ))?;
            } else {
                prompt.say(&format!("Timer for '{}' is not running.", response.task.title))?;
            }
        }
        MenuCommand::SetProgress(id) => {
            let id = task_id(id, "Enter the task number: ", prompt)?;
            let answer = prompt.require("Enter progress percentage (0-100): ")?;
            let Ok(pct) = answer.parse::<u8>() else {
                anyhow::bail!("Please enter a valid number.");
            };
            let task = session.active_mut()?.set_progress(id, pct)?;
            prompt.say(&format!("Task '{}' is {}% done.", task.title, task.progress))?;
            session.repaint(prompt)?;
        }
        MenuCommand::Edit(id) => edit_task(id, session, prompt)?,
        MenuCommand::Delete(id) => {
            let id = task_id(id, "Enter the number of the task to delete: ", prompt)?;
            let task = session.active_mut()?.delete(id)?;
            prompt.say(&format!("Deleted: {}", task.title))?;
            session.repaint(prompt)?;
        }
        MenuCommand::Undo => {
            let undone = session.active_mut()?.undo()?;
            match undone {
                Some(action) => {
                    prompt.say(&format!("Undid last action ({action})."))?;
                    session.repaint(prompt)?;
                }
                None => prompt.say("No actions to undo.")?,
            }
        }
        MenuCommand::Clear => {
            if prompt.confirm("Are you sure you want to clear the entire checklist?")? {
                session.active_mut()?.clear()?;
                prompt.say("Checklist has been cleared.")?;
            } else {
                prompt.say("Checklist not cleared.")?;
            }
        }
        MenuCommand::Promote(id) => move_task(id, true, session, prompt)?,
        MenuCommand::Regress(id) => move_task(id, false, session, prompt)?,
        MenuCommand::ListChecklists => list_checklists(session, prompt)?,
        MenuCommand::CreateChecklist => {
            let answer = prompt.require("Enter a name for the new checklist: ")?;
            let name = session.ctx.manager.create(&answer)?.name().to_string();
            session.ctx.manager.switch(&name)?;
            prompt.say(&format!("Created and switched to checklist '{name}'."))?;
        }
        MenuCommand::SwitchChecklist => {
            list_checklists(session, prompt)?;
            let name = prompt.require("Enter the name of the checklist to load: ")?;
            session.ctx.manager.switch(&name)?;
            prompt.say(&format!("Switched to checklist '{name}'."))?;
            session.show(prompt)?;
        }
        MenuCommand::DeleteChecklist => {
            list_checklists(session, prompt)?;
            let name = prompt.require("Enter the name of the checklist to delete: ")?;
            session.ctx.manager.get(&name)?;
            if prompt.confirm(&format!("Are you sure you want to delete '{name}'?"))? {
                session.ctx.manager.delete(&name)?;
                prompt.say(&format!("Checklist '{name}' has been deleted."))?;
            } else {
                prompt.say("Deletion cancelled.")?;
            }
        }
        MenuCommand::DeleteAllChecklists => {
            if prompt.confirm("Are you sure you want to delete ALL checklists?")? {
                session.ctx.manager.delete_all()?;
                prompt.say("All checklists have been deleted.")?;
            } else {
                prompt.say("Deletion cancelled.")?;
            }
        }
        MenuCommand::Import(path) => import_checklist(path, session, prompt)?,
        MenuCommand::ImportMarkdown(path) => {
            let path = match path {
                Some(path) => path,
                None => PathBuf::from(prompt.require("Enter the path to the markdown file: ")?),
            };
            let response = session.active_mut()?.import_markdown(&path)?;
            prompt.say(&format!(
                "Added {} tasks from {} to '{}'.",
                response.tasks, response.source, response.name
            ))?;
            session.repaint(prompt)?;
        }
        MenuCommand::Export => {
            let dir = session.ctx.export_dir(None);
            let response = write_export(session.active()?, &dir)?;
            prompt.say(&format!("Checklist exported to {}", response.path))?;
        }
        MenuCommand::ToggleColor => {
            session.prefs.color = !session.prefs.color;
            prompt.say(&format!("Color coding has been {}.", on_off(session.prefs.color)))?;
        }
        MenuCommand::ToggleSimpleView => {
            session.prefs.simple_view = !session.prefs.simple_view;
            prompt.say(&format!(
                "Simplified view has been {}.",
                on_off(session.prefs.simple_view)
            ))?;
        }
        MenuCommand::ToggleOneLine => {
            session.prefs.one_line = !session.prefs.one_line;
            prompt.say(&format!(
                "One-line display has been {}.",
                on_off(session.prefs.one_line)
            ))?;
        }
        MenuCommand::ToggleMenu => {
            session.prefs.menu_visible = !session.prefs.menu_visible;
            let state = if session.prefs.menu_visible { "shown" } else { "hidden" };
            prompt.say(&format!("Menu is now {state}."))?;
        }
        MenuCommand::ToggleKanban => {
            session.prefs.kanban = !session.prefs.kanban;
            let view = if session.prefs.kanban { "Kanban" } else { "Checklist" };
            prompt.say(&format!("Switched to {view} view."))?;
        }
        MenuCommand::ToggleKanbanAlignment => {
            session.prefs.kanban_horizontal = !session.prefs.kanban_horizontal;
            let orient = if session.prefs.kanban_horizontal {
                "horizontal"
            } else {
                "vertical"
            };
            prompt.say(&format!("Kanban orientation set to {orient}."))?;
        }
        MenuCommand::Help => prompt.say(menu::SHORT_HELP)?,
        MenuCommand::Quit => {
            prompt.say("Exiting Checklist++.")?;
            return Ok(Flow::Quit);
        }
    }
    Ok(Flow::Continue)
}

fn task_id<R: BufRead, W: Write>(
    given: Option<u64>,
    question: &str,
    prompt: &mut Prompt<R, W>,
) -> anyhow::Result<u64> {
    match given {
        Some(id) => Ok(id),
        None => prompt.ask_id(question),
    }
}

const fn on_off(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

fn add_task<R: BufRead, W: Write>(
    title: Option<String>,
    session: &mut Session<'_>,
    prompt: &mut Prompt<R, W>,
) -> anyhow::Result<()> {
    // Short `a <text>` adds at Medium; the numbered entry asks for both.
    let (title, priority) = match title {
        Some(title) => (title, Priority::Medium),
        None => {
            let title = prompt.require("Enter the task: ")?;
            let raw = prompt.require("Enter priority (High, Medium, Low) [Medium]: ")?;
            let priority = if raw.is_empty() {
                Priority::Medium
            } else if let Ok(priority) = parse_enum::<Priority>(&raw, "priority") {
                priority
            } else {
                prompt.say("Invalid priority. Defaulting to Medium.")?;
                Priority::Medium
            };
            (title, priority)
        }
    };

    let limit = session.ctx.config.limits.taskname;
    let (title, truncated) = fit_title(&title, limit);
    if truncated {
        prompt.say(&format!("Note: Task text truncated to {limit} characters"))?;
    }
    let task = session.active_mut()?.add(&title, priority)?;
    prompt.say(&format!(
        "Task {}: '{}' added with priority '{}'.",
        task.id,
        task.title,
        task.priority.label()
    ))?;
    session.repaint(prompt)
}

fn edit_task<R: BufRead, W: Write>(
    id: Option<u64>,
    session: &mut Session<'_>,
    prompt: &mut Prompt<R, W>,
) -> anyhow::Result<()> {
    let id = task_id(id, "Enter the number of the task to edit: ", prompt)?;
    let current = session.active()?.get(id)?.clone();

    let mut builder = TaskUpdateBuilder::new();
    let title = prompt.require(&format!("Edit task name (current: {}): ", current.title))?;
    if !title.is_empty() {
        let (title, _) = fit_title(&title, session.ctx.config.limits.taskname);
        builder = builder.title(title);
    }
    let priority = prompt.require(&format!(
        "Edit priority (current: {} - High, Medium, Low): ",
        current.priority.label()
    ))?;
    if !priority.is_empty() {
        builder = builder.priority(parse_enum::<Priority>(&priority, "priority")?);
    }

    let update = builder.build();
    if update.is_empty() {
        prompt.say("No changes.")?;
        return Ok(());
    }
    let task = session.active_mut()?.edit(id, update)?;
    prompt.say(&format!("Task '{}' has been updated.", task.title))?;
    session.repaint(prompt)
}

fn move_task<R: BufRead, W: Write>(
    id: Option<u64>,
    forward: bool,
    session: &mut Session<'_>,
    prompt: &mut Prompt<R, W>,
) -> anyhow::Result<()> {
    let verb = if forward { "promote" } else { "regress" };
    let id = task_id(id, &format!("Enter the task number to {verb}: "), prompt)?;

    let status = session.active()?.get(id)?.status;
    let target: Option<TaskStatus> = if forward {
        status.next()
    } else {
        status.previous()
    };
    if target.is_none() {
        let edge = if forward { "last" } else { "first" };
        prompt.say(&format!("Task is already in the {edge} column."))?;
        return Ok(());
    }

    let store = session.active_mut()?;
    let task = if forward {
        store.promote(id)?
    } else {
        store.regress(id)?
    };
    let past = if forward { "promoted" } else { "regressed" };
    prompt.say(&format!("Task {past} to {}", task.status.label()))?;
    session.repaint(prompt)
}

fn list_checklists<R: BufRead, W: Write>(
    session: &Session<'_>,
    prompt: &mut Prompt<R, W>,
) -> anyhow::Result<()> {
    prompt.say("\nAvailable Checklists:")?;
    for (index, entry) in session.ctx.manager.entries().iter().enumerate() {
        let marker = if entry.active { " (active)" } else { "" };
        prompt.say(&format!(
            "{}. {}{marker} [{}/{}]",
            index + 1,
            entry.name,
            entry.completed,
            entry.total
        ))?;
    }
    Ok(())
}

fn import_checklist<R: BufRead, W: Write>(
    path: Option<PathBuf>,
    session: &mut Session<'_>,
    prompt: &mut Prompt<R, W>,
) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path,
        None => PathBuf::from(prompt.require("Enter the full path to the JSON file: ")?),
    };

    let mut name: Option<String> = None;
    loop {
        match session.ctx.manager.import_external(&path, name.as_deref()) {
            Ok(response) => {
                prompt.say(&format!(
                    "Imported '{}' ({} tasks) and made it active.",
                    response.name, response.tasks
                ))?;
                return session.repaint(prompt);
            }
            Err(StoreError::Conflict { name: taken }) => {
                let answer = prompt.require(&format!(
                    "A checklist named '{taken}' already exists. Enter another name (blank to cancel): "
                ))?;
                if answer.is_empty() {
                    prompt.say("Import cancelled.")?;
                    return Ok(());
                }
                name = Some(answer);
            }
            Err(error) => return Err(error.into()),
        }
    }
}
