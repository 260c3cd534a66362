use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{ChecklistCommands, TaskCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Interactive menu (the default).
    Shell,
    /// Render the active checklist.
    Show(ShowArgs),
    /// Tasks of the active checklist.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Revert the last change to the active checklist.
    Undo,
    /// Named checklists.
    Checklist {
        #[command(subcommand)]
        action: ChecklistCommands,
    },
    /// Export the active checklist to markdown.
    Export(ExportArgs),
    /// Print the JSON schema of a checklist type.
    Schema(SchemaArgs),
    /// Print the effective configuration.
    Config,
}

#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    /// checklist or kanban (defaults to general.default_view)
    #[arg(long)]
    pub view: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Directory for the markdown file (defaults to general.export_dir)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name, e.g. task, checklist_file, checklist_summary
    pub type_name: String,
}
