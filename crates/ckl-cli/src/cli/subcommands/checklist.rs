use std::path::PathBuf;

use clap::Subcommand;

/// Checklist management commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ChecklistCommands {
    /// List checklists.
    List,
    /// Create an empty checklist.
    Create {
        name: String,
        /// Make it the active checklist
        #[arg(long)]
        switch: bool,
    },
    /// Make a checklist active.
    Switch { name: String },
    /// Delete a checklist.
    Delete {
        name: String,
        #[arg(long)]
        yes: bool,
    },
    /// Delete every checklist.
    DeleteAll {
        #[arg(long)]
        yes: bool,
    },
    /// Import a JSON checklist file and make it active.
    Import {
        path: PathBuf,
        /// Name to register it under (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,
    },
    /// Append the task items of a markdown file to the active checklist.
    ImportMd { path: PathBuf },
    /// Counts and totals for the active checklist.
    Summary,
}
