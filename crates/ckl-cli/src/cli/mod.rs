use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `ckl` binary.
#[derive(Debug, Parser)]
#[command(
    name = "ckl",
    version,
    about = "Checklist++ - terminal checklists with priorities, timers, and a kanban board"
)]
pub struct Cli {
    /// Subcommand to run; the interactive shell when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Checklist directory (defaults to the configured data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Operate on this checklist without switching to it
    #[arg(short, long, global = true)]
    pub checklist: Option<String>,

    /// Color output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            data_dir: self.data_dir.clone(),
            checklist: self.checklist.clone(),
            color: self.color,
        }
    }
}
