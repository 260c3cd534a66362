use clap::Subcommand;

/// Task commands. Ids are the numbers shown next to each task.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// Add a task.
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
        /// high, medium, low
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// Change a task's title or priority.
    Edit {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// Mark a task completed.
    Complete { id: u64 },
    /// Reopen a completed task.
    Uncomplete { id: u64 },
    /// Set the progress percentage (0-100).
    Progress { id: u64, pct: u8 },
    /// Start the task timer.
    Start { id: u64 },
    /// Stop the task timer.
    Stop { id: u64 },
    /// Delete a task.
    Delete { id: u64 },
    /// Move a task one kanban column right.
    Promote { id: u64 },
    /// Move a task one kanban column left.
    Regress { id: u64 },
    /// Get a task by id.
    Get { id: u64 },
    /// List tasks.
    List {
        /// insertion or priority
        #[arg(long, default_value = "insertion")]
        sort: String,
        /// todo, in_progress, done
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Remove every task.
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
