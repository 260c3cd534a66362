mod add;
mod clear;
mod edit;
mod get;
mod list;
mod timer;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;

/// Handle `ckl task`.
pub fn handle(action: &TaskCommands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        TaskCommands::Add { title, priority } => add::run(title, priority.as_deref(), ctx, flags),
        TaskCommands::Edit {
            id,
            title,
            priority,
        } => edit::run(*id, title.as_deref(), priority.as_deref(), ctx, flags),
        TaskCommands::Complete { id } => update::complete(*id, ctx, flags),
        TaskCommands::Uncomplete { id } => update::uncomplete(*id, ctx, flags),
        TaskCommands::Progress { id, pct } => update::progress(*id, *pct, ctx, flags),
        TaskCommands::Start { id } => timer::start(*id, ctx, flags),
        TaskCommands::Stop { id } => timer::stop(*id, ctx, flags),
        TaskCommands::Delete { id } => update::delete(*id, ctx, flags),
        TaskCommands::Promote { id } => update::promote(*id, ctx, flags),
        TaskCommands::Regress { id } => update::regress(*id, ctx, flags),
        TaskCommands::Get { id } => get::run(*id, ctx, flags),
        TaskCommands::List {
            sort,
            status,
            limit,
        } => list::run(sort, status.as_deref(), *limit, ctx, flags),
        TaskCommands::Clear { yes } => clear::run(*yes, ctx, flags),
    }
}
