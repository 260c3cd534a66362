mod import;
mod manage;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ChecklistCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ckl checklist`.
pub fn handle(
    action: &ChecklistCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ChecklistCommands::List => output(&ctx.manager.entries(), flags.format),
        ChecklistCommands::Create { name, switch } => manage::create(name, *switch, ctx, flags),
        ChecklistCommands::Switch { name } => manage::switch(name, ctx, flags),
        ChecklistCommands::Delete { name, yes } => manage::delete(name, *yes, ctx, flags),
        ChecklistCommands::DeleteAll { yes } => manage::delete_all(*yes, ctx, flags),
        ChecklistCommands::Import { path, name } => import::run(path, name.as_deref(), ctx, flags),
        ChecklistCommands::ImportMd { path } => import::markdown(path, ctx, flags),
        ChecklistCommands::Summary => output(&ctx.store(flags)?.summary(), flags.format),
    }
}
