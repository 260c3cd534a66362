use ckl_core::responses::UndoResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ckl undo`.
pub fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.store_mut(flags)?;
    let undone = store.undo()?;
    if undone.is_none() && !flags.quiet {
        eprintln!("No actions to undo.");
    }
    output(
        &UndoResponse {
            checklist: store.name().to_string(),
            undone,
        },
        flags.format,
    )
}
