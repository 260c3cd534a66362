use anyhow::Context;
use ckl_store::export::write_export;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ckl export`.
pub fn handle(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let dir = ctx.export_dir(args.dir.as_deref());
    let store = ctx.store(flags)?;
    let response = write_export(store, &dir)
        .with_context(|| format!("failed to export checklist '{}'", store.name()))?;
    output(&response, flags.format)
}
