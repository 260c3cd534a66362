use serde_json::json;

use crate::cli::GlobalFlags;
use crate::commands::shared::confirm::confirm;
use crate::context::AppContext;
use crate::output::output;

pub fn run(yes: bool, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let name = ctx.target_name(flags);
    if !confirm(&format!("Clear every task in '{name}'?"), yes)? {
        eprintln!("Checklist not cleared.");
        return Ok(());
    }
    let removed = ctx.store_mut(flags)?.clear()?;
    output(&json!({ "checklist": name, "removed": removed }), flags.format)
}
