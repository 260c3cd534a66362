use serde_json::json;

use crate::cli::GlobalFlags;
use crate::commands::shared::confirm::confirm;
use crate::context::AppContext;
use crate::output::output;

pub fn create(name: &str, switch: bool, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let created = ctx.manager.create(name)?.name().to_string();
    if switch {
        ctx.manager.switch(&created)?;
    }
    output(
        &json!({ "created": created, "active": ctx.manager.active_name() }),
        flags.format,
    )
}

pub fn switch(name: &str, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.manager.switch(name)?;
    output(&json!({ "active": ctx.manager.active_name() }), flags.format)
}

pub fn delete(name: &str, yes: bool, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    // Fail on an unknown name before asking.
    ctx.manager.get(name)?;
    if !confirm(&format!("Delete checklist '{name}'?"), yes)? {
        eprintln!("Deletion cancelled.");
        return Ok(());
    }
    ctx.manager.delete(name)?;
    output(
        &json!({ "deleted": name, "active": ctx.manager.active_name() }),
        flags.format,
    )
}

pub fn delete_all(yes: bool, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !confirm("Delete ALL checklists?", yes)? {
        eprintln!("Deletion cancelled.");
        return Ok(());
    }
    let removed = ctx.manager.delete_all()?;
    output(
        &json!({ "removed": removed, "active": ctx.manager.active_name() }),
        flags.format,
    )
}
