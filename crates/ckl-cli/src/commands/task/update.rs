//! Single-task mutations that print the resulting task.

use ckl_core::entities::Task;
use ckl_store::{ChecklistStore, StoreError};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

fn apply(
    ctx: &mut AppContext,
    flags: &GlobalFlags,
    op: impl FnOnce(&mut ChecklistStore) -> Result<Task, StoreError>,
) -> anyhow::Result<()> {
    let task = op(ctx.store_mut(flags)?)?;
    output(&task, flags.format)
}

pub fn complete(id: u64, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    apply(ctx, flags, |store| store.complete(id))
}

pub fn uncomplete(id: u64, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    apply(ctx, flags, |store| store.uncomplete(id))
}

pub fn progress(id: u64, pct: u8, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    apply(ctx, flags, |store| store.set_progress(id, pct))
}

pub fn promote(id: u64, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    apply(ctx, flags, |store| store.promote(id))
}

pub fn regress(id: u64, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    apply(ctx, flags, |store| store.regress(id))
}

/// Prints the removed task.
pub fn delete(id: u64, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    apply(ctx, flags, |store| store.delete(id))
}
