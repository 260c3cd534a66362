use std::path::Path;

use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub fn run(
    path: &Path,
    name: Option<&str>,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = ctx
        .manager
        .import_external(path, name)
        .with_context(|| format!("failed to import {}", path.display()))?;
    output(&response, flags.format)
}

pub fn markdown(path: &Path, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = ctx
        .store_mut(flags)?
        .import_markdown(path)
        .with_context(|| format!("failed to import {}", path.display()))?;
    output(&response, flags.format)
}
