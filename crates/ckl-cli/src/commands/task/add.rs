use ckl_core::enums::Priority;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::title::fit_title;
use crate::context::AppContext;
use crate::output::output;

pub fn run(
    words: &[String],
    priority: Option<&str>,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let priority = priority
        .map(|value| parse_enum::<Priority>(value, "priority"))
        .transpose()?
        .unwrap_or_default();

    let limit = ctx.config.limits.taskname;
    let (title, truncated) = fit_title(&words.join(" "), limit);
    if truncated && !flags.quiet {
        eprintln!("Note: task title truncated to {limit} characters");
    }

    let task = ctx.store_mut(flags)?.add(&title, priority)?;
    output(&task, flags.format)
}
