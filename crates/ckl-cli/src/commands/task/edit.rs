use ckl_core::enums::Priority;
use ckl_store::TaskUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::title::fit_title;
use crate::context::AppContext;
use crate::output::output;

pub fn run(
    id: u64,
    title: Option<&str>,
    priority: Option<&str>,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut builder = TaskUpdateBuilder::new();
    if let Some(title) = title {
        let (title, _) = fit_title(title, ctx.config.limits.taskname);
        builder = builder.title(title);
    }
    if let Some(priority) = priority {
        builder = builder.priority(parse_enum::<Priority>(priority, "priority")?);
    }

    let task = ctx.store_mut(flags)?.edit(id, builder.build())?;
    output(&task, flags.format)
}
