use ckl_core::entities::Task;
use ckl_core::enums::TaskStatus;
use serde::Deserialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SortOrder {
    Insertion,
    Priority,
}

pub fn run(
    sort: &str,
    status: Option<&str>,
    limit: Option<usize>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = ctx.store(flags)?;
    let mut tasks: Vec<&Task> = match parse_enum::<SortOrder>(sort, "sort")? {
        SortOrder::Insertion => store.tasks().iter().collect(),
        SortOrder::Priority => store.sorted_by_priority(),
    };

    if let Some(status) = status {
        let status = parse_enum::<TaskStatus>(status, "status")?;
        tasks.retain(|task| task.status == status);
    }
    if let Some(limit) = limit {
        tasks.truncate(limit);
    }

    output(&tasks, flags.format)
}
