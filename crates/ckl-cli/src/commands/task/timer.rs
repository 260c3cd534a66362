use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub fn start(id: u64, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = ctx.store_mut(flags)?.start_timer(id)?;
    if !response.changed && !flags.quiet {
        eprintln!("Timer for task {id} is already running.");
    }
    output(&response, flags.format)
}

pub fn stop(id: u64, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = ctx.store_mut(flags)?.stop_timer(id)?;
    if !response.changed && !flags.quiet {
        eprintln!("Timer for task {id} is not running.");
    }
    output(&response, flags.format)
}
