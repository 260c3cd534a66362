use ckl_config::CklConfig;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `ckl config`: print the effective, fully merged configuration.
pub fn handle(config: &CklConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(config, flags.format)
}
