use anyhow::bail;
use ckl_schema::SchemaRegistry;

use crate::cli::root_commands::SchemaArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `ckl schema`. Tables make no sense for a schema, so `table`
/// prints pretty JSON.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    let name = args.type_name.replace('-', "_");
    let Some(schema) = registry.get(&name) else {
        bail!(
            "unknown schema '{}'; available: {}",
            args.type_name,
            registry.list().join(", ")
        );
    };
    let format = match flags.format {
        OutputFormat::Raw => OutputFormat::Raw,
        OutputFormat::Json | OutputFormat::Table => OutputFormat::Json,
    };
    output(schema, format)
}
