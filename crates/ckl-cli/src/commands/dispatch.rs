use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;
use crate::shell;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Shell => shell::run(ctx),
        Commands::Show(args) => commands::show::handle(&args, ctx, flags),
        Commands::Task { action } => commands::task::handle(&action, ctx, flags),
        Commands::Undo => commands::undo::handle(ctx, flags),
        Commands::Checklist { action } => commands::checklist::handle(&action, ctx, flags),
        Commands::Export(args) => commands::export::handle(&args, ctx, flags),
        Commands::Schema(args) => commands::schema::handle(&args, flags),
        Commands::Config => commands::config::handle(&ctx.config, flags),
    }
}
