use anyhow::Context;
use clap::Parser;
use ckl_config::CklConfig;

mod cli;
mod commands;
mod context;
mod output;
mod render;
mod shell;
mod ui;

fn main() {
    if let Err(error) = run() {
        eprintln!("ckl error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    if let Some(cli::Commands::Schema(args)) = &cli.command {
        return commands::schema::handle(args, &flags);
    }

    let config = CklConfig::load_with_dotenv().context("failed to load configuration")?;

    if let Some(cli::Commands::Config) = &cli.command {
        return commands::config::handle(&config, &flags);
    }

    let mut ctx = context::AppContext::init(config, &flags)
        .context("failed to initialize checklist context")?;

    let command = cli.command.unwrap_or(cli::Commands::Shell);
    commands::dispatch::dispatch(command, &mut ctx, &flags)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CHECKLIST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
