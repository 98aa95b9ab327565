use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tl_cli::commands::{add, blocks, report, show};
use tl_cli::{BlockArgs, Cli, Commands, Config};
use tl_core::NewEntry;
use tl_store::BlockHandle;

fn handle(target: &BlockArgs) -> BlockHandle {
    BlockHandle::new(target.file.clone(), target.block)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Some(Commands::Blocks { file }) => blocks::run(&config, &file)?,
        Some(Commands::Show {
            target,
            order,
            all,
            today,
            json,
        }) => show::run(&config, &handle(&target), order, all, today.as_deref(), json)?,
        Some(Commands::Add {
            target,
            date,
            from,
            to,
            break_time,
            note,
        }) => {
            let entry = NewEntry {
                date,
                from,
                to,
                break_time,
                note,
            };
            add::run(&config, &handle(&target), &entry)?;
        }
        Some(Commands::Report {
            target,
            month,
            order,
            json,
        }) => report::run(&config, &handle(&target), month, order, json)?,
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
