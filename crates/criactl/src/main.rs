//! Cria CLI - critique ad creatives across Meta placements.
//!
//! With no subcommand this starts the interactive session; `analyze` runs a
//! one-shot critique for scripting.

mod cli;
mod commands;
mod display;
mod errors;
mod interactive;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so --json output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let code = match cli.command {
        Some(Commands::Analyze {
            square,
            vertical,
            group,
            json,
        }) => commands::analyze::run(square, vertical, group.into(), json).await?,
        Some(Commands::Placements { group, json }) => {
            commands::placements::run(group.map(Into::into), json)?
        }
        Some(Commands::Doctor) => commands::doctor::run()?,
        None => interactive::run().await?,
    };

    std::process::exit(code);
}
