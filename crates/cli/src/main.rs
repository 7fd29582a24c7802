mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use recipe_core::config::load_dotenv;
use recipe_core::Config;

use crate::cli::{CliArgs, Command};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Before argument parsing so `env =` flags see .env values.
    load_dotenv();
    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => Config::load_path(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    match args.command {
        Command::Parse(parse_args) => {
            let summary = commands::parse(&config, &parse_args)?;
            println!(
                "{} files, {} chunks -> {}",
                summary.files,
                summary.chunks,
                summary.out.display()
            );
        }
        Command::Collect { dir } => {
            let stdout = std::io::stdout();
            commands::collect(&config, dir.as_deref(), &mut stdout.lock())?;
        }
        Command::Serve { port } => commands::serve(config, port).await?,
    }
    Ok(())
}
