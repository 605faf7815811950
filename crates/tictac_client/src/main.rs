//! Tic-tac-toe client binary.

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tictac_client::cli::{Cli, Command};
use tictac_client::{ClientConfig, tui};
use tracing::instrument;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            server_url,
            size,
            config,
            log_file,
        } => {
            let config = resolve_config(config.as_deref(), server_url, size)?;
            run_play(config, log_file).await
        }
        Command::Config { config } => {
            let config = resolve_config(config.as_deref(), None, None)?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Merges config file, environment and command-line overrides.
#[instrument]
fn resolve_config(
    path: Option<&Path>,
    server_url: Option<String>,
    size: Option<usize>,
) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(path)?;
    if let Some(url) = server_url {
        config = config.with_api_url(url);
    }
    if let Some(size) = size {
        config = config.with_board_size(size);
    }
    config.validate()?;
    Ok(config)
}

/// Runs the terminal client.
async fn run_play(config: ClientConfig, log_file: PathBuf) -> Result<()> {
    tui::init_logging(&log_file)?;
    tui::run(config).await
}
