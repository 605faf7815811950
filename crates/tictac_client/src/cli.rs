//! Command-line interface for the tic-tac-toe client.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe against a remote mover
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Play tic-tac-toe against a remote mover", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Remote mover base URL (overrides config file and API_URL)
        #[arg(long)]
        server_url: Option<String>,

        /// Board side length (3 for classic tic-tac-toe)
        #[arg(short, long)]
        size: Option<usize>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// File to write logs to
        #[arg(long, default_value = "tictac.log")]
        log_file: PathBuf,
    },

    /// Print the resolved configuration as TOML
    Config {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn play_flags() {
        let cli = Cli::parse_from(["tictac", "play", "--server-url", "http://x:1", "-s", "4"]);
        match cli.command {
            Command::Play {
                server_url, size, ..
            } => {
                assert_eq!(server_url.as_deref(), Some("http://x:1"));
                assert_eq!(size, Some(4));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
