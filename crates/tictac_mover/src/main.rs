//! Reference remote mover binary.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Tic-tac-toe remote mover - judges positions and replies to player moves
#[derive(Parser, Debug)]
#[command(name = "tictac_mover")]
#[command(about = "Remote mover for tic-tac-toe clients", long_about = None)]
#[command(version)]
struct Cli {
    /// Host to bind to
    #[arg(long, env = "TICTAC_MOVER_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to
    #[arg(short, long, env = "TICTAC_MOVER_PORT", default_value = "8000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!(host = %cli.host, port = cli.port, "Starting remote mover");

    let listener = tokio::net::TcpListener::bind((cli.host.as_str(), cli.port)).await?;
    tictac_mover::serve(listener).await?;

    Ok(())
}
