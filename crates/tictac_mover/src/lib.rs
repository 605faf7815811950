//! Reference remote mover for tic-tac-toe clients.
//!
//! Serves the two game operations over HTTP. The mover keeps no state: every
//! move request carries the whole board, gets validated and judged, and the
//! mover answers with its own reply already applied.
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> anyhow::Result<()> {
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! tictac_mover::serve(listener).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod routes;
mod rules;

pub use engine::{choose_reply, play};
pub use error::Rejection;
pub use routes::router;
pub use rules::{
    Judgement, MAX_SIDE, MIN_SIDE, judge, validate_board, validate_move, winning_lines,
};

use tracing::info;

/// Serves the mover API on an already bound listener until the process exits.
pub async fn serve(listener: tokio::net::TcpListener) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Remote mover listening");
    }
    axum::serve(listener, router()).await
}
