//! Tic-tac-toe client for a remote mover.
//!
//! The client owns the board, the game status and the in-flight guard; the
//! remote mover picks replies and judges wins and draws.
//!
//! # Architecture
//!
//! - **Protocol**: [`MoveService`] and its HTTP implementation
//!   [`HttpMoveClient`], two stateless request/response calls.
//! - **Session**: [`Session`], a pure state machine turning [`SessionEvent`]s
//!   into [`Effect`]s, and [`SessionController`], which runs those effects on
//!   tokio and feeds completions back as events.
//! - **Projection**: [`project`] turns a [`SessionState`] into a
//!   [`BoardView`] for display.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tictac_client::{ClientConfig, HttpMoveClient, SessionController};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::default();
//! let client = HttpMoveClient::from_config(&config)?;
//! let mut controller = SessionController::from_config(Arc::new(client), &config);
//!
//! controller.boot();
//! controller.next_event().await;
//! controller.submit_move(4);
//! controller.next_event().await;
//! println!("{}", controller.view().status);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod assets;
mod config;
mod projection;
mod protocol;
mod session;

pub mod cli;
pub mod tui;

pub use assets::{Icon, icon_path};
pub use config::{ClientConfig, ConfigError, MIN_BOARD_SIZE};
pub use projection::{BoardView, CellView, StatusLine, project};
pub use protocol::{HttpMoveClient, MoveService, ProtocolError};
pub use session::{
    Effect, Generation, Notice, Session, SessionController, SessionEvent, SessionState,
    WinningLine,
};

pub use tictac_protocol::{Board, GameStatus, Mark, MoveOutcome};
