//! Shared vocabulary for tic-tac-toe against a remote mover.
//!
//! The client and the remote mover exchange whole boards, never deltas. This
//! crate owns the board representation, the game status names and the JSON
//! payloads of the two remote operations.
//!
//! # Wire format
//!
//! Boards travel as fixed-width strings of mark symbols (`.`, `X`, `O`), in
//! row-major order:
//!
//! ```
//! use tictac_protocol::{Board, Mark};
//!
//! let board: Board = "....X....".parse().unwrap();
//! assert_eq!(board.side(), 3);
//! assert_eq!(board.get(4), Some(Mark::Player));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod mark;
mod status;
mod wire;

pub use board::{Board, BoardError};
pub use mark::Mark;
pub use status::GameStatus;
pub use wire::{
    DEFAULT_BOARD_SIZE, ErrorBody, HealthResponse, MoveOutcome, MoveRequest, MoveResponse,
    NewGameRequest, NewGameResponse,
};
