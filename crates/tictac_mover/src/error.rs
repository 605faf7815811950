//! Rejections returned to clients.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::{Display, Error};
use tictac_protocol::ErrorBody;
use tracing::warn;

/// Reason a request was refused.
///
/// The display strings are the `error` values clients see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum Rejection {
    /// Board undecodable, not square, or smaller than the minimum side.
    #[display("invalid board")]
    InvalidBoard,
    /// Requested side outside the supported range.
    #[display("invalid board size")]
    InvalidBoardSize,
    /// Move index missing or off the board.
    #[display("invalid move index")]
    InvalidMoveIndex,
    /// Board already holds a finished game.
    #[display("game is already over")]
    GameOver,
    /// Target cell already taken.
    #[display("cell occupied")]
    CellOccupied,
    /// The opponent has more marks than the player.
    #[display("invalid turn order")]
    InvalidTurnOrder,
    /// No empty cell left for the reply.
    #[display("no legal moves")]
    NoLegalMoves,
}

impl Rejection {
    /// HTTP status for this rejection.
    pub fn status_code(self) -> StatusCode {
        match self {
            Rejection::NoLegalMoves => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        warn!(error = %self, "Rejecting request");
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
