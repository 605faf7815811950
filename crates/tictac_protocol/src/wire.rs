//! JSON payloads of the remote mover endpoints.
//!
//! | Endpoint         | Request          | Response          |
//! |------------------|------------------|-------------------|
//! | `POST /api/new`  | [`NewGameRequest`] | [`NewGameResponse`] |
//! | `POST /api/move` | [`MoveRequest`]    | [`MoveResponse`]    |
//! | `GET /health`    | none             | [`HealthResponse`]  |

use crate::{Board, GameStatus};
use serde::{Deserialize, Serialize};

/// Board side used when a new-game request omits the size.
pub const DEFAULT_BOARD_SIZE: usize = 3;

/// Request body for starting a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewGameRequest {
    /// Board side length. Older clients omit it and get a 3×3 board.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

impl NewGameRequest {
    /// Requested side, falling back to [`DEFAULT_BOARD_SIZE`].
    pub fn side(&self) -> usize {
        self.size.unwrap_or(DEFAULT_BOARD_SIZE)
    }
}

/// Response body for a started game. New games are always playing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameResponse {
    /// All-empty board.
    pub board: Board,
}

/// Request body for submitting a move.
///
/// The remote mover keeps no state between calls, so the full board is sent
/// every time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Board before the move.
    pub board: Board,
    /// Cell index chosen by the player.
    #[serde(rename = "move")]
    pub index: usize,
}

/// Board and status after the player's move and the mover's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Updated board.
    pub board: Board,
    /// Status judged by the remote mover.
    pub status: GameStatus,
    /// Indices of the completed line, present only on a line win.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<usize>>,
}

/// Error payload returned when the mover refuses a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason, e.g. `"cell occupied"`.
    pub error: String,
}

/// Response body for a submitted move.
///
/// A payload with an `error` field is always a rejection, even if it also
/// carries a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoveResponse {
    /// Move refused by the mover.
    Rejected(ErrorBody),
    /// Move applied.
    Outcome(MoveOutcome),
}

/// Response body of the health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always true when the mover answers.
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mark;

    #[test]
    fn new_game_size_is_optional() {
        let req: NewGameRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.side(), DEFAULT_BOARD_SIZE);
        let req: NewGameRequest = serde_json::from_str(r#"{"size":4}"#).unwrap();
        assert_eq!(req.side(), 4);
        assert_eq!(serde_json::to_string(&NewGameRequest::default()).unwrap(), "{}");
    }

    #[test]
    fn move_request_uses_move_key() {
        let req = MoveRequest {
            board: Board::empty(3),
            index: 4,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["board"], ".........");
        assert_eq!(json["move"], 4);
    }

    #[test]
    fn outcome_with_winning_line() {
        let resp: MoveResponse =
            serde_json::from_str(r#"{"board":"XXX......","status":"x_won","lines":[0,1,2]}"#)
                .unwrap();
        let MoveResponse::Outcome(outcome) = resp else {
            panic!("expected outcome");
        };
        assert_eq!(outcome.status, GameStatus::PlayerWon);
        assert_eq!(outcome.lines, Some(vec![0, 1, 2]));
        assert_eq!(outcome.board.get(2), Some(Mark::Player));
    }

    #[test]
    fn error_payload_is_rejection_even_with_board() {
        let resp: MoveResponse =
            serde_json::from_str(r#"{"error":"cell occupied","board":"X........"}"#).unwrap();
        assert_eq!(
            resp,
            MoveResponse::Rejected(ErrorBody {
                error: "cell occupied".to_string()
            })
        );
    }

    #[test]
    fn missing_status_does_not_decode() {
        assert!(serde_json::from_str::<MoveResponse>(r#"{"board":"........."}"#).is_err());
    }
}
