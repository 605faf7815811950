//! Game status as reported by the remote mover.

use crate::Mark;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Status of a game.
///
/// `Playing` is the only non-terminal status. The string form matches the
/// wire names (`playing`, `x_won`, `o_won`, `draw`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum GameStatus {
    /// Game in progress.
    #[default]
    #[serde(rename = "playing")]
    #[strum(serialize = "playing")]
    Playing,
    /// The local player (X) completed a line.
    #[serde(rename = "x_won")]
    #[strum(serialize = "x_won")]
    PlayerWon,
    /// The remote mover (O) completed a line.
    #[serde(rename = "o_won")]
    #[strum(serialize = "o_won")]
    OpponentWon,
    /// Board full without a winner.
    #[serde(rename = "draw")]
    #[strum(serialize = "draw")]
    Draw,
}

impl GameStatus {
    /// Returns true for every status except `Playing`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }

    /// Returns the winning mark, if the game was won.
    pub fn winner(self) -> Option<Mark> {
        match self {
            GameStatus::PlayerWon => Some(Mark::Player),
            GameStatus::OpponentWon => Some(Mark::Opponent),
            GameStatus::Playing | GameStatus::Draw => None,
        }
    }

    /// Returns the status for a line completed by `mark`.
    pub fn won_by(mark: Mark) -> Option<Self> {
        match mark {
            Mark::Player => Some(GameStatus::PlayerWon),
            Mark::Opponent => Some(GameStatus::OpponentWon),
            Mark::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_playing_is_non_terminal() {
        assert!(!GameStatus::Playing.is_terminal());
        assert!(GameStatus::PlayerWon.is_terminal());
        assert!(GameStatus::OpponentWon.is_terminal());
        assert!(GameStatus::Draw.is_terminal());
    }

    #[test]
    fn wire_names() {
        assert_eq!(
            serde_json::to_string(&GameStatus::PlayerWon).unwrap(),
            "\"x_won\""
        );
        let status: GameStatus = serde_json::from_str("\"o_won\"").unwrap();
        assert_eq!(status, GameStatus::OpponentWon);
        assert_eq!(GameStatus::Draw.to_string(), "draw");
        assert!(serde_json::from_str::<GameStatus>("\"won\"").is_err());
    }

    #[test]
    fn winner_follows_status() {
        assert_eq!(GameStatus::PlayerWon.winner(), Some(Mark::Player));
        assert_eq!(GameStatus::Draw.winner(), None);
        assert_eq!(GameStatus::won_by(Mark::Opponent), Some(GameStatus::OpponentWon));
        assert_eq!(GameStatus::won_by(Mark::Empty), None);
    }
}
