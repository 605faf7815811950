//! Cell marks.

use strum::{Display, EnumIter, EnumString};

/// Contents of a single board cell.
///
/// The string form is the wire symbol: `.` for an empty cell, `X` for the
/// local player and `O` for the remote mover.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter,
)]
pub enum Mark {
    /// Unplayed cell.
    #[default]
    #[strum(serialize = ".")]
    Empty,
    /// Cell taken by the local player (moves first).
    #[strum(serialize = "X")]
    Player,
    /// Cell taken by the remote mover.
    #[strum(serialize = "O")]
    Opponent,
}

impl Mark {
    /// Returns the wire symbol for this mark.
    pub fn symbol(self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::Player => 'X',
            Mark::Opponent => 'O',
        }
    }

    /// Parses a wire symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Mark::Empty),
            'X' => Some(Mark::Player),
            'O' => Some(Mark::Opponent),
            _ => None,
        }
    }

    /// Returns the other side, or `Empty` for an empty cell.
    pub fn opponent(self) -> Self {
        match self {
            Mark::Empty => Mark::Empty,
            Mark::Player => Mark::Opponent,
            Mark::Opponent => Mark::Player,
        }
    }
}
