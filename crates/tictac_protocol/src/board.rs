//! Square boards of arbitrary side length.

use crate::Mark;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::trace;

/// Error building or editing a board.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// A cell held something other than `.`, `X` or `O`.
    #[display("unknown board symbol {symbol:?} at cell {index}")]
    UnknownSymbol {
        /// The offending symbol.
        symbol: String,
        /// Cell index of the symbol.
        index: usize,
    },
    /// A cell index past the end of the board.
    #[display("cell {index} out of range for a board of {len} cells")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of cells on the board.
        len: usize,
    },
}

/// Ordered cell marks in row-major order.
///
/// The board length is `side * side`. The side is taken as the integer square
/// root of the length; callers that need a strictly square board check
/// [`Board::is_square`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr", into = "String")]
pub struct Board {
    cells: Vec<Mark>,
}

/// Accepted encodings on the wire: a fixed-width string or an array of
/// one-symbol strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum BoardRepr {
    Text(String),
    Cells(Vec<String>),
}

impl Board {
    /// Creates an all-empty board with `side * side` cells.
    pub fn empty(side: usize) -> Self {
        Self {
            cells: vec![Mark::Empty; side * side],
        }
    }

    /// Creates a board from explicit cells.
    pub fn from_cells(cells: Vec<Mark>) -> Self {
        Self { cells }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the board has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Side length, the integer square root of the cell count.
    pub fn side(&self) -> usize {
        self.cells.len().isqrt()
    }

    /// True when the cell count is a perfect square.
    pub fn is_square(&self) -> bool {
        let side = self.side();
        side * side == self.cells.len()
    }

    /// Returns the mark at `index`.
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    /// True when `index` is on the board and unplayed.
    pub fn is_cell_empty(&self, index: usize) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    /// All cells.
    pub fn cells(&self) -> &[Mark] {
        &self.cells
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Mark::Empty)
    }

    /// True when every cell is empty.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&cell| cell == Mark::Empty)
    }

    /// Indices of unplayed cells, in order.
    pub fn empty_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Mark::Empty)
            .map(|(index, _)| index)
    }

    /// Overwrites the cell at `index`.
    pub fn set(&mut self, index: usize, mark: Mark) -> Result<(), BoardError> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(BoardError::OutOfRange { index, len })?;
        trace!(index, %mark, "Placing mark");
        *cell = mark;
        Ok(())
    }

    /// Returns a copy with the cell at `index` overwritten.
    pub fn with_mark(&self, index: usize, mark: Mark) -> Result<Self, BoardError> {
        let mut next = self.clone();
        next.set(index, mark)?;
        Ok(next)
    }

    /// Renders the board as rows of symbols separated by newlines.
    pub fn display_grid(&self) -> String {
        let side = self.side().max(1);
        self.cells
            .chunks(side)
            .map(|row| row.iter().map(|mark| mark.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for mark in &self.cells {
            write!(f, "{}", mark.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .enumerate()
            .map(|(index, symbol)| {
                Mark::from_symbol(symbol).ok_or_else(|| BoardError::UnknownSymbol {
                    symbol: symbol.to_string(),
                    index,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { cells })
    }
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        match repr {
            BoardRepr::Text(text) => text.parse(),
            BoardRepr::Cells(cells) => cells
                .iter()
                .enumerate()
                .map(|(index, symbol)| {
                    Mark::from_str(symbol).map_err(|_| BoardError::UnknownSymbol {
                        symbol: symbol.clone(),
                        index,
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::from_cells),
        }
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_string()
    }
}
