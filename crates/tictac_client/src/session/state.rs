//! Client-side view of one game.

use std::collections::BTreeSet;
use tictac_protocol::{Board, GameStatus};

/// Cells of a completed line. Used for highlighting only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WinningLine(BTreeSet<usize>);

impl WinningLine {
    /// True when `index` is part of the line.
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    /// Line indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Number of cells in the line.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a line without cells.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<usize> for WinningLine {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Board, status, in-flight flag and winning line, always replaced together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    board: Board,
    status: GameStatus,
    busy: bool,
    winning_line: Option<WinningLine>,
}

impl SessionState {
    /// Fresh playing state on `board`.
    pub fn fresh(board: Board) -> Self {
        Self {
            board,
            status: GameStatus::Playing,
            busy: false,
            winning_line: None,
        }
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True while a request to the remote mover is outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Completed line, only present after a line win.
    pub fn winning_line(&self) -> Option<&WinningLine> {
        self.winning_line.as_ref()
    }

    /// True when a click on `index` would be sent to the mover.
    pub fn accepts(&self, index: usize) -> bool {
        !self.busy && self.status == GameStatus::Playing && self.board.is_cell_empty(index)
    }

    pub(super) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Replaces board, status and line in one step.
    pub(super) fn apply(
        &mut self,
        board: Board,
        status: GameStatus,
        winning_line: Option<WinningLine>,
    ) {
        self.board = board;
        self.status = status;
        self.winning_line = winning_line;
    }
}
