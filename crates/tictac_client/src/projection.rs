//! Display description of a session. Read-only.

use crate::assets::Icon;
use crate::session::SessionState;
use derive_more::Display;
use tictac_protocol::{GameStatus, Mark};

/// Status line shown under the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StatusLine {
    /// A move is out with the remote mover.
    #[display("Thinking…")]
    AwaitingRemote,
    /// Waiting for the player to pick a cell.
    #[display("Your move")]
    AwaitingPlayer,
    /// Player won.
    #[display("You win! New game starting shortly.")]
    PlayerWon,
    /// Remote mover won.
    #[display("AI wins! New game starting shortly.")]
    OpponentWon,
    /// Nobody won.
    #[display("Draw. New game starting shortly.")]
    Draw,
}

/// One cell of the board as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    /// Row-major index.
    pub index: usize,
    /// Cell contents.
    pub mark: Mark,
    /// Part of the completed line.
    pub is_winning_cell: bool,
    /// Clicks are not accepted.
    pub is_disabled: bool,
    /// Icon family, none for empty cells.
    pub icon: Option<Icon>,
}

/// Whole board as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// Side length.
    pub side: usize,
    /// Cells in row-major order.
    pub cells: Vec<CellView>,
    /// Status line.
    pub status: StatusLine,
}

impl BoardView {
    /// Cells grouped into rows.
    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(self.side.max(1))
    }

    /// Cell at `row`, `col`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellView> {
        if col >= self.side {
            return None;
        }
        self.cells.get(row * self.side + col)
    }
}

/// Projects `state` for display.
pub fn project(state: &SessionState) -> BoardView {
    let status = match state.status() {
        GameStatus::Playing if state.is_busy() => StatusLine::AwaitingRemote,
        GameStatus::Playing => StatusLine::AwaitingPlayer,
        GameStatus::PlayerWon => StatusLine::PlayerWon,
        GameStatus::OpponentWon => StatusLine::OpponentWon,
        GameStatus::Draw => StatusLine::Draw,
    };

    let playing = state.status() == GameStatus::Playing;
    let cells = state
        .board()
        .cells()
        .iter()
        .enumerate()
        .map(|(index, &mark)| CellView {
            index,
            mark,
            is_winning_cell: state.winning_line().is_some_and(|line| line.contains(index)),
            is_disabled: state.is_busy() || mark != Mark::Empty || !playing,
            icon: Icon::for_mark(mark),
        })
        .collect();

    BoardView {
        side: state.board().side(),
        cells,
        status,
    }
}
