//! Position judgment and move validation for N×N boards.
//!
//! A line is any full row, full column or one of the two full diagonals.

use crate::Rejection;
use tictac_protocol::{Board, GameStatus, Mark};
use tracing::{debug, instrument};

/// Smallest supported side length.
pub const MIN_SIDE: usize = 3;

/// Largest supported side length.
pub const MAX_SIDE: usize = 12;

/// Status of a position plus the completed line, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgement {
    /// Judged status.
    pub status: GameStatus,
    /// Indices of the completed line on a line win.
    pub line: Option<Vec<usize>>,
}

/// Returns every winning line of a `side`×`side` board.
pub fn winning_lines(side: usize) -> Vec<Vec<usize>> {
    let mut lines = Vec::with_capacity(2 * side + 2);
    for row in 0..side {
        lines.push((0..side).map(|col| row * side + col).collect());
    }
    for col in 0..side {
        lines.push((0..side).map(|row| row * side + col).collect());
    }
    lines.push((0..side).map(|i| i * side + i).collect());
    lines.push((0..side).map(|i| i * side + (side - 1 - i)).collect());
    lines
}

/// Judges a position.
///
/// Lines are checked before fullness, so a move that both completes a line
/// and fills the board is a win.
#[instrument(skip(board), fields(board = %board))]
pub fn judge(board: &Board) -> Judgement {
    for line in winning_lines(board.side()) {
        let Some(first) = line.first().and_then(|&index| board.get(index)) else {
            continue;
        };
        if first == Mark::Empty {
            continue;
        }
        if line.iter().all(|&index| board.get(index) == Some(first)) {
            if let Some(status) = GameStatus::won_by(first) {
                debug!(?status, ?line, "Line completed");
                return Judgement {
                    status,
                    line: Some(line),
                };
            }
        }
    }

    let status = if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::Playing
    };
    Judgement { status, line: None }
}

/// Checks that a board is square and within the supported sizes.
pub fn validate_board(board: &Board) -> Result<(), Rejection> {
    let side = board.side();
    if !board.is_square() || !(MIN_SIDE..=MAX_SIDE).contains(&side) {
        return Err(Rejection::InvalidBoard);
    }
    Ok(())
}

/// Validates a proposed player move.
///
/// Checks run in order: board shape, index range, game over, occupied cell,
/// turn order.
#[instrument(skip(board), fields(board = %board))]
pub fn validate_move(board: &Board, index: usize) -> Result<(), Rejection> {
    validate_board(board)?;

    if index >= board.len() {
        return Err(Rejection::InvalidMoveIndex);
    }

    if judge(board).status.is_terminal() {
        return Err(Rejection::GameOver);
    }

    if !board.is_cell_empty(index) {
        return Err(Rejection::CellOccupied);
    }

    // The player moves first.
    if board.count(Mark::Player) < board.count(Mark::Opponent) {
        return Err(Rejection::InvalidTurnOrder);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn three_by_three_has_eight_lines() {
        let lines = winning_lines(3);
        assert_eq!(lines.len(), 8);
        assert!(lines.contains(&vec![0, 1, 2]));
        assert!(lines.contains(&vec![0, 3, 6]));
        assert!(lines.contains(&vec![0, 4, 8]));
        assert!(lines.contains(&vec![2, 4, 6]));
    }

    #[test]
    fn four_by_four_lines_span_the_board() {
        let lines = winning_lines(4);
        assert_eq!(lines.len(), 10);
        assert!(lines.contains(&vec![3, 6, 9, 12]));
        assert!(lines.iter().all(|line| line.len() == 4));
    }

    #[test]
    fn judges_wins_and_draws() {
        let judged = judge(&board("XXX......"));
        assert_eq!(judged.status, GameStatus::PlayerWon);
        assert_eq!(judged.line, Some(vec![0, 1, 2]));

        let judged = judge(&board("OOO......"));
        assert_eq!(judged.status, GameStatus::OpponentWon);

        let judged = judge(&board("XOXXOOOXX"));
        assert_eq!(judged.status, GameStatus::Draw);
        assert_eq!(judged.line, None);

        assert_eq!(judge(&board(".........")).status, GameStatus::Playing);
    }

    #[test]
    fn full_board_with_line_is_a_win() {
        let judged = judge(&board("XXXOOXXOO"));
        assert_eq!(judged.status, GameStatus::PlayerWon);
    }

    #[test]
    fn validation_order() {
        assert_eq!(validate_move(&board("........"), 0), Err(Rejection::InvalidBoard));
        assert_eq!(validate_move(&board("...."), 0), Err(Rejection::InvalidBoard));
        assert_eq!(validate_move(&board("........."), 9), Err(Rejection::InvalidMoveIndex));
        assert_eq!(validate_move(&board("XXXOO...."), 8), Err(Rejection::GameOver));
        assert_eq!(validate_move(&board("X...O...."), 0), Err(Rejection::CellOccupied));
        assert_eq!(validate_move(&board("O........"), 4), Err(Rejection::InvalidTurnOrder));
        assert_eq!(validate_move(&board("X...O...."), 8), Ok(()));
    }

    #[test]
    fn empty_board_judges_without_a_line() {
        let judged = judge(&Board::default());
        assert_eq!(judged.line, None);
        assert!(judged.status.is_terminal());
        assert_eq!(validate_board(&Board::default()), Err(Rejection::InvalidBoard));
    }
}
