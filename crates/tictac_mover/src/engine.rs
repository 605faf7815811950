//! Applying a player move and choosing the mover's reply.

use crate::Rejection;
use crate::rules::{judge, validate_move};
use tictac_protocol::{Board, GameStatus, Mark, MoveOutcome};
use tracing::{debug, info, instrument};

/// Plays the player's move at `index`, then the mover's reply if the game
/// is still on.
#[instrument(skip(board), fields(board = %board, index))]
pub fn play(board: &Board, index: usize) -> Result<MoveOutcome, Rejection> {
    validate_move(board, index)?;

    let board = place(board, index, Mark::Player)?;
    let judged = judge(&board);
    if judged.status.is_terminal() {
        info!(status = %judged.status, "Game over after player move");
        return Ok(MoveOutcome {
            board,
            status: judged.status,
            lines: judged.line,
        });
    }

    let reply = choose_reply(&board)?;
    let board = place(&board, reply, Mark::Opponent)?;
    let judged = judge(&board);
    info!(reply, status = %judged.status, "Mover replied");

    Ok(MoveOutcome {
        board,
        status: judged.status,
        lines: judged.line,
    })
}

/// Picks the mover's cell.
///
/// Preference order: a cell that completes a mover line, a cell that blocks a
/// player line, the centre of an odd board, the first empty cell.
#[instrument(skip(board), fields(board = %board))]
pub fn choose_reply(board: &Board) -> Result<usize, Rejection> {
    if let Some(index) = completing_cell(board, Mark::Opponent) {
        debug!(index, "Taking winning cell");
        return Ok(index);
    }

    if let Some(index) = completing_cell(board, Mark::Player) {
        debug!(index, "Blocking player line");
        return Ok(index);
    }

    let side = board.side();
    if side % 2 == 1 {
        let centre = board.len() / 2;
        if board.is_cell_empty(centre) {
            return Ok(centre);
        }
    }

    board.empty_indices().next().ok_or(Rejection::NoLegalMoves)
}

/// First empty cell that would complete a line for `mark`.
fn completing_cell(board: &Board, mark: Mark) -> Option<usize> {
    let target = GameStatus::won_by(mark)?;
    board.empty_indices().find(|&index| {
        board
            .with_mark(index, mark)
            .map(|next| judge(&next).status == target)
            .unwrap_or(false)
    })
}

fn place(board: &Board, index: usize, mark: Mark) -> Result<Board, Rejection> {
    board
        .with_mark(index, mark)
        .map_err(|_| Rejection::InvalidMoveIndex)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn reply_takes_the_win() {
        // Finishing the middle column beats blocking the left one.
        assert_eq!(choose_reply(&board("XO.XO...X")), Ok(7));
    }

    #[test]
    fn reply_blocks_the_player() {
        assert_eq!(choose_reply(&board("XX..O....")), Ok(2));
    }

    #[test]
    fn reply_prefers_centre() {
        assert_eq!(choose_reply(&board("X........")), Ok(4));
    }

    #[test]
    fn reply_falls_back_to_first_empty() {
        assert_eq!(choose_reply(&board("X...O....")), Ok(1));
    }

    #[test]
    fn full_board_has_no_reply() {
        assert_eq!(choose_reply(&board("XOXXOOOXX")), Err(Rejection::NoLegalMoves));
    }

    #[test]
    fn center_opening_gets_a_reply() {
        let outcome = play(&Board::empty(3), 4).unwrap();
        assert_eq!(outcome.status, GameStatus::Playing);
        assert_eq!(outcome.board.get(4), Some(Mark::Player));
        assert_eq!(outcome.board.count(Mark::Opponent), 1);
        assert_eq!(outcome.lines, None);
    }

    #[test]
    fn winning_move_skips_the_reply() {
        let outcome = play(&board("XX.OO...."), 2).unwrap();
        assert_eq!(outcome.status, GameStatus::PlayerWon);
        assert_eq!(outcome.lines, Some(vec![0, 1, 2]));
        assert_eq!(outcome.board.count(Mark::Opponent), 2);
    }

    #[test]
    fn mover_can_win() {
        let outcome = play(&board("OO.XX...."), 6).unwrap();
        assert_eq!(outcome.status, GameStatus::OpponentWon);
        assert_eq!(outcome.board.to_string(), "OOOXX.X..");
        assert_eq!(outcome.lines, Some(vec![0, 1, 2]));
    }

    #[test]
    fn rejected_move_is_reported() {
        assert_eq!(play(&board("X...O...."), 4), Err(Rejection::CellOccupied));
    }
}
