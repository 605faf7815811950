//! Session controller behaviour against a scripted mover.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tictac_client::{
    Board, GameStatus, Mark, MoveOutcome, MoveService, Notice, ProtocolError, SessionController,
};
use tokio::sync::Notify;

const RESTART_DELAY: Duration = Duration::from_millis(2500);

/// How the scripted mover answers a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply {
    /// Place X, answer O in the first empty cell, keep playing.
    Continue,
    /// Place X and declare the player the winner of the top row.
    PlayerWins,
    /// Refuse with an `{error}` payload.
    Reject,
    /// Fail at the transport level.
    Unreachable,
}

#[derive(Debug)]
struct ScriptedMover {
    reply: Reply,
    gated: bool,
    gate: Notify,
    fail_new_games: AtomicBool,
    new_games: AtomicUsize,
    moves: AtomicUsize,
}

impl ScriptedMover {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            gated: false,
            gate: Notify::new(),
            fail_new_games: AtomicBool::new(false),
            new_games: AtomicUsize::new(0),
            moves: AtomicUsize::new(0),
        })
    }

    /// Moves wait for [`release`](Self::release) before answering.
    fn gated(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            gated: true,
            gate: Notify::new(),
            fail_new_games: AtomicBool::new(false),
            new_games: AtomicUsize::new(0),
            moves: AtomicUsize::new(0),
        })
    }

    fn release(&self) {
        self.gate.notify_one();
    }

    fn new_games(&self) -> usize {
        self.new_games.load(Ordering::SeqCst)
    }

    fn moves(&self) -> usize {
        self.moves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MoveService for ScriptedMover {
    async fn new_game(&self, size: usize) -> Result<Board, ProtocolError> {
        self.new_games.fetch_add(1, Ordering::SeqCst);
        if self.fail_new_games.load(Ordering::SeqCst) {
            return Err(ProtocolError::Transport {
                message: "connection refused".to_string(),
            });
        }
        Ok(Board::empty(size))
    }

    async fn submit_move(
        &self,
        board: &Board,
        index: usize,
    ) -> Result<MoveOutcome, ProtocolError> {
        self.moves.fetch_add(1, Ordering::SeqCst);
        if self.gated {
            self.gate.notified().await;
        }

        let mut board = board.clone();
        match self.reply {
            Reply::Continue => {
                board.set(index, Mark::Player).unwrap();
                let reply = board.empty_indices().next().unwrap();
                board.set(reply, Mark::Opponent).unwrap();
                Ok(MoveOutcome {
                    board,
                    status: GameStatus::Playing,
                    lines: None,
                })
            }
            Reply::PlayerWins => {
                for cell in 0..3 {
                    board.set(cell, Mark::Player).unwrap();
                }
                Ok(MoveOutcome {
                    board,
                    status: GameStatus::PlayerWon,
                    lines: Some(vec![0, 1, 2]),
                })
            }
            Reply::Reject => Err(ProtocolError::Rejected {
                message: "cell occupied".to_string(),
            }),
            Reply::Unreachable => Err(ProtocolError::Transport {
                message: "connection reset".to_string(),
            }),
        }
    }
}

async fn ready(mover: &Arc<ScriptedMover>) -> SessionController<ScriptedMover> {
    let mut controller = SessionController::new(Arc::clone(mover), 3, RESTART_DELAY);
    controller.boot();
    assert!(controller.state().is_busy());
    controller.next_event().await;
    assert!(!controller.state().is_busy());
    assert_eq!(controller.state().board().len(), 9);
    controller
}

#[tokio::test]
async fn test_boot_loads_empty_board() {
    let mover = ScriptedMover::new(Reply::Continue);
    let controller = ready(&mover).await;

    assert_eq!(mover.new_games(), 1);
    assert!(controller.state().board().is_blank());
    assert_eq!(controller.state().status(), GameStatus::Playing);
}

#[tokio::test]
async fn test_double_click_sends_one_move() {
    let mover = ScriptedMover::gated(Reply::Continue);
    let mut controller = ready(&mover).await;

    assert!(controller.submit_move(4));
    assert!(!controller.submit_move(4));
    assert!(!controller.submit_move(0));
    assert!(controller.state().is_busy());

    mover.release();
    controller.next_event().await;

    assert_eq!(mover.moves(), 1);
    assert!(!controller.state().is_busy());
    let board = controller.state().board();
    assert_eq!(board.get(4), Some(Mark::Player));
    assert_eq!(board.get(0), Some(Mark::Opponent));
    assert_eq!(board.count(Mark::Player), 1);
}

#[tokio::test]
async fn test_click_on_occupied_cell_is_ignored() {
    let mover = ScriptedMover::new(Reply::Continue);
    let mut controller = ready(&mover).await;

    assert!(controller.submit_move(4));
    controller.next_event().await;

    assert!(!controller.submit_move(4));
    assert!(!controller.submit_move(0));
    assert!(!controller.submit_move(9));
    assert_eq!(mover.moves(), 1);
}

#[tokio::test]
async fn test_stale_move_ignored_after_start_new() {
    let mover = ScriptedMover::gated(Reply::Continue);
    let mut controller = ready(&mover).await;

    assert!(controller.submit_move(4));
    controller.start_new(4);

    // Only the new game can complete while the move is held.
    controller.next_event().await;
    assert_eq!(controller.state().board().len(), 16);
    assert!(controller.state().board().is_blank());
    assert!(!controller.state().is_busy());

    mover.release();
    controller.next_event().await;

    assert_eq!(mover.moves(), 1);
    assert_eq!(controller.state().board().len(), 16);
    assert!(controller.state().board().is_blank());
    assert_eq!(controller.state().status(), GameStatus::Playing);
    assert!(controller.take_notices().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_exactly_one_auto_restart() {
    let mover = ScriptedMover::new(Reply::PlayerWins);
    let mut controller = ready(&mover).await;

    assert!(controller.submit_move(0));
    controller.next_event().await;

    assert_eq!(controller.state().status(), GameStatus::PlayerWon);
    let line = controller.state().winning_line().unwrap();
    assert_eq!(line.indices().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert!(controller.restart_scheduled());
    assert!(!controller.submit_move(5));

    // Timer fires, then the new game arrives.
    controller.next_event().await;
    controller.next_event().await;

    assert_eq!(mover.new_games(), 2);
    assert_eq!(controller.state().status(), GameStatus::Playing);
    assert!(controller.state().board().is_blank());
    assert!(controller.state().winning_line().is_none());

    tokio::time::sleep(RESTART_DELAY * 4).await;
    controller.drain();
    assert_eq!(mover.new_games(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_manual_restart_cancels_timer() {
    let mover = ScriptedMover::new(Reply::PlayerWins);
    let mut controller = ready(&mover).await;

    controller.submit_move(0);
    controller.next_event().await;
    assert!(controller.restart_scheduled());

    controller.restart();
    assert!(!controller.restart_scheduled());
    controller.next_event().await;
    assert_eq!(mover.new_games(), 2);

    tokio::time::sleep(RESTART_DELAY * 4).await;
    controller.drain();
    assert_eq!(mover.new_games(), 2);
    assert_eq!(controller.state().status(), GameStatus::Playing);
}

#[tokio::test]
async fn test_transport_error_clears_busy() {
    let mover = ScriptedMover::new(Reply::Unreachable);
    let mut controller = ready(&mover).await;

    assert!(controller.submit_move(4));
    controller.next_event().await;

    assert!(!controller.state().is_busy());
    assert!(controller.state().board().is_blank());
    let notices = controller.take_notices();
    assert!(matches!(notices.as_slice(), [Notice::MoveFailed(ProtocolError::Transport { .. })]));

    // The same cell can be tried again.
    assert!(controller.submit_move(4));
}

#[tokio::test]
async fn test_rejection_surfaces_reason() {
    let mover = ScriptedMover::new(Reply::Reject);
    let mut controller = ready(&mover).await;

    controller.submit_move(4);
    controller.next_event().await;

    assert!(!controller.state().is_busy());
    assert_eq!(
        controller.take_notices(),
        vec![Notice::MoveRejected("cell occupied".to_string())]
    );
}

#[tokio::test]
async fn test_failed_new_game_keeps_previous_board() {
    let mover = ScriptedMover::new(Reply::Continue);
    let mut controller = ready(&mover).await;

    controller.submit_move(4);
    controller.next_event().await;
    let before = controller.state().board().clone();

    mover.fail_new_games.store(true, Ordering::SeqCst);
    controller.start_new(5);
    controller.next_event().await;

    assert_eq!(controller.state().board(), &before);
    assert_eq!(controller.session().size(), 3);
    assert!(!controller.state().is_busy());
    assert!(matches!(
        controller.take_notices().as_slice(),
        [Notice::NewGameFailed(_)]
    ));
}

#[tokio::test]
async fn test_zero_size_is_ignored() {
    let mover = ScriptedMover::new(Reply::Continue);
    let mut controller = ready(&mover).await;

    controller.start_new(0);

    assert!(!controller.state().is_busy());
    assert_eq!(controller.drain(), 0);
    assert_eq!(mover.new_games(), 1);
}
