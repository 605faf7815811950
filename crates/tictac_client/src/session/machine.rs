//! Session state machine.
//!
//! Every input is a [`SessionEvent`]; every side effect the machine wants is
//! returned as an [`Effect`] for the caller to run. The machine itself never
//! touches the network or the clock.
//!
//! ```text
//!             CellClicked / MoveResponse(playing)
//!                  ┌────────┐
//!                  ▼        │
//!   startNew ──▶ Playing ───┘
//!                  │
//!                  │ MoveResponse(x_won | o_won | draw)
//!                  ▼
//!               Terminal ──(RestartTimerFired | ManualRestartRequested)──▶ startNew
//! ```
//!
//! Requests carry the [`Generation`] they were issued against. Starting a new
//! game advances the generation, so any response still on its way from an
//! earlier game no longer matches and is dropped.

use super::state::{SessionState, WinningLine};
use crate::protocol::ProtocolError;
use derive_more::Display;
use std::time::Duration;
use tictac_protocol::{Board, MoveOutcome};
use tracing::{debug, info, instrument, warn};

/// Incarnation counter of a session. Advances on every new-game request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display)]
pub struct Generation(u64);

impl Generation {
    /// The following generation.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Inputs to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The player picked a cell.
    CellClicked(usize),
    /// The player asked for a new game, optionally with a different size.
    ManualRestartRequested {
        /// New side length; `None` keeps the last-used size.
        size: Option<usize>,
    },
    /// A new-game call finished.
    NewGameResponseReceived {
        /// Generation the request was issued against.
        generation: Generation,
        /// Empty board or failure.
        result: Result<Board, ProtocolError>,
    },
    /// A move call finished.
    MoveResponseReceived {
        /// Generation the request was issued against.
        generation: Generation,
        /// Outcome or failure.
        result: Result<MoveOutcome, ProtocolError>,
    },
    /// The post-game restart delay elapsed.
    RestartTimerFired {
        /// Generation of the finished game that scheduled the timer.
        generation: Generation,
    },
}

/// Work requested by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Call "new game"; report back with `NewGameResponseReceived`.
    StartNewGame {
        /// Generation to echo back.
        generation: Generation,
        /// Requested side length.
        size: usize,
    },
    /// Call "submit move"; report back with `MoveResponseReceived`.
    SubmitMove {
        /// Generation to echo back.
        generation: Generation,
        /// Full board at the time of the click.
        board: Board,
        /// Chosen cell.
        index: usize,
    },
    /// Start the single restart timer, replacing any existing one.
    ScheduleRestart {
        /// Generation to echo back in `RestartTimerFired`.
        generation: Generation,
        /// Time until the timer fires.
        delay: Duration,
    },
    /// Drop the pending restart timer.
    CancelRestart,
    /// Surface a failure to the player.
    Notify(Notice),
}

/// User-facing failure report.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Notice {
    /// Starting a game failed; the previous game is still shown.
    #[display("Could not start a new game: {}", _0)]
    NewGameFailed(ProtocolError),
    /// The mover refused the move.
    #[display("Move rejected: {}", _0)]
    MoveRejected(String),
    /// The move never got a usable answer.
    #[display("Move failed: {}", _0)]
    MoveFailed(ProtocolError),
}

/// Request currently awaiting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InFlight {
    Move { generation: Generation },
    NewGame { generation: Generation, size: usize },
}

/// The session state machine.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    size: usize,
    generation: Generation,
    in_flight: Option<InFlight>,
    pending_restart: Option<Generation>,
    restart_delay: Duration,
}

impl Session {
    /// Creates an idle session showing an empty `size`×`size` board.
    ///
    /// The board is a placeholder until the first new-game response arrives.
    #[instrument]
    pub fn new(size: usize, restart_delay: Duration) -> Self {
        Self {
            state: SessionState::fresh(Board::empty(size)),
            size,
            generation: Generation::default(),
            in_flight: None,
            pending_restart: None,
            restart_delay,
        }
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Side length of the current game.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// True while the post-game restart timer is armed.
    pub fn restart_pending(&self) -> bool {
        self.pending_restart.is_some()
    }

    /// True when a click on `index` would be sent to the mover.
    pub fn accepts(&self, index: usize) -> bool {
        self.state.accepts(index)
    }

    /// Feeds one event through the machine.
    #[instrument(skip(self, event), fields(generation = %self.generation))]
    pub fn handle(&mut self, event: SessionEvent) -> Vec<Effect> {
        match event {
            SessionEvent::CellClicked(index) => self.on_cell_clicked(index),
            SessionEvent::ManualRestartRequested { size } => {
                self.begin_new_game(size.unwrap_or(self.size))
            }
            SessionEvent::RestartTimerFired { generation } => {
                self.on_restart_timer(generation)
            }
            SessionEvent::NewGameResponseReceived { generation, result } => {
                self.on_new_game_response(generation, result)
            }
            SessionEvent::MoveResponseReceived { generation, result } => {
                self.on_move_response(generation, result)
            }
        }
    }

    fn on_cell_clicked(&mut self, index: usize) -> Vec<Effect> {
        if !self.state.accepts(index) {
            debug!(
                index,
                busy = self.state.is_busy(),
                status = %self.state.status(),
                "Ignoring click"
            );
            return Vec::new();
        }

        // Guard goes up before the request leaves.
        self.set_in_flight(Some(InFlight::Move {
            generation: self.generation,
        }));
        info!(index, "Submitting move");

        vec![Effect::SubmitMove {
            generation: self.generation,
            board: self.state.board().clone(),
            index,
        }]
    }

    fn begin_new_game(&mut self, size: usize) -> Vec<Effect> {
        if size == 0 {
            warn!("Ignoring new game with zero size");
            return Vec::new();
        }

        let mut effects = Vec::new();
        if self.pending_restart.take().is_some() {
            debug!("Cancelling pending restart");
            effects.push(Effect::CancelRestart);
        }

        self.generation = self.generation.next();
        self.set_in_flight(Some(InFlight::NewGame {
            generation: self.generation,
            size,
        }));
        info!(generation = %self.generation, size, "Starting new game");

        effects.push(Effect::StartNewGame {
            generation: self.generation,
            size,
        });
        effects
    }

    fn on_restart_timer(&mut self, generation: Generation) -> Vec<Effect> {
        if self.pending_restart != Some(generation) {
            debug!(%generation, "Ignoring stale restart timer");
            return Vec::new();
        }
        self.pending_restart = None;
        info!(%generation, "Automatic restart");
        self.begin_new_game(self.size)
    }

    fn on_new_game_response(
        &mut self,
        generation: Generation,
        result: Result<Board, ProtocolError>,
    ) -> Vec<Effect> {
        let size = match self.in_flight {
            Some(InFlight::NewGame {
                generation: expected,
                size,
            }) if expected == generation => size,
            _ => {
                debug!(%generation, "Discarding stale new-game response");
                return Vec::new();
            }
        };
        self.set_in_flight(None);

        let board = match result {
            Ok(board) => board,
            Err(err) => {
                warn!(error = %err, "New game failed");
                return vec![Effect::Notify(Notice::NewGameFailed(err))];
            }
        };

        let expected = size.checked_mul(size);
        if expected != Some(board.len()) || !board.is_blank() {
            warn!(board = %board, size, "New-game board does not match request");
            let message = match expected {
                Some(cells) => format!("expected {} empty cells, got \"{}\"", cells, board),
                None => format!("board side {} is too large", size),
            };
            return vec![Effect::Notify(Notice::NewGameFailed(
                ProtocolError::Malformed { message },
            ))];
        }

        self.size = size;
        self.state = SessionState::fresh(board);
        info!(size, "New game ready");
        Vec::new()
    }

    fn on_move_response(
        &mut self,
        generation: Generation,
        result: Result<MoveOutcome, ProtocolError>,
    ) -> Vec<Effect> {
        match self.in_flight {
            Some(InFlight::Move {
                generation: expected,
            }) if expected == generation => {}
            _ => {
                debug!(%generation, "Discarding stale move response");
                return Vec::new();
            }
        }
        self.set_in_flight(None);

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(ProtocolError::Rejected { message }) => {
                warn!(reason = %message, "Move rejected");
                return vec![Effect::Notify(Notice::MoveRejected(message))];
            }
            Err(err) => {
                warn!(error = %err, "Move failed");
                return vec![Effect::Notify(Notice::MoveFailed(err))];
            }
        };

        if outcome.board.len() != self.state.board().len() {
            warn!(board = %outcome.board, "Move response board has the wrong length");
            return vec![Effect::Notify(Notice::MoveFailed(ProtocolError::Malformed {
                message: format!(
                    "expected {} cells, got {}",
                    self.state.board().len(),
                    outcome.board.len()
                ),
            }))];
        }

        let status = outcome.status;
        let winning_line = match (status.winner(), outcome.lines) {
            (Some(_), Some(lines)) => Some(lines.into_iter().collect::<WinningLine>()),
            _ => None,
        };
        self.state.apply(outcome.board, status, winning_line);
        info!(board = %self.state.board(), %status, "Move applied");

        if !status.is_terminal() {
            return Vec::new();
        }

        self.pending_restart = Some(self.generation);
        vec![Effect::ScheduleRestart {
            generation: self.generation,
            delay: self.restart_delay,
        }]
    }

    fn set_in_flight(&mut self, in_flight: Option<InFlight>) {
        self.in_flight = in_flight;
        self.state.set_busy(in_flight.is_some());
    }
}
