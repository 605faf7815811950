//! Async driver for [`Session`].
//!
//! The controller owns the session and is the only place that mutates it.
//! Remote calls and the restart timer run as spawned tasks that post their
//! result back as a [`SessionEvent`] on an unbounded channel; the owner pulls
//! them in with [`SessionController::next_event`] or
//! [`SessionController::drain`].

use super::machine::{Effect, Notice, Session, SessionEvent};
use super::state::SessionState;
use crate::config::ClientConfig;
use crate::projection::{BoardView, project};
use crate::protocol::MoveService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Runs a [`Session`] against a [`MoveService`].
pub struct SessionController<S> {
    session: Session,
    service: Arc<S>,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    restart_timer: Option<JoinHandle<()>>,
    notices: Vec<Notice>,
}

impl<S: MoveService + 'static> SessionController<S> {
    /// Creates a controller for a `size`×`size` game. Call
    /// [`boot`](Self::boot) to request the first board.
    #[instrument(skip(service))]
    pub fn new(service: Arc<S>, size: usize, restart_delay: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            session: Session::new(size, restart_delay),
            service,
            events_tx,
            events_rx,
            restart_timer: None,
            notices: Vec::new(),
        }
    }

    /// Creates a controller using the size and restart delay in `config`.
    pub fn from_config(service: Arc<S>, config: &ClientConfig) -> Self {
        Self::new(service, *config.board_size(), config.restart_delay())
    }

    /// Requests the first game at the configured size.
    pub fn boot(&mut self) {
        info!(size = self.session.size(), "Booting session");
        self.dispatch(SessionEvent::ManualRestartRequested { size: None });
    }

    /// Starts a new game of side `size`, superseding any request in flight.
    pub fn start_new(&mut self, size: usize) {
        self.dispatch(SessionEvent::ManualRestartRequested { size: Some(size) });
    }

    /// Starts a new game at the last-used size.
    pub fn restart(&mut self) {
        self.dispatch(SessionEvent::ManualRestartRequested { size: None });
    }

    /// Plays `index` if the session accepts it. Returns whether the move was
    /// sent.
    pub fn submit_move(&mut self, index: usize) -> bool {
        let accepted = self.session.accepts(index);
        self.dispatch(SessionEvent::CellClicked(index));
        accepted
    }

    /// Waits for the next completion (response or timer) and applies it.
    pub async fn next_event(&mut self) {
        // The controller holds a sender, so the channel never closes.
        if let Some(event) = self.events_rx.recv().await {
            self.dispatch(event);
        }
    }

    /// Applies every completion already waiting, without blocking. Returns
    /// how many were applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.dispatch(event);
            applied += 1;
        }
        applied
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    /// The underlying state machine.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// True while the automatic restart timer is armed.
    pub fn restart_scheduled(&self) -> bool {
        self.restart_timer
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    /// Takes the failures surfaced since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Display description of the current state.
    pub fn view(&self) -> BoardView {
        project(self.session.state())
    }

    fn dispatch(&mut self, event: SessionEvent) {
        for effect in self.session.handle(event) {
            self.run(effect);
        }
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::StartNewGame { generation, size } => {
                let service = Arc::clone(&self.service);
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = service.new_game(size).await;
                    let _ = tx.send(SessionEvent::NewGameResponseReceived { generation, result });
                });
            }
            Effect::SubmitMove {
                generation,
                board,
                index,
            } => {
                let service = Arc::clone(&self.service);
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = service.submit_move(&board, index).await;
                    let _ = tx.send(SessionEvent::MoveResponseReceived { generation, result });
                });
            }
            Effect::ScheduleRestart { generation, delay } => {
                self.cancel_timer();
                debug!(%generation, ?delay, "Scheduling restart");
                let tx = self.events_tx.clone();
                self.restart_timer = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(SessionEvent::RestartTimerFired { generation });
                }));
            }
            Effect::CancelRestart => self.cancel_timer(),
            Effect::Notify(notice) => {
                warn!(notice = %notice, "Surfacing failure");
                self.notices.push(notice);
            }
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.restart_timer.take() {
            debug!("Aborting restart timer");
            timer.abort();
        }
    }
}

impl<S> Drop for SessionController<S> {
    fn drop(&mut self) {
        if let Some(timer) = self.restart_timer.take() {
            timer.abort();
        }
    }
}

impl<S> std::fmt::Debug for SessionController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("session", &self.session)
            .field("restart_timer", &self.restart_timer.is_some())
            .field("notices", &self.notices)
            .finish()
    }
}
