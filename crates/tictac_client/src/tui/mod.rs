//! Terminal front-end.
//!
//! Cursor keys (or hjkl) move, Enter or space plays, `r` restarts, `+`/`-`
//! restart on a bigger or smaller board, `q` quits. On a 3×3 board the digits
//! 1-9 play a cell directly.

mod ui;

use crate::config::{ClientConfig, MIN_BOARD_SIZE};
use crate::protocol::{HttpMoveClient, MoveService};
use crate::session::SessionController;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Sends logs to `path` so they do not interfere with the terminal UI.
pub fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Runs the terminal client until the player quits.
#[instrument(skip_all, fields(api_url = %config.api_url()))]
pub async fn run(config: ClientConfig) -> Result<()> {
    info!("Starting tic-tac-toe client");

    let client = HttpMoveClient::from_config(&config)?;
    let mut controller = SessionController::from_config(Arc::new(client), &config);

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut controller).await;
    ratatui::restore();

    if let Err(err) = &result {
        tracing::error!(error = ?err, "Client loop error");
    }
    result
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    Move { rows: isize, cols: isize },
    PlayCursor,
    PlayCell(usize),
    Restart,
    Resize(isize),
    None,
}

fn action_for(key: KeyEvent, side: usize) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Up | KeyCode::Char('k') => Action::Move { rows: -1, cols: 0 },
        KeyCode::Down | KeyCode::Char('j') => Action::Move { rows: 1, cols: 0 },
        KeyCode::Left | KeyCode::Char('h') => Action::Move { rows: 0, cols: -1 },
        KeyCode::Right | KeyCode::Char('l') => Action::Move { rows: 0, cols: 1 },
        KeyCode::Enter | KeyCode::Char(' ') => Action::PlayCursor,
        KeyCode::Char('r') => Action::Restart,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::Resize(1),
        KeyCode::Char('-') => Action::Resize(-1),
        KeyCode::Char(c) if side == 3 => match c.to_digit(10) {
            Some(digit @ 1..=9) => Action::PlayCell(digit as usize - 1),
            _ => Action::None,
        },
        _ => Action::None,
    }
}

/// Cursor and last surfaced failure.
#[derive(Debug, Default)]
struct App {
    cursor: usize,
    notice: Option<String>,
}

impl App {
    fn move_cursor(&mut self, rows: isize, cols: isize, side: usize) {
        if side == 0 {
            return;
        }
        let side_i = side as isize;
        let row = (self.cursor / side) as isize;
        let col = (self.cursor % side) as isize;
        let row = (row + rows).clamp(0, side_i - 1) as usize;
        let col = (col + cols).clamp(0, side_i - 1) as usize;
        self.cursor = row * side + col;
    }

    fn clamp_cursor(&mut self, cells: usize) {
        if self.cursor >= cells {
            self.cursor = 0;
        }
    }
}

async fn event_loop<S: MoveService + 'static>(
    terminal: &mut DefaultTerminal,
    controller: &mut SessionController<S>,
) -> Result<()> {
    controller.boot();
    let mut app = App::default();

    loop {
        controller.drain();
        if let Some(notice) = controller.take_notices().pop() {
            app.notice = Some(notice.to_string());
        }

        let view = controller.view();
        app.clamp_cursor(view.cells.len());
        terminal.draw(|frame| ui::draw(frame, &view, app.cursor, app.notice.as_deref()))?;

        // Poll for input with short timeout to keep the loop responsive.
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let size = controller.session().size();
            match action_for(key, view.side) {
                Action::Quit => {
                    info!("User quit");
                    return Ok(());
                }
                Action::Move { rows, cols } => app.move_cursor(rows, cols, view.side),
                Action::PlayCursor => {
                    app.notice = None;
                    controller.submit_move(app.cursor);
                }
                Action::PlayCell(index) => {
                    app.notice = None;
                    app.cursor = index;
                    controller.submit_move(index);
                }
                Action::Restart => {
                    app.notice = None;
                    controller.restart();
                }
                Action::Resize(delta) => {
                    let next = size.saturating_add_signed(delta).max(MIN_BOARD_SIZE);
                    if next != size {
                        debug!(size = next, "Resizing board");
                        app.notice = None;
                        controller.start_new(next);
                    }
                }
                Action::None => {}
            }
        }

        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_only_on_classic_board() {
        assert_eq!(action_for(key(KeyCode::Char('5')), 3), Action::PlayCell(4));
        assert_eq!(action_for(key(KeyCode::Char('0')), 3), Action::None);
        assert_eq!(action_for(key(KeyCode::Char('5')), 4), Action::None);
    }

    #[test]
    fn cursor_stays_on_board() {
        let mut app = App::default();
        app.move_cursor(-1, -1, 3);
        assert_eq!(app.cursor, 0);
        app.move_cursor(1, 1, 3);
        assert_eq!(app.cursor, 4);
        app.move_cursor(5, 5, 3);
        assert_eq!(app.cursor, 8);
        app.clamp_cursor(4);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn control_keys() {
        assert_eq!(action_for(key(KeyCode::Char('q')), 3), Action::Quit);
        assert_eq!(action_for(key(KeyCode::Char('r')), 3), Action::Restart);
        assert_eq!(action_for(key(KeyCode::Char('+')), 4), Action::Resize(1));
        assert_eq!(action_for(key(KeyCode::Enter), 4), Action::PlayCursor);
    }
}
