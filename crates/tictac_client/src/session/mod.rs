//! Session control: the state machine and its async driver.

mod controller;
mod machine;
mod state;

pub use controller::SessionController;
pub use machine::{Effect, Generation, Notice, Session, SessionEvent};
pub use state::{SessionState, WinningLine};
