//! Quiz session: state machine plus the clock that drives it.

mod state;
mod timer;

pub use state::{
    Intent, QuizSession, SECONDS_PER_QUESTION, SessionError, SessionState, Snapshot, Status,
};
pub use timer::{TICK_PERIOD, Tick, TickDriver, TickGuard};
