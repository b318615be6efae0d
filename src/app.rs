use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::models::QuestionBank;
use crate::session::{Intent, QuizSession, SessionError, Snapshot, Status, Tick, TickDriver};
use crate::storage::HighScoreStore;

/// Owns the session and everything bound to its lifecycle: the clock, the
/// high score store and the option cursor used by the keyboard.
pub struct App {
    session: QuizSession,
    snapshot: Snapshot,
    ticker: TickDriver,
    store: HighScoreStore,
    persisted_high_score: u32,
    cursor: usize,
    last_error: Option<String>,
}

impl App {
    /// Build an app over `bank`. Ticks are delivered through `tick_sender`.
    pub fn new(
        bank: QuestionBank,
        seconds_per_question: u32,
        store: HighScoreStore,
        tick_sender: mpsc::UnboundedSender<Tick>,
    ) -> Self {
        let persisted_high_score = match store.load() {
            Ok(score) => score,
            Err(err) => {
                warn!(error = %err, "could not load high score, starting from 0");
                0
            }
        };

        let session = QuizSession::new(bank)
            .with_high_score(persisted_high_score)
            .with_seconds_per_question(seconds_per_question);
        let snapshot = session.snapshot();

        Self {
            session,
            snapshot,
            ticker: TickDriver::new(tick_sender),
            store,
            persisted_high_score,
            cursor: 0,
            last_error: None,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn status(&self) -> Status {
        self.snapshot.status
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Most recent rejected intent, surfaced on screen in debug builds.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_running()
    }

    /// Forward `intent` to the session, then bring the clock, cursor and
    /// high score file in line with the new state.
    ///
    /// Rejected intents are logged and otherwise ignored.
    pub fn dispatch(&mut self, intent: Intent) -> Result<&Snapshot, SessionError> {
        let previous_index = self.snapshot.current_index;

        match self.session.dispatch(intent) {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.last_error = None;
            }
            Err(err) => {
                warn!(?intent, status = ?self.snapshot.status, error = %err, "intent rejected");
                if cfg!(debug_assertions) {
                    self.last_error = Some(err.to_string());
                }
                return Err(err);
            }
        }

        self.ticker.sync(self.snapshot.status);

        if self.snapshot.current_index != previous_index || self.snapshot.status == Status::Ready {
            self.cursor = 0;
        }

        self.persist_high_score();
        Ok(&self.snapshot)
    }

    /// Feed a clock tick to the session unless it belongs to a clock that
    /// has since been stopped.
    pub fn on_tick(&mut self, tick: Tick) {
        if !self.ticker.accepts(tick) {
            debug!(?tick, "dropped tick from a stopped clock");
            return;
        }
        let _ = self.dispatch(Intent::Tick);
    }

    fn persist_high_score(&mut self) {
        let high_score = self.snapshot.high_score;
        if high_score <= self.persisted_high_score {
            return;
        }

        info!(high_score, previous = self.persisted_high_score, "new high score");
        match self.store.save(high_score) {
            Ok(()) => self.persisted_high_score = high_score,
            Err(err) => warn!(error = %err, "could not save high score"),
        }
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 && !self.snapshot.has_answered() {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 && !self.snapshot.has_answered() {
            self.cursor = (self.cursor + count - 1) % count;
        }
    }

    /// Enter on the quiz screen: answer with the cursor, or move on once
    /// the current question is answered.
    pub fn confirm(&mut self) -> Result<&Snapshot, SessionError> {
        let intent = if !self.snapshot.has_answered() {
            Intent::SelectOption(self.cursor)
        } else if self.snapshot.is_last_question() {
            Intent::Finish
        } else {
            Intent::Advance
        };
        self.dispatch(intent)
    }

    /// Pick an option by its zero-based position.
    pub fn choose(&mut self, option: usize) -> Result<&Snapshot, SessionError> {
        self.dispatch(Intent::SelectOption(option))?;
        self.cursor = option;
        Ok(&self.snapshot)
    }

    fn option_count(&self) -> usize {
        self.snapshot
            .current_question()
            .map_or(0, |question| question.options.len())
    }
}
