//! # timed-quiz
//!
//! A timed, single-player multiple-choice quiz for the terminal.
//!
//! The heart of the crate is [`QuizSession`], a small state machine driven
//! by [`Intent`]s. The terminal front end renders its [`Snapshot`]s and a
//! tokio task feeds it one `Tick` per second while a play-through is active.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timed_quiz::{Config, Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let quiz = Quiz::from_config(&Config::default())?;
//!     quiz.run().await
//! }
//! ```
//!
//! The session can also be driven without a terminal:
//!
//! ```rust
//! use timed_quiz::{Intent, Question, QuestionBank, QuizSession, Status};
//!
//! let bank = QuestionBank::new(vec![Question {
//!     text: "2 + 2?".into(),
//!     options: vec!["3".into(), "4".into()],
//!     correct_option: 1,
//!     points: 10,
//! }]);
//!
//! let mut session = QuizSession::new(bank);
//! session.dispatch(Intent::Start).unwrap();
//! session.dispatch(Intent::SelectOption(1)).unwrap();
//! let snapshot = session.dispatch(Intent::Finish).unwrap();
//!
//! assert_eq!(snapshot.status, Status::Finished);
//! assert_eq!(snapshot.percentage(), 100);
//! ```

mod app;
pub mod config;
mod data;
pub mod logger;
mod models;
pub mod score;
pub mod session;
pub mod storage;
pub mod terminal;
mod ui;

use std::io;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::info;

pub use app::App;
pub use config::Config;
pub use data::{LoadError, default_questions, load_questions_from_json, parse_questions};
pub use models::{Question, QuestionBank};
pub use session::{Intent, QuizSession, SessionError, Snapshot, Status, Tick};
pub use storage::{HighScoreStore, StorageError};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz ready to be played in the terminal.
pub struct Quiz {
    bank: QuestionBank,
    seconds_per_question: u32,
    store: HighScoreStore,
}

impl Quiz {
    pub fn new(bank: QuestionBank, seconds_per_question: u32, store: HighScoreStore) -> Self {
        Self {
            bank,
            seconds_per_question,
            store,
        }
    }

    /// Load the questions and high score store described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, QuizError> {
        let bank = match &config.questions {
            Some(path) => load_questions_from_json(path)?,
            None => default_questions()?,
        };
        Ok(Self::new(
            bank,
            config.seconds_per_question,
            config.high_score_store(),
        ))
    }

    /// Take over the terminal and play until the user quits.
    pub async fn run(self) -> Result<(), QuizError> {
        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
        let mut app = App::new(self.bank, self.seconds_per_question, self.store, tick_tx);

        info!(
            questions = app.snapshot().question_count,
            high_score = app.snapshot().high_score,
            "quiz started"
        );

        let mut terminal = terminal::TerminalGuard::enter()?;
        let result = run_event_loop(&mut terminal, &mut app, &mut tick_rx).await;
        drop(terminal);

        info!(high_score = app.snapshot().high_score, "quiz closed");
        result
    }
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    ticks: &mut mpsc::UnboundedReceiver<Tick>,
) -> Result<(), QuizError> {
    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            Some(tick) = ticks.recv() => app.on_tick(tick),
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if handle_input(app, key.code) {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
        return true;
    }

    if !app.snapshot().has_questions() {
        return false;
    }

    match app.status() {
        Status::Ready => handle_ready_input(app, key),
        Status::Active => handle_active_input(app, key),
        Status::Finished => handle_finished_input(app, key),
    }
    false
}

fn handle_ready_input(app: &mut App, key: KeyCode) {
    if key == KeyCode::Enter {
        let _ = app.dispatch(Intent::Start);
    }
}

fn handle_active_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let _ = app.confirm();
        }
        KeyCode::Char(digit @ '1'..='9') if !app.snapshot().has_answered() => {
            let option = digit as usize - '1' as usize;
            let _ = app.choose(option);
        }
        _ => {}
    }
}

fn handle_finished_input(app: &mut App, key: KeyCode) {
    if matches!(key, KeyCode::Char('r') | KeyCode::Char('R')) {
        let _ = app.dispatch(Intent::Restart);
    }
}
