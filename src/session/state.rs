//! Quiz session state machine.
//!
//! Every transition goes through [`SessionState::reduce`], a pure function of
//! the current state, the question bank and an [`Intent`]. [`QuizSession`]
//! owns the current state and swaps in the reduced value on success, so a
//! rejected intent never leaves a half-applied state behind.

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Question, QuestionBank};
use crate::score::{self, Grade};

/// Seconds granted per question when a play-through starts.
pub const SECONDS_PER_QUESTION: u32 = 30;

/// Phase of a play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Waiting for the player to start.
    Ready,
    /// Questions are being answered and the clock is running.
    Active,
    /// Every question was answered or the clock ran out.
    Finished,
}

/// A discrete user or timer action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start,
    SelectOption(usize),
    Advance,
    Finish,
    Tick,
    Restart,
}

/// Reasons an intent is rejected. The session state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("the question bank is empty")]
    NoQuestions,

    #[error("the current question has already been answered")]
    AlreadyAnswered,

    #[error("option {index} is out of range for {len} options")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("intent {intent:?} is not valid while {status:?}")]
    InvalidIntent { intent: Intent, status: Status },
}

/// The mutable part of a session, as an immutable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub status: Status,
    pub current_index: usize,
    pub selected_option: Option<usize>,
    pub score: u32,
    pub high_score: u32,
    pub seconds_remaining: Option<u32>,
}

impl SessionState {
    pub fn ready(high_score: u32) -> Self {
        Self {
            status: Status::Ready,
            current_index: 0,
            selected_option: None,
            score: 0,
            high_score,
            seconds_remaining: None,
        }
    }

    /// Compute the state that follows `intent`.
    pub fn reduce(
        &self,
        bank: &QuestionBank,
        seconds_per_question: u32,
        intent: Intent,
    ) -> Result<Self, SessionError> {
        match (self.status, intent) {
            (Status::Ready, Intent::Start) => {
                if bank.is_empty() {
                    return Err(SessionError::NoQuestions);
                }
                let seconds = u32::try_from(bank.len())
                    .unwrap_or(u32::MAX)
                    .saturating_mul(seconds_per_question);
                Ok(Self {
                    status: Status::Active,
                    seconds_remaining: Some(seconds),
                    ..Self::ready(self.high_score)
                })
            }

            (Status::Active, Intent::SelectOption(option)) => {
                if self.selected_option.is_some() {
                    return Err(SessionError::AlreadyAnswered);
                }
                let question = &bank[self.current_index];
                if option >= question.options.len() {
                    return Err(SessionError::OptionOutOfRange {
                        index: option,
                        len: question.options.len(),
                    });
                }
                let score = if question.is_correct(option) {
                    self.score.saturating_add(question.points)
                } else {
                    self.score
                };
                Ok(Self {
                    selected_option: Some(option),
                    score,
                    ..self.clone()
                })
            }

            (Status::Active, Intent::Advance) if self.current_index + 1 < bank.len() => Ok(Self {
                current_index: self.current_index + 1,
                selected_option: None,
                ..self.clone()
            }),

            (Status::Active, Intent::Finish) if self.current_index + 1 == bank.len() => {
                Ok(self.finished(self.seconds_remaining))
            }

            (Status::Active, Intent::Tick) => match self.seconds_remaining {
                Some(seconds) if seconds > 1 => Ok(Self {
                    seconds_remaining: Some(seconds - 1),
                    ..self.clone()
                }),
                _ => Ok(self.finished(Some(0))),
            },

            // Ticks can still be queued when the clock is stopped.
            (Status::Ready | Status::Finished, Intent::Tick) => Ok(self.clone()),

            (Status::Finished, Intent::Restart) => Ok(Self::ready(self.high_score)),

            (status, intent) => Err(SessionError::InvalidIntent { intent, status }),
        }
    }

    fn finished(&self, seconds_remaining: Option<u32>) -> Self {
        Self {
            status: Status::Finished,
            high_score: self.high_score.max(self.score),
            seconds_remaining,
            ..self.clone()
        }
    }
}

/// Read-only view of a session handed to the presentation layer.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub status: Status,
    pub current_index: usize,
    pub selected_option: Option<usize>,
    pub score: u32,
    pub total_points: u32,
    pub high_score: u32,
    pub seconds_remaining: Option<u32>,
    pub question_count: usize,
    bank: QuestionBank,
}

impl Snapshot {
    fn new(state: &SessionState, bank: &QuestionBank) -> Self {
        Self {
            status: state.status,
            current_index: state.current_index,
            selected_option: state.selected_option,
            score: state.score,
            total_points: bank.total_points(),
            high_score: state.high_score,
            seconds_remaining: state.seconds_remaining,
            question_count: bank.len(),
            bank: bank.clone(),
        }
    }

    /// The question on screen, if any.
    pub fn current_question(&self) -> Option<&Question> {
        match self.status {
            Status::Ready => None,
            Status::Active | Status::Finished => self.bank.get(self.current_index),
        }
    }

    pub fn has_questions(&self) -> bool {
        self.question_count > 0
    }

    pub fn has_answered(&self) -> bool {
        self.selected_option.is_some()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.question_count
    }

    /// Questions answered so far, counting the current one once selected.
    pub fn answered_count(&self) -> usize {
        match self.status {
            Status::Ready => 0,
            Status::Active | Status::Finished => {
                self.current_index + usize::from(self.has_answered())
            }
        }
    }

    /// Whether `option` is the right answer to the current question.
    pub fn is_correct(&self, option: usize) -> bool {
        self.current_question()
            .is_some_and(|question| question.is_correct(option))
    }

    pub fn percentage(&self) -> u32 {
        score::percentage(self.score, self.total_points)
    }

    pub fn grade(&self) -> Grade {
        Grade::from_score(self.score, self.total_points)
    }
}

/// A single play session over a shared question bank.
pub struct QuizSession {
    bank: QuestionBank,
    state: SessionState,
    seconds_per_question: u32,
}

impl QuizSession {
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            state: SessionState::ready(0),
            seconds_per_question: SECONDS_PER_QUESTION,
        }
    }

    /// Seed the high score, e.g. with a persisted value.
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.state.high_score = self.state.high_score.max(high_score);
        self
    }

    pub fn with_seconds_per_question(mut self, seconds: u32) -> Self {
        self.seconds_per_question = seconds.max(1);
        self
    }

    /// Apply `intent` and return the resulting snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the intent is not valid in the
    /// current state. The state is unchanged in that case.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Snapshot, SessionError> {
        let next = self
            .state
            .reduce(&self.bank, self.seconds_per_question, intent)?;

        if next.status != self.state.status {
            info!(
                from = ?self.state.status,
                to = ?next.status,
                score = next.score,
                high_score = next.high_score,
                "session status changed"
            );
        } else if intent != Intent::Tick {
            debug!(?intent, index = next.current_index, score = next.score, "intent applied");
        }

        self.state = next;
        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(&self.state, &self.bank)
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }
}
