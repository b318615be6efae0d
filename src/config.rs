use std::path::PathBuf;

use crate::session::SECONDS_PER_QUESTION;
use crate::storage::{self, HighScoreStore};

const LOG_FILE: &str = "timed-quiz.log";

/// Runtime settings assembled from the command line and environment.
#[derive(Clone, Debug)]
pub struct Config {
    /// Question file; `None` uses the embedded set.
    pub questions: Option<PathBuf>,
    pub seconds_per_question: u32,
    /// Override for the high score location.
    pub high_score_file: Option<PathBuf>,
    /// Keep the high score on disk between runs.
    pub persist_high_score: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            questions: None,
            seconds_per_question: SECONDS_PER_QUESTION,
            high_score_file: None,
            persist_high_score: true,
            log_file: None,
        }
    }
}

impl Config {
    pub fn high_score_store(&self) -> HighScoreStore {
        if !self.persist_high_score {
            return HighScoreStore::disabled();
        }
        match &self.high_score_file {
            Some(path) => HighScoreStore::new(path),
            None => HighScoreStore::new(HighScoreStore::default_path()),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| storage::data_dir().join(LOG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.seconds_per_question, 30);
        assert!(config.questions.is_none());
        assert!(config.high_score_store().path().is_some());
        assert!(config.log_path().ends_with(LOG_FILE));
    }

    #[test]
    fn test_no_persist_disables_store() {
        let config = Config {
            persist_high_score: false,
            high_score_file: Some(PathBuf::from("scores.json")),
            ..Config::default()
        };
        assert!(config.high_score_store().path().is_none());
    }

    #[test]
    fn test_explicit_high_score_file() {
        let config = Config {
            high_score_file: Some(PathBuf::from("scores.json")),
            ..Config::default()
        };
        let store = config.high_score_store();
        assert_eq!(store.path(), Some(std::path::Path::new("scores.json")));
    }
}
