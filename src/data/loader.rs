use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Question, QuestionBank};

const EMBEDDED_QUESTIONS: &str = include_str!("../../questions.json");
const EMBEDDED_ORIGIN: &str = "<embedded questions.json>";

/// Errors raised while reading or validating a question file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("question {} in {origin} is invalid: {reason}", .index + 1)]
    InvalidQuestion {
        origin: String,
        index: usize,
        reason: String,
    },

    #[error("points in {origin} add up to more than {}", u32::MAX)]
    PointsOverflow { origin: String },
}

/// Load and validate the question bank stored at `path`.
///
/// An empty array is accepted; callers decide how to present it.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<QuestionBank, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let bank = parse_questions(&json_content, &path.display().to_string())?;
    info!(path = %path.display(), count = bank.len(), "loaded question bank");
    Ok(bank)
}

/// The question bank compiled into the binary.
pub fn default_questions() -> Result<QuestionBank, LoadError> {
    let bank = parse_questions(EMBEDDED_QUESTIONS, EMBEDDED_ORIGIN)?;
    info!(count = bank.len(), "loaded embedded question bank");
    Ok(bank)
}

/// Parse a JSON array of questions. `origin` only labels error messages.
pub fn parse_questions(json: &str, origin: &str) -> Result<QuestionBank, LoadError> {
    let questions: Vec<Question> = serde_json::from_str(json).map_err(|source| LoadError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    let mut total_points: u32 = 0;
    for (index, question) in questions.iter().enumerate() {
        validate(question).map_err(|reason| LoadError::InvalidQuestion {
            origin: origin.to_string(),
            index,
            reason,
        })?;
        total_points = total_points
            .checked_add(question.points)
            .ok_or_else(|| LoadError::PointsOverflow {
                origin: origin.to_string(),
            })?;
    }

    debug!(origin, count = questions.len(), total_points, "validated questions");
    Ok(QuestionBank::new(questions))
}

fn validate(question: &Question) -> Result<(), String> {
    if question.options.len() < 2 {
        return Err(format!(
            "needs at least 2 options, found {}",
            question.options.len()
        ));
    }

    if question.correct_option >= question.options.len() {
        return Err(format!(
            "correct option {} is out of range for {} options",
            question.correct_option,
            question.options.len()
        ));
    }

    if question.points == 0 {
        return Err("points must be positive".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_questions_are_valid() {
        let bank = default_questions().unwrap();
        assert!(!bank.is_empty());
        assert!(bank.total_points() > 0);
    }

    #[test]
    fn test_parse_empty_array() {
        let bank = parse_questions("[]", "test").unwrap();
        assert!(bank.is_empty());
    }

    #[test]
    fn test_parse_rejects_single_option() {
        let json = r#"[{"text": "t", "options": ["only"], "correct_option": 0}]"#;
        let err = parse_questions(json, "test").unwrap_err();
        assert!(matches!(err, LoadError::InvalidQuestion { index: 0, .. }));
    }

    #[test]
    fn test_parse_rejects_out_of_range_answer() {
        let json = r#"[
            {"text": "ok", "options": ["a", "b"], "correct_option": 1},
            {"text": "bad", "options": ["a", "b"], "correct_option": 2}
        ]"#;
        let err = parse_questions(json, "test").unwrap_err();
        assert!(matches!(err, LoadError::InvalidQuestion { index: 1, .. }));
        assert!(err.to_string().contains("question 2"));
    }

    #[test]
    fn test_parse_rejects_zero_points() {
        let json = r#"[{"text": "t", "options": ["a", "b"], "correct_option": 0, "points": 0}]"#;
        assert!(matches!(
            parse_questions(json, "test"),
            Err(LoadError::InvalidQuestion { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_points_overflow() {
        let json = r#"[
            {"text": "a", "options": ["a", "b"], "correct_option": 0, "points": 4000000000},
            {"text": "b", "options": ["a", "b"], "correct_option": 0, "points": 4000000000}
        ]"#;
        let err = parse_questions(json, "huge.json").unwrap_err();
        assert!(matches!(err, LoadError::PointsOverflow { .. }));
        assert!(err.to_string().contains("huge.json"));
    }

    #[test]
    fn test_parse_accepts_points_up_to_max() {
        let json = format!(
            r#"[
                {{"text": "a", "options": ["a", "b"], "correct_option": 0, "points": {}}},
                {{"text": "b", "options": ["a", "b"], "correct_option": 0, "points": 1}}
            ]"#,
            u32::MAX - 1
        );
        let bank = parse_questions(&json, "test").unwrap();
        assert_eq!(bank.total_points(), u32::MAX);
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_questions("{not json", "broken.json").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_questions_from_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }
}
