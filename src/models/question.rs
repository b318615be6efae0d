use std::ops::Index;
use std::sync::Arc;

use serde::Deserialize;

const DEFAULT_POINTS: u32 = 10;

fn default_points() -> u32 {
    DEFAULT_POINTS
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    #[serde(alias = "question")]
    pub text: String,
    pub options: Vec<String>,
    #[serde(alias = "correctOption")]
    pub correct_option: usize,
    #[serde(default = "default_points")]
    pub points: u32,
}

impl Question {
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option
    }
}

/// Immutable, ordered set of questions shared by every play-through.
///
/// Cloning is cheap: all clones point at the same backing slice.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Arc<[Question]>,
    total_points: u32,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        let total_points = questions
            .iter()
            .fold(0u32, |total, q| total.saturating_add(q.points));
        Self {
            questions: questions.into(),
            total_points,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Sum of the points of every question.
    pub fn total_points(&self) -> u32 {
        self.total_points
    }
}

impl Index<usize> for QuestionBank {
    type Output = Question;

    fn index(&self, index: usize) -> &Question {
        &self.questions[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(points: u32) -> Question {
        Question {
            text: "?".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            correct_option: 0,
            points,
        }
    }

    #[test]
    fn test_total_points() {
        let bank = QuestionBank::new(vec![question(10), question(10), question(20)]);
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.total_points(), 40);
    }

    #[test]
    fn test_total_points_saturates() {
        let bank = QuestionBank::new(vec![question(u32::MAX), question(u32::MAX)]);
        assert_eq!(bank.total_points(), u32::MAX);
    }

    #[test]
    fn test_empty_bank() {
        let bank = QuestionBank::new(Vec::new());
        assert!(bank.is_empty());
        assert_eq!(bank.total_points(), 0);
        assert!(bank.get(0).is_none());
    }

    #[test]
    fn test_deserialize_camel_case_field_names() {
        let json = r#"{
            "question": "Which hook manages reducer state?",
            "options": ["useState", "useReducer", "useRef"],
            "correctOption": 1,
            "points": 20,
            "id": "ignored"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.text, "Which hook manages reducer state?");
        assert_eq!(q.correct_option, 1);
        assert_eq!(q.points, 20);
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn test_points_default() {
        let json = r#"{"text": "t", "options": ["a", "b"], "correct_option": 0}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.points, DEFAULT_POINTS);
    }
}
