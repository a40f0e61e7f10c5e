use serde::{Deserialize, Serialize};

/// The reportable grade for a user on a quiz, aggregated over all of
/// their attempts. `score` is 0 and the optional fields are absent when
/// the user has never started the quiz.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuizGrade {
    pub score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    pub attempted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_attempt_id: Option<String>,
}

impl QuizGrade {
    pub fn not_attempted() -> Self {
        QuizGrade {
            score: 0,
            max_score: None,
            percentage: None,
            attempted: false,
            attempt_count: None,
            best_attempt_id: None,
        }
    }
}

/// Paged listing of attempts for a quiz, for the faculty view.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptPage {
    pub items: Vec<crate::models::domain::Attempt>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}
