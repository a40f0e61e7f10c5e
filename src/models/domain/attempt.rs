use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::question::QuestionType;

/// One instance of a user taking a quiz. Created by the eligibility
/// gate, mutated by answer submission while open, sealed exactly once.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Attempt {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub attempt_number: i32,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub completed: bool,
    pub score: i32,
    pub answers: Vec<Answer>,
}

/// A single graded response within an attempt. At most one per question;
/// resubmission replaces the record in place.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Answer {
    pub question_id: String,
    pub question_type: QuestionType,
    pub answer: AnswerValue,
    pub correct: bool,
    pub points: i32,
}

/// The raw submitted value: a choice index, a true/false flag, or free
/// text, depending on the question being answered.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Choice(i64),
    Flag(bool),
    Text(String),
}

impl AnswerValue {
    /// Lower-cased, whitespace-trimmed rendering used for fill-in-the-blank
    /// comparison. Non-text values are stringified first.
    pub fn as_normalized_text(&self) -> String {
        let raw = match self {
            AnswerValue::Choice(index) => index.to_string(),
            AnswerValue::Flag(flag) => flag.to_string(),
            AnswerValue::Text(text) => text.clone(),
        };
        raw.trim().to_lowercase()
    }
}

impl Attempt {
    pub fn new(user_id: &str, quiz_id: &str, attempt_number: i32) -> Self {
        Attempt {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz_id.to_string(),
            attempt_number,
            start_time: Utc::now(),
            end_time: None,
            completed: false,
            score: 0,
            answers: Vec::new(),
        }
    }

    /// Replaces the existing answer for the same question in place, or
    /// appends when the question has not been answered yet. Insertion
    /// order of first submissions is preserved.
    pub fn record_answer(&mut self, answer: Answer) {
        match self
            .answers
            .iter()
            .position(|existing| existing.question_id == answer.question_id)
        {
            Some(index) => self.answers[index] = answer,
            None => self.answers.push(answer),
        }
    }

    /// Sum of points awarded across all recorded answers.
    pub fn earned_points(&self) -> i32 {
        self.answers.iter().map(|answer| answer.points).sum()
    }
}
