use serde::{Deserialize, Serialize};

/// A question as stored in the catalog, read-only from the attempt
/// engine's point of view.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub quiz_id: String,
    pub title: String,
    pub question_text: String,
    pub points: i32,
    pub position: i32,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// Closed set of question kinds, each carrying its own correct-answer
/// payload. Adding a kind forces a new grading arm at compile time.
///
/// `Unknown` absorbs documents written with a type tag this server does
/// not recognize; grading reports them as unsupported instead of failing
/// to deserialize the whole attempt flow.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "question_type")]
pub enum QuestionKind {
    #[serde(rename = "MULTIPLE_CHOICE")]
    MultipleChoice {
        choices: Vec<Choice>,
        correct_choice_index: i64,
    },
    #[serde(rename = "TRUE_FALSE")]
    TrueFalse { correct_answer: bool },
    #[serde(rename = "FILL_BLANK")]
    FillBlank { possible_answers: Vec<String> },
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
}

/// The type tag recorded on each answer, mirroring the kind of the
/// question it was graded against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum QuestionType {
    #[serde(rename = "MULTIPLE_CHOICE")]
    MultipleChoice,
    #[serde(rename = "TRUE_FALSE")]
    TrueFalse,
    #[serde(rename = "FILL_BLANK")]
    FillBlank,
}

impl QuestionKind {
    pub fn type_tag(&self) -> Option<QuestionType> {
        match self {
            QuestionKind::MultipleChoice { .. } => Some(QuestionType::MultipleChoice),
            QuestionKind::TrueFalse { .. } => Some(QuestionType::TrueFalse),
            QuestionKind::FillBlank { .. } => Some(QuestionType::FillBlank),
            QuestionKind::Unknown => None,
        }
    }
}
