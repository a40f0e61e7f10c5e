pub mod attempt;
pub mod question;
pub mod quiz;

pub use attempt::{Answer, AnswerValue, Attempt};
pub use question::{Question, QuestionKind, QuestionType};
pub use quiz::Quiz;
