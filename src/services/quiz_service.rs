use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Question, Quiz},
    repositories::{QuestionRepository, QuizRepository},
};

/// Read-only access to the quiz and question catalogs for the
/// presentation layer.
pub struct QuizService {
    quiz_repository: Arc<dyn QuizRepository>,
    question_repository: Arc<dyn QuestionRepository>,
}

impl QuizService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        question_repository: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            quiz_repository,
            question_repository,
        }
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        self.quiz_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    /// Questions of a quiz in presentation order. Fails if the quiz does
    /// not exist, so a caller can tell an empty quiz from a missing one.
    pub async fn get_questions(&self, quiz_id: &str) -> AppResult<Vec<Question>> {
        self.get_quiz(quiz_id).await?;
        self.question_repository.find_by_quiz(quiz_id).await
    }
}
