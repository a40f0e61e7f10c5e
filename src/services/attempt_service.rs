use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Answer, AnswerValue, Attempt, Question, QuestionKind, QuestionType},
    models::dto::response::QuizGrade,
    repositories::{AttemptRepository, QuestionRepository, QuizRepository},
};

/// Orchestrates the attempt lifecycle: eligibility-gated creation,
/// per-question grading, finalization, and grade aggregation. Quiz and
/// question catalogs are consulted read-only; attempt records are owned
/// here exclusively.
pub struct AttemptService {
    attempt_repository: Arc<dyn AttemptRepository>,
    quiz_repository: Arc<dyn QuizRepository>,
    question_repository: Arc<dyn QuestionRepository>,
}

impl AttemptService {
    pub fn new(
        attempt_repository: Arc<dyn AttemptRepository>,
        quiz_repository: Arc<dyn QuizRepository>,
        question_repository: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            attempt_repository,
            quiz_repository,
            question_repository,
        }
    }

    /// Start a new attempt for a user on a quiz.
    ///
    /// The eligibility chain is checked in order and the first failure
    /// wins: input presence, quiz existence, published flag, availability
    /// window, then the attempt-count policy.
    pub async fn start_attempt(&self, user_id: &str, quiz_id: &str) -> AppResult<Attempt> {
        if user_id.trim().is_empty() {
            return Err(AppError::InvalidInput("user id is required".to_string()));
        }
        if quiz_id.trim().is_empty() {
            return Err(AppError::InvalidInput("quiz id is required".to_string()));
        }

        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        if !quiz.published {
            return Err(AppError::NotAvailable(
                "cannot attempt an unpublished quiz".to_string(),
            ));
        }

        let now = Utc::now();

        if let Some(available_date) = quiz.available_date {
            if now < available_date {
                return Err(AppError::NotYetAvailable(
                    "quiz is not yet available".to_string(),
                ));
            }
        }

        if let Some(until_date) = quiz.until_date {
            if now > until_date {
                return Err(AppError::NoLongerAvailable(
                    "quiz is no longer available".to_string(),
                ));
            }
        }

        let count = self
            .attempt_repository
            .count_for_user_and_quiz(user_id, quiz_id)
            .await? as i32;

        if !quiz.multiple_attempts && count > 0 {
            return Err(AppError::AttemptLimitExceeded(
                "multiple attempts are not allowed for this quiz".to_string(),
            ));
        }

        if quiz.multiple_attempts {
            if let Some(allowed) = quiz.attempt_cap() {
                if count >= allowed {
                    return Err(AppError::AttemptLimitExceeded(format!(
                        "maximum number of attempts ({}) reached",
                        allowed
                    )));
                }
            }
        }

        let attempt = Attempt::new(user_id, quiz_id, count + 1);

        log::info!(
            "Starting attempt {} for user {} on quiz {}",
            attempt.attempt_number,
            user_id,
            quiz_id
        );

        self.attempt_repository.create(attempt).await
    }

    /// Grade and record one answer on an open attempt. May be called
    /// repeatedly for the same question; the latest submission wins, in
    /// the answer's original slot.
    pub async fn submit_answer(
        &self,
        attempt_id: &str,
        question_id: &str,
        value: AnswerValue,
    ) -> AppResult<Attempt> {
        let mut attempt = self.require_attempt(attempt_id).await?;

        if attempt.completed {
            return Err(AppError::ImmutableAttempt(
                "cannot modify a completed attempt".to_string(),
            ));
        }

        let question = self
            .question_repository
            .find_by_id(question_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Question with id '{}' not found", question_id))
            })?;

        if question.quiz_id != attempt.quiz_id {
            return Err(AppError::MismatchedQuestion(
                "question does not belong to this quiz".to_string(),
            ));
        }

        let answer = grade_answer(&question, value)?;
        attempt.record_answer(answer);

        self.attempt_repository.update(attempt).await
    }

    /// Seal an attempt: total the awarded points and mark it completed.
    /// Unanswered questions contribute nothing; partial submission is
    /// allowed.
    pub async fn submit_attempt(&self, attempt_id: &str) -> AppResult<Attempt> {
        let mut attempt = self.require_attempt(attempt_id).await?;

        if attempt.completed {
            return Err(AppError::AlreadySubmitted(
                "attempt already submitted".to_string(),
            ));
        }

        attempt.score = attempt.earned_points();
        attempt.completed = true;
        attempt.end_time = Some(Utc::now());

        log::info!(
            "Submitting attempt {} with score {}",
            attempt.id,
            attempt.score
        );

        self.attempt_repository.update(attempt).await
    }

    /// Best reportable result across all of a user's attempts at a quiz.
    ///
    /// Attempts arrive newest-attempt-number first and the best one is
    /// picked by strict comparison, so ties keep the first-encountered
    /// attempt, i.e. the highest attempt number. In-progress attempts
    /// participate with their stored score of 0.
    pub async fn quiz_grade(&self, user_id: &str, quiz_id: &str) -> AppResult<QuizGrade> {
        let attempts = self
            .attempt_repository
            .find_by_user_and_quiz(user_id, quiz_id)
            .await?;

        let Some(first) = attempts.first() else {
            return Ok(QuizGrade::not_attempted());
        };

        let best = attempts
            .iter()
            .skip(1)
            .fold(first, |best, attempt| {
                if attempt.score > best.score {
                    attempt
                } else {
                    best
                }
            });

        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let max_score = quiz.points;
        let percentage = if max_score > 0 {
            f64::from(best.score) * 100.0 / f64::from(max_score)
        } else {
            0.0
        };

        Ok(QuizGrade {
            score: best.score,
            max_score: Some(max_score),
            percentage: Some(percentage),
            attempted: true,
            attempt_count: Some(attempts.len()),
            best_attempt_id: Some(best.id.clone()),
        })
    }

    pub async fn attempt(&self, attempt_id: &str) -> AppResult<Attempt> {
        self.require_attempt(attempt_id).await
    }

    pub async fn attempts_for_user_and_quiz(
        &self,
        user_id: &str,
        quiz_id: &str,
    ) -> AppResult<Vec<Attempt>> {
        self.attempt_repository
            .find_by_user_and_quiz(user_id, quiz_id)
            .await
    }

    pub async fn attempts_for_quiz(
        &self,
        quiz_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Attempt>, i64)> {
        self.attempt_repository
            .find_by_quiz(quiz_id, offset, limit)
            .await
    }

    pub async fn latest_attempt(&self, user_id: &str, quiz_id: &str) -> AppResult<Option<Attempt>> {
        let attempts = self
            .attempt_repository
            .find_by_user_and_quiz(user_id, quiz_id)
            .await?;
        Ok(attempts.into_iter().next())
    }

    async fn require_attempt(&self, attempt_id: &str) -> AppResult<Attempt> {
        self.attempt_repository
            .find_by_id(attempt_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Attempt with id '{}' not found", attempt_id))
            })
    }
}

/// Grade one submitted value against its question.
///
/// A value whose shape does not match the question kind (say, a boolean
/// sent for a multiple-choice question) is simply incorrect, not an
/// error. Fill-in-the-blank comparison trims and lower-cases both sides.
fn grade_answer(question: &Question, value: AnswerValue) -> AppResult<Answer> {
    let (question_type, correct) = match &question.kind {
        QuestionKind::MultipleChoice {
            correct_choice_index,
            ..
        } => {
            let correct =
                matches!(value, AnswerValue::Choice(picked) if picked == *correct_choice_index);
            (QuestionType::MultipleChoice, correct)
        }
        QuestionKind::TrueFalse { correct_answer } => {
            let correct = matches!(value, AnswerValue::Flag(flag) if flag == *correct_answer);
            (QuestionType::TrueFalse, correct)
        }
        QuestionKind::FillBlank { possible_answers } => {
            let submitted = value.as_normalized_text();
            let correct = possible_answers
                .iter()
                .any(|accepted| accepted.trim().to_lowercase() == submitted);
            (QuestionType::FillBlank, correct)
        }
        QuestionKind::Unknown => {
            return Err(AppError::UnsupportedType(format!(
                "question '{}' has an unrecognized type",
                question.id
            )));
        }
    };

    let points = if correct { question.points } else { 0 };

    Ok(Answer {
        question_id: question.id.clone(),
        question_type,
        answer: value,
        correct,
        points,
    })
}
