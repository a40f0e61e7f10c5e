use crate::models::domain::question::Choice;
use crate::models::domain::{Question, QuestionKind, Quiz};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A published quiz with an open availability window and multiple
    /// attempts enabled.
    pub fn published_quiz(id: &str) -> Quiz {
        Quiz {
            id: id.to_string(),
            title: format!("Quiz {}", id),
            description: None,
            course_id: Some("course-1".to_string()),
            points: 100,
            published: true,
            available_date: None,
            until_date: None,
            due_date: None,
            multiple_attempts: true,
            attempts_allowed: None,
            time_limit: Some(20),
            creator_id: Some("faculty-1".to_string()),
        }
    }

    pub fn multiple_choice_question(
        id: &str,
        quiz_id: &str,
        correct_choice_index: i64,
        points: i32,
    ) -> Question {
        Question {
            id: id.to_string(),
            quiz_id: quiz_id.to_string(),
            title: format!("Question {}", id),
            question_text: "Pick the right choice".to_string(),
            points,
            position: 0,
            kind: QuestionKind::MultipleChoice {
                choices: vec![
                    Choice {
                        id: format!("{}-c0", id),
                        text: "First".to_string(),
                    },
                    Choice {
                        id: format!("{}-c1", id),
                        text: "Second".to_string(),
                    },
                    Choice {
                        id: format!("{}-c2", id),
                        text: "Third".to_string(),
                    },
                ],
                correct_choice_index,
            },
        }
    }

    pub fn true_false_question(id: &str, quiz_id: &str, correct_answer: bool, points: i32) -> Question {
        Question {
            id: id.to_string(),
            quiz_id: quiz_id.to_string(),
            title: format!("Question {}", id),
            question_text: "True or false?".to_string(),
            points,
            position: 0,
            kind: QuestionKind::TrueFalse { correct_answer },
        }
    }

    pub fn fill_blank_question(
        id: &str,
        quiz_id: &str,
        possible_answers: &[&str],
        points: i32,
    ) -> Question {
        Question {
            id: id.to_string(),
            quiz_id: quiz_id.to_string(),
            title: format!("Question {}", id),
            question_text: "Fill in the blank".to_string(),
            points,
            position: 0,
            kind: QuestionKind::FillBlank {
                possible_answers: possible_answers.iter().map(|s| s.to_string()).collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::QuestionType;

    #[test]
    fn test_fixtures_published_quiz() {
        let quiz = published_quiz("quiz-1");
        assert!(quiz.published);
        assert!(quiz.multiple_attempts);
        assert_eq!(quiz.points, 100);
    }

    #[test]
    fn test_fixtures_question_kinds() {
        let mc = multiple_choice_question("q-1", "quiz-1", 2, 5);
        assert_eq!(mc.kind.type_tag(), Some(QuestionType::MultipleChoice));

        let tf = true_false_question("q-2", "quiz-1", true, 3);
        assert_eq!(tf.kind.type_tag(), Some(QuestionType::TrueFalse));

        let fb = fill_blank_question("q-3", "quiz-1", &["ethanol"], 4);
        assert_eq!(fb.kind.type_tag(), Some(QuestionType::FillBlank));
    }
}
