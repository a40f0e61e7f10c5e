pub mod attempt_handler;
pub mod quiz_handler;

pub use attempt_handler::{
    get_attempt, get_my_attempts, get_my_grade, get_quiz_attempts, get_user_grade, start_attempt,
    submit_answer, submit_attempt,
};
pub use quiz_handler::{get_quiz, get_quiz_questions, health_check, health_check_ready};
