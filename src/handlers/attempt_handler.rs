use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_faculty, require_owner_or_faculty, CallerIdentity},
    errors::AppError,
    models::dto::request::{PaginationParams, SubmitAnswerRequest},
    models::dto::response::AttemptPage,
};

/// Start a new attempt on a quiz for the calling user.
#[post("/api/quizzes/{quiz_id}/attempts")]
async fn start_attempt(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    caller: CallerIdentity,
) -> Result<HttpResponse, AppError> {
    let attempt = state
        .attempt_service
        .start_attempt(&caller.user_id, &quiz_id)
        .await?;
    Ok(HttpResponse::Created().json(attempt))
}

/// All attempts on a quiz, across users. Faculty only.
#[get("/api/quizzes/{quiz_id}/attempts")]
async fn get_quiz_attempts(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    query: web::Query<PaginationParams>,
    caller: CallerIdentity,
) -> Result<HttpResponse, AppError> {
    require_faculty(&caller)?;

    let pagination = query.into_inner();
    pagination.validate()?;

    let (items, total) = state
        .attempt_service
        .attempts_for_quiz(&quiz_id, pagination.offset(), pagination.limit())
        .await?;
    Ok(HttpResponse::Ok().json(AttemptPage {
        items,
        total,
        offset: pagination.offset(),
        limit: pagination.limit(),
    }))
}

/// The calling user's own attempts on a quiz.
#[get("/api/quizzes/{quiz_id}/my-attempts")]
async fn get_my_attempts(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    caller: CallerIdentity,
) -> Result<HttpResponse, AppError> {
    let attempts = state
        .attempt_service
        .attempts_for_user_and_quiz(&caller.user_id, &quiz_id)
        .await?;
    Ok(HttpResponse::Ok().json(attempts))
}

/// One attempt by id. Visible to its owner and to faculty.
#[get("/api/quiz-attempts/{attempt_id}")]
async fn get_attempt(
    state: web::Data<AppState>,
    attempt_id: web::Path<String>,
    caller: CallerIdentity,
) -> Result<HttpResponse, AppError> {
    let attempt = state.attempt_service.attempt(&attempt_id).await?;
    require_owner_or_faculty(&caller, &attempt.user_id)?;

    Ok(HttpResponse::Ok().json(attempt))
}

/// Grade and record one answer on an open attempt. Owner only.
#[post("/api/quiz-attempts/{attempt_id}/questions/{question_id}")]
async fn submit_answer(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    request: web::Json<SubmitAnswerRequest>,
    caller: CallerIdentity,
) -> Result<HttpResponse, AppError> {
    let (attempt_id, question_id) = path.into_inner();

    let attempt = state.attempt_service.attempt(&attempt_id).await?;
    if attempt.user_id != caller.user_id {
        return Err(AppError::Forbidden(
            "this is not your quiz attempt".to_string(),
        ));
    }

    let updated = state
        .attempt_service
        .submit_answer(&attempt_id, &question_id, request.into_inner().answer)
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Finalize an attempt. Owner only.
#[post("/api/quiz-attempts/{attempt_id}/submit")]
async fn submit_attempt(
    state: web::Data<AppState>,
    attempt_id: web::Path<String>,
    caller: CallerIdentity,
) -> Result<HttpResponse, AppError> {
    let attempt = state.attempt_service.attempt(&attempt_id).await?;
    if attempt.user_id != caller.user_id {
        return Err(AppError::Forbidden(
            "this is not your quiz attempt".to_string(),
        ));
    }

    let sealed = state.attempt_service.submit_attempt(&attempt_id).await?;
    Ok(HttpResponse::Ok().json(sealed))
}

/// The calling user's grade for a quiz.
#[get("/api/quizzes/{quiz_id}/grade")]
async fn get_my_grade(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    caller: CallerIdentity,
) -> Result<HttpResponse, AppError> {
    let grade = state
        .attempt_service
        .quiz_grade(&caller.user_id, &quiz_id)
        .await?;
    Ok(HttpResponse::Ok().json(grade))
}

/// A specific student's grade for a quiz. Faculty only.
#[get("/api/quizzes/{quiz_id}/users/{user_id}/grade")]
async fn get_user_grade(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    caller: CallerIdentity,
) -> Result<HttpResponse, AppError> {
    require_faculty(&caller)?;

    let (quiz_id, user_id) = path.into_inner();
    let grade = state.attempt_service.quiz_grade(&user_id, &quiz_id).await?;
    Ok(HttpResponse::Ok().json(grade))
}
