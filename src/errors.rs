use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not available: {0}")]
    NotAvailable(String),

    #[error("Not yet available: {0}")]
    NotYetAvailable(String),

    #[error("No longer available: {0}")]
    NoLongerAvailable(String),

    #[error("Attempt limit exceeded: {0}")]
    AttemptLimitExceeded(String),

    #[error("Attempt is immutable: {0}")]
    ImmutableAttempt(String),

    #[error("Already submitted: {0}")]
    AlreadySubmitted(String),

    #[error("Mismatched question: {0}")]
    MismatchedQuestion(String),

    #[error("Unsupported question type: {0}")]
    UnsupportedType(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::NotAvailable(_) => "NOT_AVAILABLE",
            AppError::NotYetAvailable(_) => "NOT_YET_AVAILABLE",
            AppError::NoLongerAvailable(_) => "NO_LONGER_AVAILABLE",
            AppError::AttemptLimitExceeded(_) => "ATTEMPT_LIMIT_EXCEEDED",
            AppError::ImmutableAttempt(_) => "IMMUTABLE_ATTEMPT",
            AppError::AlreadySubmitted(_) => "ALREADY_SUBMITTED",
            AppError::MismatchedQuestion(_) => "MISMATCHED_QUESTION",
            AppError::UnsupportedType(_) => "UNSUPPORTED_TYPE",
            AppError::AlreadyExists(_) => "ALREADY_EXISTS",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub status: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::NotAvailable(_) => StatusCode::FORBIDDEN,
            AppError::NotYetAvailable(_) => StatusCode::FORBIDDEN,
            AppError::NoLongerAvailable(_) => StatusCode::FORBIDDEN,
            AppError::AttemptLimitExceeded(_) => StatusCode::FORBIDDEN,
            AppError::ImmutableAttempt(_) => StatusCode::CONFLICT,
            AppError::AlreadySubmitted(_) => StatusCode::CONFLICT,
            AppError::MismatchedQuestion(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedType(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
            status: self.status_code().as_u16(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
