use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoAttemptRepository, MongoQuestionRepository, MongoQuizRepository},
    services::{AttemptService, QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub attempt_service: Arc<AttemptService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(&db));
        question_repository.ensure_indexes().await?;

        let attempt_repository = Arc::new(MongoAttemptRepository::new(&db));
        attempt_repository.ensure_indexes().await?;

        let quiz_service = Arc::new(QuizService::new(
            quiz_repository.clone(),
            question_repository.clone(),
        ));
        let attempt_service = Arc::new(AttemptService::new(
            attempt_repository,
            quiz_repository,
            question_repository,
        ));

        Ok(Self {
            quiz_service,
            attempt_service,
            db,
            config: Arc::new(config),
        })
    }
}
