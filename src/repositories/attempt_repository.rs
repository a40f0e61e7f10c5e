use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppError, errors::AppResult, models::domain::Attempt};

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Persistence for attempt records. Secondary access paths exist by
/// (user, quiz), by quiz alone, and by user alone.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Attempt>>;
    /// All attempts of a user on a quiz, newest attempt number first.
    async fn find_by_user_and_quiz(&self, user_id: &str, quiz_id: &str)
        -> AppResult<Vec<Attempt>>;
    /// Paged attempts for a quiz across all users, sorted by user then
    /// newest attempt number.
    async fn find_by_quiz(
        &self,
        quiz_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Attempt>, i64)>;
    /// All attempts of a user, most recently started first.
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<Attempt>>;
    async fn count_for_user_and_quiz(&self, user_id: &str, quiz_id: &str) -> AppResult<u64>;
    async fn update(&self, attempt: Attempt) -> AppResult<Attempt>;
}

pub struct MongoAttemptRepository {
    collection: Collection<Attempt>,
}

impl MongoAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quiz_attempts");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_attempts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // Unique so that two racing starts cannot both persist the same
        // attempt number for one user and quiz; the loser gets a
        // duplicate-key error and the caller retries.
        let user_quiz_number_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "quiz_id": 1, "attempt_number": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_quiz_attempt_unique".to_string())
                    .build(),
            )
            .build();

        let quiz_id_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1 })
            .options(IndexOptions::builder().name("quiz_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_quiz_number_index).await?;
        self.collection.create_index(quiz_id_index).await?;

        Ok(())
    }

    fn map_insert_error(err: mongodb::error::Error) -> AppError {
        if let ErrorKind::Write(WriteFailure::WriteError(write_err)) = err.kind.as_ref() {
            if write_err.code == DUPLICATE_KEY_CODE {
                return AppError::AlreadyExists(
                    "an attempt with this number already exists for this user and quiz"
                        .to_string(),
                );
            }
        }
        AppError::from(err)
    }
}

#[async_trait]
impl AttemptRepository for MongoAttemptRepository {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt> {
        self.collection
            .insert_one(&attempt)
            .await
            .map_err(Self::map_insert_error)?;
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Attempt>> {
        let attempt = self.collection.find_one(doc! { "id": id }).await?;
        Ok(attempt)
    }

    async fn find_by_user_and_quiz(
        &self,
        user_id: &str,
        quiz_id: &str,
    ) -> AppResult<Vec<Attempt>> {
        let attempts = self
            .collection
            .find(doc! { "user_id": user_id, "quiz_id": quiz_id })
            .sort(doc! { "attempt_number": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn find_by_quiz(
        &self,
        quiz_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Attempt>, i64)> {
        let filter = doc! { "quiz_id": quiz_id };

        let total = self.collection.count_documents(filter.clone()).await?;

        let attempts = self
            .collection
            .find(filter)
            .sort(doc! { "user_id": 1, "attempt_number": -1 })
            .skip(offset as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((attempts, total as i64))
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<Attempt>> {
        let attempts = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "start_time": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn count_for_user_and_quiz(&self, user_id: &str, quiz_id: &str) -> AppResult<u64> {
        let count = self
            .collection
            .count_documents(doc! { "user_id": user_id, "quiz_id": quiz_id })
            .await?;
        Ok(count)
    }

    async fn update(&self, attempt: Attempt) -> AppResult<Attempt> {
        let result = self
            .collection
            .replace_one(doc! { "id": &attempt.id }, &attempt)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Attempt with id '{}' not found",
                attempt.id
            )));
        }

        Ok(attempt)
    }
}
