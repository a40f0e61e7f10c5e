use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A quiz as stored in the catalog. The attempt engine only ever reads
/// these; authoring lives elsewhere.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    pub points: i32,
    pub published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub multiple_attempts: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_allowed: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
}

impl Quiz {
    /// The per-user attempt cap when multiple attempts are enabled.
    /// A missing or non-positive `attempts_allowed` means unlimited,
    /// matching the catalog's legacy documents.
    pub fn attempt_cap(&self) -> Option<i32> {
        self.attempts_allowed.filter(|allowed| *allowed > 0)
    }
}
