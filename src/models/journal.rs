use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: i64,
    pub title: Option<String>,
    pub content: String,
    #[serde(rename = "mood")]
    pub mood_at_time: Option<String>,
    pub tags: Option<String>,
    #[serde(rename = "timestamp")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SaveJournalRequest {
    #[validate(required)]
    pub content: Option<String>,
    pub title: Option<String>,
    pub mood_at_time: Option<String>,
    /// Free-form, usually comma separated.
    pub tags: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JournalQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    pub content: String,
    pub title: String,
    pub mood_at_time: String,
    pub tags: String,
}
