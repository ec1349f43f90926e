use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Intensity recorded when the client does not send one.
pub const DEFAULT_INTENSITY: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoodEntry {
    pub id: i64,
    #[serde(rename = "type")]
    pub mood_type: String,
    #[serde(rename = "emoji")]
    pub mood_emoji: String,
    pub intensity: i64,
    pub notes: Option<String>,
    #[serde(rename = "timestamp")]
    pub created_at: NaiveDateTime,
}

/// Intensity is stored as sent; clients are expected to keep it within 1-10.
#[derive(Debug, Deserialize, Validate)]
pub struct LogMoodRequest {
    #[validate(required)]
    pub mood_type: Option<String>,
    #[validate(required)]
    pub mood_emoji: Option<String>,
    pub intensity: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoodHistoryQuery {
    pub days: Option<i64>,
}

/// Insert payload for the moods table.
#[derive(Debug, Clone)]
pub struct NewMood {
    pub mood_type: String,
    pub mood_emoji: String,
    pub intensity: i64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MoodCount {
    pub mood: String,
    pub count: i64,
}
