use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatTurn {
    pub id: i64,
    pub user_message: String,
    pub ai_response: String,
    pub conversation_id: Option<String>,
    pub is_crisis: bool,
    #[serde(rename = "timestamp")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(required)]
    pub message: Option<String>,
    pub conversation_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatHistoryQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewChatTurn {
    pub user_message: String,
    pub ai_response: String,
    pub conversation_id: String,
    pub is_crisis: bool,
}
