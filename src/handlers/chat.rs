use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::dto::{ChatHistoryResponse, ChatResponse};
use crate::error::AppResult;
use crate::models::chat::{ChatHistoryQuery, ChatRequest};
use crate::AppState;

const DEFAULT_HISTORY_LIMIT: i64 = 50;

pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(body) = payload?;
    body.validate()?;

    let message = body.message.unwrap_or_default();
    let result = state.companion.handle(&message, body.conversation_id).await?;

    Ok(Json(ChatResponse {
        reply: result.reply,
        conversation_id: result.conversation_id,
        is_crisis: result.is_crisis,
        timestamp: Utc::now(),
    }))
}

pub async fn conversation_history(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    Query(query): Query<ChatHistoryQuery>,
) -> AppResult<Json<ChatHistoryResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let turns = state.store.chat_history(&conversation_id, limit).await?;

    Ok(Json(ChatHistoryResponse {
        conversation_id,
        total_count: turns.len(),
        turns,
    }))
}
