use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::dto::{JournalEntriesResponse, JournalSavedResponse, StatusResponse};
use crate::error::{AppError, AppResult};
use crate::models::journal::{JournalQuery, NewJournalEntry, SaveJournalRequest};
use crate::AppState;

const DEFAULT_ENTRY_LIMIT: i64 = 20;

pub async fn save_entry(
    State(state): State<AppState>,
    payload: Result<Json<SaveJournalRequest>, JsonRejection>,
) -> AppResult<Json<JournalSavedResponse>> {
    let Json(body) = payload?;
    body.validate()?;

    let content = body.content.unwrap_or_default().trim().to_string();
    if content.is_empty() {
        return Err(AppError::InvalidInput("Journal content cannot be empty".into()));
    }

    let entry = NewJournalEntry {
        content,
        title: body.title.unwrap_or_default().trim().to_string(),
        mood_at_time: body.mood_at_time.unwrap_or_default(),
        tags: body.tags.unwrap_or_default(),
    };
    let entry_id = state.store.save_journal_entry(&entry).await?;

    tracing::debug!(entry_id, "Journal entry saved");

    Ok(Json(JournalSavedResponse {
        status: StatusResponse::success("Journal entry saved successfully"),
        entry_id,
        timestamp: Utc::now(),
    }))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<JournalQuery>,
) -> AppResult<Json<JournalEntriesResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_ENTRY_LIMIT);
    let entries = state.store.journal_entries(limit).await?;

    Ok(Json(JournalEntriesResponse {
        total_count: entries.len(),
        entries,
    }))
}
