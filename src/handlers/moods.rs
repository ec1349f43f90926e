use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::dto::{MoodHistoryResponse, MoodLoggedResponse, StatusResponse};
use crate::error::AppResult;
use crate::models::mood::{LogMoodRequest, MoodHistoryQuery, NewMood, DEFAULT_INTENSITY};
use crate::AppState;

const DEFAULT_HISTORY_DAYS: i64 = 30;

pub async fn log_mood(
    State(state): State<AppState>,
    payload: Result<Json<LogMoodRequest>, JsonRejection>,
) -> AppResult<Json<MoodLoggedResponse>> {
    let Json(body) = payload?;
    body.validate()?;

    let mood = NewMood {
        mood_type: body.mood_type.unwrap_or_default(),
        mood_emoji: body.mood_emoji.unwrap_or_default(),
        intensity: body.intensity.unwrap_or(DEFAULT_INTENSITY),
        notes: body.notes.unwrap_or_default(),
    };
    let mood_id = state.store.log_mood(&mood).await?;

    tracing::debug!(mood_id, mood_type = %mood.mood_type, "Mood logged");

    Ok(Json(MoodLoggedResponse {
        status: StatusResponse::success(format!("Mood '{}' logged successfully", mood.mood_type)),
        mood_id,
        timestamp: Utc::now(),
    }))
}

pub async fn mood_history(
    State(state): State<AppState>,
    Query(query): Query<MoodHistoryQuery>,
) -> AppResult<Json<MoodHistoryResponse>> {
    let days = query.days.unwrap_or(DEFAULT_HISTORY_DAYS);
    let moods = state.store.mood_history(days).await?;

    Ok(Json(MoodHistoryResponse {
        total_count: moods.len(),
        moods,
        days_requested: days,
    }))
}
