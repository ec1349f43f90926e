use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::dto::{BreathingLoggedResponse, StatusResponse};
use crate::error::AppResult;
use crate::models::breathing::{LogBreathingRequest, NewBreathingSession, DEFAULT_SESSION_TYPE};
use crate::AppState;

pub async fn log_session(
    State(state): State<AppState>,
    payload: Result<Json<LogBreathingRequest>, JsonRejection>,
) -> AppResult<Json<BreathingLoggedResponse>> {
    let Json(body) = payload?;
    body.validate()?;

    let session = NewBreathingSession {
        duration_seconds: body.duration.unwrap_or_default(),
        cycles_completed: body.cycles_completed.unwrap_or_default(),
        session_type: body
            .session_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_TYPE.to_string()),
    };
    let session_id = state.store.log_breathing_session(&session).await?;

    tracing::debug!(session_id, session_type = %session.session_type, "Breathing session logged");

    Ok(Json(BreathingLoggedResponse {
        status: StatusResponse::success(format!(
            "Breathing session logged: {} cycles in {} seconds",
            session.cycles_completed, session.duration_seconds
        )),
        session_id,
        timestamp: Utc::now(),
    }))
}
