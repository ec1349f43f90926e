use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "mindmate-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
    }))
}

/// Chat degrades to canned replies without a completion key, so that check
/// is informational only.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let completion = if state.config.claude_api_key.trim().is_empty() {
        "fallback_only"
    } else {
        "configured"
    };

    if state.store.ping().await.is_ok() {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "checks": { "database": "ok", "completion": completion },
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "checks": { "database": "failed", "completion": completion },
            })),
        )
    }
}
