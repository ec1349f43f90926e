use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde_json::{Map, Value};

use crate::dto::StatusResponse;
use crate::error::{AppError, AppResult};
use crate::models::setting::{setting_value_to_text, Setting, SettingQuery, KNOWN_SETTINGS};
use crate::AppState;

pub async fn get_settings(
    State(state): State<AppState>,
) -> AppResult<Json<BTreeMap<String, String>>> {
    let mut settings = BTreeMap::new();
    for (key, default) in KNOWN_SETTINGS {
        let value = state.store.get_setting(key, default).await?;
        settings.insert(key.to_string(), value);
    }
    Ok(Json(settings))
}

pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<SettingQuery>,
) -> AppResult<Json<Setting>> {
    let default = query.default.unwrap_or_default();
    let value = state.store.get_setting(&key, &default).await?;
    Ok(Json(Setting { key, value }))
}

pub async fn update_settings(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> AppResult<Json<StatusResponse>> {
    let Json(body) = payload?;
    if body.is_empty() {
        return Err(AppError::InvalidInput("No settings data provided".into()));
    }

    let settings: Vec<(String, String)> = body
        .iter()
        .map(|(key, value)| (key.clone(), setting_value_to_text(value)))
        .collect();
    state.store.set_settings(&settings).await?;

    tracing::debug!(keys = body.len(), "Settings updated");

    Ok(Json(StatusResponse::success("Settings updated successfully")))
}
