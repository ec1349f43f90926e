use axum::{extract::State, Json};

use crate::dto::DashboardStats;
use crate::error::AppResult;
use crate::services::reporting;
use crate::AppState;

pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let stats = reporting::dashboard_stats(&state.store).await?;
    Ok(Json(stats))
}
