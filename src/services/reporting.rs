//! Dashboard aggregates composed from the store's read queries.

use crate::db::WellbeingStore;
use crate::dto::DashboardStats;

/// Window for per-mood counts.
pub const MOOD_COUNT_DAYS: i64 = 30;
/// Window for the average intensity.
pub const INTENSITY_DAYS: i64 = 7;
/// Reported when no mood was logged inside the intensity window.
pub const DEFAULT_AVG_INTENSITY: f64 = 5.0;

pub async fn dashboard_stats(store: &WellbeingStore) -> Result<DashboardStats, sqlx::Error> {
    let mood_counts = store.mood_counts_since(MOOD_COUNT_DAYS).await?;
    let avg_intensity = store
        .average_intensity_since(INTENSITY_DAYS)
        .await?
        .map(round_one_decimal)
        .unwrap_or(DEFAULT_AVG_INTENSITY);
    let total_journal_entries = store.count_journal_entries().await?;
    let total_breathing_sessions = store.count_breathing_sessions().await?;

    Ok(DashboardStats {
        mood_counts,
        avg_intensity,
        total_journal_entries,
        total_breathing_sessions,
    })
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
