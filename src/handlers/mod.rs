pub mod breathing;
pub mod chat;
pub mod dashboard;
pub mod health;
pub mod journal;
pub mod moods;
pub mod resources;
pub mod settings;

use crate::error::AppError;

/// Router fallback for undefined routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".into())
}
