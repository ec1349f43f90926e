use serde::Deserialize;
use validator::Validate;

pub const DEFAULT_SESSION_TYPE: &str = "4-7-8";

#[derive(Debug, Deserialize, Validate)]
pub struct LogBreathingRequest {
    /// Seconds.
    #[validate(required)]
    pub duration: Option<i64>,
    #[validate(required)]
    pub cycles_completed: Option<i64>,
    pub session_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewBreathingSession {
    pub duration_seconds: i64,
    pub cycles_completed: i64,
    pub session_type: String,
}
