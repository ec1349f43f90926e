//! # MindMate: Response DTOs
//!
//! JSON shapes returned by the API. Request bodies live next to their
//! models in `crate::models`.
//!
//! Conventions:
//! - `*Response` → serialized to client JSON
//! - Field names follow the legacy front end (`mood_id`, `entry_id`, ...)
//! - Timestamps are ISO-8601 strings

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::chat::ChatTurn;
use crate::models::journal::JournalEntry;
use crate::models::mood::{MoodCount, MoodEntry};

// ============================================================================
// Common
// ============================================================================

/// Standard confirmation response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}

// ============================================================================
// Chat
// ============================================================================

/// POST /api/chat
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub conversation_id: String,
    pub is_crisis: bool,
    pub timestamp: DateTime<Utc>,
}

/// GET /api/chat/:conversation_id
#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub conversation_id: String,
    pub turns: Vec<ChatTurn>,
    pub total_count: usize,
}

// ============================================================================
// Moods
// ============================================================================

/// POST /api/mood
#[derive(Debug, Serialize)]
pub struct MoodLoggedResponse {
    #[serde(flatten)]
    pub status: StatusResponse,
    pub mood_id: i64,
    pub timestamp: DateTime<Utc>,
}

/// GET /api/mood/history
#[derive(Debug, Serialize)]
pub struct MoodHistoryResponse {
    pub moods: Vec<MoodEntry>,
    pub total_count: usize,
    pub days_requested: i64,
}

// ============================================================================
// Journal
// ============================================================================

/// POST /api/journal
#[derive(Debug, Serialize)]
pub struct JournalSavedResponse {
    #[serde(flatten)]
    pub status: StatusResponse,
    pub entry_id: i64,
    pub timestamp: DateTime<Utc>,
}

/// GET /api/journal/entries
#[derive(Debug, Serialize)]
pub struct JournalEntriesResponse {
    pub entries: Vec<JournalEntry>,
    pub total_count: usize,
}

// ============================================================================
// Breathing
// ============================================================================

/// POST /api/breathing
#[derive(Debug, Serialize)]
pub struct BreathingLoggedResponse {
    #[serde(flatten)]
    pub status: StatusResponse,
    pub session_id: i64,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Dashboard
// ============================================================================

/// GET /api/dashboard/stats
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    /// Last 30 days, most frequent first
    pub mood_counts: Vec<MoodCount>,
    /// Last 7 days, one decimal
    pub avg_intensity: f64,
    #[serde(rename = "total_entries")]
    pub total_journal_entries: i64,
    pub total_breathing_sessions: i64,
}

// ============================================================================
// Emergency resources
// ============================================================================

#[derive(Debug, Serialize)]
pub struct Hotline {
    pub name: &'static str,
    pub contact: &'static str,
    pub description: &'static str,
    pub website: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OnlineResource {
    pub name: &'static str,
    pub description: &'static str,
    pub website: &'static str,
}

#[derive(Debug, Serialize)]
pub struct EmergencyContact {
    pub name: &'static str,
    pub contact: &'static str,
    pub description: &'static str,
}

/// GET /api/emergency-resources
#[derive(Debug, Serialize)]
pub struct EmergencyResourcesResponse {
    pub crisis_hotlines: Vec<Hotline>,
    pub online_resources: Vec<OnlineResource>,
    pub emergency: EmergencyContact,
}
