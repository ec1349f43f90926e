use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use crate::models::breathing::NewBreathingSession;
use crate::models::chat::{ChatTurn, NewChatTurn};
use crate::models::journal::{JournalEntry, NewJournalEntry};
use crate::models::mood::{MoodCount, MoodEntry, NewMood};

/// Layout of SQLite `CURRENT_TIMESTAMP`; cutoffs are compared as text.
const SQLITE_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";
const EARLIEST: &str = "0000-01-01 00:00:00";
const LATEST: &str = "9999-12-31 23:59:59";

/// Gateway over the five wellbeing tables. Cloning is cheap; all clones
/// share one pool.
#[derive(Clone)]
pub struct WellbeingStore {
    pool: SqlitePool,
}

impl WellbeingStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
    }

    // ── Writes ───────────────────────────────────────────────────────────

    pub async fn log_mood(&self, mood: &NewMood) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO moods (mood_type, mood_emoji, intensity, notes)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&mood.mood_type)
        .bind(&mood.mood_emoji)
        .bind(mood.intensity)
        .bind(&mood.notes)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn save_journal_entry(&self, entry: &NewJournalEntry) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO journal_entries (title, content, mood_at_time, tags)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(&entry.mood_at_time)
        .bind(&entry.tags)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn log_chat_turn(&self, turn: &NewChatTurn) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO chat_conversations (user_message, ai_response, conversation_id, is_crisis)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&turn.user_message)
        .bind(&turn.ai_response)
        .bind(&turn.conversation_id)
        .bind(turn.is_crisis)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn log_breathing_session(
        &self,
        session: &NewBreathingSession,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO breathing_sessions (session_duration, cycles_completed, session_type)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(session.duration_seconds)
        .bind(session.cycles_completed)
        .bind(&session.session_type)
        .fetch_one(&self.pool)
        .await
    }

    /// Upserts every pair or none of them.
    pub async fn set_settings(&self, settings: &[(String, String)]) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        for (key, value) in settings {
            sqlx::query(
                r#"
                INSERT INTO user_settings (setting_key, setting_value, updated_at)
                VALUES (?, ?, CURRENT_TIMESTAMP)
                ON CONFLICT (setting_key) DO UPDATE SET
                    setting_value = excluded.setting_value,
                    updated_at = CURRENT_TIMESTAMP
                "#,
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }

    // ── Reads ────────────────────────────────────────────────────────────

    pub async fn get_setting(&self, key: &str, default: &str) -> Result<String, sqlx::Error> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT setting_value FROM user_settings WHERE setting_key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value.unwrap_or_else(|| default.to_string()))
    }

    /// Moods from the last `days` days, newest first.
    pub async fn mood_history(&self, days: i64) -> Result<Vec<MoodEntry>, sqlx::Error> {
        sqlx::query_as::<_, MoodEntry>(
            r#"
            SELECT id, mood_type, mood_emoji,
                   CAST(COALESCE(intensity, 5) AS INTEGER) AS intensity,
                   notes, created_at
            FROM moods
            WHERE created_at >= ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(cutoff(days))
        .fetch_all(&self.pool)
        .await
    }

    /// At most `limit` entries, newest first. A negative limit yields none.
    pub async fn journal_entries(&self, limit: i64) -> Result<Vec<JournalEntry>, sqlx::Error> {
        sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT id, title, content, mood_at_time, tags, created_at
            FROM journal_entries
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
    }

    /// Turns of one conversation in the order they happened.
    pub async fn chat_history(
        &self,
        conversation_id: &str,
        limit: i64,
    ) -> Result<Vec<ChatTurn>, sqlx::Error> {
        sqlx::query_as::<_, ChatTurn>(
            r#"
            SELECT id, user_message, ai_response, conversation_id, is_crisis, created_at
            FROM chat_conversations
            WHERE conversation_id = ?
            ORDER BY id ASC
            LIMIT ?
            "#,
        )
        .bind(conversation_id)
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
    }

    /// Count per mood type over the last `days` days, most frequent first.
    pub async fn mood_counts_since(&self, days: i64) -> Result<Vec<MoodCount>, sqlx::Error> {
        sqlx::query_as::<_, MoodCount>(
            r#"
            SELECT mood_type AS mood, COUNT(*) AS count
            FROM moods
            WHERE created_at >= ?
            GROUP BY mood_type
            ORDER BY count DESC, mood_type ASC
            "#,
        )
        .bind(cutoff(days))
        .fetch_all(&self.pool)
        .await
    }

    /// `None` when no mood was logged in the window.
    pub async fn average_intensity_since(&self, days: i64) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(CAST(intensity AS INTEGER)) FROM moods WHERE created_at >= ?",
        )
        .bind(cutoff(days))
        .fetch_one(&self.pool)
        .await
    }

    pub async fn count_journal_entries(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM journal_entries")
            .fetch_one(&self.pool)
            .await
    }

    pub async fn count_breathing_sessions(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM breathing_sessions")
            .fetch_one(&self.pool)
            .await
    }
}

/// Lower bound for "within the last `days` days" in SQLite text form.
/// Out-of-range spans saturate instead of failing.
fn cutoff(days: i64) -> String {
    Duration::try_days(days)
        .and_then(|span| Utc::now().naive_utc().checked_sub_signed(span))
        .map(|t| t.format(SQLITE_TIMESTAMP).to_string())
        .unwrap_or_else(|| if days > 0 { EARLIEST } else { LATEST }.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::in_memory_pool;

    async fn store() -> WellbeingStore {
        WellbeingStore::new(in_memory_pool().await)
    }

    fn mood(kind: &str, emoji: &str, intensity: i64) -> NewMood {
        NewMood {
            mood_type: kind.into(),
            mood_emoji: emoji.into(),
            intensity,
            notes: String::new(),
        }
    }

    fn journal(content: &str) -> NewJournalEntry {
        NewJournalEntry {
            content: content.into(),
            title: String::new(),
            mood_at_time: String::new(),
            tags: String::new(),
        }
    }

    async fn backdate(store: &WellbeingStore, table: &str, id: i64, days: i64) {
        let sql = format!(
            "UPDATE {table} SET created_at = datetime('now', '-{days} days') WHERE id = ?"
        );
        sqlx::query(&sql).bind(id).execute(store.pool()).await.unwrap();
    }

    // ── cutoff ───────────────────────────────────────────────────────────

    #[test]
    fn test_cutoff_matches_sqlite_layout() {
        let c = cutoff(30);
        assert_eq!(c.len(), "2026-01-01 00:00:00".len());
        assert_eq!(&c[10..11], " ");
    }

    #[test]
    fn test_cutoff_saturates() {
        assert_eq!(cutoff(i64::MAX), EARLIEST);
        assert_eq!(cutoff(i64::MIN), LATEST);
    }

    // ── writes ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_ids_strictly_increase_per_table() {
        let store = store().await;

        let m1 = store.log_mood(&mood("happy", "😊", 8)).await.unwrap();
        let m2 = store.log_mood(&mood("sad", "😢", 3)).await.unwrap();
        assert!(m2 > m1);

        let j1 = store.save_journal_entry(&journal("one")).await.unwrap();
        let j2 = store.save_journal_entry(&journal("two")).await.unwrap();
        assert!(j2 > j1);

        let session = NewBreathingSession {
            duration_seconds: 60,
            cycles_completed: 4,
            session_type: "4-7-8".into(),
        };
        let b1 = store.log_breathing_session(&session).await.unwrap();
        let b2 = store.log_breathing_session(&session).await.unwrap();
        assert!(b2 > b1);

        let turn = NewChatTurn {
            user_message: "hi".into(),
            ai_response: "hello".into(),
            conversation_id: "c1".into(),
            is_crisis: false,
        };
        let c1 = store.log_chat_turn(&turn).await.unwrap();
        let c2 = store.log_chat_turn(&turn).await.unwrap();
        assert!(c2 > c1);
    }

    #[tokio::test]
    async fn test_intensity_is_not_clamped() {
        let store = store().await;
        store.log_mood(&mood("happy", "😊", 42)).await.unwrap();
        let history = store.mood_history(30).await.unwrap();
        assert_eq!(history[0].intensity, 42);
    }

    // ── mood history ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_mood_history_newest_first() {
        let store = store().await;
        store.log_mood(&mood("sad", "😢", 3)).await.unwrap();
        let mut happy = mood("happy", "😊", 8);
        happy.notes = "test".into();
        let happy_id = store.log_mood(&happy).await.unwrap();

        let history = store.mood_history(30).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, happy_id);
        assert_eq!(history[0].mood_type, "happy");
        assert_eq!(history[0].mood_emoji, "😊");
        assert_eq!(history[0].intensity, 8);
        assert_eq!(history[0].notes.as_deref(), Some("test"));
        assert_eq!(history[1].mood_type, "sad");
    }

    #[tokio::test]
    async fn test_mood_history_excludes_old_rows() {
        let store = store().await;
        let old = store.log_mood(&mood("tired", "😴", 4)).await.unwrap();
        store.log_mood(&mood("happy", "😊", 7)).await.unwrap();
        backdate(&store, "moods", old, 45).await;

        let recent = store.mood_history(30).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].mood_type, "happy");

        let all = store.mood_history(60).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_legacy_non_integer_intensity_still_reads() {
        let store = store().await;
        for raw in ["7.5", "'high'", "NULL"] {
            let sql = format!(
                "INSERT INTO moods (mood_type, mood_emoji, intensity) VALUES ('calm', '😌', {raw})"
            );
            sqlx::query(&sql).execute(store.pool()).await.unwrap();
        }

        let history = store.mood_history(30).await.unwrap();
        let mut intensities: Vec<i64> = history.iter().map(|m| m.intensity).collect();
        intensities.sort_unstable();
        assert_eq!(intensities, vec![0, 5, 7]);

        // NULL stays out of the average; 7.5 and 'high' count as 7 and 0.
        let avg = store.average_intensity_since(7).await.unwrap().unwrap();
        assert!((avg - 3.5).abs() < f64::EPSILON);
    }

    // ── journal ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_journal_entries_limit_and_order() {
        let store = store().await;
        for content in ["first", "second", "third"] {
            store.save_journal_entry(&journal(content)).await.unwrap();
        }

        let entries = store.journal_entries(2).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "third");
        assert_eq!(entries[1].content, "second");
    }

    #[tokio::test]
    async fn test_negative_limit_returns_nothing() {
        let store = store().await;
        for content in ["first", "second", "third"] {
            store.save_journal_entry(&journal(content)).await.unwrap();
        }
        assert!(store.journal_entries(-1).await.unwrap().is_empty());
        assert!(store.journal_entries(0).await.unwrap().is_empty());
    }

    // ── chat history ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_chat_history_filters_by_conversation() {
        let store = store().await;
        for (conv, msg) in [("a", "one"), ("b", "other"), ("a", "two")] {
            store
                .log_chat_turn(&NewChatTurn {
                    user_message: msg.into(),
                    ai_response: "ok".into(),
                    conversation_id: conv.into(),
                    is_crisis: msg == "two",
                })
                .await
                .unwrap();
        }

        let turns = store.chat_history("a", 50).await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].user_message, "one");
        assert_eq!(turns[1].user_message, "two");
        assert!(turns[1].is_crisis);
        assert!(!turns[0].is_crisis);
    }

    #[tokio::test]
    async fn test_chat_history_negative_limit() {
        let store = store().await;
        store
            .log_chat_turn(&NewChatTurn {
                user_message: "hi".into(),
                ai_response: "ok".into(),
                conversation_id: "a".into(),
                is_crisis: false,
            })
            .await
            .unwrap();
        assert!(store.chat_history("a", -5).await.unwrap().is_empty());
    }

    // ── aggregates ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_mood_counts_descending() {
        let store = store().await;
        for _ in 0..2 {
            store.log_mood(&mood("sad", "😢", 3)).await.unwrap();
        }
        for _ in 0..3 {
            store.log_mood(&mood("happy", "😊", 8)).await.unwrap();
        }

        let counts = store.mood_counts_since(30).await.unwrap();
        assert_eq!(
            counts,
            vec![
                MoodCount { mood: "happy".into(), count: 3 },
                MoodCount { mood: "sad".into(), count: 2 },
            ]
        );
    }

    #[tokio::test]
    async fn test_average_intensity_window() {
        let store = store().await;
        assert_eq!(store.average_intensity_since(7).await.unwrap(), None);

        store.log_mood(&mood("happy", "😊", 8)).await.unwrap();
        store.log_mood(&mood("ok", "🙂", 5)).await.unwrap();
        let old = store.log_mood(&mood("sad", "😢", 1)).await.unwrap();
        backdate(&store, "moods", old, 10).await;

        let avg = store.average_intensity_since(7).await.unwrap().unwrap();
        assert!((avg - 6.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_totals() {
        let store = store().await;
        store.save_journal_entry(&journal("a")).await.unwrap();
        store
            .log_breathing_session(&NewBreathingSession {
                duration_seconds: 120,
                cycles_completed: 6,
                session_type: "box".into(),
            })
            .await
            .unwrap();

        assert_eq!(store.count_journal_entries().await.unwrap(), 1);
        assert_eq!(store.count_breathing_sessions().await.unwrap(), 1);
    }

    // ── settings ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_settings_upsert_and_default() {
        let store = store().await;
        assert_eq!(store.get_setting("unset_key", "fallback").await.unwrap(), "fallback");

        store.set_settings(&[("theme".into(), "dark".into())]).await.unwrap();
        assert_eq!(store.get_setting("theme", "light").await.unwrap(), "dark");

        store.set_settings(&[("theme".into(), "solarized".into())]).await.unwrap();
        assert_eq!(store.get_setting("theme", "light").await.unwrap(), "solarized");

        let rows = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_settings WHERE setting_key = 'theme'",
        )
        .fetch_one(store.pool())
        .await
        .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_set_settings_is_all_or_nothing() {
        let store = store().await;
        sqlx::query(
            r#"
            CREATE TRIGGER reject_locked BEFORE INSERT ON user_settings
            WHEN NEW.setting_key = 'locked'
            BEGIN SELECT RAISE(ABORT, 'locked'); END
            "#,
        )
        .execute(store.pool())
        .await
        .unwrap();

        let batch = vec![
            ("theme".to_string(), "dark".to_string()),
            ("locked".to_string(), "x".to_string()),
        ];
        assert!(store.set_settings(&batch).await.is_err());
        assert_eq!(store.get_setting("theme", "light").await.unwrap(), "light");

        let batch = vec![
            ("theme".to_string(), "dark".to_string()),
            ("notifications".to_string(), "false".to_string()),
        ];
        store.set_settings(&batch).await.unwrap();
        assert_eq!(store.get_setting("theme", "light").await.unwrap(), "dark");
        assert_eq!(store.get_setting("notifications", "true").await.unwrap(), "false");
    }

    #[tokio::test]
    async fn test_ping() {
        let store = store().await;
        assert!(store.ping().await.is_ok());
        store.pool().close().await;
        assert!(store.ping().await.is_err());
    }
}
