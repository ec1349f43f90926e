use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
}

/// Applies the embedded migrations. Already-applied migrations are skipped,
/// so this is safe to call on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Single-connection in-memory pool. The connection is never reaped, so the
/// database lives as long as the pool.
#[cfg(test)]
pub async fn in_memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    run_migrations(&pool).await.expect("migrations");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_url(dir: &tempfile::TempDir) -> String {
        format!("sqlite://{}", dir.path().join("wellbeing.db").display())
    }

    async fn table_names(pool: &SqlitePool) -> Vec<String> {
        sqlx::query_scalar::<_, String>(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\' AND name != 'sqlite_sequence' ORDER BY name",
        )
        .fetch_all(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_creates_file_and_tables() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&file_url(&dir), 2).await.unwrap();
        run_migrations(&pool).await.unwrap();

        assert!(dir.path().join("wellbeing.db").exists());
        assert_eq!(
            table_names(&pool).await,
            vec![
                "breathing_sessions",
                "chat_conversations",
                "journal_entries",
                "moods",
                "user_settings",
            ]
        );
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent_and_keep_data() {
        let dir = tempfile::tempdir().unwrap();
        let url = file_url(&dir);

        let pool = create_pool(&url, 1).await.unwrap();
        run_migrations(&pool).await.unwrap();
        sqlx::query("INSERT INTO moods (mood_type, mood_emoji) VALUES ('happy', '😊')")
            .execute(&pool)
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        pool.close().await;

        let reopened = create_pool(&url, 1).await.unwrap();
        run_migrations(&reopened).await.unwrap();
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM moods")
            .fetch_one(&reopened)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_legacy_chat_table_gains_crisis_flag() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&file_url(&dir), 1).await.unwrap();
        sqlx::query(
            r#"
            CREATE TABLE chat_conversations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_message TEXT NOT NULL,
                ai_response TEXT NOT NULL,
                conversation_id TEXT,
                timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO chat_conversations (user_message, ai_response, conversation_id) VALUES ('hi', 'hello', 'old')")
            .execute(&pool)
            .await
            .unwrap();

        run_migrations(&pool).await.unwrap();

        let flag = sqlx::query_scalar::<_, bool>(
            "SELECT is_crisis FROM chat_conversations WHERE conversation_id = 'old'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(!flag);
    }
}
