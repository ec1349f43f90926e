use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,

    pub claude_api_key: String,
    pub claude_model: String,
    pub claude_api_url: String,
    pub completion_timeout_secs: u64,
    pub completion_max_tokens: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: var_or("DATABASE_URL", "sqlite://wellbeing.db"),
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
            host: var_or("HOST", "0.0.0.0"),
            port: parse_or("PORT", 5000)?,
            frontend_url: var_or("FRONTEND_URL", "http://localhost:3000"),
            cors_extra_origins: env::var("CORS_EXTRA_ORIGINS")
                .map(|v| split_origins(&v))
                .unwrap_or_default(),

            claude_api_key: env::var("CLAUDE_API_KEY").unwrap_or_default(),
            claude_model: var_or("CLAUDE_MODEL", "claude-sonnet-4-20250514"),
            claude_api_url: var_or("CLAUDE_API_URL", "https://api.anthropic.com/v1/messages"),
            completion_timeout_secs: parse_or("COMPLETION_TIMEOUT_SECS", 10)?,
            completion_max_tokens: parse_or("COMPLETION_MAX_TOKENS", 500)?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion_timeout_secs)
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        _ => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
impl Config {
    /// Config for tests: in-memory database, no remote completion key.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            database_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            cors_extra_origins: Vec::new(),
            claude_api_key: String::new(),
            claude_model: "claude-test".into(),
            claude_api_url: "http://127.0.0.1:9/v1/messages".into(),
            completion_timeout_secs: 1,
            completion_max_tokens: 500,
        }
    }
}
