use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod services;

use config::Config;
use db::WellbeingStore;
use services::companion::Companion;
use services::completion::{ClaudeClient, CompletionClient};

#[derive(Clone)]
pub struct AppState {
    pub store: WellbeingStore,
    pub companion: Companion,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: WellbeingStore, completion: Arc<dyn CompletionClient>, config: Arc<Config>) -> Self {
        Self {
            companion: Companion::new(completion, store.clone()),
            store,
            config,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindmate_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env()?);

    // Database
    let pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to open database")?;
    db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(database_url = %config.database_url, "Database ready");

    let claude = ClaudeClient::from_config(&config).context("Failed to build completion client")?;
    if claude.is_configured() {
        tracing::info!(model = %config.claude_model, timeout_secs = config.completion_timeout_secs, "Completion service configured");
    } else {
        tracing::warn!("CLAUDE_API_KEY not set, chat will use fallback replies");
    }

    let state = AppState::new(WellbeingStore::new(pool), Arc::new(claude), config.clone());
    let app = build_router(state).layer(cors_layer(&config));

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/health", get(handlers::health::health_check))
        // Chat
        .route("/api/chat", post(handlers::chat::send_message))
        .route(
            "/api/chat/:conversation_id",
            get(handlers::chat::conversation_history),
        )
        // Moods
        .route("/api/mood", post(handlers::moods::log_mood))
        .route("/api/mood/history", get(handlers::moods::mood_history))
        // Journal
        .route("/api/journal", post(handlers::journal::save_entry))
        .route("/api/journal/entries", get(handlers::journal::list_entries))
        // Breathing
        .route("/api/breathing", post(handlers::breathing::log_session))
        // Dashboard
        .route("/api/dashboard/stats", get(handlers::dashboard::get_stats))
        // Resources & settings
        .route(
            "/api/emergency-resources",
            get(handlers::resources::emergency_resources),
        )
        .route(
            "/api/settings",
            get(handlers::settings::get_settings).post(handlers::settings::update_settings),
        )
        .route("/api/settings/:key", get(handlers::settings::get_setting));

    Router::new()
        .route("/readyz", get(handlers::health::readyz))
        .merge(api_routes)
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = std::iter::once(&config.frontend_url)
        .chain(config.cors_extra_origins.iter())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
