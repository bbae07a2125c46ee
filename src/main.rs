// src/main.rs

use std::sync::Arc;

use dotenvy::dotenv;
use quiz_backend::config::Config;
use quiz_backend::routes;
use quiz_backend::services::{
    loader::load_question_bank,
    outcome_log::OutcomeLog,
    session_store::{InMemorySessionStore, SessionStoreRef},
};
use quiz_backend::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "server.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // No bank, no service.
    let bank = match load_question_bank(&config.questions_path) {
        Ok(bank) => Arc::new(bank),
        Err(e) => {
            tracing::error!("Failed to load questions: {}", e);
            std::process::exit(1);
        }
    };

    let sessions: SessionStoreRef = Arc::new(InMemorySessionStore::with_ttl(config.session_ttl));
    if config.session_ttl.is_some() {
        spawn_session_sweeper(sessions.clone(), config.sweep_interval);
    }

    let outcome_log = Arc::new(OutcomeLog::new(&config.outcome_log_path));
    tracing::info!("Recording outcomes to {}", outcome_log.path().display());

    // Create AppState
    let state = AppState {
        bank,
        sessions,
        outcome_log,
        config: config.clone(),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listening address");
    tracing::info!("Listening on {}", config.bind_addr);

    // Start the server
    axum::serve(listener, app).await.expect("Server error");
}

/// Periodically drops abandoned sessions.
fn spawn_session_sweeper(sessions: SessionStoreRef, period: std::time::Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if let Err(e) = sessions.evict_expired().await {
                tracing::error!("Session sweep failed: {}", e);
            }
        }
    });
}
