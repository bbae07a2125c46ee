// src/routes.rs

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{health, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Quiz flow: start page, start, question page, submit.
/// * Health probe and static assets.
/// * Applies global middleware (Trace).
/// * Injects global state (bank, session store, outcome log, config).
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    let quiz_routes = Router::new()
        .route("/", get(quiz::start_page))
        .route("/start", post(quiz::start_quiz))
        .route("/quiz", get(quiz::quiz_page))
        .route("/submit", post(quiz::submit_quiz));

    Router::new()
        .merge(quiz_routes)
        .route("/health", get(health::health_check))
        .nest_service("/static", static_files)
        // Global Middleware
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
