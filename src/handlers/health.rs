// src/handlers/health.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{
    error::AppError, models::question::QuestionBank, services::session_store::SessionStoreRef,
};

/// Liveness probe with bank size and number of open sessions.
pub async fn health_check(
    State(bank): State<Arc<QuestionBank>>,
    State(sessions): State<SessionStoreRef>,
) -> Result<impl IntoResponse, AppError> {
    let active_sessions = sessions.len().await?;

    Ok(Json(json!({
        "status": "ok",
        "questions": bank.len(),
        "active_sessions": active_sessions,
    })))
}
