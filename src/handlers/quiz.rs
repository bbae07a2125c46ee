// src/handlers/quiz.rs

use std::{collections::HashMap, sync::Arc, time::Instant};

use axum::{
    Form,
    extract::State,
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Redirect},
};
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::{
        question::{PublicQuestion, QuestionBank},
        result::OutcomeEntry,
        session::StartRequest,
    },
    services::{
        outcome_log::OutcomeLog,
        scoring::{format_elapsed, parse_submission, score},
        session_store::SessionStoreRef,
    },
    utils::{cookie, html},
};

/// Renders the start page with the name form.
pub async fn start_page() -> Html<String> {
    Html(html::start_page())
}

/// Starts a new attempt.
///
/// * Validates the submitted name (blank becomes the anonymous placeholder).
/// * Creates a session bound to the shared question bank.
/// * Sets the session cookie and redirects to `/quiz`.
pub async fn start_quiz(
    State(sessions): State<SessionStoreRef>,
    State(bank): State<Arc<QuestionBank>>,
    State(config): State<Config>,
    Form(payload): Form<StartRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let display_name = payload.display_name();
    let token = sessions.create(display_name.clone(), bank).await?;

    tracing::info!("Quiz started by {}", display_name);

    Ok((
        [(
            header::SET_COOKIE,
            cookie::session_cookie(&token, config.cookie_max_age()),
        )],
        Redirect::to("/quiz"),
    ))
}

/// Renders the questions of the caller's in-progress attempt.
///
/// Does not consume the session; reloading the page is harmless.
pub async fn quiz_page(
    State(sessions): State<SessionStoreRef>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let token = cookie::session_token(&headers).ok_or(AppError::SessionExpired)?;
    let session = sessions.peek(&token).await?;

    let questions = PublicQuestion::list(&session.bank);
    Ok(Html(html::quiz_page(&session.display_name, &questions)))
}

/// Submits the caller's answers.
///
/// * Atomically takes the session, so a token can only ever be scored once.
/// * Scores the answers and records the outcome (failures only logged).
/// * Clears the cookie and renders the result.
pub async fn submit_quiz(
    State(sessions): State<SessionStoreRef>,
    State(outcome_log): State<Arc<OutcomeLog>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let token = cookie::session_token(&headers).ok_or(AppError::SessionExpired)?;
    let session = sessions.take_for_submission(&token).await?;

    let answers = parse_submission(&form, session.bank.len());
    let result = score(&session.bank, &answers, session.started_at, Instant::now());

    tracing::info!(
        "Quiz submitted by {}: {} of {} in {}",
        session.display_name,
        result.correct_count,
        result.total,
        format_elapsed(result.elapsed)
    );

    outcome_log
        .record(&OutcomeEntry::new(&session.display_name, &result))
        .await;

    Ok((
        [(header::SET_COOKIE, cookie::clear_session_cookie())],
        Html(html::result_page(&session.display_name, &result)),
    ))
}
