use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    models::question::QuestionBank,
    services::{outcome_log::OutcomeLog, session_store::SessionStoreRef},
};

#[derive(Clone)]
pub struct AppState {
    pub bank: Arc<QuestionBank>,
    pub sessions: SessionStoreRef,
    pub outcome_log: Arc<OutcomeLog>,
    pub config: Config,
}

impl FromRef<AppState> for Arc<QuestionBank> {
    fn from_ref(state: &AppState) -> Self {
        state.bank.clone()
    }
}

impl FromRef<AppState> for SessionStoreRef {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<OutcomeLog> {
    fn from_ref(state: &AppState) -> Self {
        state.outcome_log.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
