// src/models/session.rs

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use validator::Validate;

use crate::{config::ANONYMOUS_NAME, models::question::QuestionBank};

/// An in-progress quiz attempt.
///
/// Sessions are never modified after creation; the store only decides
/// whether one exists.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque token handed to the client.
    pub token: String,

    pub display_name: String,

    /// Monotonic start; wall-clock jumps do not affect elapsed time.
    pub started_at: Instant,

    /// Shared reference to the bank the attempt was started against.
    pub bank: Arc<QuestionBank>,
}

impl Session {
    pub fn new(token: String, display_name: String, bank: Arc<QuestionBank>) -> Self {
        Self {
            token,
            display_name,
            started_at: Instant::now(),
            bank,
        }
    }

    /// Whether the session is older than `ttl` at instant `now`.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) > ttl
    }
}

/// Form payload of `POST /start`.
#[derive(Debug, Deserialize, Validate)]
pub struct StartRequest {
    #[serde(default)]
    #[validate(length(
        max = 100,
        message = "Name must be at most 100 characters."
    ))]
    pub name: String,
}

impl StartRequest {
    /// Trimmed display name, or the anonymous placeholder when blank.
    pub fn display_name(&self) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            ANONYMOUS_NAME.to_string()
        } else {
            name.to_string()
        }
    }
}
