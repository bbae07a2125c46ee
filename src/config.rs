// src/config.rs

use std::env;
use std::time::Duration;
use dotenvy::dotenv;

/// Placeholder display name used when the start form is submitted empty.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone)]
pub struct Config {
    pub questions_path: String,
    pub outcome_log_path: String,
    pub static_dir: String,
    pub bind_addr: String,
    /// Maximum session age. `None` keeps abandoned sessions forever.
    pub session_ttl: Option<Duration>,
    pub sweep_interval: Duration,
    pub log_dir: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let questions_path = env::var("QUESTIONS_PATH")
            .unwrap_or_else(|_| "questions.csv".to_string());

        let outcome_log_path = env::var("OUTCOME_LOG_PATH")
            .unwrap_or_else(|_| "quiz.log".to_string());

        let static_dir = env::var("STATIC_DIR")
            .unwrap_or_else(|_| "static".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let session_ttl = match env_secs("SESSION_TTL_SECS", 3600) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        let sweep_interval = Duration::from_secs(env_secs("SWEEP_INTERVAL_SECS", 60).max(1));

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            questions_path,
            outcome_log_path,
            static_dir,
            bind_addr,
            session_ttl,
            sweep_interval,
            log_dir,
            rust_log,
        }
    }

    /// Cookie `Max-Age` matching the session TTL (one hour when expiry is off).
    pub fn cookie_max_age(&self) -> u64 {
        self.session_ttl.map(|ttl| ttl.as_secs()).unwrap_or(3600)
    }
}

fn env_secs(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
