// src/services/session_store.rs

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::{self, Debug};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{question::QuestionBank, session::Session};

/// Error type for session store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStoreError {
    /// Never created, already submitted, expired, or lost on restart.
    NotFound(String),
    /// The store itself failed (poisoned lock, token collision).
    Storage(String),
}

impl fmt::Display for SessionStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStoreError::NotFound(token) => write!(f, "Session not found: {}", token),
            SessionStoreError::Storage(msg) => write!(f, "Session storage error: {}", msg),
        }
    }
}

impl std::error::Error for SessionStoreError {}

/// Lifecycle owner for quiz sessions.
///
/// Implementations must make `take_for_submission` a single atomic
/// check-and-remove: of any number of concurrent calls with one token,
/// at most one returns the session.
#[async_trait]
pub trait SessionStore: Send + Sync + Debug {
    /// Starts a session and returns its token.
    async fn create(
        &self,
        display_name: String,
        bank: Arc<QuestionBank>,
    ) -> Result<String, SessionStoreError>;

    /// Looks a session up without consuming it.
    async fn peek(&self, token: &str) -> Result<Session, SessionStoreError>;

    /// Removes and returns the session in one step.
    async fn take_for_submission(&self, token: &str) -> Result<Session, SessionStoreError>;

    /// Drops sessions past their age limit, returning how many were removed.
    async fn evict_expired(&self) -> Result<usize, SessionStoreError>;

    /// Number of sessions currently held.
    async fn len(&self) -> Result<usize, SessionStoreError>;
}

/// Type alias for Arc-wrapped SessionStore trait objects.
pub type SessionStoreRef = Arc<dyn SessionStore>;

/// Process-local store guarded by a single mutex.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Option<Duration>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose sessions expire `ttl` after creation.
    pub fn with_ttl(ttl: Option<Duration>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Session>>, SessionStoreError> {
        self.sessions
            .lock()
            .map_err(|e| SessionStoreError::Storage(format!("Failed to acquire lock: {}", e)))
    }

    fn is_expired(&self, session: &Session) -> bool {
        self.ttl
            .is_some_and(|ttl| session.is_expired(ttl, Instant::now()))
    }

    fn evict_locked(&self, sessions: &mut HashMap<String, Session>) -> usize {
        let Some(ttl) = self.ttl else {
            return 0;
        };

        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(ttl, now));
        let evicted = before - sessions.len();

        if evicted > 0 {
            tracing::warn!("Evicted {} abandoned sessions", evicted);
        }
        evicted
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(
        &self,
        display_name: String,
        bank: Arc<QuestionBank>,
    ) -> Result<String, SessionStoreError> {
        let token = Uuid::new_v4().to_string();
        let session = Session::new(token.clone(), display_name, bank);

        let mut sessions = self.lock()?;
        self.evict_locked(&mut sessions);

        match sessions.entry(token.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(session);
            }
            Entry::Occupied(_) => {
                return Err(SessionStoreError::Storage(format!(
                    "Session token collision: {}",
                    token
                )));
            }
        }

        tracing::debug!("Created session {}", token);
        Ok(token)
    }

    async fn peek(&self, token: &str) -> Result<Session, SessionStoreError> {
        let mut sessions = self.lock()?;
        self.evict_locked(&mut sessions);

        sessions
            .get(token)
            .cloned()
            .ok_or_else(|| SessionStoreError::NotFound(token.to_string()))
    }

    async fn take_for_submission(&self, token: &str) -> Result<Session, SessionStoreError> {
        let session = self
            .lock()?
            .remove(token)
            .ok_or_else(|| SessionStoreError::NotFound(token.to_string()))?;

        // Removed either way: an expired session is abandoned, not scored.
        if self.is_expired(&session) {
            tracing::debug!("Session {} expired before submission", token);
            return Err(SessionStoreError::NotFound(token.to_string()));
        }

        Ok(session)
    }

    async fn evict_expired(&self) -> Result<usize, SessionStoreError> {
        let mut sessions = self.lock()?;
        Ok(self.evict_locked(&mut sessions))
    }

    async fn len(&self) -> Result<usize, SessionStoreError> {
        Ok(self.lock()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Question;
    use tokio::sync::Barrier;

    fn bank() -> Arc<QuestionBank> {
        Arc::new(QuestionBank::new(vec![Question {
            correct: 2,
            text: "Q1".to_string(),
            options: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        }]))
    }

    #[tokio::test]
    async fn create_then_take_succeeds_exactly_once() {
        let store = InMemorySessionStore::new();
        let token = store.create("Alice".to_string(), bank()).await.unwrap();

        let session = store.take_for_submission(&token).await.unwrap();
        assert_eq!(session.token, token);
        assert_eq!(session.display_name, "Alice");

        let second = store.take_for_submission(&token).await;
        assert_eq!(second.unwrap_err(), SessionStoreError::NotFound(token));
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let store = InMemorySessionStore::new();

        assert!(matches!(
            store.take_for_submission("unknown-token").await,
            Err(SessionStoreError::NotFound(_))
        ));
        assert!(matches!(
            store.peek("unknown-token").await,
            Err(SessionStoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn peek_does_not_consume() {
        let store = InMemorySessionStore::new();
        let shared = bank();
        let token = store.create("Bob".to_string(), shared.clone()).await.unwrap();

        for _ in 0..3 {
            let session = store.peek(&token).await.unwrap();
            assert!(Arc::ptr_eq(&session.bank, &shared));
        }

        assert_eq!(store.len().await.unwrap(), 1);
        assert!(store.take_for_submission(&token).await.is_ok());
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn tokens_are_unique() {
        let store = InMemorySessionStore::new();
        let shared = bank();

        let mut tokens = std::collections::HashSet::new();
        for _ in 0..200 {
            let token = store.create("same name".to_string(), shared.clone()).await.unwrap();
            assert!(tokens.insert(token));
        }
        assert_eq!(store.len().await.unwrap(), 200);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_takes_yield_one_winner() {
        const CALLERS: usize = 32;

        let store = Arc::new(InMemorySessionStore::new());
        let token = store.create("Racer".to_string(), bank()).await.unwrap();
        let barrier = Arc::new(Barrier::new(CALLERS));

        let handles: Vec<_> = (0..CALLERS)
            .map(|_| {
                let store = store.clone();
                let token = token.clone();
                let barrier = barrier.clone();
                tokio::spawn(async move {
                    barrier.wait().await;
                    store.take_for_submission(&token).await
                })
            })
            .collect();

        let mut winners = 0;
        let mut not_found = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(SessionStoreError::NotFound(_)) => not_found += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(not_found, CALLERS - 1);
    }

    #[tokio::test]
    async fn expired_sessions_are_evicted() {
        let store = InMemorySessionStore::with_ttl(Some(Duration::from_millis(20)));
        let stale = store.create("Old".to_string(), bank()).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(matches!(
            store.peek(&stale).await,
            Err(SessionStoreError::NotFound(_))
        ));
        assert_eq!(store.len().await.unwrap(), 0);

        let fresh = store.create("New".to_string(), bank()).await.unwrap();
        assert_eq!(store.evict_expired().await.unwrap(), 0);
        assert!(store.take_for_submission(&fresh).await.is_ok());
    }

    #[tokio::test]
    async fn expired_session_cannot_be_submitted() {
        let store = InMemorySessionStore::with_ttl(Some(Duration::from_millis(20)));
        let token = store.create("Late".to_string(), bank()).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(matches!(
            store.take_for_submission(&token).await,
            Err(SessionStoreError::NotFound(_))
        ));
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn without_ttl_nothing_expires() {
        let store = InMemorySessionStore::new();
        store.create("Forever".to_string(), bank()).await.unwrap();

        assert_eq!(store.evict_expired().await.unwrap(), 0);
        assert_eq!(store.len().await.unwrap(), 1);
    }
}
