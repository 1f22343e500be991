//! # Session Store
//!
//! In-memory map from user-session id to [`PaymentSession`].
//! Each update runs under the write lock so a session's mutations are
//! atomic relative to reads of the same session. The lock is never held
//! across a provider round trip.

use crate::session::PaymentSession;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Opaque identifier of a user session
pub type SessionId = String;

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, PaymentSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a session. Unknown sessions read as idle.
    pub async fn snapshot(&self, id: &str) -> PaymentSession {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    /// Apply `f` to the session (creating it if needed) and return the result.
    pub async fn update<F>(&self, id: &str, f: F) -> PaymentSession
    where
        F: FnOnce(&mut PaymentSession),
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(id.to_string()).or_default();
        f(session);
        session.clone()
    }

    /// Drop a session, e.g. when the user session ends.
    pub async fn remove(&self, id: &str) -> Option<PaymentSession> {
        self.sessions.write().await.remove(id)
    }

    /// Drop sessions not touched within `max_age`. Returns how many were removed.
    ///
    /// A negative `max_age`, or one reaching past the earliest representable
    /// time, removes nothing.
    pub async fn prune_stale(&self, max_age: Duration) -> usize {
        if max_age < Duration::zero() {
            return 0;
        }
        let Some(cutoff) = Utc::now().checked_sub_signed(max_age) else {
            return 0;
        };
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.updated_at >= cutoff);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
