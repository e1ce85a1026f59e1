//! services/api/src/adapters/session.rs
//!
//! In-memory implementation of the `SessionStore` port. Session state lives
//! for the process lifetime, keyed by the opaque token carried in the
//! client's cookie. Swapping in a cache- or database-backed store only means
//! implementing the same port.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use clinic_core::ports::{SessionData, SessionStore};

/// A process-local session map.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionData>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, token: &str) -> Option<SessionData> {
        self.sessions.read().await.get(token).cloned()
    }

    async fn set(&self, token: &str, data: SessionData) {
        self.sessions.write().await.insert(token.to_string(), data);
    }

    async fn clear(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}
