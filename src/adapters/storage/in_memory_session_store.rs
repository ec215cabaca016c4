//! In-Memory Session Store Adapter
//!
//! Keeps active sessions in a map for the lifetime of the process.
//! Sessions are volatile; a restart forgets every running assistance.

use async_trait::async_trait;
use secrecy::SecretString;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::Session;
use crate::ports::{SessionHandle, SessionStore};

/// In-memory registry of sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every session (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, id: SessionId, user_id: UserId, token: SecretString) -> SessionHandle {
        let handle = Arc::new(Mutex::new(Session::new(id.clone(), user_id, token)));
        let mut sessions = self.sessions.write().await;
        if sessions.insert(id.clone(), handle.clone()).is_some() {
            warn!(session_id = %id, "Found existing local session; it has been overwritten");
        } else {
            debug!(session_id = %id, "Session created");
        }
        handle
    }

    async fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        self.sessions.read().await.get(id).cloned()
    }

    async fn remove(&self, id: &SessionId) -> Option<SessionHandle> {
        let removed = self.sessions.write().await.remove(id);
        if removed.is_some() {
            debug!(session_id = %id, "Session removed");
        }
        removed
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
