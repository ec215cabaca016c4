//! Session Store Port - Registry of active sessions.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::Mutex;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::Session;

/// Shared handle to one session.
///
/// Hold the lock only while reading or writing fields, never across a call
/// to a remote collaborator.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Port for the session registry.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Registers a fresh session under `id`.
    ///
    /// An existing session with the same id is replaced.
    async fn create(&self, id: SessionId, user_id: UserId, token: SecretString) -> SessionHandle;

    async fn get(&self, id: &SessionId) -> Option<SessionHandle>;

    /// Drops the session; returns it if it was registered.
    async fn remove(&self, id: &SessionId) -> Option<SessionHandle>;

    /// Number of registered sessions.
    async fn len(&self) -> usize;
}
