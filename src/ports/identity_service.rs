//! Identity Service Port - Resolution of client tokens to user sessions.

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::DownstreamError;
use crate::domain::foundation::{SessionId, UserId};

/// The platform session a client token belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySession {
    #[serde(alias = "id")]
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// Port for the identity service.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Resolves `(session_id, token)` to the platform session.
    ///
    /// # Errors
    ///
    /// `DownstreamError` if the token is rejected or the service is down.
    async fn get_session(
        &self,
        session_id: &SessionId,
        token: &SecretString,
    ) -> Result<IdentitySession, DownstreamError>;
}
