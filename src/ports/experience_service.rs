//! Experience Service Port - Competency lookup for sub-processes.

use async_trait::async_trait;
use secrecy::SecretString;

use super::DownstreamError;
use crate::domain::foundation::{ProcessId, SessionId, UserId};

/// Port for the experience (competency) service.
#[async_trait]
pub trait ExperienceService: Send + Sync {
    /// Returns true if the user may skip the guided steps of `process_id`.
    async fn is_experienced(
        &self,
        session_id: &SessionId,
        process_id: &ProcessId,
        user_id: &UserId,
        token: &SecretString,
    ) -> Result<bool, DownstreamError>;
}
