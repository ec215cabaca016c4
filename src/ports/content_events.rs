//! Content Event Port - Notification that content reached the user.

use async_trait::async_trait;
use secrecy::SecretString;

use super::DownstreamError;
use crate::domain::foundation::{ContentId, SessionId};

/// Port for publishing "content seen" notifications.
#[async_trait]
pub trait ContentEventPublisher: Send + Sync {
    async fn content_seen(
        &self,
        session_id: &SessionId,
        token: &SecretString,
        content_id: &ContentId,
    ) -> Result<(), DownstreamError>;
}
