//! HTTP adapter publishing "content seen" notifications.

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Serialize;

use super::client::{with_token, RemoteClient};
use crate::domain::foundation::{ContentId, SessionId};
use crate::ports::{ContentEventPublisher, DownstreamError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentSeenBody<'a> {
    session_id: &'a SessionId,
    content_id: &'a ContentId,
}

/// Publishes content-seen events to the event endpoint.
pub struct RemoteContentEvents {
    client: RemoteClient,
}

impl RemoteContentEvents {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentEventPublisher for RemoteContentEvents {
    async fn content_seen(
        &self,
        session_id: &SessionId,
        token: &SecretString,
        content_id: &ContentId,
    ) -> Result<(), DownstreamError> {
        let url = self.client.endpoint(&["events", "contentSeen"]);
        let body = ContentSeenBody {
            session_id,
            content_id,
        };
        self.client
            .execute(with_token(self.client.post(url, &body), token))
            .await
    }
}
