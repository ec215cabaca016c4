//! HTTP adapter for the content service.

use async_trait::async_trait;
use serde::Deserialize;

use super::client::RemoteClient;
use crate::domain::foundation::{ContentId, ElementId, ProcessId, UserId};
use crate::ports::{ContentLookup, ContentService, DownstreamError};

/// Wire form of a lookup answer; blank ids count as "nothing on file".
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    #[serde(default)]
    content_id: Option<String>,
}

impl From<LookupResponse> for ContentLookup {
    fn from(response: LookupResponse) -> Self {
        ContentLookup {
            content_id: response.content_id.and_then(|id| ContentId::new(id).ok()),
        }
    }
}

/// Content service reached over HTTP.
pub struct RemoteContentService {
    client: RemoteClient,
}

impl RemoteContentService {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    async fn lookup(
        &self,
        kind: &str,
        user_id: &UserId,
        root_process_id: &ProcessId,
        process_id: &ProcessId,
        target: (&str, &str),
    ) -> Result<ContentLookup, DownstreamError> {
        let url = self.client.endpoint(&["content", kind]);
        let request = self.client.get(url).query(&[
            ("userId", user_id.as_str()),
            ("rootProcessId", root_process_id.as_str()),
            ("processId", process_id.as_str()),
            target,
        ]);
        let response: LookupResponse = self.client.fetch(request).await?;
        Ok(response.into())
    }
}

#[async_trait]
impl ContentService for RemoteContentService {
    async fn content_for_task(
        &self,
        user_id: &UserId,
        root_process_id: &ProcessId,
        process_id: &ProcessId,
        element_id: &ElementId,
    ) -> Result<ContentLookup, DownstreamError> {
        self.lookup(
            "task",
            user_id,
            root_process_id,
            process_id,
            ("elementId", element_id.as_str()),
        )
        .await
    }

    async fn content_for_call_activity(
        &self,
        user_id: &UserId,
        root_process_id: &ProcessId,
        process_id: &ProcessId,
        called_process_id: &ProcessId,
    ) -> Result<ContentLookup, DownstreamError> {
        self.lookup(
            "callActivity",
            user_id,
            root_process_id,
            process_id,
            ("activityProcessId", called_process_id.as_str()),
        )
        .await
    }

    async fn additional_content(
        &self,
        user_id: &UserId,
        root_process_id: &ProcessId,
        process_id: &ProcessId,
        element_id: &ElementId,
    ) -> Result<ContentLookup, DownstreamError> {
        self.lookup(
            "additional",
            user_id,
            root_process_id,
            process_id,
            ("elementId", element_id.as_str()),
        )
        .await
    }
}
