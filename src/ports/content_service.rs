//! Content Service Port - Lookup of presentational material for process steps.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::DownstreamError;
use crate::domain::foundation::{ContentId, ElementId, ProcessId, UserId};

/// Answer of a content lookup. `None` means the service has nothing on file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentLookup {
    #[serde(default)]
    pub content_id: Option<ContentId>,
}

impl ContentLookup {
    pub fn found(content_id: ContentId) -> Self {
        Self {
            content_id: Some(content_id),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

/// Port for the content service.
///
/// All lookups are one-shot: no retries, no timeouts.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Content for a plain task.
    async fn content_for_task(
        &self,
        user_id: &UserId,
        root_process_id: &ProcessId,
        process_id: &ProcessId,
        element_id: &ElementId,
    ) -> Result<ContentLookup, DownstreamError>;

    /// Summary content for a call activity invoking `called_process_id`.
    async fn content_for_call_activity(
        &self,
        user_id: &UserId,
        root_process_id: &ProcessId,
        process_id: &ProcessId,
        called_process_id: &ProcessId,
    ) -> Result<ContentLookup, DownstreamError>;

    /// Further reading offered next to a step.
    async fn additional_content(
        &self,
        user_id: &UserId,
        root_process_id: &ProcessId,
        process_id: &ProcessId,
        element_id: &ElementId,
    ) -> Result<ContentLookup, DownstreamError>;
}
