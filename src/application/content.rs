//! Content resolution pipeline.
//!
//! Turns a step (or a call activity) into a content id, falling back to
//! what was seen before when the content service has no answer:
//!
//! - task content: live answer, else the session's cache for the step
//! - call-activity content: live answer only; `"404"` counts as no content
//! - additional content: live answer, else a cache shared by all sessions

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::foundation::{ContentId, ElementId, ProcessId, UserId};
use crate::ports::{ContentService, DownstreamError, SessionHandle};

/// Content id the content service uses to say "nothing for this activity".
pub const NOT_FOUND_SENTINEL: &str = "404";

/// Resolves content ids for steps, call activities and additional content.
pub struct ContentResolver {
    content_service: Arc<dyn ContentService>,

    /// `processId|elementId|userId` to the last additional content seen.
    additional: RwLock<HashMap<String, ContentId>>,
}

impl ContentResolver {
    pub fn new(content_service: Arc<dyn ContentService>) -> Self {
        Self {
            content_service,
            additional: RwLock::new(HashMap::new()),
        }
    }

    /// Resolves content for a plain task.
    ///
    /// A live answer replaces the session's cached id for the step; without
    /// one the cached id is used. `Ok(None)` means nothing is known at all.
    pub async fn task_content(
        &self,
        session: &SessionHandle,
        user_id: &UserId,
        root_process_id: &ProcessId,
        process_id: &ProcessId,
        element_id: &ElementId,
    ) -> Result<Option<ContentId>, DownstreamError> {
        let lookup = self
            .content_service
            .content_for_task(user_id, root_process_id, process_id, element_id)
            .await?;

        let mut session = session.lock().await;
        if let Some(content_id) = lookup.content_id {
            debug!(
                process_id = %process_id,
                element_id = %element_id,
                content_id = %content_id,
                "Displaying live content for step"
            );
            session.cache_step_content(process_id, element_id, content_id.clone());
            return Ok(Some(content_id));
        }

        match session.cached_step_content(process_id, element_id) {
            Some(cached) => {
                debug!(
                    process_id = %process_id,
                    element_id = %element_id,
                    content_id = %cached,
                    "Displaying cached content for step"
                );
                Ok(Some(cached.clone()))
            }
            None => {
                warn!(
                    process_id = %process_id,
                    element_id = %element_id,
                    "No content found for step"
                );
                Ok(None)
            }
        }
    }

    /// Resolves summary content for a call activity. Never cached.
    pub async fn call_activity_content(
        &self,
        user_id: &UserId,
        root_process_id: &ProcessId,
        process_id: &ProcessId,
        called_process_id: &ProcessId,
    ) -> Result<Option<ContentId>, DownstreamError> {
        let lookup = self
            .content_service
            .content_for_call_activity(user_id, root_process_id, process_id, called_process_id)
            .await?;

        Ok(lookup
            .content_id
            .filter(|id| id.as_str() != NOT_FOUND_SENTINEL))
    }

    /// Resolves additional content for a step.
    ///
    /// Live answers are remembered across sessions and never invalidated.
    pub async fn additional_content(
        &self,
        user_id: &UserId,
        root_process_id: &ProcessId,
        process_id: &ProcessId,
        element_id: &ElementId,
    ) -> Result<Option<ContentId>, DownstreamError> {
        let lookup = self
            .content_service
            .additional_content(user_id, root_process_id, process_id, element_id)
            .await?;
        let key = additional_key(process_id, element_id, user_id);

        if let Some(content_id) = lookup.content_id {
            self.additional
                .write()
                .await
                .insert(key, content_id.clone());
            return Ok(Some(content_id));
        }

        let cached = self.additional.read().await.get(&key).cloned();
        if let Some(content_id) = &cached {
            debug!(
                process_id = %process_id,
                element_id = %element_id,
                content_id = %content_id,
                "Using cached additional content"
            );
        }
        Ok(cached)
    }
}

fn additional_key(process_id: &ProcessId, element_id: &ElementId, user_id: &UserId) -> String {
    format!("{}|{}|{}", process_id, element_id, user_id)
}
