//! HTTP adapter for the presentation service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::client::RemoteClient;
use crate::domain::foundation::SessionId;
use crate::domain::presentation::{AssistanceStep, Popup, UserActivity};
use crate::ports::{DownstreamError, PresentationChannel};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DisplayBody<'a, T: Serialize> {
    service_id: &'a str,
    #[serde(flatten)]
    display: T,
}

#[derive(Serialize)]
struct StepDisplay<'a> {
    step: &'a AssistanceStep,
}

#[derive(Serialize)]
struct PopupDisplay<'a> {
    popup: &'a Popup,
}

#[derive(Serialize)]
struct NoDisplay {}

#[derive(Deserialize)]
struct ActivityResponse {
    activity: UserActivity,
}

/// Presentation service reached over HTTP.
///
/// Displays are posted on behalf of `service_id` so the client can tell
/// which service owns them.
pub struct RemotePresentationChannel {
    client: RemoteClient,
    service_id: String,
}

impl RemotePresentationChannel {
    pub fn new(client: RemoteClient, service_id: impl Into<String>) -> Self {
        Self {
            client,
            service_id: service_id.into(),
        }
    }

    async fn post<T: Serialize + Send>(
        &self,
        session_id: &SessionId,
        action: &str,
        display: T,
    ) -> Result<(), DownstreamError> {
        let url = self
            .client
            .endpoint(&["sessions", session_id.as_str(), action]);
        let body = DisplayBody {
            service_id: &self.service_id,
            display,
        };
        self.client.execute(self.client.post(url, &body)).await
    }
}

#[async_trait]
impl PresentationChannel for RemotePresentationChannel {
    async fn display_assistance(
        &self,
        session_id: &SessionId,
        step: &AssistanceStep,
    ) -> Result<(), DownstreamError> {
        self.post(session_id, "assistance", StepDisplay { step })
            .await
    }

    async fn display_popup(
        &self,
        session_id: &SessionId,
        popup: &Popup,
    ) -> Result<(), DownstreamError> {
        self.post(session_id, "popup", PopupDisplay { popup }).await
    }

    async fn end_display(&self, session_id: &SessionId) -> Result<(), DownstreamError> {
        self.post(session_id, "endDisplay", NoDisplay {}).await
    }

    async fn user_activity(&self, session_id: &SessionId) -> Result<UserActivity, DownstreamError> {
        let url = self
            .client
            .endpoint(&["sessions", session_id.as_str(), "activity"]);
        let response: ActivityResponse = self.client.fetch(self.client.get(url)).await?;
        Ok(response.activity)
    }
}
