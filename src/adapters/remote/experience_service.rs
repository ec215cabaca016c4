//! HTTP adapter for the experience service.

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Deserialize;

use super::client::{with_token, RemoteClient};
use crate::domain::foundation::{ProcessId, SessionId, UserId};
use crate::ports::{DownstreamError, ExperienceService};

#[derive(Debug, Deserialize)]
struct ExperienceResponse {
    #[serde(default)]
    experienced: bool,
}

/// Experience service reached over HTTP.
pub struct RemoteExperienceService {
    client: RemoteClient,
}

impl RemoteExperienceService {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExperienceService for RemoteExperienceService {
    async fn is_experienced(
        &self,
        session_id: &SessionId,
        process_id: &ProcessId,
        user_id: &UserId,
        token: &SecretString,
    ) -> Result<bool, DownstreamError> {
        let url = self
            .client
            .endpoint(&["users", user_id.as_str(), "experience", process_id.as_str()]);
        let request = with_token(self.client.get(url), token)
            .query(&[("sessionId", session_id.as_str())]);
        let response: ExperienceResponse = self.client.fetch(request).await?;
        Ok(response.experienced)
    }
}
