//! HTTP adapter for the identity service.

use async_trait::async_trait;
use secrecy::SecretString;

use super::client::{with_token, RemoteClient};
use crate::domain::foundation::SessionId;
use crate::ports::{DownstreamError, IdentityService, IdentitySession};

/// Identity service reached over HTTP.
pub struct RemoteIdentityService {
    client: RemoteClient,
}

impl RemoteIdentityService {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityService for RemoteIdentityService {
    async fn get_session(
        &self,
        session_id: &SessionId,
        token: &SecretString,
    ) -> Result<IdentitySession, DownstreamError> {
        let url = self.client.endpoint(&["sessions", session_id.as_str()]);
        self.client
            .fetch(with_token(self.client.get(url), token))
            .await
    }
}
