//! Shared HTTP plumbing for the remote collaborators.
//!
//! Every collaborator is a JSON-over-HTTP service below its own base URL.
//! Calls are one-shot: no retries and no timeouts beyond the transport's.

use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::domain::foundation::ValidationError;
use crate::ports::DownstreamError;

/// JSON client bound to one service's base URL.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: Url,
}

impl RemoteClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// `InvalidFormat("base_url")` if the URL is not absolute.
    pub fn new(client: Client, base_url: &str) -> Result<Self, ValidationError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ValidationError::invalid_format("base_url", e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ValidationError::invalid_format(
                "base_url",
                "must be a hierarchical URL",
            ));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL extended by `segments`, each percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn get(&self, url: Url) -> RequestBuilder {
        self.client.get(url)
    }

    pub fn post<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> RequestBuilder {
        self.client.post(url).json(body)
    }

    /// Sends the request and decodes a JSON answer.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, DownstreamError> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| DownstreamError::malformed(format!("Malformed response: {}", e)))
    }

    /// Sends the request and ignores whatever body comes back.
    pub async fn execute(&self, request: RequestBuilder) -> Result<(), DownstreamError> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, DownstreamError> {
        let response = request
            .send()
            .await
            .map_err(|e| DownstreamError::transport(e.to_string()))?;
        handle_response_status(response).await
    }
}

/// Adds the client token as bearer credentials.
pub fn with_token(request: RequestBuilder, token: &SecretString) -> RequestBuilder {
    request.bearer_auth(token.expose_secret())
}

/// Passes 2xx responses through; anything else becomes a `DownstreamError`
/// carrying the status and the response body.
async fn handle_response_status(response: Response) -> Result<Response, DownstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), url = %url, "Remote call failed");

    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Remote call failed")
            .to_string()
    } else {
        body
    };
    Err(DownstreamError::new(status.as_u16(), message))
}
