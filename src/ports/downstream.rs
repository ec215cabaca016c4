//! Failure type shared by every remote collaborator.

/// Status used when no HTTP response was received at all.
pub const TRANSPORT_FAILURE_STATUS: u16 = 503;

/// A remote call failed.
///
/// `status` is the HTTP status the collaborator answered with (or
/// [`TRANSPORT_FAILURE_STATUS`] when the request never completed) and
/// `message` its response body or the transport error text. Both are passed
/// to HTTP callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DownstreamError {
    pub status: u16,
    pub message: String,
}

impl DownstreamError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// The request never produced a response.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(TRANSPORT_FAILURE_STATUS, message)
    }

    /// The response body could not be decoded.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(502, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}
