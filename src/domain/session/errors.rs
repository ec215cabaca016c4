//! Failures of navigation commands, as reported to HTTP callers.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::ports::DownstreamError;

pub const UNKNOWN_SESSION: &str = "Unknown session id.";
pub const NO_PROCESS_RUNNING: &str = "No support process running.";
pub const OPERATION_NOT_AVAILABLE: &str = "Operation not available for current task.";
pub const INSTANTIATION_FAILED: &str = "Failed to instantiate process.";
pub const MISSING_CONTENT_ID: &str = "Missing or empty content id.";

/// Navigation command errors.
///
/// Every variant carries the exact text returned in the response body.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
    /// No session is registered under the given id.
    #[error("Unknown session id.")]
    UnknownSession,

    /// The session is not in a state that allows the command.
    #[error("{0}")]
    PreconditionFailed(String),

    /// A collaborator failed; its status and message are passed through.
    #[error("{message}")]
    Downstream { status: u16, message: String },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),

    /// A step or popup could not be assembled.
    #[error("Failed to build display: {0}")]
    InvalidDisplay(#[from] ValidationError),
}

impl NavigationError {
    pub fn no_process_running() -> Self {
        NavigationError::PreconditionFailed(NO_PROCESS_RUNNING.to_string())
    }

    pub fn operation_not_available() -> Self {
        NavigationError::PreconditionFailed(OPERATION_NOT_AVAILABLE.to_string())
    }

    pub fn instantiation_failed() -> Self {
        NavigationError::Internal(INSTANTIATION_FAILED.to_string())
    }

    pub fn missing_content_id() -> Self {
        NavigationError::BadRequest(MISSING_CONTENT_ID.to_string())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        NavigationError::Internal(message.into())
    }

    /// HTTP status the command answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            NavigationError::UnknownSession => 400,
            NavigationError::PreconditionFailed(_) => 424,
            NavigationError::Downstream { status, .. } => *status,
            NavigationError::BadRequest(_) => 400,
            NavigationError::Internal(_) => 500,
            NavigationError::InvalidDisplay(_) => 500,
        }
    }

    /// Response body text.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<DownstreamError> for NavigationError {
    fn from(err: DownstreamError) -> Self {
        NavigationError::Downstream {
            status: err.status,
            message: err.message,
        }
    }
}
