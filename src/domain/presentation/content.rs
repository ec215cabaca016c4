//! Content bodies and client actions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::ContentId;

/// What the client renders in the main area of a step or popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentBody {
    Empty,
    /// A content package delivered by the content service.
    #[serde(rename_all = "camelCase")]
    Package { content_id: ContentId },
    /// Inline HTML text.
    Html { html: String },
    /// An embedded page loaded from `url`.
    Frame { url: String },
}

impl ContentBody {
    /// Package body when a content id is known, empty body otherwise.
    pub fn package_or_empty(content_id: Option<&ContentId>) -> Self {
        match content_id {
            Some(id) => ContentBody::Package {
                content_id: id.clone(),
            },
            None => ContentBody::Empty,
        }
    }

    pub fn content_id(&self) -> Option<&ContentId> {
        match self {
            ContentBody::Package { content_id } => Some(content_id),
            _ => None,
        }
    }
}

/// What the client does when the user triggers a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Client posts `body` back to this service.
    HttpPost { url: String, body: Value },
    /// Client sends `body` to a message bus address.
    SendMessage { address: String, body: Value },
}

impl Action {
    pub fn http_post(url: impl Into<String>, body: Value) -> Self {
        Action::HttpPost {
            url: url.into(),
            body,
        }
    }

    pub fn send_message(address: impl Into<String>, body: Value) -> Self {
        Action::SendMessage {
            address: address.into(),
            body,
        }
    }
}
