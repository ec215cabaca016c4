//! HTTP DTOs for navigation endpoints.
//!
//! Clients post the session id and their current token with every command.
//! Ids stay raw strings here; the handlers decide what a bad id means.

use serde::Deserialize;
use serde_json::{Map, Value};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /startSupport/:supportId`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSupportRequest {
    pub session_id: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub context: Option<Map<String, Value>>,
}

/// Body shared by commands that only address the session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub session_id: String,
    #[serde(default)]
    pub token: String,
}

/// Body of `POST /navigate/confirm`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub session_id: String,
    #[serde(default)]
    pub token: String,
    pub process_id: String,
}

/// Query of `POST /navigate/next`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuery {
    #[serde(default)]
    pub element_id: Option<String>,
}

/// Body of `POST /navigate/previous`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousRequest {
    pub session_id: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub index: Option<i64>,
}

/// Body of `POST /navigate/details`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsRequest {
    pub session_id: String,
    #[serde(default)]
    pub token: String,
    pub activity_process_id: String,
}

/// Body of `POST /showContacts`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowContactsRequest {
    pub session_id: String,
}

/// Body of `POST /showAdditionalContent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowAdditionalContentRequest {
    pub session_id: String,
    #[serde(default)]
    pub content_id: Option<String>,
}
