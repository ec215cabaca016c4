//! Downstream service endpoints

use serde::Deserialize;
use url::Url;

use super::error::ValidationError;

/// Base URLs of the remote collaborators. All are required.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    pub process_engine_url: String,
    pub content_service_url: String,
    pub experience_service_url: String,
    pub presentation_service_url: String,
    pub identity_service_url: String,
    pub content_events_url: String,
}

impl ServicesConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_url("process_engine_url", &self.process_engine_url)?;
        check_url("content_service_url", &self.content_service_url)?;
        check_url("experience_service_url", &self.experience_service_url)?;
        check_url("presentation_service_url", &self.presentation_service_url)?;
        check_url("identity_service_url", &self.identity_service_url)?;
        check_url("content_events_url", &self.content_events_url)?;
        Ok(())
    }
}

fn check_url(name: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingRequired(name));
    }
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::InvalidUrl(name)),
    }
}
