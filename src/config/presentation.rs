//! Presentation service addressing

use serde::Deserialize;

use super::error::ValidationError;

/// How this service identifies itself to the presentation service and
/// where the display's fixed actions point.
#[derive(Debug, Clone, Deserialize)]
pub struct PresentationConfig {
    /// Id this service registers its displays under
    #[serde(default = "default_service_id")]
    pub service_id: String,

    /// Action address that closes the display
    #[serde(default = "default_end_display_address")]
    pub end_display_address: String,

    /// Action address of the contact request
    #[serde(default = "default_contact_address")]
    pub contact_address: String,

    /// Path of the feedback form shown when a process completes
    #[serde(default = "default_feedback_form_path")]
    pub feedback_form_path: String,
}

impl PresentationConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.service_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("presentation.service_id"));
        }
        if self.end_display_address.trim().is_empty() {
            return Err(ValidationError::MissingRequired(
                "presentation.end_display_address",
            ));
        }
        if self.contact_address.trim().is_empty() {
            return Err(ValidationError::MissingRequired("presentation.contact_address"));
        }
        if self.feedback_form_path.trim().is_empty() {
            return Err(ValidationError::MissingRequired(
                "presentation.feedback_form_path",
            ));
        }
        Ok(())
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            service_id: default_service_id(),
            end_display_address: default_end_display_address(),
            contact_address: default_contact_address(),
            feedback_form_path: default_feedback_form_path(),
        }
    }
}

fn default_service_id() -> String {
    "psd".to_string()
}

fn default_end_display_address() -> String {
    "display:service".to_string()
}

fn default_contact_address() -> String {
    "service:contact".to_string()
}

fn default_feedback_form_path() -> String {
    "/services/ufs/feedbackForm".to_string()
}
