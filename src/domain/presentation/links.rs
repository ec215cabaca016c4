//! Client actions pointing back at this service or at the display bus.

use serde_json::json;
use url::{form_urlencoded, Url};

use super::content::Action;
use crate::domain::foundation::{ContentId, ElementId, ProcessId, SessionId, UserId, ValidationError};

/// Builds the `HttpPost` actions the client uses to call our navigation routes.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationLinks {
    base: Url,
}

impl NavigationLinks {
    /// Creates links rooted at `base_url` (public URL plus base path).
    ///
    /// # Errors
    ///
    /// - `InvalidFormat("base_url")` if the URL is relative or cannot hold a path
    pub fn new(base_url: &str) -> Result<Self, ValidationError> {
        let base = Url::parse(base_url)
            .map_err(|e| ValidationError::invalid_format("base_url", e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ValidationError::invalid_format(
                "base_url",
                "URL cannot carry a path",
            ));
        }
        Ok(Self { base })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Replays history entry `index`.
    pub fn previous(&self, index: usize) -> Action {
        Action::http_post(self.endpoint("navigate/previous"), json!({ "index": index }))
    }

    /// Advances along the engine's default flow.
    pub fn next(&self) -> Action {
        Action::http_post(self.endpoint("navigate/next"), json!({}))
    }

    /// Advances to an explicitly chosen element.
    pub fn next_to(&self, element_id: &ElementId) -> Action {
        let mut url = self.endpoint_url("navigate/next");
        url.query_pairs_mut()
            .append_pair("elementId", element_id.as_str());
        Action::http_post(url.to_string(), json!({}))
    }

    /// Enters the called process of a call activity.
    pub fn details(&self, activity_process_id: &ProcessId) -> Action {
        Action::http_post(
            self.endpoint("navigate/details"),
            json!({ "activityProcessId": activity_process_id.as_str() }),
        )
    }

    pub fn close(&self) -> Action {
        Action::http_post(self.endpoint("navigate/close"), json!({}))
    }

    pub fn show_contacts(&self) -> Action {
        Action::http_post(self.endpoint("showContacts"), json!({}))
    }

    pub fn show_additional_content(&self, content_id: &ContentId) -> Action {
        Action::http_post(
            self.endpoint("showAdditionalContent"),
            json!({ "contentId": content_id.as_str() }),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        self.endpoint_url(path).to_string()
    }

    fn endpoint_url(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path.split('/'));
        }
        url
    }
}

/// Bus-side actions: ending the display, contacting a technician, feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayActions {
    service_id: String,
    end_display_address: String,
    contact_address: String,
    feedback_form_path: String,
}

impl DisplayActions {
    pub fn new(
        service_id: impl Into<String>,
        end_display_address: impl Into<String>,
        contact_address: impl Into<String>,
        feedback_form_path: impl Into<String>,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            end_display_address: end_display_address.into(),
            contact_address: contact_address.into(),
            feedback_form_path: feedback_form_path.into(),
        }
    }

    /// Id this service registers under at the presentation service.
    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    /// Tells the presentation service to stop showing this service's display.
    pub fn end_display(&self, session_id: &SessionId) -> Action {
        Action::send_message(
            self.end_display_address.clone(),
            json!({
                "action": "endDisplay",
                "sessionId": session_id.as_str(),
                "serviceId": self.service_id,
            }),
        )
    }

    pub fn contact_technician(&self) -> Action {
        Action::send_message(self.contact_address.clone(), json!({}))
    }

    /// Feedback form shown after a top-level process completes.
    pub fn feedback_form_url(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
        process_id: &ProcessId,
    ) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("sid", session_id.as_str())
            .append_pair("uid", user_id.as_str())
            .append_pair("pid", process_id.as_str())
            .finish();
        format!("{}?{}", self.feedback_form_path, query)
    }
}
