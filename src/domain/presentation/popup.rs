//! Popups: small replayable display units.

use serde::{Deserialize, Serialize};

use super::content::{Action, ContentBody};
use crate::domain::foundation::ValidationError;

/// A button shown at the bottom of a popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupButton {
    pub text: String,
    pub action: Action,
}

impl PopupButton {
    pub fn new(text: impl Into<String>, action: Action) -> Self {
        Self {
            text: text.into(),
            action,
        }
    }
}

/// Immutable popup descriptor.
///
/// Popups kept in the display history are replayed as-is; navigation
/// buttons are added to a copy via [`Popup::with_buttons`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    title: String,
    body: ContentBody,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    buttons: Vec<PopupButton>,
}

impl Popup {
    pub fn builder() -> PopupBuilder {
        PopupBuilder::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &ContentBody {
        &self.body
    }

    pub fn buttons(&self) -> &[PopupButton] {
        &self.buttons
    }

    /// Returns a copy with `buttons` appended; the original stays untouched.
    pub fn with_buttons(&self, buttons: Vec<PopupButton>) -> Self {
        let mut copy = self.clone();
        copy.buttons.extend(buttons);
        copy
    }
}

/// Builder for [`Popup`].
#[derive(Debug, Default)]
pub struct PopupBuilder {
    title: Option<String>,
    body: Option<ContentBody>,
    buttons: Vec<PopupButton>,
}

impl PopupBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn body(mut self, body: ContentBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn button(mut self, button: PopupButton) -> Self {
        self.buttons.push(button);
        self
    }

    /// Builds the popup.
    ///
    /// # Errors
    ///
    /// - `EmptyField("title")` if no non-blank title was set
    /// - `EmptyField("body")` if no body was set
    pub fn build(self) -> Result<Popup, ValidationError> {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ValidationError::empty_field("title"))?;
        let body = self.body.ok_or_else(|| ValidationError::empty_field("body"))?;

        Ok(Popup {
            title,
            body,
            buttons: self.buttons,
        })
    }
}
