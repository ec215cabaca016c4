//! Assistance step descriptor sent to the presentation service.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::content::{Action, ContentBody};
use crate::domain::foundation::{Progress, ValidationError};

/// A named button below the step body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionButton {
    pub id: String,
    pub text: String,
    pub action: Action,
}

/// The UI descriptor for the user's current position in a process.
///
/// # Invariants
///
/// - `title` is non-blank
/// - action button ids are unique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistanceStep {
    title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    process_titles: Vec<String>,
    progress: Progress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    info: Option<String>,
    body: ContentBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    back_action: Option<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    close_action: Option<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    knowledge_action: Option<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contacts_action: Option<Action>,
    #[serde(default)]
    action_buttons: Vec<ActionButton>,
}

impl AssistanceStep {
    pub fn builder() -> AssistanceStepBuilder {
        AssistanceStepBuilder::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Breadcrumb titles, root process first.
    pub fn process_titles(&self) -> &[String] {
        &self.process_titles
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn body(&self) -> &ContentBody {
        &self.body
    }

    pub fn back_action(&self) -> Option<&Action> {
        self.back_action.as_ref()
    }

    pub fn close_action(&self) -> Option<&Action> {
        self.close_action.as_ref()
    }

    pub fn knowledge_action(&self) -> Option<&Action> {
        self.knowledge_action.as_ref()
    }

    pub fn contacts_action(&self) -> Option<&Action> {
        self.contacts_action.as_ref()
    }

    pub fn action_buttons(&self) -> &[ActionButton] {
        &self.action_buttons
    }

    /// Looks up a button by id.
    pub fn button(&self, id: &str) -> Option<&ActionButton> {
        self.action_buttons.iter().find(|b| b.id == id)
    }
}

/// Builder for [`AssistanceStep`].
#[derive(Debug, Default)]
pub struct AssistanceStepBuilder {
    title: Option<String>,
    process_titles: Vec<String>,
    progress: Progress,
    info: Option<String>,
    body: Option<ContentBody>,
    back_action: Option<Action>,
    close_action: Option<Action>,
    knowledge_action: Option<Action>,
    contacts_action: Option<Action>,
    action_buttons: Vec<ActionButton>,
}

impl AssistanceStepBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn process_titles(mut self, titles: Vec<String>) -> Self {
        self.process_titles = titles;
        self
    }

    pub fn progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    pub fn info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    pub fn body(mut self, body: ContentBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn back_action(mut self, action: Action) -> Self {
        self.back_action = Some(action);
        self
    }

    pub fn close_action(mut self, action: Action) -> Self {
        self.close_action = Some(action);
        self
    }

    pub fn knowledge_action(mut self, action: Action) -> Self {
        self.knowledge_action = Some(action);
        self
    }

    pub fn contacts_action(mut self, action: Action) -> Self {
        self.contacts_action = Some(action);
        self
    }

    /// Appends a button; order is preserved.
    pub fn button(mut self, id: impl Into<String>, text: impl Into<String>, action: Action) -> Self {
        self.action_buttons.push(ActionButton {
            id: id.into(),
            text: text.into(),
            action,
        });
        self
    }

    /// Builds the step.
    ///
    /// # Errors
    ///
    /// - `EmptyField("title")` if no non-blank title was set
    /// - `EmptyField("body")` if no body was set
    /// - `Duplicate("action_buttons", id)` if two buttons share an id
    pub fn build(self) -> Result<AssistanceStep, ValidationError> {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ValidationError::empty_field("title"))?;
        let body = self.body.ok_or_else(|| ValidationError::empty_field("body"))?;

        let mut seen = HashSet::new();
        for button in &self.action_buttons {
            if !seen.insert(button.id.as_str()) {
                return Err(ValidationError::duplicate("action_buttons", &button.id));
            }
        }

        Ok(AssistanceStep {
            title,
            process_titles: self.process_titles,
            progress: self.progress,
            info: self.info,
            body,
            back_action: self.back_action,
            close_action: self.close_action,
            knowledge_action: self.knowledge_action,
            contacts_action: self.contacts_action,
            action_buttons: self.action_buttons,
        })
    }
}
