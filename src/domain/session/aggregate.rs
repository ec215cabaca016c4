//! Session aggregate.
//!
//! A session tracks one user's walk through an assistance process: the
//! process instances entered so far, where the user currently is, the
//! content shown per step and the display history for back navigation.
//!
//! Sessions live only in memory and are dropped once the top-level process
//! completes, fails or is terminated.

use std::collections::HashMap;

use chrono::Duration;
use secrecy::SecretString;

use super::history::DisplayHistory;
use crate::domain::foundation::{
    ContentId, ElementId, ProcessId, ProcessInstanceId, Progress, SessionId, Timestamp, UserId,
};
use crate::domain::presentation::Popup;
use crate::domain::process::{ProcessElementInstance, ProcessInstance};

/// Per-session navigation state.
///
/// # Invariants
///
/// - the active instance, if any, is a key of the instance map
/// - `progress` is within `[0, 1]`
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    user_id: UserId,

    /// Client token, refreshed by every navigation command.
    token: SecretString,

    /// Every instance activated in this session.
    instances: HashMap<ProcessInstanceId, ProcessInstance>,
    active_instance: Option<ProcessInstanceId>,
    active_element: Option<ProcessElementInstance>,
    progress: Progress,

    /// Last content id seen per `processId/elementId`. Never evicted.
    step_content: HashMap<String, ContentId>,

    history: DisplayHistory,
    contacts_popup: Option<Popup>,
    started_at: Timestamp,
}

impl Session {
    pub fn new(id: SessionId, user_id: UserId, token: SecretString) -> Self {
        Self {
            id,
            user_id,
            token,
            instances: HashMap::new(),
            active_instance: None,
            active_element: None,
            progress: Progress::ZERO,
            step_content: HashMap::new(),
            history: DisplayHistory::new(),
            contacts_popup: None,
            started_at: Timestamp::now(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// Returns the instance the user is currently working in.
    pub fn active_instance(&self) -> Option<&ProcessInstance> {
        self.active_instance
            .as_ref()
            .and_then(|id| self.instances.get(id))
    }

    pub fn active_instance_id(&self) -> Option<&ProcessInstanceId> {
        self.active_instance.as_ref()
    }

    /// Returns true if `id` is the active instance.
    pub fn is_active_instance(&self, id: &ProcessInstanceId) -> bool {
        self.active_instance.as_ref() == Some(id)
    }

    pub fn instance(&self, id: &ProcessInstanceId) -> Option<&ProcessInstance> {
        self.instances.get(id)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn active_element(&self) -> Option<&ProcessElementInstance> {
        self.active_element.as_ref()
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn history(&self) -> &DisplayHistory {
        &self.history
    }

    /// Returns true once at least one step has been displayed.
    pub fn has_last_display(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn display_from_history(&self, index: usize) -> Option<&Popup> {
        self.history.get(index)
    }

    pub fn contacts_popup(&self) -> Option<&Popup> {
        self.contacts_popup.as_ref()
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    /// Time spent in the session up to `now`.
    pub fn duration_until(&self, now: &Timestamp) -> Duration {
        now.duration_since(&self.started_at)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_token(&mut self, token: SecretString) {
        self.token = token;
    }

    /// Registers `instance` and makes it the active one.
    ///
    /// A previously registered instance with the same id is replaced.
    pub fn set_active_instance(&mut self, instance: ProcessInstance) {
        let id = instance.id.clone();
        self.instances.insert(id.clone(), instance);
        self.active_instance = Some(id);
    }

    pub fn set_active_element(&mut self, element: ProcessElementInstance) {
        self.active_element = Some(element);
    }

    pub fn set_progress(&mut self, progress: Progress) {
        self.progress = progress;
    }

    /// Remembers the content shown for a step.
    pub fn cache_step_content(
        &mut self,
        process_id: &ProcessId,
        element_id: &ElementId,
        content_id: ContentId,
    ) {
        self.step_content
            .insert(step_key(process_id, element_id), content_id);
    }

    pub fn cached_step_content(
        &self,
        process_id: &ProcessId,
        element_id: &ElementId,
    ) -> Option<&ContentId> {
        self.step_content.get(&step_key(process_id, element_id))
    }

    /// Records `popup` as the current display.
    pub fn record_display(&mut self, popup: Popup) {
        self.history.push(popup);
    }

    pub fn set_contacts_popup(&mut self, popup: Popup) {
        self.contacts_popup = Some(popup);
    }
}

/// Cache key of a step: `processId/elementId`.
pub fn step_key(process_id: &ProcessId, element_id: &ElementId) -> String {
    format!("{}/{}", process_id, element_id)
}
