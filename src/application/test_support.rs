//! Mock ports and fixtures shared by the application tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::Mutex as AsyncMutex;

use super::compositor::AssistanceCompositor;
use super::content::ContentResolver;
use super::error_pages::TerminalPages;
use crate::adapters::storage::InMemorySessionStore;
use crate::domain::foundation::{
    ContentId, ElementId, ProcessId, ProcessInstanceId, SessionId, UserId,
};
use crate::domain::presentation::{
    AssistanceStep, DisplayActions, NavigationLinks, Popup, UserActivity,
};
use crate::domain::process::{
    ProcessContext, ProcessDefinition, ProcessElementInstance, ProcessInstance,
};
use crate::domain::session::Session;
use crate::ports::{
    ContentEventPublisher, ContentLookup, ContentService, DownstreamError, ExperienceService,
    IdentityService, IdentitySession, PresentationChannel, ProcessEngine, SessionHandle,
    SessionStore,
};

pub const BASE_URL: &str = "http://localhost:8080/services/psd";

pub mod ids {
    use super::*;
    use crate::domain::process::ProcessElementType;

    pub fn session_id(id: &str) -> SessionId {
        SessionId::new(id).unwrap()
    }

    pub fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    pub fn process(id: &str) -> ProcessId {
        ProcessId::new(id).unwrap()
    }

    pub fn instance(id: &str) -> ProcessInstanceId {
        ProcessInstanceId::new(id).unwrap()
    }

    pub fn element(id: &str) -> ElementId {
        ElementId::new(id).unwrap()
    }

    pub fn content_id(id: &str) -> ContentId {
        ContentId::new(id).unwrap()
    }

    pub fn task_element(id: &str, label: &str) -> ProcessElementInstance {
        ProcessElementInstance {
            id: element(id),
            label: label.to_string(),
            element_type: ProcessElementType::Task,
            next_elements: vec![],
        }
    }

    pub fn call_activity_element(id: &str, label: &str) -> ProcessElementInstance {
        ProcessElementInstance {
            element_type: ProcessElementType::CallActivity,
            next_elements: vec![element("after-call")],
            ..task_element(id, label)
        }
    }

    pub fn process_instance(id: &str, process_id: &str, parent: Option<&str>) -> ProcessInstance {
        ProcessInstance {
            id: instance(id),
            process_id: process(process_id),
            parent_instance_id: parent.map(instance),
            context: ProcessContext::new(),
        }
    }

    pub fn definition(id: &str, label: &str) -> ProcessDefinition {
        ProcessDefinition {
            id: process(id),
            label: label.to_string(),
        }
    }
}

/// A session handle not registered in any store.
pub fn new_session(session_id: &str, user_id: &str) -> SessionHandle {
    Arc::new(AsyncMutex::new(Session::new(
        ids::session_id(session_id),
        ids::user(user_id),
        SecretString::new("token".to_string()),
    )))
}

// ════════════════════════════════════════════════════════════════════════════
// Process engine
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockProcessEngine {
    definitions: Mutex<HashMap<ProcessId, ProcessDefinition>>,
    instances: Mutex<HashMap<ProcessInstanceId, ProcessInstance>>,
    elements: Mutex<HashMap<(ProcessInstanceId, ElementId), ProcessElementInstance>>,
    instantiate_results: Mutex<VecDeque<ProcessInstance>>,
    confirm_results: Mutex<VecDeque<ProcessInstance>>,
    current_elements: Mutex<VecDeque<ProcessElementInstance>>,
    failures: Mutex<HashMap<&'static str, DownstreamError>>,
    instantiate_contexts: Mutex<Vec<ProcessContext>>,
    lookup_delay: Mutex<Option<Duration>>,
    calls: Mutex<Vec<String>>,
}

impl MockProcessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_definition(&self, definition: ProcessDefinition) {
        self.definitions
            .lock()
            .unwrap()
            .insert(definition.id.clone(), definition);
    }

    pub fn register_instance(&self, instance: ProcessInstance) {
        self.instances
            .lock()
            .unwrap()
            .insert(instance.id.clone(), instance);
    }

    pub fn register_element(&self, instance_id: &str, element: ProcessElementInstance) {
        self.elements
            .lock()
            .unwrap()
            .insert((ids::instance(instance_id), element.id.clone()), element);
    }

    pub fn on_instantiate(&self, instance: ProcessInstance) {
        self.instantiate_results.lock().unwrap().push_back(instance);
    }

    pub fn on_confirm(&self, instance: ProcessInstance) {
        self.confirm_results.lock().unwrap().push_back(instance);
    }

    pub fn on_current_element(&self, element: ProcessElementInstance) {
        self.current_elements.lock().unwrap().push_back(element);
    }

    /// Makes element lookups take `delay` before answering.
    pub fn delay_lookups(&self, delay: Duration) {
        *self.lookup_delay.lock().unwrap() = Some(delay);
    }

    /// Makes every call to `operation` fail with `error`.
    pub fn fail(&self, operation: &'static str, error: DownstreamError) {
        self.failures.lock().unwrap().insert(operation, error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that went to the engine, ignoring cached lookups.
    pub fn remote_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("cached_"))
            .collect()
    }

    pub fn instantiate_contexts(&self) -> Vec<ProcessContext> {
        self.instantiate_contexts.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, operation: &'static str) -> Result<(), DownstreamError> {
        match self.failures.lock().unwrap().get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProcessEngine for MockProcessEngine {
    async fn get_process_definition(
        &self,
        process_id: &ProcessId,
    ) -> Result<ProcessDefinition, DownstreamError> {
        self.record(format!("get_process_definition:{}", process_id));
        self.check("get_process_definition")?;
        self.definitions
            .lock()
            .unwrap()
            .get(process_id)
            .cloned()
            .ok_or_else(|| DownstreamError::new(404, "Process not found"))
    }

    async fn instantiate_process(
        &self,
        process_id: &ProcessId,
        _session_id: &SessionId,
        _user_id: &UserId,
        context: &ProcessContext,
    ) -> Result<ProcessInstance, DownstreamError> {
        self.record(format!("instantiate_process:{}", process_id));
        self.instantiate_contexts
            .lock()
            .unwrap()
            .push(context.clone());
        self.check("instantiate_process")?;
        let instance = self
            .instantiate_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ProcessInstance {
                id: ids::instance(&format!("pi-{}", process_id)),
                process_id: process_id.clone(),
                parent_instance_id: None,
                context: context.clone(),
            });
        self.register_instance(instance.clone());
        Ok(instance)
    }

    async fn confirm(
        &self,
        instance_id: &ProcessInstanceId,
        _session_id: &SessionId,
    ) -> Result<ProcessInstance, DownstreamError> {
        self.record(format!("confirm:{}", instance_id));
        self.check("confirm")?;
        let instance = self
            .confirm_results
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| DownstreamError::new(404, "Nothing to confirm"))?;
        self.register_instance(instance.clone());
        Ok(instance)
    }

    async fn next(
        &self,
        instance_id: &ProcessInstanceId,
        _session_id: &SessionId,
        element_id: Option<&ElementId>,
    ) -> Result<(), DownstreamError> {
        let target = element_id.map(|e| e.to_string()).unwrap_or_else(|| "-".to_string());
        self.record(format!("next:{}:{}", instance_id, target));
        self.check("next")
    }

    async fn cancel(
        &self,
        instance_id: &ProcessInstanceId,
        _session_id: &SessionId,
    ) -> Result<(), DownstreamError> {
        self.record(format!("cancel:{}", instance_id));
        self.check("cancel")
    }

    async fn current_element(
        &self,
        instance_id: &ProcessInstanceId,
        _session_id: &SessionId,
    ) -> Result<ProcessElementInstance, DownstreamError> {
        self.record(format!("current_element:{}", instance_id));
        self.check("current_element")?;
        self.current_elements
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| DownstreamError::new(404, "No current element"))
    }

    async fn get_process_instance(
        &self,
        instance_id: &ProcessInstanceId,
    ) -> Result<ProcessInstance, DownstreamError> {
        self.record(format!("get_process_instance:{}", instance_id));
        self.check("get_process_instance")?;
        self.instances
            .lock()
            .unwrap()
            .get(instance_id)
            .cloned()
            .ok_or_else(|| DownstreamError::new(404, "Instance not found"))
    }

    async fn cached_process_instance(
        &self,
        instance_id: &ProcessInstanceId,
    ) -> Option<ProcessInstance> {
        self.record(format!("cached_process_instance:{}", instance_id));
        self.instances.lock().unwrap().get(instance_id).cloned()
    }

    async fn cached_element_instance(
        &self,
        instance_id: &ProcessInstanceId,
        element_id: &ElementId,
    ) -> Option<ProcessElementInstance> {
        self.record(format!("cached_element_instance:{}:{}", instance_id, element_id));
        let delay = *self.lookup_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.elements
            .lock()
            .unwrap()
            .get(&(instance_id.clone(), element_id.clone()))
            .cloned()
    }

    async fn cached_process_definition(
        &self,
        process_id: &ProcessId,
    ) -> Option<ProcessDefinition> {
        self.record(format!("cached_process_definition:{}", process_id));
        self.definitions.lock().unwrap().get(process_id).cloned()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Content service
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct ContentState {
    task: ContentLookup,
    call_activity: ContentLookup,
    additional: ContentLookup,
    failure: Option<DownstreamError>,
    task_queries: Vec<String>,
    call_activity_queries: Vec<String>,
    additional_queries: Vec<String>,
}

#[derive(Default)]
pub struct MockContentService {
    state: Mutex<ContentState>,
}

impl MockContentService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer_task(&self, lookup: ContentLookup) {
        self.state.lock().unwrap().task = lookup;
    }

    pub fn answer_call_activity(&self, lookup: ContentLookup) {
        self.state.lock().unwrap().call_activity = lookup;
    }

    pub fn answer_additional(&self, lookup: ContentLookup) {
        self.state.lock().unwrap().additional = lookup;
    }

    /// Makes every lookup fail with `error`.
    pub fn fail_with(&self, error: DownstreamError) {
        self.state.lock().unwrap().failure = Some(error);
    }

    /// Task queries as `user|root|process|element`.
    pub fn task_queries(&self) -> Vec<String> {
        self.state.lock().unwrap().task_queries.clone()
    }

    pub fn call_activity_queries(&self) -> Vec<String> {
        self.state.lock().unwrap().call_activity_queries.clone()
    }

    pub fn additional_queries(&self) -> Vec<String> {
        self.state.lock().unwrap().additional_queries.clone()
    }
}

fn query_key(user: &UserId, root: &ProcessId, process: &ProcessId, target: &str) -> String {
    format!("{}|{}|{}|{}", user, root, process, target)
}

#[async_trait]
impl ContentService for MockContentService {
    async fn content_for_task(
        &self,
        user_id: &UserId,
        root_process_id: &ProcessId,
        process_id: &ProcessId,
        element_id: &ElementId,
    ) -> Result<ContentLookup, DownstreamError> {
        let mut state = self.state.lock().unwrap();
        state
            .task_queries
            .push(query_key(user_id, root_process_id, process_id, element_id.as_str()));
        match &state.failure {
            Some(err) => Err(err.clone()),
            None => Ok(state.task.clone()),
        }
    }

    async fn content_for_call_activity(
        &self,
        user_id: &UserId,
        root_process_id: &ProcessId,
        process_id: &ProcessId,
        called_process_id: &ProcessId,
    ) -> Result<ContentLookup, DownstreamError> {
        let mut state = self.state.lock().unwrap();
        state.call_activity_queries.push(query_key(
            user_id,
            root_process_id,
            process_id,
            called_process_id.as_str(),
        ));
        match &state.failure {
            Some(err) => Err(err.clone()),
            None => Ok(state.call_activity.clone()),
        }
    }

    async fn additional_content(
        &self,
        user_id: &UserId,
        root_process_id: &ProcessId,
        process_id: &ProcessId,
        element_id: &ElementId,
    ) -> Result<ContentLookup, DownstreamError> {
        let mut state = self.state.lock().unwrap();
        state
            .additional_queries
            .push(query_key(user_id, root_process_id, process_id, element_id.as_str()));
        match &state.failure {
            Some(err) => Err(err.clone()),
            None => Ok(state.additional.clone()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Presentation, content events, experience, identity
// ════════════════════════════════════════════════════════════════════════════

pub struct MockPresentation {
    steps: Mutex<Vec<(SessionId, AssistanceStep)>>,
    popups: Mutex<Vec<(SessionId, Popup)>>,
    end_displays: Mutex<Vec<SessionId>>,
    activity: Mutex<Result<UserActivity, DownstreamError>>,
    fail_displays: Mutex<bool>,
}

impl Default for MockPresentation {
    fn default() -> Self {
        Self {
            steps: Mutex::new(Vec::new()),
            popups: Mutex::new(Vec::new()),
            end_displays: Mutex::new(Vec::new()),
            activity: Mutex::new(Ok(UserActivity::Main)),
            fail_displays: Mutex::new(false),
        }
    }
}

impl MockPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> Vec<(SessionId, AssistanceStep)> {
        self.steps.lock().unwrap().clone()
    }

    pub fn last_step(&self) -> Option<AssistanceStep> {
        self.steps.lock().unwrap().last().map(|(_, s)| s.clone())
    }

    pub fn popups(&self) -> Vec<(SessionId, Popup)> {
        self.popups.lock().unwrap().clone()
    }

    pub fn end_displays(&self) -> Vec<SessionId> {
        self.end_displays.lock().unwrap().clone()
    }

    pub fn set_activity(&self, activity: Result<UserActivity, DownstreamError>) {
        *self.activity.lock().unwrap() = activity;
    }

    /// Makes step and popup displays fail.
    pub fn fail_displays(&self) {
        *self.fail_displays.lock().unwrap() = true;
    }

    fn display_result(&self) -> Result<(), DownstreamError> {
        if *self.fail_displays.lock().unwrap() {
            Err(DownstreamError::transport("presentation service unreachable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PresentationChannel for MockPresentation {
    async fn display_assistance(
        &self,
        session_id: &SessionId,
        step: &AssistanceStep,
    ) -> Result<(), DownstreamError> {
        self.display_result()?;
        self.steps
            .lock()
            .unwrap()
            .push((session_id.clone(), step.clone()));
        Ok(())
    }

    async fn display_popup(
        &self,
        session_id: &SessionId,
        popup: &Popup,
    ) -> Result<(), DownstreamError> {
        self.display_result()?;
        self.popups
            .lock()
            .unwrap()
            .push((session_id.clone(), popup.clone()));
        Ok(())
    }

    async fn end_display(&self, session_id: &SessionId) -> Result<(), DownstreamError> {
        self.end_displays.lock().unwrap().push(session_id.clone());
        Ok(())
    }

    async fn user_activity(&self, _session_id: &SessionId) -> Result<UserActivity, DownstreamError> {
        self.activity.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct MockContentEvents {
    seen: Mutex<Vec<(SessionId, ContentId)>>,
}

impl MockContentEvents {
    pub fn seen(&self) -> Vec<(SessionId, ContentId)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentEventPublisher for MockContentEvents {
    async fn content_seen(
        &self,
        session_id: &SessionId,
        _token: &SecretString,
        content_id: &ContentId,
    ) -> Result<(), DownstreamError> {
        self.seen
            .lock()
            .unwrap()
            .push((session_id.clone(), content_id.clone()));
        Ok(())
    }
}

pub struct MockExperienceService {
    answer: Mutex<Result<bool, DownstreamError>>,
    queries: Mutex<Vec<ProcessId>>,
}

impl Default for MockExperienceService {
    fn default() -> Self {
        Self {
            answer: Mutex::new(Ok(false)),
            queries: Mutex::new(Vec::new()),
        }
    }
}

impl MockExperienceService {
    pub fn answer(&self, answer: Result<bool, DownstreamError>) {
        *self.answer.lock().unwrap() = answer;
    }

    pub fn queries(&self) -> Vec<ProcessId> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExperienceService for MockExperienceService {
    async fn is_experienced(
        &self,
        _session_id: &SessionId,
        process_id: &ProcessId,
        _user_id: &UserId,
        _token: &SecretString,
    ) -> Result<bool, DownstreamError> {
        self.queries.lock().unwrap().push(process_id.clone());
        self.answer.lock().unwrap().clone()
    }
}

pub struct MockIdentityService {
    user_id: UserId,
    failure: Mutex<Option<DownstreamError>>,
}

impl Default for MockIdentityService {
    fn default() -> Self {
        Self {
            user_id: ids::user("u1"),
            failure: Mutex::new(None),
        }
    }
}

impl MockIdentityService {
    pub fn fail_with(&self, error: DownstreamError) {
        *self.failure.lock().unwrap() = Some(error);
    }
}

#[async_trait]
impl IdentityService for MockIdentityService {
    async fn get_session(
        &self,
        session_id: &SessionId,
        _token: &SecretString,
    ) -> Result<IdentitySession, DownstreamError> {
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(IdentitySession {
            session_id: session_id.clone(),
            user_id: self.user_id.clone(),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Rig
// ════════════════════════════════════════════════════════════════════════════

/// All mocks wired into one compositor and one store.
pub struct TestRig {
    pub engine: Arc<MockProcessEngine>,
    pub content: Arc<MockContentService>,
    pub presentation: Arc<MockPresentation>,
    pub content_events: Arc<MockContentEvents>,
    pub experience: Arc<MockExperienceService>,
    pub identity: Arc<MockIdentityService>,
    pub store: Arc<InMemorySessionStore>,
    pub links: NavigationLinks,
    compositor: Arc<AssistanceCompositor>,
}

impl TestRig {
    pub fn new() -> Self {
        let engine = Arc::new(MockProcessEngine::new());
        let content = Arc::new(MockContentService::new());
        let presentation = Arc::new(MockPresentation::new());
        let content_events = Arc::new(MockContentEvents::default());
        let links = NavigationLinks::new(BASE_URL).unwrap();
        let compositor = Arc::new(AssistanceCompositor::new(
            engine.clone(),
            Arc::new(ContentResolver::new(content.clone())),
            presentation.clone(),
            content_events.clone(),
            links.clone(),
            TerminalPages::new(display_actions()),
        ));

        Self {
            engine,
            content,
            presentation,
            content_events,
            experience: Arc::new(MockExperienceService::default()),
            identity: Arc::new(MockIdentityService::default()),
            store: Arc::new(InMemorySessionStore::new()),
            links,
            compositor,
        }
    }

    pub fn compositor(&self) -> Arc<AssistanceCompositor> {
        self.compositor.clone()
    }

    pub fn store(&self) -> Arc<dyn SessionStore> {
        self.store.clone()
    }

    /// Registers a session in the rig's store.
    pub async fn session(&self, session_id: &str, user_id: &str) -> SessionHandle {
        self.store
            .create(
                ids::session_id(session_id),
                ids::user(user_id),
                SecretString::new("token".to_string()),
            )
            .await
    }

    /// Registers a session with `instance` active at `element`.
    pub async fn running_session(
        &self,
        session_id: &str,
        instance: ProcessInstance,
        element: ProcessElementInstance,
    ) -> SessionHandle {
        let handle = self.session(session_id, "u1").await;
        {
            let mut session = handle.lock().await;
            session.set_active_instance(instance);
            session.set_active_element(element);
        }
        handle
    }
}

pub fn display_actions() -> DisplayActions {
    DisplayActions::new(
        "psd",
        "display:service",
        "service:contact",
        "/services/ufs/feedbackForm",
    )
}
