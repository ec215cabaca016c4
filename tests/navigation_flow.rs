//! End-to-end tests for a support session.
//!
//! Navigation commands go through the HTTP router; engine callbacks are
//! handed to the event router directly so their effects can be awaited.
//! Every collaborator is an in-memory fake.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use performance_support::adapters::http::{app_router, NavigationHandlers, ProcessEventsAppState};
use performance_support::adapters::InMemorySessionStore;
use performance_support::application::handlers::navigation::{
    CloseHandler, ConfirmHandler, DetailsHandler, NextHandler, PopupHandler, PreviousHandler,
    StartSupportHandler,
};
use performance_support::application::handlers::process_events::ProcessEventRouter;
use performance_support::application::{AssistanceCompositor, ContentResolver, TerminalPages};
use performance_support::domain::foundation::{
    ContentId, ElementId, ProcessId, ProcessInstanceId, SessionId, UserId,
};
use performance_support::domain::presentation::{
    Action, AssistanceStep, DisplayActions, NavigationLinks, Popup, UserActivity,
};
use performance_support::domain::process::{
    EngineEvent, ProcessContext, ProcessDefinition, ProcessElementInstance, ProcessElementType,
    ProcessInstance,
};
use performance_support::ports::{
    ContentEventPublisher, ContentLookup, ContentService, DownstreamError, ExperienceService,
    IdentityService, IdentitySession, PresentationChannel, ProcessEngine, SessionStore,
};

const SERVICE_URL: &str = "http://localhost:8080/services/psd";

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Engine that knows a fixed set of definitions and elements.
#[derive(Default)]
struct FakeEngine {
    definitions: Mutex<HashMap<String, ProcessDefinition>>,
    instances: Mutex<HashMap<String, ProcessInstance>>,
    elements: Mutex<HashMap<String, ProcessElementInstance>>,
    calls: Mutex<Vec<String>>,
}

impl FakeEngine {
    fn define(&self, id: &str, label: &str) {
        self.definitions.lock().unwrap().insert(
            id.to_string(),
            ProcessDefinition {
                id: ProcessId::new(id).unwrap(),
                label: label.to_string(),
            },
        );
    }

    fn element(&self, instance_id: &str, element: ProcessElementInstance) {
        self.elements
            .lock()
            .unwrap()
            .insert(format!("{}|{}", instance_id, element.id), element);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ProcessEngine for FakeEngine {
    async fn get_process_definition(
        &self,
        process_id: &ProcessId,
    ) -> Result<ProcessDefinition, DownstreamError> {
        self.definitions
            .lock()
            .unwrap()
            .get(process_id.as_str())
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
        self.record(format!("instantiate:{}", process_id));
        let instance = ProcessInstance {
            id: ProcessInstanceId::new(format!("pi-{}", process_id)).unwrap(),
            process_id: process_id.clone(),
            parent_instance_id: None,
            context: context.clone(),
        };
        self.instances
            .lock()
            .unwrap()
            .insert(instance.id.to_string(), instance.clone());
        Ok(instance)
    }

    async fn confirm(
        &self,
        instance_id: &ProcessInstanceId,
        _session_id: &SessionId,
    ) -> Result<ProcessInstance, DownstreamError> {
        self.record(format!("confirm:{}", instance_id));
        Err(DownstreamError::new(404, "Nothing to confirm"))
    }

    async fn next(
        &self,
        instance_id: &ProcessInstanceId,
        _session_id: &SessionId,
        element_id: Option<&ElementId>,
    ) -> Result<(), DownstreamError> {
        let target = element_id.map(|e| e.to_string()).unwrap_or_default();
        self.record(format!("next:{}:{}", instance_id, target));
        Ok(())
    }

    async fn cancel(
        &self,
        instance_id: &ProcessInstanceId,
        _session_id: &SessionId,
    ) -> Result<(), DownstreamError> {
        self.record(format!("cancel:{}", instance_id));
        Ok(())
    }

    async fn current_element(
        &self,
        _instance_id: &ProcessInstanceId,
        _session_id: &SessionId,
    ) -> Result<ProcessElementInstance, DownstreamError> {
        Err(DownstreamError::new(404, "No current element"))
    }

    async fn get_process_instance(
        &self,
        instance_id: &ProcessInstanceId,
    ) -> Result<ProcessInstance, DownstreamError> {
        self.instances
            .lock()
            .unwrap()
            .get(instance_id.as_str())
            .cloned()
            .ok_or_else(|| DownstreamError::new(404, "Instance not found"))
    }

    async fn cached_process_instance(
        &self,
        instance_id: &ProcessInstanceId,
    ) -> Option<ProcessInstance> {
        self.instances
            .lock()
            .unwrap()
            .get(instance_id.as_str())
            .cloned()
    }

    async fn cached_element_instance(
        &self,
        instance_id: &ProcessInstanceId,
        element_id: &ElementId,
    ) -> Option<ProcessElementInstance> {
        self.elements
            .lock()
            .unwrap()
            .get(&format!("{}|{}", instance_id, element_id))
            .cloned()
    }

    async fn cached_process_definition(
        &self,
        process_id: &ProcessId,
    ) -> Option<ProcessDefinition> {
        self.definitions
            .lock()
            .unwrap()
            .get(process_id.as_str())
            .cloned()
    }
}

/// Content service answering from queues; an empty queue means "no content".
#[derive(Default)]
struct FakeContent {
    task: Mutex<Vec<Option<&'static str>>>,
    additional: Mutex<Vec<Option<&'static str>>>,
    task_queries: Mutex<Vec<String>>,
}

impl FakeContent {
    fn next_answer(queue: &Mutex<Vec<Option<&'static str>>>) -> ContentLookup {
        let mut queue = queue.lock().unwrap();
        let answer = if queue.is_empty() {
            None
        } else {
            queue.remove(0)
        };
        ContentLookup {
            content_id: answer.map(|id| ContentId::new(id).unwrap()),
        }
    }
}

#[async_trait]
impl ContentService for FakeContent {
    async fn content_for_task(
        &self,
        _user_id: &UserId,
        root_process_id: &ProcessId,
        process_id: &ProcessId,
        element_id: &ElementId,
    ) -> Result<ContentLookup, DownstreamError> {
        self.task_queries
            .lock()
            .unwrap()
            .push(format!("{}|{}|{}", root_process_id, process_id, element_id));
        Ok(Self::next_answer(&self.task))
    }

    async fn content_for_call_activity(
        &self,
        _user_id: &UserId,
        _root_process_id: &ProcessId,
        _process_id: &ProcessId,
        _called_process_id: &ProcessId,
    ) -> Result<ContentLookup, DownstreamError> {
        Ok(ContentLookup::none())
    }

    async fn additional_content(
        &self,
        _user_id: &UserId,
        _root_process_id: &ProcessId,
        _process_id: &ProcessId,
        _element_id: &ElementId,
    ) -> Result<ContentLookup, DownstreamError> {
        Ok(Self::next_answer(&self.additional))
    }
}

#[derive(Default)]
struct FakeDisplay {
    steps: Mutex<Vec<(String, AssistanceStep)>>,
    popups: Mutex<Vec<(String, Popup)>>,
    ended: Mutex<Vec<String>>,
}

impl FakeDisplay {
    fn last_step(&self) -> AssistanceStep {
        self.steps.lock().unwrap().last().cloned().unwrap().1
    }

    fn step_count(&self) -> usize {
        self.steps.lock().unwrap().len()
    }
}

#[async_trait]
impl PresentationChannel for FakeDisplay {
    async fn display_assistance(
        &self,
        session_id: &SessionId,
        step: &AssistanceStep,
    ) -> Result<(), DownstreamError> {
        self.steps
            .lock()
            .unwrap()
            .push((session_id.to_string(), step.clone()));
        Ok(())
    }

    async fn display_popup(
        &self,
        session_id: &SessionId,
        popup: &Popup,
    ) -> Result<(), DownstreamError> {
        self.popups
            .lock()
            .unwrap()
            .push((session_id.to_string(), popup.clone()));
        Ok(())
    }

    async fn end_display(&self, session_id: &SessionId) -> Result<(), DownstreamError> {
        self.ended.lock().unwrap().push(session_id.to_string());
        Ok(())
    }

    async fn user_activity(&self, _session_id: &SessionId) -> Result<UserActivity, DownstreamError> {
        Ok(UserActivity::Main)
    }
}

struct Quiet;

#[async_trait]
impl ContentEventPublisher for Quiet {
    async fn content_seen(
        &self,
        _session_id: &SessionId,
        _token: &SecretString,
        _content_id: &ContentId,
    ) -> Result<(), DownstreamError> {
        Ok(())
    }
}

#[async_trait]
impl ExperienceService for Quiet {
    async fn is_experienced(
        &self,
        _session_id: &SessionId,
        _process_id: &ProcessId,
        _user_id: &UserId,
        _token: &SecretString,
    ) -> Result<bool, DownstreamError> {
        Ok(false)
    }
}

/// Identity service that maps every session to one user.
struct FixedUser(&'static str);

#[async_trait]
impl IdentityService for FixedUser {
    async fn get_session(
        &self,
        session_id: &SessionId,
        _token: &SecretString,
    ) -> Result<IdentitySession, DownstreamError> {
        Ok(IdentitySession {
            session_id: session_id.clone(),
            user_id: UserId::new(self.0).unwrap(),
        })
    }
}

struct Harness {
    engine: Arc<FakeEngine>,
    content: Arc<FakeContent>,
    display: Arc<FakeDisplay>,
    store: Arc<InMemorySessionStore>,
    events: Arc<ProcessEventRouter>,
    app: Router,
}

impl Harness {
    fn new(user: &'static str) -> Self {
        let engine = Arc::new(FakeEngine::default());
        let content = Arc::new(FakeContent::default());
        let display = Arc::new(FakeDisplay::default());
        let store = Arc::new(InMemorySessionStore::new());
        let links = NavigationLinks::new(SERVICE_URL).unwrap();

        let compositor = Arc::new(AssistanceCompositor::new(
            engine.clone(),
            Arc::new(ContentResolver::new(content.clone())),
            display.clone(),
            Arc::new(Quiet),
            links.clone(),
            TerminalPages::new(DisplayActions::new(
                "psd",
                "display:service",
                "service:contact",
                "/services/ufs/feedbackForm",
            )),
        ));

        let navigation = NavigationHandlers::new(
            Arc::new(StartSupportHandler::new(
                store.clone(),
                Arc::new(FixedUser(user)),
                engine.clone(),
                compositor.clone(),
            )),
            Arc::new(ConfirmHandler::new(store.clone(), engine.clone())),
            Arc::new(NextHandler::new(
                store.clone(),
                engine.clone(),
                compositor.clone(),
            )),
            Arc::new(PreviousHandler::new(store.clone(), display.clone(), links)),
            Arc::new(DetailsHandler::new(
                store.clone(),
                engine.clone(),
                compositor.clone(),
            )),
            Arc::new(CloseHandler::new(
                store.clone(),
                engine.clone(),
                display.clone(),
            )),
            Arc::new(PopupHandler::new(store.clone(), display.clone())),
        );
        let events = Arc::new(ProcessEventRouter::new(
            store.clone(),
            engine.clone(),
            Arc::new(Quiet),
            display.clone(),
            compositor,
        ));
        let app = app_router(
            navigation,
            ProcessEventsAppState::spawn(events.clone()),
            "/services/psd",
        );

        Self {
            engine,
            content,
            display,
            store,
            events,
            app,
        }
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(format!("/services/psd{}", path))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn event(&self, event: Value) {
        let event: EngineEvent = serde_json::from_value(event).unwrap();
        self.events.dispatch(event).await;
    }

    async fn progress(&self, session: &str) -> f64 {
        let handle = self
            .store
            .get(&SessionId::new(session).unwrap())
            .await
            .unwrap();
        let progress = handle.lock().await.progress();
        progress.value()
    }
}

fn element(id: &str, label: &str, kind: ProcessElementType, next: &[&str]) -> ProcessElementInstance {
    ProcessElementInstance {
        id: ElementId::new(id).unwrap(),
        label: label.to_string(),
        element_type: kind,
        next_elements: next.iter().map(|n| ElementId::new(*n).unwrap()).collect(),
    }
}

fn task_event(session: &str, process: &str, element_id: &str, progress: f64) -> Value {
    json!({
        "type": "task",
        "sessionId": session,
        "processId": process,
        "processInstanceId": format!("pi-{}", process),
        "rootProcessId": process,
        "elementId": element_id,
        "modelId": "task",
        "progress": progress
    })
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn start_support_then_task_event_shows_step() {
    let h = Harness::new("u1");
    h.engine.define("proc-1", "Replace filter");
    h.engine.element(
        "pi-proc-1",
        element("e1", "Open housing", ProcessElementType::Task, &["e2"]),
    );
    h.content.task.lock().unwrap().push(Some("c1"));

    let (status, body) = h
        .post("/startSupport/proc-1", json!({ "sessionId": "s1", "token": "t1" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(h.engine.calls(), vec!["instantiate:proc-1".to_string()]);

    h.event(task_event("s1", "proc-1", "e1", 0.25)).await;

    assert_eq!(
        h.content.task_queries.lock().unwrap().clone(),
        vec!["proc-1|proc-1|e1".to_string()]
    );
    assert_eq!(h.progress("s1").await, 0.25);
    let step = h.display.last_step();
    assert_eq!(step.title(), "Open housing");
    assert!(step.button("next").is_some());
    assert!(step.back_action().is_none());
}

#[tokio::test]
async fn next_without_running_process_is_failed_dependency() {
    let h = Harness::new("u1");
    h.store
        .create(
            SessionId::new("s1").unwrap(),
            UserId::new("u1").unwrap(),
            SecretString::new("t".to_string()),
        )
        .await;

    let (status, body) = h.post("/navigate/next", json!({ "sessionId": "s1" })).await;

    assert_eq!(status, StatusCode::FAILED_DEPENDENCY);
    assert_eq!(body, "No support process running.");
    assert!(h.engine.calls().is_empty());
}

#[tokio::test]
async fn next_on_last_step_does_not_contact_engine() {
    let h = Harness::new("u1");
    h.engine.define("proc-1", "Replace filter");
    h.engine.element(
        "pi-proc-1",
        element("end", "Done", ProcessElementType::Task, &[]),
    );
    h.post("/startSupport/proc-1", json!({ "sessionId": "s1" })).await;
    h.event(task_event("s1", "proc-1", "end", 1.0)).await;

    let (status, _) = h.post("/navigate/next", json!({ "sessionId": "s1" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.engine.calls(), vec!["instantiate:proc-1".to_string()]);
}

#[tokio::test]
async fn details_on_plain_task_is_rejected_without_engine_call() {
    let h = Harness::new("u1");
    h.engine.define("proc-1", "Replace filter");
    h.engine.element(
        "pi-proc-1",
        element("e1", "Open housing", ProcessElementType::Task, &[]),
    );
    h.post("/startSupport/proc-1", json!({ "sessionId": "s1" })).await;
    h.event(task_event("s1", "proc-1", "e1", 0.5)).await;

    let (status, _) = h
        .post(
            "/navigate/details",
            json!({ "sessionId": "s1", "activityProcessId": "sub-1" }),
        )
        .await;

    assert_eq!(status, StatusCode::FAILED_DEPENDENCY);
    assert_eq!(h.engine.calls(), vec!["instantiate:proc-1".to_string()]);
}

#[tokio::test]
async fn additional_content_falls_back_to_earlier_answer() {
    let h = Harness::new("userA");
    h.engine.define("procA", "Calibrate");
    h.engine.element(
        "pi-procA",
        element("e1", "Zero the gauge", ProcessElementType::Task, &[]),
    );
    h.content.additional.lock().unwrap().push(Some("c42"));

    h.post("/startSupport/procA", json!({ "sessionId": "s1" })).await;
    h.event(task_event("s1", "procA", "e1", 0.1)).await;
    h.post("/startSupport/procA", json!({ "sessionId": "s2" })).await;
    h.event(task_event("s2", "procA", "e1", 0.1)).await;

    let step = h.display.last_step();
    assert_eq!(
        step.knowledge_action(),
        Some(&Action::HttpPost {
            url: format!("{}/showAdditionalContent", SERVICE_URL),
            body: json!({ "contentId": "c42" }),
        })
    );
}

#[tokio::test]
async fn previous_beyond_history_dispatches_nothing() {
    let h = Harness::new("u1");
    h.engine.define("proc-1", "Replace filter");
    h.engine.element(
        "pi-proc-1",
        element("e1", "Open housing", ProcessElementType::Task, &[]),
    );
    h.post("/startSupport/proc-1", json!({ "sessionId": "s1" })).await;
    h.event(task_event("s1", "proc-1", "e1", 0.5)).await;

    let (status, _) = h
        .post("/navigate/previous", json!({ "sessionId": "s1", "index": 5 }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(h.display.popups.lock().unwrap().is_empty());
}

#[tokio::test]
async fn completion_shows_feedback_and_closes_session() {
    let h = Harness::new("u1");
    h.engine.define("proc-1", "Replace filter");
    h.post("/startSupport/proc-1", json!({ "sessionId": "s1" })).await;
    let before = h.display.step_count();

    h.event(json!({
        "type": "processComplete",
        "sessionId": "s1",
        "userId": "u1",
        "processId": "proc-1",
        "processInstanceId": "pi-proc-1"
    }))
    .await;

    assert_eq!(h.display.step_count(), before + 1);
    assert_eq!(h.display.last_step().title(), "Replace filter");
    assert!(h.store.get(&SessionId::new("s1").unwrap()).await.is_none());

    let (status, _) = h.post("/navigate/close", json!({ "sessionId": "s1" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn close_cancels_and_ends_display() {
    let h = Harness::new("u1");
    h.engine.define("proc-1", "Replace filter");
    h.post("/startSupport/proc-1", json!({ "sessionId": "s1" })).await;

    let (status, _) = h.post("/navigate/close", json!({ "sessionId": "s1" })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(h.engine.calls().contains(&"cancel:pi-proc-1".to_string()));
    assert_eq!(h.display.ended.lock().unwrap().clone(), vec!["s1".to_string()]);
}

#[tokio::test]
async fn health_answers_ok() {
    let h = Harness::new("u1");
    let response = h
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/services/psd/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
