//! Assistance step compositor.
//!
//! Assembles the step descriptor for the user's current position, records
//! it in the display history, attaches additional content and hands the
//! result to the presentation channel.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, warn};

use super::content::ContentResolver;
use super::error_pages::{TerminalPages, UNKNOWN_PROCESS_TITLE};
use crate::domain::foundation::{
    ContentId, ProcessId, ProcessInstanceId, Progress, SessionId, ValidationError,
};
use crate::domain::presentation::{AssistanceStep, ContentBody, NavigationLinks, Popup};
use crate::domain::process::ProcessElementInstance;
use crate::domain::session::NavigationError;
use crate::ports::{
    ContentEventPublisher, DownstreamError, PresentationChannel, ProcessEngine, SessionHandle,
};

pub const PREVIOUS_STEP_TITLE: &str = "Previous step";
pub const NO_ASSISTANCE_INFO: &str = "No assistance is available for the current step.";
pub const NO_SUMMARY_INFO: &str =
    "No summary is available for this section. Click \"Show instructions\" for more information.";

const DETAILS_TEXT: &str = "Show instructions";
const NEXT_TEXT: &str = "Confirm - Continue";

/// Errors raised while composing a display.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositionError {
    #[error("Invalid display: {0}")]
    InvalidDisplay(#[from] ValidationError),
}

impl From<CompositionError> for NavigationError {
    fn from(err: CompositionError) -> Self {
        match err {
            CompositionError::InvalidDisplay(e) => NavigationError::InvalidDisplay(e),
        }
    }
}

/// Where in the process tree a step sits.
#[derive(Debug, Clone, PartialEq)]
pub struct StepLocation {
    pub process_id: ProcessId,
    pub process_instance_id: ProcessInstanceId,
    pub root_process_id: ProcessId,
}

/// Everything needed to compose one step.
#[derive(Debug, Clone)]
pub struct StepRequest {
    pub element: ProcessElementInstance,
    pub content_id: Option<ContentId>,
    pub location: StepLocation,
    /// Set when the element is a call activity.
    pub called_process_id: Option<ProcessId>,
    pub progress: Progress,
}

/// Builds and dispatches assistance steps.
pub struct AssistanceCompositor {
    engine: Arc<dyn ProcessEngine>,
    resolver: Arc<ContentResolver>,
    presentation: Arc<dyn PresentationChannel>,
    content_events: Arc<dyn ContentEventPublisher>,
    links: NavigationLinks,
    pages: TerminalPages,
}

impl AssistanceCompositor {
    pub fn new(
        engine: Arc<dyn ProcessEngine>,
        resolver: Arc<ContentResolver>,
        presentation: Arc<dyn PresentationChannel>,
        content_events: Arc<dyn ContentEventPublisher>,
        links: NavigationLinks,
        pages: TerminalPages,
    ) -> Self {
        Self {
            engine,
            resolver,
            presentation,
            content_events,
            links,
            pages,
        }
    }

    pub fn links(&self) -> &NavigationLinks {
        &self.links
    }

    pub fn pages(&self) -> &TerminalPages {
        &self.pages
    }

    /// Resolves task content for `element` and shows the step.
    ///
    /// A failed content lookup shows the generic error page instead.
    pub async fn present_task(
        &self,
        session: &SessionHandle,
        element: ProcessElementInstance,
        location: StepLocation,
        progress: Progress,
    ) -> Result<(), CompositionError> {
        let (session_id, user_id) = {
            let s = session.lock().await;
            (s.id().clone(), s.user_id().clone())
        };

        let resolved = self
            .resolver
            .task_content(
                session,
                &user_id,
                &location.root_process_id,
                &location.process_id,
                &element.id,
            )
            .await;

        match resolved {
            Ok(content_id) => {
                self.compose(
                    session,
                    StepRequest {
                        element,
                        content_id,
                        location,
                        called_process_id: None,
                        progress,
                    },
                )
                .await
            }
            Err(e) => {
                self.show_generic_error(&session_id, &e).await;
                Ok(())
            }
        }
    }

    /// Resolves call-activity content and shows the step with a details button.
    pub async fn present_call_activity(
        &self,
        session: &SessionHandle,
        element: ProcessElementInstance,
        location: StepLocation,
        called_process_id: ProcessId,
        progress: Progress,
    ) -> Result<(), CompositionError> {
        let (session_id, user_id) = {
            let s = session.lock().await;
            (s.id().clone(), s.user_id().clone())
        };

        let resolved = self
            .resolver
            .call_activity_content(
                &user_id,
                &location.root_process_id,
                &location.process_id,
                &called_process_id,
            )
            .await;

        match resolved {
            Ok(content_id) => {
                self.compose(
                    session,
                    StepRequest {
                        element,
                        content_id,
                        location,
                        called_process_id: Some(called_process_id),
                        progress,
                    },
                )
                .await
            }
            Err(e) => {
                self.show_generic_error(&session_id, &e).await;
                Ok(())
            }
        }
    }

    /// Composes the step, records it in the history and dispatches it.
    ///
    /// Dispatch waits for the additional-content lookup. A failed lookup
    /// only drops the knowledge action.
    pub async fn compose(
        &self,
        session: &SessionHandle,
        request: StepRequest,
    ) -> Result<(), CompositionError> {
        let StepRequest {
            element,
            content_id,
            location,
            called_process_id,
            progress,
        } = request;

        let (session_id, user_id, has_history) = {
            let s = session.lock().await;
            (s.id().clone(), s.user_id().clone(), s.has_last_display())
        };
        let title = element.display_title().to_string();

        let mut builder = AssistanceStep::builder()
            .title(&title)
            .process_titles(self.process_titles(&location.process_instance_id).await)
            .progress(progress)
            .body(ContentBody::package_or_empty(content_id.as_ref()));

        if has_history {
            builder = builder.back_action(self.links.previous(1));
        }

        let history_body = match &content_id {
            Some(id) => ContentBody::Package {
                content_id: id.clone(),
            },
            None => ContentBody::Html {
                html: format!("No assistance is available for the step \"{}\".", title),
            },
        };
        let history_entry = Popup::builder()
            .title(PREVIOUS_STEP_TITLE)
            .body(history_body)
            .build()?;
        session.lock().await.record_display(history_entry);

        match &called_process_id {
            Some(called) => {
                if content_id.is_none() {
                    builder = builder.info(NO_SUMMARY_INFO);
                }
                builder = builder.button("details", DETAILS_TEXT, self.links.details(called));
            }
            None => {
                if content_id.is_none() {
                    builder = builder.info(NO_ASSISTANCE_INFO);
                }
            }
        }

        if element.has_next() {
            builder = builder.button("next", NEXT_TEXT, self.links.next());
        }
        builder = builder.close_action(self.links.close());

        match self
            .resolver
            .additional_content(
                &user_id,
                &location.root_process_id,
                &location.process_id,
                &element.id,
            )
            .await
        {
            Ok(Some(additional)) => {
                debug!(
                    session_id = %session_id,
                    element_id = %element.id,
                    content_id = %additional,
                    "Attaching additional content"
                );
                builder = builder.knowledge_action(self.links.show_additional_content(&additional));
            }
            Ok(None) => {
                debug!(session_id = %session_id, element_id = %element.id, "No additional content");
            }
            Err(e) => {
                warn!(
                    session_id = %session_id,
                    status = e.status,
                    error = %e,
                    "Failed to retrieve additional content"
                );
            }
        }

        let step = builder.build()?;
        self.deliver(session, &session_id, &step, content_id.as_ref())
            .await;
        Ok(())
    }

    /// Shows the generic error page for a downstream failure.
    pub async fn show_generic_error(&self, session_id: &SessionId, cause: &DownstreamError) {
        match self.pages.generic_error(session_id, &cause.message) {
            Ok(step) => self.dispatch(session_id, &step).await,
            Err(e) => error!(session_id = %session_id, error = %e, "Failed to build error page"),
        }
    }

    /// Shows the page for an unknown process definition.
    pub async fn show_missing_process(&self, session_id: &SessionId, process_id: &ProcessId) {
        match self.pages.missing_process(session_id, process_id) {
            Ok(step) => self.dispatch(session_id, &step).await,
            Err(e) => error!(session_id = %session_id, error = %e, "Failed to build error page"),
        }
    }

    /// Sends a step without history or content-seen bookkeeping.
    pub async fn dispatch(&self, session_id: &SessionId, step: &AssistanceStep) {
        if let Err(e) = self.presentation.display_assistance(session_id, step).await {
            warn!(
                session_id = %session_id,
                title = step.title(),
                status = e.status,
                error = %e,
                "Failed to display assistance step"
            );
        }
    }

    async fn deliver(
        &self,
        session: &SessionHandle,
        session_id: &SessionId,
        step: &AssistanceStep,
        content_id: Option<&ContentId>,
    ) {
        if let Err(e) = self.presentation.display_assistance(session_id, step).await {
            warn!(
                session_id = %session_id,
                status = e.status,
                error = %e,
                "Failed to update content display"
            );
            return;
        }

        let Some(content_id) = content_id else {
            return;
        };
        let token = session.lock().await.token().clone();
        if let Err(e) = self
            .content_events
            .content_seen(session_id, &token, content_id)
            .await
        {
            warn!(
                session_id = %session_id,
                content_id = %content_id,
                error = %e,
                "Failed to publish content seen"
            );
        }
    }

    async fn process_titles(&self, instance_id: &ProcessInstanceId) -> Vec<String> {
        self.engine
            .process_tree(instance_id)
            .await
            .into_iter()
            .map(|node| {
                node.definition
                    .map(|d| d.label)
                    .unwrap_or_else(|| UNKNOWN_PROCESS_TITLE.to_string())
            })
            .collect()
    }
}
