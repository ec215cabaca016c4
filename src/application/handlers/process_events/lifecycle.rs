//! ProcessLifecycleHandler - Completion, failure and termination of processes.
//!
//! Only events for the session's active instance count. A completed
//! sub-process hands control back to its parent; any other end of the
//! active instance shows a terminal step and drops the session.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::compositor::{AssistanceCompositor, CompositionError};
use crate::application::error_pages::UNKNOWN_PROCESS_TITLE;
use crate::domain::foundation::{
    ProcessId, ProcessInstanceId, SessionId, Timestamp, ValidationError,
};
use crate::domain::presentation::AssistanceStep;
use crate::domain::process::{ProcessCompleteEvent, ProcessErrorEvent, ProcessTerminateEvent};
use crate::ports::{ProcessEngine, SessionHandle, SessionStore};

/// Handler for the end-of-process events.
pub struct ProcessLifecycleHandler {
    store: Arc<dyn SessionStore>,
    engine: Arc<dyn ProcessEngine>,
    compositor: Arc<AssistanceCompositor>,
}

impl ProcessLifecycleHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        engine: Arc<dyn ProcessEngine>,
        compositor: Arc<AssistanceCompositor>,
    ) -> Self {
        Self {
            store,
            engine,
            compositor,
        }
    }

    pub async fn complete(&self, event: ProcessCompleteEvent) -> Result<(), CompositionError> {
        let Some((session, active_process)) = self
            .active_session(&event.session_id, &event.process_instance_id)
            .await
        else {
            return Ok(());
        };

        if let Some(parent_id) = &event.parent_instance {
            self.resume_parent(&session, &event.session_id, parent_id)
                .await;
            return Ok(());
        }

        let title = self.process_title(&active_process).await;
        let step = self.compositor.pages().completed(
            &event.session_id,
            &event.user_id,
            &event.process_id,
            &title,
        );
        info!(session_id = %event.session_id, process_id = %event.process_id, "Process completed");
        self.finish(&event.session_id, step).await
    }

    pub async fn error(&self, event: ProcessErrorEvent) -> Result<(), CompositionError> {
        let Some((_, active_process)) = self
            .active_session(&event.session_id, &event.process_instance_id)
            .await
        else {
            return Ok(());
        };

        warn!(
            session_id = %event.session_id,
            process_instance_id = %event.process_instance_id,
            error_code = event.error_code,
            error = %event.error_message,
            "Process failed"
        );
        let title = self.process_title(&active_process).await;
        let step = self.compositor.pages().process_error(
            &event.session_id,
            &title,
            &event.error_message,
        );
        self.finish(&event.session_id, step).await
    }

    pub async fn terminate(&self, event: ProcessTerminateEvent) -> Result<(), CompositionError> {
        let Some((_, active_process)) = self
            .active_session(&event.session_id, &event.process_instance_id)
            .await
        else {
            return Ok(());
        };

        info!(
            session_id = %event.session_id,
            process_instance_id = %event.process_instance_id,
            "Process terminated"
        );
        let title = self.process_title(&active_process).await;
        let step = self.compositor.pages().terminated(&event.session_id, &title);
        self.finish(&event.session_id, step).await
    }

    /// Returns the session and its active process if `instance_id` is active.
    async fn active_session(
        &self,
        session_id: &SessionId,
        instance_id: &ProcessInstanceId,
    ) -> Option<(SessionHandle, ProcessId)> {
        let session = self.store.get(session_id).await?;
        let active_process = {
            let s = session.lock().await;
            match s.active_instance() {
                Some(active) if &active.id == instance_id => active.process_id.clone(),
                _ => {
                    debug!(
                        session_id = %session_id,
                        process_instance_id = %instance_id,
                        "Ignoring event for inactive instance"
                    );
                    return None;
                }
            }
        };
        Some((session, active_process))
    }

    async fn resume_parent(
        &self,
        session: &SessionHandle,
        session_id: &SessionId,
        parent_id: &ProcessInstanceId,
    ) {
        match self.engine.cached_process_instance(parent_id).await {
            Some(parent) => session.lock().await.set_active_instance(parent),
            None => warn!(
                session_id = %session_id,
                process_instance_id = %parent_id,
                "Parent instance unknown; continuing without activating it"
            ),
        }

        if let Err(e) = self.engine.next(parent_id, session_id, None).await {
            warn!(
                session_id = %session_id,
                process_instance_id = %parent_id,
                error = %e,
                "Failed to continue parent process"
            );
        }
    }

    async fn process_title(&self, process_id: &ProcessId) -> String {
        self.engine
            .cached_process_definition(process_id)
            .await
            .map(|d| d.label)
            .unwrap_or_else(|| UNKNOWN_PROCESS_TITLE.to_string())
    }

    /// Drops the session and logs how long it lasted, then shows the terminal step.
    async fn finish(
        &self,
        session_id: &SessionId,
        step: Result<AssistanceStep, ValidationError>,
    ) -> Result<(), CompositionError> {
        if let Some(session) = self.store.remove(session_id).await {
            let duration = session.lock().await.duration_until(&Timestamp::now());
            info!(
                session_id = %session_id,
                duration_secs = duration.num_seconds(),
                "Session ended"
            );
        }
        let step = step?;
        self.compositor.dispatch(session_id, &step).await;
        Ok(())
    }
}
