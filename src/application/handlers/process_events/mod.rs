//! Process engine event handlers.
//!
//! Engine callbacks never report back to the engine. Failures are logged
//! and, where the user has a display, shown as an error step.

mod automated_flow;
mod call_activity;
mod lifecycle;
mod task_progress;
mod user_request;

pub use automated_flow::AutomatedFlowHandler;
pub use call_activity::CallActivityHandler;
pub use lifecycle::ProcessLifecycleHandler;
pub use task_progress::TaskProgressHandler;
pub use user_request::UserRequestHandler;

use std::sync::Arc;

use tracing::{debug, error};

use crate::application::compositor::AssistanceCompositor;
use crate::domain::process::EngineEvent;
use crate::ports::{
    ExperienceService, PresentationChannel, ProcessEngine, SessionStore,
};

/// Routes engine events to their handlers.
pub struct ProcessEventRouter {
    task_progress: TaskProgressHandler,
    user_request: UserRequestHandler,
    automated_flow: AutomatedFlowHandler,
    call_activity: CallActivityHandler,
    lifecycle: ProcessLifecycleHandler,
}

impl ProcessEventRouter {
    pub fn new(
        store: Arc<dyn SessionStore>,
        engine: Arc<dyn ProcessEngine>,
        experience: Arc<dyn ExperienceService>,
        presentation: Arc<dyn PresentationChannel>,
        compositor: Arc<AssistanceCompositor>,
    ) -> Self {
        Self {
            task_progress: TaskProgressHandler::new(
                store.clone(),
                engine.clone(),
                compositor.clone(),
            ),
            user_request: UserRequestHandler::new(store.clone(), compositor.clone()),
            automated_flow: AutomatedFlowHandler::new(engine.clone(), presentation),
            call_activity: CallActivityHandler::new(
                store.clone(),
                engine.clone(),
                experience,
                compositor.clone(),
            ),
            lifecycle: ProcessLifecycleHandler::new(store, engine, compositor),
        }
    }

    /// Handles one event to completion.
    pub async fn dispatch(&self, event: EngineEvent) {
        let session_id = event.session_id().clone();
        let kind = event.kind();
        debug!(session_id = %session_id, kind, "Handling engine event");

        let result = match event {
            EngineEvent::Task(e) => self.task_progress.handle(e).await,
            EngineEvent::UserRequest(e) => self.user_request.handle(e).await,
            EngineEvent::AutomatedFlow(e) => {
                self.automated_flow.handle(e).await;
                Ok(())
            }
            EngineEvent::CallActivity(e) => self.call_activity.handle(e).await,
            EngineEvent::ProcessComplete(e) => self.lifecycle.complete(e).await,
            EngineEvent::ProcessError(e) => self.lifecycle.error(e).await,
            EngineEvent::ProcessTerminate(e) => self.lifecycle.terminate(e).await,
        };

        if let Err(e) = result {
            error!(session_id = %session_id, kind, error = %e, "Failed to handle engine event");
        }
    }
}
