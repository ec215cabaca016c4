//! TaskProgressHandler - Shows the step the engine just reached.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::compositor::{AssistanceCompositor, CompositionError, StepLocation};
use crate::domain::process::TaskEvent;
use crate::ports::{ProcessEngine, SessionStore};

/// Handler for task events.
pub struct TaskProgressHandler {
    store: Arc<dyn SessionStore>,
    engine: Arc<dyn ProcessEngine>,
    compositor: Arc<AssistanceCompositor>,
}

impl TaskProgressHandler {
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

    pub async fn handle(&self, event: TaskEvent) -> Result<(), CompositionError> {
        if event.is_service_task() {
            debug!(session_id = %event.session_id, "Ignoring service task notification");
            return Ok(());
        }
        let Some(session) = self.store.get(&event.session_id).await else {
            debug!(session_id = %event.session_id, "Task event for unknown session");
            return Ok(());
        };

        let Some(element) = self
            .engine
            .cached_element_instance(&event.process_instance_id, &event.element_id)
            .await
        else {
            warn!(
                session_id = %event.session_id,
                process_instance_id = %event.process_instance_id,
                element_id = %event.element_id,
                "Unknown element instance"
            );
            return Ok(());
        };

        let progress = event.progress();
        {
            let mut s = session.lock().await;
            s.set_active_element(element.clone());
            s.set_progress(progress);
        }

        let location = StepLocation {
            process_id: event.process_id,
            process_instance_id: event.process_instance_id,
            root_process_id: event.root_process_id,
        };
        self.compositor
            .present_task(&session, element, location, progress)
            .await
    }
}
