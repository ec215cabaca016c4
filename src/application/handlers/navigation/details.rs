//! DetailsHandler - Steps into the sub-process behind a call activity.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{info, warn};

use super::session_for_command;
use crate::application::compositor::{AssistanceCompositor, StepLocation};
use crate::domain::foundation::{ProcessId, Progress, SessionId};
use crate::domain::session::NavigationError;
use crate::ports::{DownstreamError, ProcessEngine, SessionStore};

/// Command to open the detailed steps of a call activity.
#[derive(Debug, Clone)]
pub struct DetailsCommand {
    pub session_id: SessionId,
    pub token: SecretString,
    pub activity_process_id: ProcessId,
}

/// Handler for details commands.
pub struct DetailsHandler {
    store: Arc<dyn SessionStore>,
    engine: Arc<dyn ProcessEngine>,
    compositor: Arc<AssistanceCompositor>,
}

impl DetailsHandler {
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

    /// Enters the sub-process and presents its first step.
    ///
    /// Presentation runs after the engine has confirmed the call activity.
    /// An error from composing the step is still returned (as a 500), but
    /// the engine has already moved on and the session stays in the
    /// sub-process. A failed content lookup shows the generic error page
    /// and answers 200.
    pub async fn handle(&self, cmd: DetailsCommand) -> Result<(), NavigationError> {
        let session = session_for_command(self.store.as_ref(), &cmd.session_id, cmd.token).await?;

        let instance_id = {
            let s = session.lock().await;
            match (s.active_instance_id(), s.active_element()) {
                (Some(_), Some(element)) if !element.is_call_activity() => {
                    return Err(NavigationError::operation_not_available());
                }
                (Some(instance_id), Some(_)) => instance_id.clone(),
                _ => return Err(NavigationError::no_process_running()),
            }
        };

        let definition = self
            .engine
            .get_process_definition(&cmd.activity_process_id)
            .await
            .map_err(|e| self.failed(&cmd.session_id, "retrieve process definition", e))?;

        let sub_instance = self
            .engine
            .confirm(&instance_id, &cmd.session_id)
            .await
            .map_err(|e| self.failed(&cmd.session_id, "confirm call activity", e))?;
        let sub_instance_id = sub_instance.id.clone();
        session.lock().await.set_active_instance(sub_instance);

        let element = self
            .engine
            .current_element(&sub_instance_id, &cmd.session_id)
            .await
            .map_err(|e| self.failed(&cmd.session_id, "retrieve current element", e))?;

        {
            let mut s = session.lock().await;
            s.set_active_element(element.clone());
            s.set_progress(Progress::ZERO);
        }

        info!(
            session_id = %cmd.session_id,
            process_instance_id = %sub_instance_id,
            element_id = %element.id,
            "Entered call activity"
        );

        let location = StepLocation {
            process_id: definition.id.clone(),
            process_instance_id: sub_instance_id,
            root_process_id: definition.id,
        };
        self.compositor
            .present_task(&session, element, location, Progress::ZERO)
            .await?;
        Ok(())
    }

    fn failed(&self, session_id: &SessionId, step: &str, err: DownstreamError) -> NavigationError {
        warn!(
            session_id = %session_id,
            status = err.status,
            error = %err,
            "Failed to {}", step
        );
        NavigationError::internal(err.message)
    }
}
