//! AutomatedFlowHandler - Picks a branch on the user's behalf.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::presentation::UserActivity;
use crate::domain::process::AutomatedFlowEvent;
use crate::ports::{PresentationChannel, ProcessEngine};

/// Handler for automated-flow events. Best effort: failures are only logged.
pub struct AutomatedFlowHandler {
    engine: Arc<dyn ProcessEngine>,
    presentation: Arc<dyn PresentationChannel>,
}

impl AutomatedFlowHandler {
    pub fn new(engine: Arc<dyn ProcessEngine>, presentation: Arc<dyn PresentationChannel>) -> Self {
        Self {
            engine,
            presentation,
        }
    }

    pub async fn handle(&self, event: AutomatedFlowEvent) {
        let instance = match self
            .engine
            .get_process_instance(&event.process_instance_id)
            .await
        {
            Ok(instance) => instance,
            Err(e) => {
                warn!(
                    session_id = %event.session_id,
                    process_instance_id = %event.process_instance_id,
                    error = %e,
                    "Failed to retrieve process instance to perform automated flow"
                );
                return;
            }
        };

        let activity = match self.presentation.user_activity(&event.session_id).await {
            Ok(activity) => activity,
            Err(e) => {
                warn!(
                    session_id = %event.session_id,
                    error = %e,
                    "Failed to retrieve user activity to perform automated flow"
                );
                return;
            }
        };

        let target = match (activity, &event.default) {
            (UserActivity::Side, Some(default)) => {
                debug!(
                    session_id = %event.session_id,
                    element_id = %default,
                    "User is in side activity; taking default flow"
                );
                Some(default.clone())
            }
            _ => {
                let selected = event.condition.element_for_context(&instance.context);
                debug!(
                    session_id = %event.session_id,
                    field = %event.condition.field,
                    element_id = ?selected,
                    "Evaluated automated flow condition"
                );
                selected
            }
        };

        if let Err(e) = self
            .engine
            .next(&event.process_instance_id, &event.session_id, target.as_ref())
            .await
        {
            warn!(
                session_id = %event.session_id,
                process_instance_id = %event.process_instance_id,
                error = %e,
                "Failed to continue process with automated flow"
            );
        }
    }
}
