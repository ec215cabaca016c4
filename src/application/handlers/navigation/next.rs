//! NextHandler - Advances the active instance.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, warn};

use super::session_for_command;
use crate::application::compositor::AssistanceCompositor;
use crate::domain::foundation::{ElementId, SessionId};
use crate::domain::session::NavigationError;
use crate::ports::{ProcessEngine, SessionStore};

/// Command to move on from the current element.
#[derive(Debug, Clone)]
pub struct NextCommand {
    pub session_id: SessionId,
    pub token: SecretString,
    /// Outgoing element picked by the user, if the step offered a choice.
    pub element_id: Option<ElementId>,
}

/// Handler for next commands.
pub struct NextHandler {
    store: Arc<dyn SessionStore>,
    engine: Arc<dyn ProcessEngine>,
    compositor: Arc<AssistanceCompositor>,
}

impl NextHandler {
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

    pub async fn handle(&self, cmd: NextCommand) -> Result<(), NavigationError> {
        let session = session_for_command(self.store.as_ref(), &cmd.session_id, cmd.token).await?;

        let (instance_id, has_next) = {
            let s = session.lock().await;
            match (s.active_instance_id(), s.active_element()) {
                (Some(instance_id), Some(element)) => (instance_id.clone(), element.has_next()),
                _ => return Err(NavigationError::no_process_running()),
            }
        };

        if !has_next {
            debug!(session_id = %cmd.session_id, "Current element has no outgoing flow");
            return Ok(());
        }

        if let Err(e) = self
            .engine
            .next(&instance_id, &cmd.session_id, cmd.element_id.as_ref())
            .await
        {
            warn!(
                session_id = %cmd.session_id,
                process_instance_id = %instance_id,
                status = e.status,
                error = %e,
                "Failed to advance process"
            );
            self.compositor
                .show_generic_error(&cmd.session_id, &e)
                .await;
            return Err(e.into());
        }
        Ok(())
    }
}
