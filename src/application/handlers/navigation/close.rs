//! CloseHandler - Cancels the running process and closes the display.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{info, warn};

use super::session_for_command;
use crate::domain::foundation::SessionId;
use crate::domain::session::NavigationError;
use crate::ports::{PresentationChannel, ProcessEngine, SessionStore};

/// Command to abort assistance.
#[derive(Debug, Clone)]
pub struct CloseCommand {
    pub session_id: SessionId,
    pub token: SecretString,
}

/// Handler for close commands.
pub struct CloseHandler {
    store: Arc<dyn SessionStore>,
    engine: Arc<dyn ProcessEngine>,
    presentation: Arc<dyn PresentationChannel>,
}

impl CloseHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        engine: Arc<dyn ProcessEngine>,
        presentation: Arc<dyn PresentationChannel>,
    ) -> Self {
        Self {
            store,
            engine,
            presentation,
        }
    }

    /// Cancels the active instance; the display is closed whatever happens.
    pub async fn handle(&self, cmd: CloseCommand) -> Result<(), NavigationError> {
        let session = session_for_command(self.store.as_ref(), &cmd.session_id, cmd.token).await?;
        let instance_id = session.lock().await.active_instance_id().cloned();

        let result = match &instance_id {
            Some(instance_id) => self
                .engine
                .cancel(instance_id, &cmd.session_id)
                .await
                .map_err(|e| {
                    warn!(
                        session_id = %cmd.session_id,
                        process_instance_id = %instance_id,
                        status = e.status,
                        error = %e,
                        "Failed to cancel process"
                    );
                    NavigationError::from(e)
                }),
            None => Err(NavigationError::no_process_running()),
        };

        if let Err(e) = self.presentation.end_display(&cmd.session_id).await {
            warn!(session_id = %cmd.session_id, error = %e, "Failed to end display");
        }

        if result.is_ok() {
            info!(session_id = %cmd.session_id, "Assistance closed by user");
        }
        result
    }
}
