//! ConfirmHandler - Starts a follow-up process in an existing session.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{info, warn};

use super::session_for_command;
use crate::domain::foundation::{ProcessId, SessionId};
use crate::domain::session::NavigationError;
use crate::ports::{ProcessEngine, SessionStore};

/// Command to confirm a process for the session.
#[derive(Debug, Clone)]
pub struct ConfirmCommand {
    pub session_id: SessionId,
    pub token: SecretString,
    pub process_id: ProcessId,
}

/// Handler for confirm commands.
pub struct ConfirmHandler {
    store: Arc<dyn SessionStore>,
    engine: Arc<dyn ProcessEngine>,
}

impl ConfirmHandler {
    pub fn new(store: Arc<dyn SessionStore>, engine: Arc<dyn ProcessEngine>) -> Self {
        Self { store, engine }
    }

    /// Instantiates `process_id` carrying over the active instance's context.
    pub async fn handle(&self, cmd: ConfirmCommand) -> Result<(), NavigationError> {
        let session = session_for_command(self.store.as_ref(), &cmd.session_id, cmd.token).await?;

        let (user_id, context) = {
            let s = session.lock().await;
            let context = s
                .active_instance()
                .map(|i| i.context.clone())
                .unwrap_or_default();
            (s.user_id().clone(), context)
        };

        let instance = self
            .engine
            .instantiate_process(&cmd.process_id, &cmd.session_id, &user_id, &context)
            .await
            .map_err(|e| {
                warn!(
                    session_id = %cmd.session_id,
                    process_id = %cmd.process_id,
                    error = %e,
                    "Failed to instantiate process"
                );
                NavigationError::instantiation_failed()
            })?;

        info!(
            session_id = %cmd.session_id,
            process_instance_id = %instance.id,
            "Confirmed process"
        );
        session.lock().await.set_active_instance(instance);
        Ok(())
    }
}
