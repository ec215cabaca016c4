//! StartSupportHandler - Opens a session and starts an assistance process.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{info, warn};

use crate::application::compositor::AssistanceCompositor;
use crate::domain::foundation::{ProcessId, SessionId};
use crate::domain::process::ProcessContext;
use crate::domain::session::NavigationError;
use crate::ports::{IdentityService, ProcessEngine, SessionStore};

/// Command to start guided support for a process.
#[derive(Debug, Clone)]
pub struct StartSupportCommand {
    pub session_id: SessionId,
    pub token: SecretString,
    pub process_id: ProcessId,
    /// Caller supplied context; wins over the engine's on conflicts.
    pub context: ProcessContext,
}

/// Handler for starting support.
pub struct StartSupportHandler {
    store: Arc<dyn SessionStore>,
    identity: Arc<dyn IdentityService>,
    engine: Arc<dyn ProcessEngine>,
    compositor: Arc<AssistanceCompositor>,
}

impl StartSupportHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        identity: Arc<dyn IdentityService>,
        engine: Arc<dyn ProcessEngine>,
        compositor: Arc<AssistanceCompositor>,
    ) -> Self {
        Self {
            store,
            identity,
            engine,
            compositor,
        }
    }

    pub async fn handle(&self, cmd: StartSupportCommand) -> Result<(), NavigationError> {
        // 1. Resolve the platform session behind the client token
        let identity = self
            .identity
            .get_session(&cmd.session_id, &cmd.token)
            .await
            .map_err(|e| NavigationError::internal(e.message))?;

        // 2. Register the local session
        let session_id = identity.session_id.clone();
        let session = self
            .store
            .create(session_id.clone(), identity.user_id.clone(), cmd.token)
            .await;

        // 3. Make sure the engine knows the process
        if let Err(e) = self.engine.get_process_definition(&cmd.process_id).await {
            warn!(
                session_id = %session_id,
                process_id = %cmd.process_id,
                status = e.status,
                error = %e,
                "Failed to retrieve process definition"
            );
            if e.is_not_found() {
                self.compositor
                    .show_missing_process(&session_id, &cmd.process_id)
                    .await;
            } else {
                self.compositor.show_generic_error(&session_id, &e).await;
            }
            self.store.remove(&session_id).await;
            return Err(e.into());
        }

        // 4. Start the process
        let mut instance = self
            .engine
            .instantiate_process(
                &cmd.process_id,
                &session_id,
                &identity.user_id,
                &cmd.context,
            )
            .await
            .map_err(|e| {
                warn!(
                    session_id = %session_id,
                    process_id = %cmd.process_id,
                    error = %e,
                    "Failed to instantiate process"
                );
                NavigationError::instantiation_failed()
            })?;
        instance.merge_context(&cmd.context);

        info!(
            session_id = %session_id,
            process_id = %cmd.process_id,
            process_instance_id = %instance.id,
            "Support started"
        );
        session.lock().await.set_active_instance(instance);
        Ok(())
    }
}
