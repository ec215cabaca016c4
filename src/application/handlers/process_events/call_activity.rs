//! CallActivityHandler - Summarizes or enters a called sub-process.
//!
//! Experienced users get a single summary step for the whole sub-process
//! (with a details button to step in anyway). Everyone else is taken into
//! the sub-process right away.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::compositor::{AssistanceCompositor, CompositionError, StepLocation};
use crate::domain::process::CallActivityEvent;
use crate::ports::{ExperienceService, ProcessEngine, SessionHandle, SessionStore};

/// Handler for call-activity events.
pub struct CallActivityHandler {
    store: Arc<dyn SessionStore>,
    engine: Arc<dyn ProcessEngine>,
    experience: Arc<dyn ExperienceService>,
    compositor: Arc<AssistanceCompositor>,
}

impl CallActivityHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        engine: Arc<dyn ProcessEngine>,
        experience: Arc<dyn ExperienceService>,
        compositor: Arc<AssistanceCompositor>,
    ) -> Self {
        Self {
            store,
            engine,
            experience,
            compositor,
        }
    }

    pub async fn handle(&self, event: CallActivityEvent) -> Result<(), CompositionError> {
        let Some(session) = self.store.get(&event.session_id).await else {
            debug!(session_id = %event.session_id, "Call activity for unknown session");
            return Ok(());
        };

        let (user_id, token) = {
            let s = session.lock().await;
            (s.user_id().clone(), s.token().clone())
        };
        let experienced = self
            .experience
            .is_experienced(&event.session_id, &event.activity_process_id, &user_id, &token)
            .await
            .unwrap_or_else(|e| {
                warn!(
                    session_id = %event.session_id,
                    process_id = %event.activity_process_id,
                    error = %e,
                    "Experience check failed; assuming inexperienced user"
                );
                false
            });

        if experienced {
            self.summarize(&session, event).await
        } else {
            self.enter(&session, event).await;
            Ok(())
        }
    }

    async fn summarize(
        &self,
        session: &SessionHandle,
        event: CallActivityEvent,
    ) -> Result<(), CompositionError> {
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

        debug!(
            session_id = %event.session_id,
            activity_process_id = %event.activity_process_id,
            "Summarizing call activity for experienced user"
        );
        let location = StepLocation {
            process_id: event.process_id,
            process_instance_id: event.process_instance_id,
            root_process_id: event.root_process_id,
        };
        self.compositor
            .present_call_activity(
                session,
                element,
                location,
                event.activity_process_id,
                progress,
            )
            .await
    }

    async fn enter(&self, session: &SessionHandle, event: CallActivityEvent) {
        let sub_instance = match self
            .engine
            .confirm(&event.process_instance_id, &event.session_id)
            .await
        {
            Ok(instance) => instance,
            Err(e) => {
                self.compositor
                    .show_generic_error(&event.session_id, &e)
                    .await;
                return;
            }
        };
        let sub_instance_id = sub_instance.id.clone();
        session.lock().await.set_active_instance(sub_instance);

        match self
            .engine
            .current_element(&sub_instance_id, &event.session_id)
            .await
        {
            Ok(element) => {
                info!(
                    session_id = %event.session_id,
                    process_instance_id = %sub_instance_id,
                    element_id = %element.id,
                    "Entered called process"
                );
                let mut s = session.lock().await;
                s.set_active_element(element);
                s.set_progress(event.progress());
            }
            Err(e) => {
                self.compositor
                    .show_generic_error(&event.session_id, &e)
                    .await;
            }
        }
    }
}
