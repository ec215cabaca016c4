//! UserRequestHandler - Lets the user pick the outgoing flow.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::compositor::{AssistanceCompositor, CompositionError};
use crate::domain::foundation::ElementId;
use crate::domain::presentation::{AssistanceStep, ContentBody};
use crate::domain::process::UserRequestEvent;
use crate::ports::SessionStore;

/// Handler for user-request events.
pub struct UserRequestHandler {
    store: Arc<dyn SessionStore>,
    compositor: Arc<AssistanceCompositor>,
}

impl UserRequestHandler {
    pub fn new(store: Arc<dyn SessionStore>, compositor: Arc<AssistanceCompositor>) -> Self {
        Self { store, compositor }
    }

    /// Shows one `select-<n>` button per option, in the order the engine sent them.
    pub async fn handle(&self, event: UserRequestEvent) -> Result<(), CompositionError> {
        let Some(session) = self.store.get(&event.session_id).await else {
            debug!(session_id = %event.session_id, "User request for unknown session");
            return Ok(());
        };

        let (title, progress) = {
            let s = session.lock().await;
            let Some(element) = s.active_element() else {
                warn!(session_id = %event.session_id, "User request without active element");
                return Ok(());
            };
            (element.display_title().to_string(), s.progress())
        };

        let mut builder = AssistanceStep::builder()
            .title(title)
            .progress(progress)
            .body(ContentBody::Empty);
        if let Some(message) = &event.message {
            builder = builder.info(message);
        }
        for (i, (option, text)) in event.options.iter().enumerate() {
            let element_id = ElementId::new(option.as_str())?;
            builder = builder.button(
                format!("select-{}", i),
                text,
                self.compositor.links().next_to(&element_id),
            );
        }

        let step = builder.build()?;
        self.compositor.dispatch(&event.session_id, &step).await;
        Ok(())
    }
}
