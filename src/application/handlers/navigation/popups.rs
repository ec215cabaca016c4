//! PopupHandler - Contacts and additional-content popups.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::foundation::{ContentId, SessionId};
use crate::domain::presentation::{ContentBody, Popup};
use crate::domain::session::NavigationError;
use crate::ports::{PresentationChannel, SessionStore};

pub const ADDITIONAL_CONTENT_TITLE: &str = "Further content";

/// Command to show the session's contacts popup.
#[derive(Debug, Clone)]
pub struct ShowContactsCommand {
    pub session_id: SessionId,
}

/// Command to show a piece of additional content.
#[derive(Debug, Clone)]
pub struct ShowAdditionalContentCommand {
    pub session_id: SessionId,
    /// Raw content id as posted.
    pub content_id: Option<String>,
}

/// Handler for popups opened from a step's side actions.
pub struct PopupHandler {
    store: Arc<dyn SessionStore>,
    presentation: Arc<dyn PresentationChannel>,
}

impl PopupHandler {
    pub fn new(store: Arc<dyn SessionStore>, presentation: Arc<dyn PresentationChannel>) -> Self {
        Self {
            store,
            presentation,
        }
    }

    /// Shows the cached contacts popup, if the session has one. Never fails.
    pub async fn show_contacts(&self, cmd: ShowContactsCommand) {
        let Some(session) = self.store.get(&cmd.session_id).await else {
            debug!(session_id = %cmd.session_id, "Contacts requested for unknown session");
            return;
        };
        let Some(popup) = session.lock().await.contacts_popup().cloned() else {
            debug!(session_id = %cmd.session_id, "No contacts available");
            return;
        };

        if let Err(e) = self
            .presentation
            .display_popup(&cmd.session_id, &popup)
            .await
        {
            warn!(session_id = %cmd.session_id, error = %e, "Failed to display contacts");
        }
    }

    pub async fn show_additional_content(
        &self,
        cmd: ShowAdditionalContentCommand,
    ) -> Result<(), NavigationError> {
        if self.store.get(&cmd.session_id).await.is_none() {
            return Err(NavigationError::UnknownSession);
        }
        let content_id = cmd
            .content_id
            .and_then(|id| ContentId::new(id).ok())
            .ok_or_else(NavigationError::missing_content_id)?;

        let popup = Popup::builder()
            .title(ADDITIONAL_CONTENT_TITLE)
            .body(ContentBody::Package { content_id })
            .build()?;

        if let Err(e) = self
            .presentation
            .display_popup(&cmd.session_id, &popup)
            .await
        {
            warn!(
                session_id = %cmd.session_id,
                error = %e,
                "Failed to display additional content"
            );
        }
        Ok(())
    }
}
