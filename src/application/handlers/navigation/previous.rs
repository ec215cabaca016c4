//! PreviousHandler - Replays an earlier display from the session history.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, warn};

use super::session_for_command;
use crate::domain::foundation::SessionId;
use crate::domain::presentation::{NavigationLinks, PopupButton};
use crate::domain::session::NavigationError;
use crate::ports::{PresentationChannel, SessionStore};

pub const PREVIOUS_STEP_TEXT: &str = "Previous step";
pub const NEXT_STEP_TEXT: &str = "Next step";

/// Command to show history entry `index` (0 is the current display).
#[derive(Debug, Clone)]
pub struct PreviousCommand {
    pub session_id: SessionId,
    pub token: SecretString,
    /// Raw index as posted; missing or negative values are ignored.
    pub index: Option<i64>,
}

/// Handler for history navigation.
pub struct PreviousHandler {
    store: Arc<dyn SessionStore>,
    presentation: Arc<dyn PresentationChannel>,
    links: NavigationLinks,
}

impl PreviousHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        presentation: Arc<dyn PresentationChannel>,
        links: NavigationLinks,
    ) -> Self {
        Self {
            store,
            presentation,
            links,
        }
    }

    pub async fn handle(&self, cmd: PreviousCommand) -> Result<(), NavigationError> {
        let session = session_for_command(self.store.as_ref(), &cmd.session_id, cmd.token).await?;

        let Some(index) = cmd.index.and_then(|i| usize::try_from(i).ok()) else {
            debug!(session_id = %cmd.session_id, index = ?cmd.index, "Ignoring history index");
            return Ok(());
        };

        let popup = {
            let s = session.lock().await;
            let Some(entry) = s.display_from_history(index) else {
                debug!(session_id = %cmd.session_id, index, "History index beyond depth");
                return Ok(());
            };

            let mut buttons = Vec::new();
            if s.display_from_history(index + 1).is_some() {
                buttons.push(PopupButton::new(
                    PREVIOUS_STEP_TEXT,
                    self.links.previous(index + 1),
                ));
            }
            if index > 1 {
                buttons.push(PopupButton::new(NEXT_STEP_TEXT, self.links.previous(index - 1)));
            }
            entry.with_buttons(buttons)
        };

        if let Err(e) = self
            .presentation
            .display_popup(&cmd.session_id, &popup)
            .await
        {
            warn!(
                session_id = %cmd.session_id,
                index,
                error = %e,
                "Failed to display previous step"
            );
        }
        Ok(())
    }
}
