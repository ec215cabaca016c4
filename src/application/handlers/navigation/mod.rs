//! Navigation command handlers.
//!
//! Commands the user's client posts back to this service. Every command
//! except start-support addresses an existing session; the client token it
//! carries replaces the one stored on the session.

mod close;
mod confirm;
mod details;
mod next;
mod popups;
mod previous;
mod start_support;

pub use close::{CloseCommand, CloseHandler};
pub use confirm::{ConfirmCommand, ConfirmHandler};
pub use details::{DetailsCommand, DetailsHandler};
pub use next::{NextCommand, NextHandler};
pub use popups::{
    PopupHandler, ShowAdditionalContentCommand, ShowContactsCommand, ADDITIONAL_CONTENT_TITLE,
};
pub use previous::{PreviousCommand, PreviousHandler, NEXT_STEP_TEXT, PREVIOUS_STEP_TEXT};
pub use start_support::{StartSupportCommand, StartSupportHandler};

use secrecy::SecretString;

use crate::domain::foundation::SessionId;
use crate::domain::session::NavigationError;
use crate::ports::{SessionHandle, SessionStore};

/// Looks up the addressed session and stores the command's token on it.
pub(crate) async fn session_for_command(
    store: &dyn SessionStore,
    session_id: &SessionId,
    token: SecretString,
) -> Result<SessionHandle, NavigationError> {
    let handle = store
        .get(session_id)
        .await
        .ok_or(NavigationError::UnknownSession)?;
    handle.lock().await.set_token(token);
    Ok(handle)
}
