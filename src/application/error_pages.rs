//! Terminal-looking steps for the end of a session and for fatal failures.
//!
//! Every page here runs at full progress and closes the display through the
//! end-display message rather than a call back into this service.

use crate::domain::foundation::{ProcessId, Progress, SessionId, UserId, ValidationError};
use crate::domain::presentation::{AssistanceStep, ContentBody, DisplayActions};

pub const GENERIC_ERROR_TITLE: &str = "General error";
pub const MISSING_PROCESS_TITLE: &str = "Instructions not found";
pub const TERMINATED_INFO: &str = "No further assistance is available for this process.";
pub const UNKNOWN_PROCESS_TITLE: &str = "[Unknown process]";

const CLOSE_TEXT: &str = "Close";
const CONTACT_TEXT: &str = "Contact technician";

/// Builds terminal assistance steps.
#[derive(Debug, Clone)]
pub struct TerminalPages {
    actions: DisplayActions,
}

impl TerminalPages {
    pub fn new(actions: DisplayActions) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &DisplayActions {
        &self.actions
    }

    /// Page for an unexpected downstream failure.
    pub fn generic_error(
        &self,
        session_id: &SessionId,
        message: &str,
    ) -> Result<AssistanceStep, ValidationError> {
        let close = self.actions.end_display(session_id);
        AssistanceStep::builder()
            .title(GENERIC_ERROR_TITLE)
            .info(format!("A general error occurred: {}", message))
            .body(ContentBody::Empty)
            .progress(Progress::COMPLETE)
            .close_action(close.clone())
            .button("close", CLOSE_TEXT, close)
            .build()
    }

    /// Page for a support request naming a process the engine does not know.
    pub fn missing_process(
        &self,
        session_id: &SessionId,
        process_id: &ProcessId,
    ) -> Result<AssistanceStep, ValidationError> {
        let close = self.actions.end_display(session_id);
        AssistanceStep::builder()
            .title(MISSING_PROCESS_TITLE)
            .info(format!(
                "The instructions \"{}\" could not be found. Please notify the system administrator.",
                process_id
            ))
            .body(ContentBody::Empty)
            .progress(Progress::COMPLETE)
            .close_action(close.clone())
            .button("close", CLOSE_TEXT, close)
            .build()
    }

    /// Final page of a top-level process, embedding the feedback form.
    pub fn completed(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
        process_id: &ProcessId,
        title: &str,
    ) -> Result<AssistanceStep, ValidationError> {
        let close = self.actions.end_display(session_id);
        AssistanceStep::builder()
            .title(title)
            .progress(Progress::COMPLETE)
            .body(ContentBody::Frame {
                url: self
                    .actions
                    .feedback_form_url(session_id, user_id, process_id),
            })
            .close_action(close.clone())
            .button("close", CLOSE_TEXT, close)
            .build()
    }

    /// Page for a process the engine reported as failed.
    pub fn process_error(
        &self,
        session_id: &SessionId,
        title: &str,
        message: &str,
    ) -> Result<AssistanceStep, ValidationError> {
        AssistanceStep::builder()
            .title(title)
            .progress(Progress::COMPLETE)
            .info(format!("An error occurred: {}", message))
            .body(ContentBody::Empty)
            .close_action(self.actions.end_display(session_id))
            .button("contact", CONTACT_TEXT, self.actions.contact_technician())
            .build()
    }

    /// Page for a process the engine terminated.
    pub fn terminated(
        &self,
        session_id: &SessionId,
        title: &str,
    ) -> Result<AssistanceStep, ValidationError> {
        AssistanceStep::builder()
            .title(title)
            .progress(Progress::COMPLETE)
            .info(TERMINATED_INFO)
            .body(ContentBody::Empty)
            .close_action(self.actions.end_display(session_id))
            .build()
    }
}
