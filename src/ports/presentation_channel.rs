//! Presentation Channel Port - Delivery of displays to the user's client.

use async_trait::async_trait;

use super::DownstreamError;
use crate::domain::foundation::SessionId;
use crate::domain::presentation::{AssistanceStep, Popup, UserActivity};

/// Port for the presentation service.
///
/// `Ok` means the presentation service accepted the display.
#[async_trait]
pub trait PresentationChannel: Send + Sync {
    async fn display_assistance(
        &self,
        session_id: &SessionId,
        step: &AssistanceStep,
    ) -> Result<(), DownstreamError>;

    async fn display_popup(
        &self,
        session_id: &SessionId,
        popup: &Popup,
    ) -> Result<(), DownstreamError>;

    /// Removes this service's display from the client.
    async fn end_display(&self, session_id: &SessionId) -> Result<(), DownstreamError>;

    /// Reports whether the user is in the main or a side activity.
    async fn user_activity(&self, session_id: &SessionId) -> Result<UserActivity, DownstreamError>;
}
