//! HTTP handler for the engine event webhook.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::application::handlers::process_events::ProcessEventRouter;
use crate::domain::process::EngineEvent;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Queue of accepted events, drained by a single dispatcher task.
#[derive(Clone)]
pub struct ProcessEventsAppState {
    events: mpsc::UnboundedSender<EngineEvent>,
}

impl ProcessEventsAppState {
    /// Starts the dispatcher and returns the state feeding it.
    ///
    /// Events are handled one at a time in the order they were accepted, so a
    /// user request never overtakes the task event that preceded it.
    /// Must be called from within a tokio runtime.
    pub fn spawn(router: Arc<ProcessEventRouter>) -> Self {
        let (events, mut queue) = mpsc::unbounded_channel::<EngineEvent>();
        tokio::spawn(async move {
            while let Some(event) = queue.recv().await {
                router.dispatch(event).await;
            }
            debug!("Engine event dispatcher stopped");
        });
        Self { events }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /events - Accept one engine event
///
/// Decoding happens here so that a malformed event is the only failure the
/// engine sees in normal operation. Handling happens on the dispatcher.
pub async fn receive_event(State(state): State<ProcessEventsAppState>, body: Bytes) -> Response {
    let event: EngineEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "Rejected malformed engine event");
            return (StatusCode::BAD_REQUEST, format!("Malformed event: {}", e)).into_response();
        }
    };

    debug!(session_id = %event.session_id(), kind = event.kind(), "Engine event accepted");
    if let Err(mpsc::error::SendError(event)) = state.events.send(event) {
        error!(
            session_id = %event.session_id(),
            kind = event.kind(),
            "Engine event dispatcher is gone"
        );
        return (StatusCode::SERVICE_UNAVAILABLE, "Event dispatcher stopped").into_response();
    }

    StatusCode::ACCEPTED.into_response()
}
