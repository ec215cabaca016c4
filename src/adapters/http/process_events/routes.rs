//! Route configuration for the engine event webhook.

use axum::routing::post;
use axum::Router;

use super::handlers::{receive_event, ProcessEventsAppState};

/// Creates the process events router.
///
/// Routes:
/// - `POST /events` - Engine callback, answered with `202 Accepted`
pub fn process_events_router() -> Router<ProcessEventsAppState> {
    Router::new().route("/events", post(receive_event))
}
