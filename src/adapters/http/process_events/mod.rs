//! HTTP adapter for process engine callbacks.
//!
//! The engine posts every event to a single webhook. Events are accepted
//! before they are handled; handling failures never reach the engine.

pub mod handlers;
pub mod routes;

pub use handlers::ProcessEventsAppState;
pub use routes::process_events_router;
