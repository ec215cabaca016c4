//! HTTP adapters - inbound REST API.
//!
//! Navigation commands come from the display, engine events from the
//! process engine. Both are served below the configured base path.

pub mod navigation;
pub mod process_events;

pub use navigation::{navigation_router, NavigationHandlers};
pub use process_events::{process_events_router, ProcessEventsAppState};

use axum::routing::get;
use axum::Router;

/// GET /health - Liveness check
pub async fn health() -> &'static str {
    "ok"
}

/// Assembles every route below `base_path`.
///
/// An empty base path (or `/`) serves the routes at the root.
pub fn app_router(
    navigation: NavigationHandlers,
    events: ProcessEventsAppState,
    base_path: &str,
) -> Router {
    let routes = Router::new()
        .route("/health", get(health))
        .merge(navigation_router().with_state(navigation))
        .merge(process_events_router().with_state(events));

    let base_path = base_path.trim_end_matches('/');
    if base_path.is_empty() {
        routes
    } else {
        Router::new().nest(base_path, routes)
    }
}
