//! Route configuration for navigation endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{
    close, confirm, details, next, previous, show_additional_content, show_contacts,
    start_support, NavigationHandlers,
};

/// Creates the navigation router.
///
/// Routes:
/// - `POST /startSupport/:supportId` - Start support for a process
/// - `POST /navigate/confirm` - Instantiate a follow-up process
/// - `POST /navigate/next` - Advance, optionally to `?elementId=`
/// - `POST /navigate/previous` - Replay a history entry
/// - `POST /navigate/details` - Step into a call activity
/// - `POST /navigate/close` - Cancel and close the display
/// - `POST /showContacts` - Contacts popup
/// - `POST /showAdditionalContent` - Additional content popup
pub fn navigation_router() -> Router<NavigationHandlers> {
    Router::new()
        .route("/startSupport/:supportId", post(start_support))
        .route("/navigate/confirm", post(confirm))
        .route("/navigate/next", post(next))
        .route("/navigate/previous", post(previous))
        .route("/navigate/details", post(details))
        .route("/navigate/close", post(close))
        .route("/showContacts", post(show_contacts))
        .route("/showAdditionalContent", post(show_additional_content))
}
