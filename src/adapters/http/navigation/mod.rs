//! HTTP adapter for user navigation.
//!
//! These endpoints are called by the display's buttons and links. Every
//! request names the session it acts on; most also refresh its token.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::NavigationHandlers;
pub use routes::navigation_router;
