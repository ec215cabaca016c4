//! Remote collaborators reached over HTTP.
//!
//! One adapter per port, all sharing [`RemoteClient`] for URL building and
//! status mapping. A non-2xx answer becomes a `DownstreamError` carrying the
//! remote status and body; a transport failure uses status 503.

mod client;
mod content_events;
mod content_service;
mod experience_service;
mod identity_service;
mod presentation;
mod process_engine;

pub use client::{with_token, RemoteClient};
pub use content_events::RemoteContentEvents;
pub use content_service::RemoteContentService;
pub use experience_service::RemoteExperienceService;
pub use identity_service::RemoteIdentityService;
pub use presentation::RemotePresentationChannel;
pub use process_engine::RemoteProcessEngine;
