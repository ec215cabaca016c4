//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the navigation core and the services around it. Adapters implement these
//! ports.
//!
//! ## Remote Collaborators
//!
//! - `ProcessEngine` - Definitions, instances and navigation of processes
//! - `ContentService` - Content ids for steps, call activities and extras
//! - `ExperienceService` - Whether a user may skip a sub-process
//! - `PresentationChannel` - Displays assistance steps and popups
//! - `ContentEventPublisher` - "Content seen" notifications
//! - `IdentityService` - Resolves client tokens to platform sessions
//!
//! ## Local State
//!
//! - `SessionStore` - Registry of active sessions
//!
//! Every remote failure is reported as a `DownstreamError`.

mod content_events;
mod content_service;
mod downstream;
mod experience_service;
mod identity_service;
mod presentation_channel;
mod process_engine;
mod session_store;

pub use content_events::ContentEventPublisher;
pub use content_service::{ContentLookup, ContentService};
pub use downstream::{DownstreamError, TRANSPORT_FAILURE_STATUS};
pub use experience_service::ExperienceService;
pub use identity_service::{IdentityService, IdentitySession};
pub use presentation_channel::PresentationChannel;
pub use process_engine::ProcessEngine;
pub use session_store::{SessionHandle, SessionStore};
