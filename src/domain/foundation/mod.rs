//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the performance support domain.

mod errors;
mod ids;
mod progress;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{ContentId, ElementId, ProcessId, ProcessInstanceId, SessionId, UserId};
pub use progress::Progress;
pub use timestamp::Timestamp;
