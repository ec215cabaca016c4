//! Session domain module.
//!
//! Navigation state kept per user session: the aggregate itself, its display
//! history and the errors navigation commands report to callers.

mod aggregate;
mod errors;
mod history;

pub use aggregate::{step_key, Session};
pub use errors::{
    NavigationError, INSTANTIATION_FAILED, MISSING_CONTENT_ID, NO_PROCESS_RUNNING,
    OPERATION_NOT_AVAILABLE, UNKNOWN_SESSION,
};
pub use history::DisplayHistory;
