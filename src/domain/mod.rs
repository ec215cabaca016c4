//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, progress, timestamps, errors)
//! - `process` - Process engine model and the callbacks it delivers
//! - `presentation` - Assistance steps, popups and client actions
//! - `session` - Per-user navigation state and command errors

pub mod foundation;
pub mod presentation;
pub mod process;
pub mod session;
