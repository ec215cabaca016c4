//! Application layer - Command handlers and the services they share.
//!
//! The compositor and content resolver are shared by every handler that
//! shows a step; terminal pages are built by `error_pages`.

pub mod compositor;
pub mod content;
pub mod error_pages;
pub mod handlers;

#[cfg(test)]
pub(crate) mod test_support;

pub use compositor::{AssistanceCompositor, CompositionError, StepLocation, StepRequest};
pub use content::{ContentResolver, NOT_FOUND_SENTINEL};
pub use error_pages::TerminalPages;
pub use handlers::*;
