//! Presentation descriptors.
//!
//! Everything the presentation service receives from us: assistance steps,
//! popups, content bodies and the actions wired to buttons.

mod content;
mod links;
mod popup;
mod step;

use serde::{Deserialize, Serialize};

pub use content::{Action, ContentBody};
pub use links::{DisplayActions, NavigationLinks};
pub use popup::{Popup, PopupBuilder, PopupButton};
pub use step::{ActionButton, AssistanceStep, AssistanceStepBuilder};

/// Which activity the user currently has in the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserActivity {
    Main,
    Side,
}
