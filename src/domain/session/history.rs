//! Display history of a session.

use std::collections::VecDeque;

use crate::domain::presentation::Popup;

/// Popups shown to the user, most recent first.
///
/// Index 0 is the step currently on screen, index 1 the one before it.
/// The history only grows; entries are never dropped while the session lives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayHistory {
    entries: VecDeque<Popup>,
}

impl DisplayHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `popup` as the current display.
    pub fn push(&mut self, popup: Popup) {
        self.entries.push_front(popup);
    }

    /// Returns the entry `index` steps back, if the history is that deep.
    pub fn get(&self, index: usize) -> Option<&Popup> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
