//! Client-side selection state for the active listing

use std::collections::HashSet;

use serde::Serialize;

/// Derived state of the "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectAllState {
    #[serde(rename = "unchecked")]
    Unchecked,
    #[serde(rename = "indeterminate")]
    Indeterminate,
    #[serde(rename = "checked")]
    Checked,
}

/// Single source of truth for the "select all" checkbox: checked iff the
/// whole non-empty listing is selected, indeterminate iff some but not
/// all of it is.
pub fn select_all_state(listed: usize, selected: usize) -> SelectAllState {
    if listed == 0 || selected == 0 {
        SelectAllState::Unchecked
    } else if selected == listed {
        SelectAllState::Checked
    } else {
        SelectAllState::Indeterminate
    }
}

/// Set of currently selected object keys, unique by key, order-irrelevant.
///
/// The tracker itself is pure; the invariant that it only ever holds keys
/// from the latest listing is enforced by the view clearing it on every
/// navigation, not by filtering here.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    keys: HashSet<String>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the key if absent, remove it if present. Returns whether the
    /// key is selected afterwards.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.keys.remove(key) {
            false
        } else {
            self.keys.insert(key.to_string());
            true
        }
    }

    /// Replace the selection with exactly the given keys ("select all visible").
    pub fn select_all<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}
