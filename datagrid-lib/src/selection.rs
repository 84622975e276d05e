//! Selection state shared by list-like widgets.
//!
//! Selection uses string keys so it stays stable when rows are re-sorted,
//! filtered or paged. The [`SelectionSet`] trait is the capability other
//! widgets (checkbox groups, radio groups) depend on; [`Selection`] is the
//! implementation the grid uses.

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

/// Selection mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// At most one key selected (radio style).
    Single,
    /// Any number of keys selected (checkbox style).
    #[default]
    Multiple,
}

/// Tri-state of a "select all" header checkbox. Derived for rendering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderCheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

/// Keys added and removed by a selection operation.
pub type SelectionDelta = (Vec<String>, Vec<String>);

/// Generic keyed selection behavior.
pub trait SelectionSet {
    fn mode(&self) -> SelectionMode;

    /// Select a key. In single mode this replaces the selection.
    fn select(&mut self, key: &str) -> SelectionDelta;

    /// Deselect a key.
    fn deselect(&mut self, key: &str) -> SelectionDelta;

    /// Flip a key. In single mode, toggling the selected key clears the
    /// selection and toggling another key replaces it.
    fn toggle(&mut self, key: &str) -> SelectionDelta;

    /// Clear everything. Returns the keys that were deselected.
    fn clear(&mut self) -> Vec<String>;

    fn is_selected(&self, key: &str) -> bool;

    /// Selected keys, sorted for deterministic ordering.
    fn selected(&self) -> Vec<String>;
}

/// Key-based selection with single or multiple semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    mode: SelectionMode,
    selected: HashSet<String>,
}

impl Selection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
        }
    }

    pub fn single() -> Self {
        Self::new(SelectionMode::Single)
    }

    pub fn multiple() -> Self {
        Self::new(SelectionMode::Multiple)
    }

    /// Create a selection seeded with keys. Single mode keeps only the first.
    pub fn with_keys(mode: SelectionMode, keys: impl IntoIterator<Item = String>) -> Self {
        let mut selection = Self::new(mode);
        selection.replace(keys);
        selection
    }

    /// Replace the whole selection, respecting the mode's cardinality.
    /// Returns (added IDs, removed IDs).
    pub fn replace(&mut self, keys: impl IntoIterator<Item = String>) -> SelectionDelta {
        let mut next: HashSet<String> = HashSet::new();
        for key in keys {
            if self.mode == SelectionMode::Single && !next.is_empty() {
                break;
            }
            next.insert(key);
        }
        let added = sorted(next.difference(&self.selected).cloned());
        let removed = sorted(self.selected.difference(&next).cloned());
        self.selected = next;
        (added, removed)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Select-all for the current page (multiple mode only).
    ///
    /// If some page key is unselected, every page key is selected. If all are
    /// selected, only the page keys are deselected. Keys on other pages are
    /// never touched.
    pub fn toggle_page(&mut self, page_keys: &[String]) -> SelectionDelta {
        if self.mode != SelectionMode::Multiple || page_keys.is_empty() {
            return (vec![], vec![]);
        }

        if self.header_state(page_keys) == HeaderCheckState::Checked {
            let removed = page_keys
                .iter()
                .filter(|k| self.selected.remove(k.as_str()))
                .cloned()
                .collect();
            (vec![], sorted_vec(removed))
        } else {
            let added = page_keys
                .iter()
                .filter(|k| self.selected.insert((*k).clone()))
                .cloned()
                .collect();
            (sorted_vec(added), vec![])
        }
    }

    /// Header checkbox state for the keys of the current page.
    pub fn header_state(&self, page_keys: &[String]) -> HeaderCheckState {
        let count = page_keys.iter().filter(|k| self.selected.contains(k.as_str())).count();
        if count == 0 {
            HeaderCheckState::Unchecked
        } else if count == page_keys.len() {
            HeaderCheckState::Checked
        } else {
            HeaderCheckState::Indeterminate
        }
    }
}

impl SelectionSet for Selection {
    fn mode(&self) -> SelectionMode {
        self.mode
    }

    fn select(&mut self, key: &str) -> SelectionDelta {
        match self.mode {
            SelectionMode::Single => {
                let removed = sorted(self.selected.iter().filter(|k| k.as_str() != key).cloned());
                let was_selected = self.selected.contains(key);
                self.selected.clear();
                self.selected.insert(key.to_string());
                let added = if was_selected {
                    vec![]
                } else {
                    vec![key.to_string()]
                };
                (added, removed)
            }
            SelectionMode::Multiple => {
                if self.selected.insert(key.to_string()) {
                    (vec![key.to_string()], vec![])
                } else {
                    (vec![], vec![])
                }
            }
        }
    }

    fn deselect(&mut self, key: &str) -> SelectionDelta {
        if self.selected.remove(key) {
            (vec![], vec![key.to_string()])
        } else {
            (vec![], vec![])
        }
    }

    fn toggle(&mut self, key: &str) -> SelectionDelta {
        if self.selected.contains(key) {
            self.deselect(key)
        } else {
            self.select(key)
        }
    }

    fn clear(&mut self) -> Vec<String> {
        sorted(self.selected.drain())
    }

    fn is_selected(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    fn selected(&self) -> Vec<String> {
        sorted(self.selected.iter().cloned())
    }
}

fn sorted(keys: impl Iterator<Item = String>) -> Vec<String> {
    sorted_vec(keys.collect())
}

fn sorted_vec(mut keys: Vec<String>) -> Vec<String> {
    keys.sort();
    keys.dedup();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(ks: &[&str]) -> Vec<String> {
        ks.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn single_toggle_replaces_and_clears() {
        let mut sel = Selection::single();
        assert_eq!(sel.toggle("a"), (keys(&["a"]), vec![]));
        assert_eq!(sel.toggle("b"), (keys(&["b"]), keys(&["a"])));
        assert_eq!(sel.toggle("b"), (vec![], keys(&["b"])));
        assert!(sel.is_empty());
    }

    #[test]
    fn multiple_toggle_flips_membership() {
        let mut sel = Selection::multiple();
        sel.toggle("a");
        sel.toggle("b");
        sel.toggle("a");
        assert_eq!(sel.selected(), keys(&["b"]));
    }

    #[test]
    fn seeding_single_keeps_one_key() {
        let sel = Selection::with_keys(SelectionMode::Single, keys(&["a", "b"]));
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn page_toggle_preserves_other_pages() {
        let mut sel = Selection::with_keys(SelectionMode::Multiple, keys(&["z"]));
        let page = keys(&["a", "b"]);
        sel.toggle("a");
        assert_eq!(sel.header_state(&page), HeaderCheckState::Indeterminate);

        assert_eq!(sel.toggle_page(&page), (keys(&["b"]), vec![]));
        assert_eq!(sel.header_state(&page), HeaderCheckState::Checked);
        assert_eq!(sel.selected(), keys(&["a", "b", "z"]));

        assert_eq!(sel.toggle_page(&page), (vec![], keys(&["a", "b"])));
        assert_eq!(sel.selected(), keys(&["z"]));
        assert_eq!(sel.header_state(&page), HeaderCheckState::Unchecked);
    }

    #[test]
    fn page_toggle_ignored_in_single_mode() {
        let mut sel = Selection::single();
        assert_eq!(sel.toggle_page(&keys(&["a", "b"])), (vec![], vec![]));
    }
}
