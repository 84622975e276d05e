//! Expanded detail panels, tracked by row key.

use std::collections::BTreeSet;

/// Set of expanded row keys. Independent per row and independent of selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    expanded: BTreeSet<String>,
}

impl Expansion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys(keys: impl IntoIterator<Item = String>) -> Self {
        Self {
            expanded: keys.into_iter().collect(),
        }
    }

    /// Flip a row's expansion. Returns `true` if it is now expanded.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.to_string());
            true
        }
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    /// Expanded keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.expanded.iter().cloned().collect()
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}
