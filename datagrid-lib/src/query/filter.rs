//! Filter engine: per-column accepted-value sets.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Result;
use crate::model::ColumnEntry;
use crate::model::ColumnModel;
use crate::model::GridRecord;

/// Accepted filter values per column, plus the currently open filter menu.
///
/// A column without an entry, or with an empty set, imposes no filter.
/// Filters are a conjunction across columns and a disjunction within one
/// column's set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    values: BTreeMap<String, BTreeSet<String>>,
    #[serde(skip)]
    open_menu: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper to seed accepted values.
    pub fn with(mut self, column_key: impl Into<String>, values: &[&str]) -> Self {
        let set = self.values.entry(column_key.into()).or_default();
        set.extend(values.iter().map(|v| (*v).to_string()));
        self
    }

    /// Accepted values for a column.
    pub fn values(&self, column_key: &str) -> Option<&BTreeSet<String>> {
        self.values.get(column_key)
    }

    /// Columns with a non-empty accepted-value set.
    pub fn active_columns(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.values
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(k, set)| (k.as_str(), set))
    }

    /// Returns `true` if the column currently filters rows.
    pub fn is_active(&self, column_key: &str) -> bool {
        self.values.get(column_key).is_some_and(|set| !set.is_empty())
    }

    /// Returns `true` if no column filters rows.
    pub fn is_empty(&self) -> bool {
        self.active_columns().next().is_none()
    }

    /// Insert or remove one accepted value. Returns `true` if it is now accepted.
    pub fn toggle_value(&mut self, column_key: &str, value: &str) -> bool {
        let set = self.values.entry(column_key.to_string()).or_default();
        if set.remove(value) {
            if set.is_empty() {
                self.values.remove(column_key);
            }
            false
        } else {
            set.insert(value.to_string());
            true
        }
    }

    /// Replace a column's accepted values.
    pub fn set_values(&mut self, column_key: &str, values: impl IntoIterator<Item = String>) {
        let set: BTreeSet<String> = values.into_iter().collect();
        if set.is_empty() {
            self.values.remove(column_key);
        } else {
            self.values.insert(column_key.to_string(), set);
        }
    }

    /// Clear a column's filter and close any open filter menu.
    /// Returns `true` if the column had accepted values.
    pub fn reset(&mut self, column_key: &str) -> bool {
        self.open_menu = None;
        self.values
            .remove(column_key)
            .is_some_and(|set| !set.is_empty())
    }

    /// Clear every column's filter.
    pub fn clear(&mut self) {
        self.values.clear();
        self.open_menu = None;
    }

    /// The column whose filter menu is open.
    pub fn open_menu(&self) -> Option<&str> {
        self.open_menu.as_deref()
    }

    /// Open a column's filter menu, closing any other.
    pub fn open(&mut self, column_key: &str) {
        self.open_menu = Some(column_key.to_string());
    }

    pub fn close(&mut self) {
        self.open_menu = None;
    }
}

/// Check one row against one column's accepted values.
fn row_matches<T: GridRecord>(
    entry: &ColumnEntry<T>,
    accepted: &[String],
    row: &T,
    index: usize,
) -> Result<bool> {
    let cell = entry.resolve(row, index)?.to_filter_string().to_lowercase();
    Ok(accepted.iter().any(|value| cell.contains(value.as_str())))
}

/// Filter rows by the accepted-value sets.
///
/// Each cell is stringified (empty for null), lower-cased, and matched by
/// substring against the lower-cased accepted values. Returns the indices of
/// rows that pass every active column, in dataset order. Filters on keys the
/// column model doesn't know are ignored.
pub fn filter<T: GridRecord>(
    rows: &[T],
    columns: &ColumnModel<T>,
    state: &FilterState,
) -> Result<Vec<usize>> {
    let active: Vec<(&ColumnEntry<T>, Vec<String>)> = state
        .active_columns()
        .filter_map(|(key, set)| {
            let entry = columns.get(key);
            if entry.is_none() {
                log::debug!("filter on unknown column '{}' ignored", key);
            }
            entry.map(|e| (e, set.iter().map(|v| v.to_lowercase()).collect()))
        })
        .collect();

    if active.is_empty() {
        return Ok((0..rows.len()).collect());
    }

    let mut kept = Vec::new();
    'rows: for (index, row) in rows.iter().enumerate() {
        for (entry, accepted) in &active {
            if !row_matches(entry, accepted, row, index)? {
                continue 'rows;
            }
        }
        kept.push(index);
    }
    Ok(kept)
}
