//! Column descriptors and the column model.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::error::GridError;
use crate::error::Result;
use crate::query::SortDirection;

use super::CellValue;
use super::GridRecord;

/// Computed accessor: resolves a cell value or reports why it can't.
pub type ComputeFn<T> = Arc<dyn Fn(&T) -> std::result::Result<CellValue, String> + Send + Sync>;

/// Custom comparator for a sortable column.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Cell renderer: `(value, row, row_index) -> display text`.
pub type CellRenderer<T> = Arc<dyn Fn(&CellValue, &T, usize) -> String + Send + Sync>;

/// How a column reads its value from a row.
pub enum Accessor<T> {
    /// Named field, looked up through [`GridRecord::field`].
    Field(String),
    /// Computed from the row. Errors are propagated, never treated as empty.
    Computed(ComputeFn<T>),
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Field(name) => Accessor::Field(name.clone()),
            Accessor::Computed(f) => Accessor::Computed(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Accessor::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Column width specification as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnWidth {
    /// Width in logical pixels.
    Px(u32),
    /// Textual width such as `"120px"` or `"120"`. Anything else (percentages)
    /// resolves to the default width.
    Text(String),
    /// No width given.
    #[default]
    Auto,
}

impl ColumnWidth {
    /// Resolve to logical pixels.
    pub fn resolve(&self, default_width: u32) -> u32 {
        match self {
            ColumnWidth::Px(px) => *px,
            ColumnWidth::Text(text) => {
                let text = text.trim();
                let digits = text.strip_suffix("px").unwrap_or(text).trim();
                digits.parse::<u32>().unwrap_or(default_width)
            }
            ColumnWidth::Auto => default_width,
        }
    }
}

/// Edge a column is pinned to during horizontal scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedSide {
    Left,
    Right,
}

/// Whether and how a column sorts.
pub enum Sortable<T> {
    /// Clicking the header does nothing.
    No,
    /// Compare resolved cell values.
    Default,
    /// Compare rows with a caller-supplied comparator.
    Custom(Comparator<T>),
}

impl<T> Sortable<T> {
    /// Returns `true` unless this is [`Sortable::No`].
    pub fn is_sortable(&self) -> bool {
        !matches!(self, Sortable::No)
    }
}

impl<T> Clone for Sortable<T> {
    fn clone(&self) -> Self {
        match self {
            Sortable::No => Sortable::No,
            Sortable::Default => Sortable::Default,
            Sortable::Custom(cmp) => Sortable::Custom(Arc::clone(cmp)),
        }
    }
}

impl<T> fmt::Debug for Sortable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sortable::No => f.write_str("No"),
            Sortable::Default => f.write_str("Default"),
            Sortable::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// An entry in a column's filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A column descriptor.
///
/// # Examples
///
/// ```
/// use datagrid_lib::model::{CellValue, Column, FixedSide};
///
/// let columns: Vec<Column<serde_json::Value>> = vec![
///     Column::field("name", "Name").width(200).sortable().fixed(FixedSide::Left),
///     Column::computed("Name length", |row: &serde_json::Value| {
///         let len = row["name"].as_str().map(str::len).unwrap_or(0);
///         Ok(CellValue::from(len as i64))
///     })
///     .key("name_len"),
/// ];
/// ```
pub struct Column<T> {
    /// Unique key. Falls back to the accessor field name, then the position.
    pub key: Option<String>,
    /// Header text.
    pub title: String,
    pub accessor: Accessor<T>,
    pub width: ColumnWidth,
    pub fixed: Option<FixedSide>,
    pub sortable: Sortable<T>,
    /// Direction cycle for this column; the grid default applies when `None`.
    pub sort_directions: Option<Vec<SortDirection>>,
    pub filter_options: Option<Vec<FilterOption>>,
    pub render: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    /// Create a column reading the named field. The field name doubles as key.
    pub fn field(field: impl Into<String>, title: impl Into<String>) -> Self {
        Self::with_accessor(Accessor::Field(field.into()), title)
    }

    /// Create a column with a computed accessor.
    pub fn computed<F>(title: impl Into<String>, f: F) -> Self
    where
        F: Fn(&T) -> std::result::Result<CellValue, String> + Send + Sync + 'static,
    {
        Self::with_accessor(Accessor::Computed(Arc::new(f)), title)
    }

    fn with_accessor(accessor: Accessor<T>, title: impl Into<String>) -> Self {
        Self {
            key: None,
            title: title.into(),
            accessor,
            width: ColumnWidth::Auto,
            fixed: None,
            sortable: Sortable::No,
            sort_directions: None,
            filter_options: None,
            render: None,
        }
    }

    /// Set an explicit key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set a pixel width.
    pub fn width(mut self, width: u32) -> Self {
        self.width = ColumnWidth::Px(width);
        self
    }

    /// Set a width specification.
    pub fn width_spec(mut self, width: ColumnWidth) -> Self {
        self.width = width;
        self
    }

    /// Pin the column to an edge.
    pub fn fixed(mut self, side: FixedSide) -> Self {
        self.fixed = Some(side);
        self
    }

    /// Sort by comparing cell values.
    pub fn sortable(mut self) -> Self {
        self.sortable = Sortable::Default;
        self
    }

    /// Sort with a custom comparator.
    pub fn sort_by<F>(mut self, cmp: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.sortable = Sortable::Custom(Arc::new(cmp));
        self
    }

    /// Override the direction cycle for this column.
    pub fn sort_directions(mut self, directions: Vec<SortDirection>) -> Self {
        self.sort_directions = Some(directions);
        self
    }

    /// Set the filter dropdown options.
    pub fn filters(mut self, options: Vec<FilterOption>) -> Self {
        self.filter_options = Some(options);
        self
    }

    /// Set a cell renderer.
    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(&CellValue, &T, usize) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(f));
        self
    }

    /// The field name this column reads, if it reads one.
    pub fn field_name(&self) -> Option<&str> {
        match &self.accessor {
            Accessor::Field(name) => Some(name),
            Accessor::Computed(_) => None,
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            accessor: self.accessor.clone(),
            width: self.width.clone(),
            fixed: self.fixed,
            sortable: self.sortable.clone(),
            sort_directions: self.sort_directions.clone(),
            filter_options: self.filter_options.clone(),
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("accessor", &self.accessor)
            .field("width", &self.width)
            .field("fixed", &self.fixed)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// ColumnModel
// =============================================================================

/// A column with its resolved key and width.
#[derive(Debug, Clone)]
pub struct ColumnEntry<T> {
    key: String,
    width: u32,
    column: Column<T>,
}

impl<T> ColumnEntry<T> {
    /// The resolved unique key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The resolved width in logical pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The original descriptor.
    pub fn column(&self) -> &Column<T> {
        &self.column
    }

    pub fn title(&self) -> &str {
        &self.column.title
    }

    pub fn fixed(&self) -> Option<FixedSide> {
        self.column.fixed
    }

    pub fn sortable(&self) -> &Sortable<T> {
        &self.column.sortable
    }

    /// Render a resolved value for display.
    pub fn display(&self, value: &CellValue, row: &T, row_index: usize) -> String {
        match &self.column.render {
            Some(render) => render(value, row, row_index),
            None => value.to_filter_string(),
        }
    }
}

impl<T: GridRecord> ColumnEntry<T> {
    /// Resolve this column's value for a row.
    ///
    /// `row_index` is only used to report accessor failures.
    pub fn resolve(&self, row: &T, row_index: usize) -> Result<CellValue> {
        match &self.column.accessor {
            Accessor::Field(name) => Ok(row.field(name).unwrap_or(CellValue::Null)),
            Accessor::Computed(f) => {
                f(row).map_err(|message| GridError::accessor(&self.key, row_index, message))
            }
        }
    }
}

/// Normalized, keyed column list in declaration order.
#[derive(Debug, Clone)]
pub struct ColumnModel<T> {
    entries: Vec<ColumnEntry<T>>,
}

impl<T> Default for ColumnModel<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> ColumnModel<T> {
    /// Normalize a descriptor list.
    ///
    /// Keys resolve as explicit key, then accessor field name, then
    /// `column-<index>`. Empty or duplicate keys degrade to the positional key
    /// instead of failing.
    pub fn new(columns: Vec<Column<T>>, default_width: u32) -> Self {
        let mut used: HashSet<String> = HashSet::new();
        let mut entries = Vec::with_capacity(columns.len());

        for (index, column) in columns.into_iter().enumerate() {
            let candidate = column
                .key
                .clone()
                .or_else(|| column.field_name().map(str::to_string))
                .filter(|k| !k.is_empty());

            let key = match candidate {
                Some(k) if !used.contains(&k) => k,
                other => {
                    if let Some(dup) = other {
                        log::debug!("column key '{}' at {} is a duplicate, using positional key", dup, index);
                    }
                    positional_key(index, &used)
                }
            };
            used.insert(key.clone());

            let width = column.width.resolve(default_width);
            entries.push(ColumnEntry { key, width, column });
        }

        Self { entries }
    }

    /// Get an entry by key.
    pub fn get(&self, key: &str) -> Option<&ColumnEntry<T>> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Check if a key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnEntry<T>> {
        self.entries.iter()
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn positional_key(index: usize, used: &HashSet<String>) -> String {
    let base = format!("column-{}", index);
    if !used.contains(&base) {
        return base;
    }
    let mut suffix = 1;
    loop {
        let candidate = format!("{}-{}", base, suffix);
        if !used.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

// =============================================================================
// ColumnSpec
// =============================================================================

/// Serializable column description for JSON rows.
///
/// Used by hosts that load the grid layout from configuration rather than
/// building [`Column`]s in code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    pub key: Option<String>,
    pub title: String,
    /// Field to read. Defaults to the key.
    pub field: Option<String>,
    pub width: ColumnWidth,
    pub fixed: Option<FixedSide>,
    pub sortable: bool,
    pub sort_directions: Option<Vec<SortDirection>>,
    pub filters: Option<Vec<FilterOption>>,
}

impl ColumnSpec {
    /// Convert into a column over JSON rows.
    pub fn into_column(self) -> Column<serde_json::Value> {
        let field = self
            .field
            .or_else(|| self.key.clone())
            .unwrap_or_default();
        let mut column = Column::field(field, self.title).width_spec(self.width);
        column.key = self.key;
        column.fixed = self.fixed;
        if self.sortable {
            column.sortable = Sortable::Default;
        }
        column.sort_directions = self.sort_directions;
        column.filter_options = self.filters;
        column
    }
}
