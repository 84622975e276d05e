//! Field lookup for rows displayed in a grid.

use std::collections::HashMap;

use super::CellValue;

/// Trait for rows that can be displayed in a [`DataGrid`](crate::grid::DataGrid).
///
/// Rows are opaque to the grid: it never mutates them. The only thing the grid
/// asks of a row is named field lookup, which backs [`Accessor::Field`] columns
/// and the `key`/`id` row-key fallback. Rows that are only read through
/// computed accessors can rely on the default implementation.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{CellValue, GridRecord};
///
/// #[derive(Clone)]
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// impl GridRecord for User {
///     fn field(&self, name: &str) -> Option<CellValue> {
///         match name {
///             "id" => Some(self.id.into()),
///             "name" => Some(self.name.as_str().into()),
///             _ => None,
///         }
///     }
/// }
/// ```
///
/// [`Accessor::Field`]: super::Accessor::Field
pub trait GridRecord {
    /// Look up a field by name. `None` means the row has no such field.
    fn field(&self, _name: &str) -> Option<CellValue> {
        None
    }
}

impl GridRecord for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<CellValue> {
        self.get(name).map(CellValue::from)
    }
}

impl GridRecord for serde_json::Value {
    fn field(&self, name: &str) -> Option<CellValue> {
        self.as_object().and_then(|map| map.field(name))
    }
}

impl GridRecord for HashMap<String, CellValue> {
    fn field(&self, name: &str) -> Option<CellValue> {
        self.get(name).cloned()
    }
}
