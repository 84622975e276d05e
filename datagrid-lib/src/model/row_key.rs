//! Row identity resolution.

use std::fmt;
use std::sync::Arc;

use super::CellValue;
use super::GridRecord;

/// How the grid derives a stable string identity for a row.
pub enum RowKey<T> {
    /// Explicit key accessor.
    Fn(Arc<dyn Fn(&T) -> String + Send + Sync>),
    /// Named field, stringified.
    Field(String),
}

impl<T> RowKey<T> {
    /// Key rows with a function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        RowKey::Fn(Arc::new(f))
    }

    /// Key rows by a named field.
    pub fn field(name: impl Into<String>) -> Self {
        RowKey::Field(name.into())
    }
}

impl<T> Clone for RowKey<T> {
    fn clone(&self) -> Self {
        match self {
            RowKey::Fn(f) => RowKey::Fn(Arc::clone(f)),
            RowKey::Field(name) => RowKey::Field(name.clone()),
        }
    }
}

impl<T> fmt::Debug for RowKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Fn(_) => f.write_str("Fn(..)"),
            RowKey::Field(name) => f.debug_tuple("Field").field(name).finish(),
        }
    }
}

/// Resolve the key of one row.
///
/// Order: explicit accessor, named field, `key` field, `id` field, then the
/// positional fallback `row-<index>`. Null or missing field values fall through
/// to the next step.
pub fn resolve_row_key<T: GridRecord>(row: &T, index: usize, row_key: Option<&RowKey<T>>) -> String {
    let field_key = |name: &str| -> Option<String> {
        row.field(name)
            .filter(|v| !v.is_null())
            .map(|v: CellValue| v.to_filter_string())
    };

    match row_key {
        Some(RowKey::Fn(f)) => return f(row),
        Some(RowKey::Field(name)) => {
            if let Some(key) = field_key(name) {
                return key;
            }
        }
        None => {}
    }

    field_key("key")
        .or_else(|| field_key("id"))
        .unwrap_or_else(|| format!("row-{}", index))
}

/// Resolve keys for a whole dataset, in dataset order.
///
/// Duplicate keys are kept as-is: selection and expansion state collapse onto
/// the shared key.
pub fn resolve_row_keys<T: GridRecord>(rows: &[T], row_key: Option<&RowKey<T>>) -> Vec<String> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| resolve_row_key(row, index, row_key))
        .collect()
}
