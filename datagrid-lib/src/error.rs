//! Error types

use thiserror::Error;

/// Errors produced by the grid engine.
///
/// UI-state edge cases (out-of-range pages, toggling a column that can't be
/// sorted, dropping a column onto itself) are never errors; they clamp or are
/// ignored. Only data-author bugs and export I/O surface here.
#[derive(Debug, Error)]
pub enum GridError {
    /// A computed accessor failed while resolving a cell value.
    #[error("accessor for column '{column}' failed on row {row_index}: {message}")]
    Accessor {
        column: String,
        row_index: usize,
        message: String,
    },

    /// An operation named a column that the column model does not contain.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// The grid configuration is invalid.
    #[error("invalid grid configuration: {0}")]
    Config(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GridError {
    /// Creates an accessor error.
    pub fn accessor(
        column: impl Into<String>,
        row_index: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Accessor {
            column: column.into(),
            row_index,
            message: message.into(),
        }
    }
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
