//! Grid configuration

use serde::Deserialize;
use serde::Serialize;

use crate::error::GridError;
use crate::error::Result;
use crate::query::PaginationState;
use crate::query::SortDirection;
use crate::query::SortOrder;
use crate::query::Viewport;
use crate::selection::SelectionMode;

/// Classic pagination settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Rows per page.
    ///
    /// Default: 10
    pub page_size: usize,
    /// Initial page (1-based, clamped once rows are known).
    ///
    /// Default: 1
    pub current_page: usize,
    /// Page sizes offered to the user.
    ///
    /// Default: 10, 20, 50, 100
    pub page_size_options: Vec<usize>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            current_page: 1,
            page_size_options: vec![10, 20, 50, 100],
        }
    }
}

impl PaginationConfig {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub(crate) fn state(&self) -> PaginationState {
        PaginationState::new(self.page_size).with_page(self.current_page)
    }
}

/// Configuration for a [`DataGrid`](super::DataGrid).
///
/// Seeds (default sort, selected and expanded keys) only apply at
/// construction; the grid owns the state afterwards.
///
/// # Example
///
/// ```
/// use datagrid_lib::grid::{GridConfig, PaginationConfig};
/// use datagrid_lib::selection::SelectionMode;
///
/// let config = GridConfig::default()
///     .with_pagination(PaginationConfig::new(25))
///     .with_viewport_height(600)
///     .with_selection(SelectionMode::Multiple);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Classic pagination; `None` shows every row on one page.
    pub pagination: Option<PaginationConfig>,

    /// Row height in logical pixels.
    ///
    /// Default: 48
    pub row_height: u32,

    /// Fixed viewport height. Enables scroll virtualization when set.
    pub viewport_height: Option<u32>,

    /// Rows rendered above and below the viewport when virtualized.
    ///
    /// Default: 5
    pub buffer_rows: u32,

    /// Floor for resized column widths.
    ///
    /// Default: 80
    pub min_column_width: u32,

    /// Width for columns without a usable width.
    ///
    /// Default: 150
    pub default_column_width: u32,

    /// Width of the leading selection/expansion control column.
    ///
    /// Default: 48
    pub control_column_width: u32,

    /// Row selection; `None` disables it.
    pub selection_mode: Option<SelectionMode>,

    /// Whether rows have expandable detail panels.
    pub expandable: bool,

    /// Header click cycle for columns without their own.
    ///
    /// Default: ascend, descend
    pub sort_directions: Vec<SortDirection>,

    pub default_sort: Option<SortOrder>,
    pub default_selected_keys: Vec<String>,
    pub default_expanded_keys: Vec<String>,

    /// Shown when no rows match.
    ///
    /// Default: "No data"
    pub empty_text: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            pagination: Some(PaginationConfig::default()),
            row_height: 48,
            viewport_height: None,
            buffer_rows: 5,
            min_column_width: 80,
            default_column_width: 150,
            control_column_width: 48,
            selection_mode: None,
            expandable: false,
            sort_directions: SortDirection::DEFAULT_CYCLE.to_vec(),
            default_sort: None,
            default_selected_keys: Vec::new(),
            default_expanded_keys: Vec::new(),
            empty_text: "No data".to_string(),
        }
    }
}

impl GridConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Show every row on a single page.
    pub fn without_pagination(mut self) -> Self {
        self.pagination = None;
        self
    }

    pub fn with_row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    /// Enable virtualization with a fixed viewport height.
    pub fn with_viewport_height(mut self, height: u32) -> Self {
        self.viewport_height = Some(height);
        self
    }

    pub fn with_buffer_rows(mut self, buffer_rows: u32) -> Self {
        self.buffer_rows = buffer_rows;
        self
    }

    pub fn with_min_column_width(mut self, width: u32) -> Self {
        self.min_column_width = width;
        self
    }

    pub fn with_selection(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = Some(mode);
        self
    }

    pub fn with_expandable(mut self) -> Self {
        self.expandable = true;
        self
    }

    pub fn with_sort_directions(mut self, directions: Vec<SortDirection>) -> Self {
        self.sort_directions = directions;
        self
    }

    pub fn with_default_sort(mut self, order: SortOrder) -> Self {
        self.default_sort = Some(order);
        self
    }

    pub fn with_selected_keys(mut self, keys: Vec<String>) -> Self {
        self.default_selected_keys = keys;
        self
    }

    pub fn with_expanded_keys(mut self, keys: Vec<String>) -> Self {
        self.default_expanded_keys = keys;
        self
    }

    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    /// Check values the engine can't work with.
    pub fn validate(&self) -> Result<()> {
        if self.row_height == 0 {
            return Err(GridError::Config("row_height must be greater than 0".into()));
        }
        if let Some(p) = &self.pagination
            && p.page_size == 0
        {
            return Err(GridError::Config("page_size must be greater than 0".into()));
        }
        Ok(())
    }

    /// Virtualization parameters, when a viewport height is configured.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport_height
            .map(|height| Viewport::new(self.row_height, height, self.buffer_rows))
    }

    /// Whether a leading control column is rendered.
    pub fn has_control_column(&self) -> bool {
        self.selection_mode.is_some() || self.expandable
    }
}
