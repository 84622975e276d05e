//! Grid events, handler results and actions.

use crate::export::ExportFormat;
use crate::query::FilterState;
use crate::query::PageMeta;
use crate::query::SortState;

/// Result of handling an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Interaction didn't apply (unknown column, feature disabled, no-op).
    Ignored,
    /// Interaction was handled.
    Consumed,
    /// Interaction started a header drag; follow with move/end calls.
    StartDrag,
}

impl EventResult {
    /// Check if the event was handled (consumed or started drag).
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

/// Notifications for the host, drained with
/// [`DataGrid::drain_events`](super::DataGrid::drain_events).
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent<T> {
    /// Selected keys and the records carrying them.
    ///
    /// Under controlled selection this is a proposal the host may apply.
    SelectionChanged { keys: Vec<String>, records: Vec<T> },
    SortChanged(SortState),
    FilterChanged(FilterState),
    PageChanged(PageMeta),
    ExpansionChanged {
        key: String,
        expanded: bool,
        keys: Vec<String>,
    },
    ColumnResized { key: String, width: u32 },
    ColumnsReordered(Vec<String>),
    Exported {
        format: ExportFormat,
        filename: String,
        location: String,
        row_count: usize,
    },
}

/// A named state transition, for hosts that drive the grid reducer-style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridAction {
    ToggleSort(String),
    ClearSort,
    ToggleFilterValue { column: String, value: String },
    ResetFilter(String),
    OpenFilterMenu(String),
    CloseFilterMenu,
    GoToPage(usize),
    SetPageSize(usize),
    Scroll(u32),
    ToggleRow(String),
    SetRowSelected { key: String, selected: bool },
    TogglePageSelection,
    ClearSelection,
    ToggleExpansion(String),
    BeginResize { column: String, pointer_x: i32 },
    ResizeMove(i32),
    EndResize,
    BeginReorder(String),
    DropOn(String),
    CancelDrag,
}
