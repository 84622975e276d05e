//! Derived view of the grid: what a renderer draws.

use crate::error::Result;
use crate::layout::StickyOffsets;
use crate::model::CellValue;
use crate::model::ColumnModel;
use crate::model::FilterOption;
use crate::model::FixedSide;
use crate::model::GridRecord;
use crate::query::FilterState;
use crate::query::PageMeta;
use crate::query::PaginationState;
use crate::query::SortDirection;
use crate::query::SortState;
use crate::query::Viewport;
use crate::query::Window;
use crate::query::filter;
use crate::query::sort;
use crate::selection::HeaderCheckState;

/// Row indices surviving filter, sort, pagination and windowing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedRows {
    /// Every matching row index, in display order.
    pub ordered: Vec<usize>,
    pub page: PageMeta,
    /// Window over the rows of the current page.
    pub window: Window,
}

impl DerivedRows {
    /// Indices of the rows on the current page.
    pub fn page_rows(&self) -> &[usize] {
        &self.ordered[self.page.range.clone()]
    }

    /// Indices of the rows actually rendered.
    pub fn visible(&self) -> &[usize] {
        &self.page_rows()[self.window.range()]
    }
}

/// Filter then sort. Returns matching row indices in display order.
pub fn pipeline<T: GridRecord>(
    rows: &[T],
    columns: &ColumnModel<T>,
    sort_state: &SortState,
    filter_state: &FilterState,
) -> Result<Vec<usize>> {
    let kept = filter(rows, columns, filter_state)?;
    sort(rows, &kept, columns, sort_state)
}

/// Page and window for `total` ordered rows.
///
/// Without pagination every row is on one page; without a viewport the whole
/// page is rendered.
pub fn page_window(
    total: usize,
    pagination: Option<&PaginationState>,
    viewport: Option<&Viewport>,
    scroll_top: u32,
) -> (PageMeta, Window) {
    let page = pagination
        .map(|p| p.meta(total))
        .unwrap_or_else(|| PageMeta::single(total));
    let len = page.range.len();
    let window = viewport
        .map(|v| v.window(len, scroll_top))
        .unwrap_or_else(|| Window::full(len));
    (page, window)
}

/// Derive the rendered rows from scratch. Pure: same inputs, same output.
pub fn compute_view<T: GridRecord>(
    rows: &[T],
    columns: &ColumnModel<T>,
    sort_state: &SortState,
    filter_state: &FilterState,
    pagination: Option<&PaginationState>,
    viewport: Option<&Viewport>,
    scroll_top: u32,
) -> Result<DerivedRows> {
    let ordered = pipeline(rows, columns, sort_state, filter_state)?;
    let (page, window) = page_window(ordered.len(), pagination, viewport, scroll_top);
    Ok(DerivedRows {
        ordered,
        page,
        window,
    })
}

/// A column header.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell<'a> {
    pub key: &'a str,
    pub title: &'a str,
    pub width: u32,
    pub fixed: Option<FixedSide>,
    /// Distance from the pinned edge, for fixed columns.
    pub sticky_offset: Option<u32>,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
    /// `aria-sort` value: "ascending", "descending" or "none".
    pub aria_sort: &'static str,
    pub filter_options: &'a [FilterOption],
    pub filter_active: bool,
    pub filter_open: bool,
}

/// A rendered cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewCell<'a> {
    pub column_key: &'a str,
    pub value: CellValue,
    /// Rendered text (custom renderer, or the stringified value).
    pub text: String,
    pub sticky: Option<(FixedSide, u32)>,
}

/// A rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow<'a, T> {
    pub key: &'a str,
    /// Index into the dataset.
    pub index: usize,
    /// Position within all matching rows, 0-based.
    pub position: usize,
    pub record: &'a T,
    pub cells: Vec<ViewCell<'a>>,
    pub selected: bool,
    pub selectable: bool,
    pub expanded: bool,
    pub expandable: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView<'a, T> {
    /// Headers in visual order.
    pub header: Vec<HeaderCell<'a>>,
    /// Rendered rows, top to bottom.
    pub rows: Vec<ViewRow<'a, T>>,
    pub page: PageMeta,
    pub window: Window,
    pub sticky: StickyOffsets,
    /// Width of the leading control column, when there is one.
    pub control_width: Option<u32>,
    /// "Select all on page" checkbox, multiple selection only.
    pub header_check: Option<HeaderCheckState>,
    /// Sum of column widths, control column included.
    pub total_width: u32,
    /// Placeholder when nothing matches.
    pub empty_text: Option<&'a str>,
}

impl<T> GridView<'_, T> {
    /// No row matches the current filters.
    pub fn is_empty(&self) -> bool {
        self.page.total == 0
    }

    /// Keys of the rendered rows.
    pub fn row_keys(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.key).collect()
    }
}
