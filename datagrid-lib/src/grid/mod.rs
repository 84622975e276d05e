//! The grid controller.
//!
//! [`DataGrid`] owns the interaction state (sort, filters, page, scroll,
//! selection, expansion, column layout) and derives a [`GridView`] from it.
//! Every interaction handler updates one state slice and queues a
//! [`GridEvent`] for the host.

mod config;
mod events;
mod view;

pub use config::*;
pub use events::*;
pub use view::*;

use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::expansion::Expansion;
use crate::export::ExportFile;
use crate::export::ExportFormat;
use crate::export::ExportSink;
use crate::export::export_rows;
use crate::export::now_ms;
use crate::layout::ColumnLayout;
use crate::layout::PointerCapture;
use crate::layout::StickyOffsets;
use crate::layout::sticky_offsets;
use crate::model::Column;
use crate::model::ColumnEntry;
use crate::model::ColumnModel;
use crate::model::GridRecord;
use crate::model::RowKey;
use crate::model::resolve_row_keys;
use crate::query::FilterState;
use crate::query::PaginationState;
use crate::query::SortState;
use crate::selection::HeaderCheckState;
use crate::selection::Selection;
use crate::selection::SelectionDelta;
use crate::selection::SelectionMode;
use crate::selection::SelectionSet;

/// Per-row predicate (selectable, expandable).
pub type RowPredicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Data grid over rows of type `T`.
///
/// # Example
///
/// ```
/// use datagrid_lib::grid::{DataGrid, GridConfig, GridEvent};
/// use datagrid_lib::model::Column;
/// use serde_json::json;
///
/// let rows = vec![json!({"id": 1, "name": "b"}), json!({"id": 2, "name": "a"})];
/// let columns = vec![Column::field("name", "Name").sortable()];
///
/// let mut grid = DataGrid::new(columns, rows, GridConfig::default()).unwrap();
/// grid.toggle_sort("name");
///
/// let view = grid.view().unwrap();
/// assert_eq!(view.row_keys(), vec!["2", "1"]);
/// drop(view);
/// assert!(matches!(grid.drain_events()[0], GridEvent::SortChanged(_)));
/// ```
pub struct DataGrid<T> {
    rows: Vec<T>,
    row_keys: Vec<String>,
    /// First dataset index per key.
    key_index: HashMap<String, usize>,
    row_key: Option<RowKey<T>>,
    columns: ColumnModel<T>,
    config: GridConfig,

    sort: SortState,
    filter: FilterState,
    pagination: Option<PaginationState>,
    scroll_top: u32,
    selection: Option<Selection>,
    controlled_selection: bool,
    expansion: Expansion,
    layout: ColumnLayout,

    row_selectable: Option<RowPredicate<T>>,
    row_expandable: Option<RowPredicate<T>>,

    /// Filtered and sorted indices, valid while `dirty` is false.
    ordered: Vec<usize>,
    dirty: bool,

    events: Vec<GridEvent<T>>,
}

impl<T> fmt::Debug for DataGrid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataGrid")
            .field("rows", &self.rows.len())
            .field("columns", &self.columns.keys())
            .field("sort", &self.sort)
            .field("filter", &self.filter)
            .field("pagination", &self.pagination)
            .field("scroll_top", &self.scroll_top)
            .field("selection", &self.selection)
            .field("expansion", &self.expansion)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl<T: GridRecord + Clone> DataGrid<T> {
    /// Create a grid. Fails only on an invalid config.
    pub fn new(columns: Vec<Column<T>>, rows: Vec<T>, config: GridConfig) -> Result<Self> {
        config.validate()?;

        let columns = ColumnModel::new(columns, config.default_column_width);
        let layout = ColumnLayout::new(&columns, config.min_column_width);
        let selection = config
            .selection_mode
            .map(|mode| Selection::with_keys(mode, config.default_selected_keys.iter().cloned()));

        let mut grid = Self {
            rows,
            row_keys: Vec::new(),
            key_index: HashMap::new(),
            row_key: None,
            columns,
            sort: config
                .default_sort
                .clone()
                .map(SortState::by)
                .unwrap_or_default(),
            filter: FilterState::new(),
            pagination: config.pagination.as_ref().map(PaginationConfig::state),
            scroll_top: 0,
            selection,
            controlled_selection: false,
            expansion: Expansion::with_keys(config.default_expanded_keys.iter().cloned()),
            layout,
            row_selectable: None,
            row_expandable: None,
            ordered: Vec::new(),
            dirty: true,
            events: Vec::new(),
            config,
        };
        grid.rekey();

        log::debug!(
            "grid created: {} rows, {} columns",
            grid.rows.len(),
            grid.columns.len()
        );
        Ok(grid)
    }

    /// Derive row keys with an explicit accessor or field.
    pub fn with_row_key(mut self, row_key: RowKey<T>) -> Self {
        self.row_key = Some(row_key);
        self.rekey();
        self
    }

    /// Only rows passing the predicate can be selected.
    pub fn with_row_selectable<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.row_selectable = Some(Arc::new(f));
        self
    }

    /// Only rows passing the predicate can be expanded.
    pub fn with_row_expandable<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.row_expandable = Some(Arc::new(f));
        self
    }

    /// The host owns the selected keys.
    ///
    /// Selection handlers then only emit [`GridEvent::SelectionChanged`] with
    /// the proposed keys; the host applies them with
    /// [`set_selected_keys`](Self::set_selected_keys).
    pub fn with_controlled_selection(mut self) -> Self {
        self.controlled_selection = true;
        self
    }

    /// Install the host's pointer capture for header drags.
    pub fn with_pointer_capture(mut self, capture: impl PointerCapture + 'static) -> Self {
        self.layout.set_pointer_capture(capture);
        self
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Replace the dataset. Selection and expansion follow row keys, so they
    /// survive as long as the keys do.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.rekey();
    }

    /// Replace the column set. Known columns keep their width and position.
    pub fn set_columns(&mut self, columns: Vec<Column<T>>) {
        self.columns = ColumnModel::new(columns, self.config.default_column_width);
        self.layout.sync(&self.columns);
        self.dirty = true;
    }

    fn rekey(&mut self) {
        self.row_keys = resolve_row_keys(&self.rows, self.row_key.as_ref());
        self.key_index.clear();
        for (index, key) in self.row_keys.iter().enumerate() {
            self.key_index.entry(key.clone()).or_insert(index);
        }
        self.dirty = true;
    }

    /// Recompute the filtered and sorted indices if an input changed.
    fn refresh(&mut self) -> Result<()> {
        if self.dirty {
            self.ordered = pipeline(&self.rows, &self.columns, &self.sort, &self.filter)?;
            self.dirty = false;
            log::trace!("pipeline: {} of {} rows match", self.ordered.len(), self.rows.len());
        }
        let total = self.ordered.len();
        if let Some(pagination) = &mut self.pagination {
            pagination.clamp(total);
        }
        if let Some(viewport) = self.config.viewport() {
            let max_scroll = viewport.max_scroll(self.page_range().len());
            if self.scroll_top > max_scroll {
                log::trace!("scroll_top {} clamped to {}", self.scroll_top, max_scroll);
                self.scroll_top = max_scroll;
            }
        }
        Ok(())
    }

    /// Indices of every matching row, in display order.
    pub fn ordered_indices(&mut self) -> Result<&[usize]> {
        self.refresh()?;
        Ok(&self.ordered)
    }

    /// Indices of the rows on the current page, in display order.
    pub fn page_indices(&mut self) -> Result<&[usize]> {
        self.refresh()?;
        let range = self.page_range();
        Ok(&self.ordered[range])
    }

    fn page_range(&self) -> std::ops::Range<usize> {
        page_window(self.ordered.len(), self.pagination.as_ref(), None, 0).0.range
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Row keys in dataset order.
    pub fn row_keys(&self) -> &[String] {
        &self.row_keys
    }

    pub fn columns(&self) -> &ColumnModel<T> {
        &self.columns
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn pagination(&self) -> Option<&PaginationState> {
        self.pagination.as_ref()
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Selected keys, sorted. Empty when selection is disabled.
    pub fn selected_keys(&self) -> Vec<String> {
        self.selection.as_ref().map(|s| s.selected()).unwrap_or_default()
    }

    /// Records whose key is selected, in dataset order.
    pub fn selected_records(&self) -> Vec<&T> {
        let Some(selection) = &self.selection else {
            return Vec::new();
        };
        self.rows
            .iter()
            .zip(&self.row_keys)
            .filter(|(_, key)| selection.is_selected(key))
            .map(|(row, _)| row)
            .collect()
    }

    pub fn expansion(&self) -> &Expansion {
        &self.expansion
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Columns in visual order.
    pub fn visual_columns(&self) -> Vec<&ColumnEntry<T>> {
        self.layout
            .order()
            .iter()
            .filter_map(|key| self.columns.get(key))
            .collect()
    }

    /// Queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<GridEvent<T>> {
        std::mem::take(&mut self.events)
    }

    fn selectable_at(&self, index: usize) -> bool {
        self.row_selectable.as_ref().is_none_or(|f| f(&self.rows[index]))
    }

    fn expandable_at(&self, index: usize) -> bool {
        self.config.expandable && self.row_expandable.as_ref().is_none_or(|f| f(&self.rows[index]))
    }

    // -------------------------------------------------------------------------
    // Sort
    // -------------------------------------------------------------------------

    /// Header click on a column: advance its direction cycle.
    ///
    /// Sorting a different column abandons the previous one.
    pub fn toggle_sort(&mut self, column_key: &str) -> EventResult {
        let Some(entry) = self.columns.get(column_key) else {
            return EventResult::Ignored;
        };
        if !entry.sortable().is_sortable() {
            return EventResult::Ignored;
        }
        let directions = entry
            .column()
            .sort_directions
            .clone()
            .unwrap_or_else(|| self.config.sort_directions.clone());

        if !self.sort.toggle(column_key, &directions) {
            return EventResult::Ignored;
        }
        log::debug!("sort: {:?}", self.sort.active());
        self.dirty = true;
        self.events.push(GridEvent::SortChanged(self.sort.clone()));
        EventResult::Consumed
    }

    /// Remove the active sort.
    pub fn clear_sort(&mut self) -> EventResult {
        if !self.sort.is_sorted() {
            return EventResult::Ignored;
        }
        self.sort.clear();
        self.dirty = true;
        self.events.push(GridEvent::SortChanged(self.sort.clone()));
        EventResult::Consumed
    }

    /// Set the sort state directly (host-driven, no event).
    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Filter
    // -------------------------------------------------------------------------

    /// Check or uncheck one value in a column's filter menu.
    pub fn toggle_filter_value(&mut self, column_key: &str, value: &str) -> EventResult {
        if !self.columns.contains(column_key) {
            return EventResult::Ignored;
        }
        self.filter.toggle_value(column_key, value);
        self.filter_changed()
    }

    /// Replace a column's accepted values.
    pub fn set_filter_values(
        &mut self,
        column_key: &str,
        values: impl IntoIterator<Item = String>,
    ) -> EventResult {
        if !self.columns.contains(column_key) {
            return EventResult::Ignored;
        }
        self.filter.set_values(column_key, values);
        self.filter_changed()
    }

    /// Clear a column's filter and close its menu.
    pub fn reset_filter(&mut self, column_key: &str) -> EventResult {
        if !self.columns.contains(column_key) {
            return EventResult::Ignored;
        }
        if self.filter.reset(column_key) {
            self.filter_changed()
        } else {
            EventResult::Consumed
        }
    }

    fn filter_changed(&mut self) -> EventResult {
        log::debug!("filter: {:?}", self.filter);
        self.dirty = true;
        self.events.push(GridEvent::FilterChanged(self.filter.clone()));
        EventResult::Consumed
    }

    /// Open a column's filter menu (closing any other).
    pub fn open_filter_menu(&mut self, column_key: &str) -> EventResult {
        if !self.columns.contains(column_key) {
            return EventResult::Ignored;
        }
        self.filter.open(column_key);
        EventResult::Consumed
    }

    pub fn close_filter_menu(&mut self) -> EventResult {
        if self.filter.open_menu().is_none() {
            return EventResult::Ignored;
        }
        self.filter.close();
        EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Pagination and scroll
    // -------------------------------------------------------------------------

    /// Navigate to a page. Out-of-range pages clamp.
    pub fn go_to_page(&mut self, page: usize) -> Result<EventResult> {
        self.refresh()?;
        let total = self.ordered.len();
        let Some(pagination) = &mut self.pagination else {
            return Ok(EventResult::Ignored);
        };
        if !pagination.go_to(page, total) {
            return Ok(EventResult::Ignored);
        }
        let meta = pagination.meta(total);
        log::debug!("page {} of {}", meta.current_page, meta.page_count);
        self.events.push(GridEvent::PageChanged(meta));
        Ok(EventResult::Consumed)
    }

    /// Change the page size and return to page 1.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<EventResult> {
        self.refresh()?;
        let total = self.ordered.len();
        let Some(pagination) = &mut self.pagination else {
            return Ok(EventResult::Ignored);
        };
        if !pagination.set_page_size(page_size) {
            return Ok(EventResult::Ignored);
        }
        self.events.push(GridEvent::PageChanged(pagination.meta(total)));
        Ok(EventResult::Consumed)
    }

    /// Record the viewport's scroll offset. Ignored unless virtualized.
    pub fn scroll_to(&mut self, scroll_top: u32) -> EventResult {
        if self.config.viewport_height.is_none() || scroll_top == self.scroll_top {
            return EventResult::Ignored;
        }
        self.scroll_top = scroll_top;
        EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Flip one row's selection.
    pub fn toggle_row_selection(&mut self, key: &str) -> EventResult {
        let Some(selected) = self.selection.as_ref().map(|s| s.is_selected(key)) else {
            return EventResult::Ignored;
        };
        self.select_row(key, !selected)
    }

    /// Set one row's checkbox. Rows sharing a key share the state.
    pub fn select_row(&mut self, key: &str, selected: bool) -> EventResult {
        let Some(&index) = self.key_index.get(key) else {
            return EventResult::Ignored;
        };
        if !self.selectable_at(index) {
            return EventResult::Ignored;
        }
        self.update_selection(|s| if selected { s.select(key) } else { s.deselect(key) })
    }

    /// Header checkbox: select every selectable row on the current page, or
    /// deselect them when all already are. Other pages are untouched.
    pub fn toggle_page_selection(&mut self) -> Result<EventResult> {
        self.refresh()?;
        let keys = self.page_selectable_keys();
        Ok(self.update_selection(|s| s.toggle_page(&keys)))
    }

    pub fn clear_selection(&mut self) -> EventResult {
        self.update_selection(|s| (Vec::new(), s.clear()))
    }

    /// Apply keys from the host. No event is queued.
    pub fn set_selected_keys(&mut self, keys: impl IntoIterator<Item = String>) -> EventResult {
        match &mut self.selection {
            Some(selection) => {
                selection.replace(keys);
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    fn update_selection(&mut self, f: impl FnOnce(&mut Selection) -> SelectionDelta) -> EventResult {
        let Some(current) = &self.selection else {
            return EventResult::Ignored;
        };
        let mut next = current.clone();
        let (added, removed) = f(&mut next);
        if added.is_empty() && removed.is_empty() {
            return EventResult::Consumed;
        }
        log::debug!("selection: +{:?} -{:?}", added, removed);

        let keys = next.selected();
        let records = self
            .rows
            .iter()
            .zip(&self.row_keys)
            .filter(|(_, key)| next.is_selected(key))
            .map(|(row, _)| row.clone())
            .collect();
        self.events.push(GridEvent::SelectionChanged { keys, records });

        if !self.controlled_selection {
            self.selection = Some(next);
        }
        EventResult::Consumed
    }

    /// Distinct keys of selectable rows on the current page.
    fn page_selectable_keys(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.ordered[self.page_range()]
            .iter()
            .filter(|&&index| self.selectable_at(index))
            .map(|&index| &self.row_keys[index])
            .filter(|key| seen.insert(key.as_str()))
            .cloned()
            .collect()
    }

    fn header_check(&self) -> Option<HeaderCheckState> {
        let selection = self.selection.as_ref()?;
        if selection.mode() != SelectionMode::Multiple {
            return None;
        }
        Some(selection.header_state(&self.page_selectable_keys()))
    }

    // -------------------------------------------------------------------------
    // Expansion
    // -------------------------------------------------------------------------

    /// Expand or collapse a row's detail panel.
    pub fn toggle_expansion(&mut self, key: &str) -> EventResult {
        let Some(&index) = self.key_index.get(key) else {
            return EventResult::Ignored;
        };
        if !self.expandable_at(index) {
            return EventResult::Ignored;
        }
        let expanded = self.expansion.toggle(key);
        self.events.push(GridEvent::ExpansionChanged {
            key: key.to_string(),
            expanded,
            keys: self.expansion.keys(),
        });
        EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Column layout
    // -------------------------------------------------------------------------

    /// Pointer down on a column's resize handle.
    pub fn begin_resize(&mut self, column_key: &str, pointer_x: i32) -> Result<EventResult> {
        self.layout.begin_resize(column_key, pointer_x)?;
        Ok(EventResult::StartDrag)
    }

    /// Pointer move during a resize.
    pub fn resize_to(&mut self, pointer_x: i32) -> EventResult {
        match self.layout.resize_to(pointer_x) {
            Some(_) => EventResult::Consumed,
            None => EventResult::Ignored,
        }
    }

    /// Pointer up after a resize.
    pub fn end_resize(&mut self) -> EventResult {
        match self.layout.end_resize() {
            Some((key, width)) => {
                self.events.push(GridEvent::ColumnResized { key, width });
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    /// Set a column width directly, floor-clamped to the minimum.
    pub fn set_column_width(&mut self, column_key: &str, width: u32) -> Result<EventResult> {
        let width = self.layout.set_width(column_key, width)?;
        self.events.push(GridEvent::ColumnResized {
            key: column_key.to_string(),
            width,
        });
        Ok(EventResult::Consumed)
    }

    /// Start dragging a header.
    pub fn begin_reorder(&mut self, column_key: &str) -> Result<EventResult> {
        self.layout.begin_reorder(column_key)?;
        Ok(EventResult::StartDrag)
    }

    /// Drop the dragged header onto another one.
    pub fn drop_on(&mut self, target_key: &str) -> EventResult {
        if self.layout.drop_on(target_key) {
            self.reordered()
        } else {
            EventResult::Ignored
        }
    }

    /// Move a column to another column's position.
    pub fn move_column(&mut self, column_key: &str, target_key: &str) -> EventResult {
        if self.layout.move_column(column_key, target_key) {
            self.reordered()
        } else {
            EventResult::Ignored
        }
    }

    fn reordered(&mut self) -> EventResult {
        self.events
            .push(GridEvent::ColumnsReordered(self.layout.order().to_vec()));
        EventResult::Consumed
    }

    /// Abandon any header drag and release pointer capture.
    pub fn cancel_drag(&mut self) -> EventResult {
        if self.layout.drag().is_none() {
            return EventResult::Ignored;
        }
        self.layout.cancel_drag();
        EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Apply a named action.
    pub fn dispatch(&mut self, action: GridAction) -> Result<EventResult> {
        let result = match action {
            GridAction::ToggleSort(key) => self.toggle_sort(&key),
            GridAction::ClearSort => self.clear_sort(),
            GridAction::ToggleFilterValue { column, value } => {
                self.toggle_filter_value(&column, &value)
            }
            GridAction::ResetFilter(key) => self.reset_filter(&key),
            GridAction::OpenFilterMenu(key) => self.open_filter_menu(&key),
            GridAction::CloseFilterMenu => self.close_filter_menu(),
            GridAction::GoToPage(page) => self.go_to_page(page)?,
            GridAction::SetPageSize(size) => self.set_page_size(size)?,
            GridAction::Scroll(top) => self.scroll_to(top),
            GridAction::ToggleRow(key) => self.toggle_row_selection(&key),
            GridAction::SetRowSelected { key, selected } => self.select_row(&key, selected),
            GridAction::TogglePageSelection => self.toggle_page_selection()?,
            GridAction::ClearSelection => self.clear_selection(),
            GridAction::ToggleExpansion(key) => self.toggle_expansion(&key),
            GridAction::BeginResize { column, pointer_x } => {
                self.begin_resize(&column, pointer_x)?
            }
            GridAction::ResizeMove(x) => self.resize_to(x),
            GridAction::EndResize => self.end_resize(),
            GridAction::BeginReorder(key) => self.begin_reorder(&key)?,
            GridAction::DropOn(key) => self.drop_on(&key),
            GridAction::CancelDrag => self.cancel_drag(),
        };
        Ok(result)
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// Derive what to render.
    ///
    /// Only the rows inside the window are resolved; filtering and sorting
    /// rerun only after their inputs changed.
    pub fn view(&mut self) -> Result<GridView<'_, T>> {
        self.refresh()?;
        let grid = &*self;

        let viewport = grid.config.viewport();
        let (page, window) = page_window(
            grid.ordered.len(),
            grid.pagination.as_ref(),
            viewport.as_ref(),
            grid.scroll_top,
        );

        let control_width = grid
            .config
            .has_control_column()
            .then_some(grid.config.control_column_width);
        let sticky = sticky_offsets(&grid.columns, &grid.layout, control_width);
        let columns = grid.visual_columns();

        let header = columns
            .iter()
            .map(|&entry| grid.header_cell(entry, &sticky))
            .collect();

        let page_rows = &grid.ordered[page.range.clone()];
        let mut rows = Vec::with_capacity(window.len());
        for position in window.range() {
            let index = page_rows[position];
            rows.push(grid.view_row(index, page.range.start + position, &columns, &sticky)?);
        }

        let total_width = grid
            .layout
            .total_width()
            .saturating_add(control_width.unwrap_or(0));
        let empty_text = grid
            .ordered
            .is_empty()
            .then_some(grid.config.empty_text.as_str());

        Ok(GridView {
            header,
            rows,
            header_check: grid.header_check(),
            page,
            window,
            sticky,
            control_width,
            total_width,
            empty_text,
        })
    }

    fn header_cell<'a>(&'a self, entry: &'a ColumnEntry<T>, sticky: &StickyOffsets) -> HeaderCell<'a> {
        let key = entry.key();
        let sort = self.sort.direction_for(key);
        HeaderCell {
            key,
            title: entry.title(),
            width: self.layout.width(key).unwrap_or(entry.width()),
            fixed: entry.fixed(),
            sticky_offset: sticky.get(key).map(|(_, px)| px),
            sortable: entry.sortable().is_sortable(),
            sort,
            aria_sort: sort.map_or("none", |d| d.aria_sort()),
            filter_options: entry.column().filter_options.as_deref().unwrap_or(&[]),
            filter_active: self.filter.is_active(key),
            filter_open: self.filter.open_menu() == Some(key),
        }
    }

    fn view_row<'a>(
        &'a self,
        index: usize,
        position: usize,
        columns: &[&'a ColumnEntry<T>],
        sticky: &StickyOffsets,
    ) -> Result<ViewRow<'a, T>> {
        let record = &self.rows[index];
        let key = self.row_keys[index].as_str();

        let cells = columns
            .iter()
            .map(|entry| {
                let value = entry.resolve(record, index)?;
                let text = entry.display(&value, record, index);
                Ok(ViewCell {
                    column_key: entry.key(),
                    value,
                    text,
                    sticky: sticky.get(entry.key()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ViewRow {
            key,
            index,
            position,
            record,
            cells,
            selected: self.selection.as_ref().is_some_and(|s| s.is_selected(key)),
            selectable: self.selection.is_some() && self.selectable_at(index),
            expanded: self.expansion.is_expanded(key),
            expandable: self.expandable_at(index),
        })
    }
}

impl<T: GridRecord + Clone + Serialize> DataGrid<T> {
    /// Build an export of every matching row (all pages) in display order,
    /// with columns in their current visual order.
    pub fn export_file(&mut self, format: ExportFormat, timestamp_ms: i64) -> Result<ExportFile> {
        self.refresh()?;
        let columns = self.visual_columns();
        export_rows(format, &columns, &self.rows, &self.ordered, timestamp_ms)
    }

    /// Export and hand the file to a sink. Returns the sink's location.
    pub fn export(&mut self, format: ExportFormat, sink: &mut dyn ExportSink) -> Result<String> {
        let file = self.export_file(format, now_ms())?;
        let location = sink.deliver(&file)?;
        log::info!("exported {} rows to {}", file.row_count, location);
        self.events.push(GridEvent::Exported {
            format,
            filename: file.filename,
            location: location.clone(),
            row_count: file.row_count,
        });
        Ok(location)
    }
}
