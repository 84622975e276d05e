//! Classic pagination over the filtered and sorted rows.

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

/// Current page and page size.
///
/// `current_page` is 1-based and kept in `[1, max(1, page_count)]` by every
/// operation that knows the row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    current_page: usize,
    page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: 10,
        }
    }
}

impl PaginationState {
    /// Creates a state on page 1. A zero page size becomes 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Sets the starting page (clamped once the row count is known).
    pub fn with_page(mut self, page: usize) -> Self {
        self.current_page = page.max(1);
        self
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Clamp the current page into range for `total` rows.
    pub fn clamp(&mut self, total: usize) {
        self.current_page = clamp_page(self.current_page, page_count(total, self.page_size));
    }

    /// Navigate to a page. Out-of-range pages clamp, never fail.
    /// Returns `true` if the current page changed.
    pub fn go_to(&mut self, page: usize, total: usize) -> bool {
        let target = clamp_page(page, page_count(total, self.page_size));
        let changed = target != self.current_page;
        self.current_page = target;
        changed
    }

    /// Change the page size and return to page 1.
    /// A zero page size is ignored. Returns `true` if anything changed.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if page_size == 0 {
            return false;
        }
        let changed = page_size != self.page_size || self.current_page != 1;
        self.page_size = page_size;
        self.current_page = 1;
        changed
    }

    /// Describe the page for `total` rows, clamping the page first.
    pub fn meta(&self, total: usize) -> PageMeta {
        let page_count = page_count(total, self.page_size);
        let current_page = clamp_page(self.current_page, page_count);
        PageMeta {
            current_page,
            page_size: self.page_size,
            page_count,
            total,
            range: page_range(total, current_page, self.page_size),
        }
    }
}

/// Number of pages for `total` rows.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

fn page_range(total: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = (page - 1).saturating_mul(page_size).min(total);
    let end = page.saturating_mul(page_size).min(total);
    start..end
}

/// Slice range of the current page within `total` ordered rows.
pub fn paginate(total: usize, state: &PaginationState) -> Range<usize> {
    state.meta(total).range
}

/// Pagination summary handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Clamped 1-based page.
    pub current_page: usize,
    pub page_size: usize,
    pub page_count: usize,
    /// Rows matching the current filters.
    pub total: usize,
    /// Slice of the ordered rows shown on this page.
    pub range: Range<usize>,
}

impl PageMeta {
    /// Meta for an unpaginated grid: everything on one page.
    pub fn single(total: usize) -> Self {
        Self {
            current_page: 1,
            page_size: total,
            page_count: usize::from(total > 0),
            total,
            range: 0..total,
        }
    }

    /// 1-based index of the first row on this page, 0 when empty.
    pub fn first_item(&self) -> usize {
        if self.range.is_empty() {
            0
        } else {
            self.range.start + 1
        }
    }

    /// 1-based index of the last row on this page, 0 when empty.
    pub fn last_item(&self) -> usize {
        self.range.end
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.page_count
    }

    /// Short summary such as `"11-20 of 25"`.
    pub fn summary(&self) -> String {
        format!("{}-{} of {}", self.first_item(), self.last_item(), self.total)
    }
}
