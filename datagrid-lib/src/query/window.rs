//! Scroll virtualization over the rows of the current page.
//!
//! Only rows intersecting the viewport (plus a buffer above and below) are
//! rendered; spacer rows absorb the height of everything else so the scrollbar
//! geometry never changes while scrolling. Computing a window is pure index
//! arithmetic and never touches the rows themselves.

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

/// Virtualization parameters, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub row_height: u32,
    pub height: u32,
    pub buffer_rows: u32,
}

impl Viewport {
    pub fn new(row_height: u32, height: u32, buffer_rows: u32) -> Self {
        Self {
            row_height,
            height,
            buffer_rows,
        }
    }

    /// Compute the window for `len` rows at `scroll_top`.
    pub fn window(&self, len: usize, scroll_top: u32) -> Window {
        window_for(len, scroll_top, self.row_height, self.height, self.buffer_rows)
    }

    /// Largest meaningful scroll offset for `len` rows.
    pub fn max_scroll(&self, len: usize) -> u32 {
        content_height(len, self.row_height).saturating_sub(self.height)
    }
}

/// Rows to render plus the spacer heights around them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Window {
    /// First rendered row (inclusive).
    pub start_index: usize,
    /// Last rendered row (exclusive).
    pub end_index: usize,
    /// Height of the spacer above the rendered rows.
    pub top_padding: u32,
    /// Height of the spacer below the rendered rows.
    pub bottom_padding: u32,
}

impl Window {
    /// The whole page with no padding; used when virtualization is off.
    pub fn full(len: usize) -> Self {
        Self {
            start_index: 0,
            end_index: len,
            top_padding: 0,
            bottom_padding: 0,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn content_height(len: usize, row_height: u32) -> u32 {
    u32::try_from(len)
        .unwrap_or(u32::MAX)
        .saturating_mul(row_height)
}

/// Compute the render window.
///
/// ```text
/// visible = ceil(viewport_height / row_height)
/// start   = clamp(floor(scroll_top / row_height) - buffer, 0, len)
/// end     = clamp(start + visible + 2 * buffer, 0, len)
/// top     = start * row_height
/// bottom  = max(0, len * row_height - (end - start) * row_height - top)
/// ```
///
/// `top + (end - start) * row_height + bottom == len * row_height` holds as
/// long as `len * row_height` fits in a `u32`. Past that, heights saturate at
/// `u32::MAX` and the spacers only cover the first `u32::MAX` pixels. A zero
/// row height degenerates to the full range.
pub fn window_for(
    len: usize,
    scroll_top: u32,
    row_height: u32,
    viewport_height: u32,
    buffer_rows: u32,
) -> Window {
    if row_height == 0 {
        return Window::full(len);
    }

    let visible = viewport_height.div_ceil(row_height) as usize;
    let buffer = buffer_rows as usize;
    let first_visible = (scroll_top / row_height) as usize;

    let start_index = first_visible.saturating_sub(buffer).min(len);
    let end_index = start_index
        .saturating_add(visible)
        .saturating_add(buffer.saturating_mul(2))
        .min(len);

    let top_padding = content_height(start_index, row_height);
    let rendered = content_height(end_index - start_index, row_height);
    let bottom_padding = content_height(len, row_height)
        .saturating_sub(rendered)
        .saturating_sub(top_padding);

    log::trace!(
        "window: scroll_top={} rows={}..{} of {}",
        scroll_top,
        start_index,
        end_index,
        len
    );

    Window {
        start_index,
        end_index,
        top_padding,
        bottom_padding,
    }
}
