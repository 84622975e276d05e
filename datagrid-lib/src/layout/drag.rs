//! Pointer-drag sessions for header interactions.
//!
//! A drag captures what was grabbed and where, then receives pointer moves
//! until release. The input system behind it (mouse, touch, pointer events)
//! is the host's business: the host plugs in a [`PointerCapture`] that
//! installs and removes whatever global listeners it needs.

/// Host adapter for pointer capture during a drag.
///
/// `acquire` is called when a drag starts and `release` exactly once when it
/// ends, is cancelled, or the owning layout is dropped.
pub trait PointerCapture: Send {
    fn acquire(&mut self, subject_id: &str);
    fn release(&mut self, subject_id: &str);
}

/// Capture that does nothing; for hosts that track pointers themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn acquire(&mut self, _subject_id: &str) {}
    fn release(&mut self, _subject_id: &str) {}
}

/// State captured at drag start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession<V> {
    /// What is being dragged (a column key).
    pub subject_id: String,
    /// Pointer coordinate at drag start.
    pub origin_pointer: i32,
    /// Value being manipulated, as it was at drag start.
    pub origin_value: V,
}

impl<V> DragSession<V> {
    pub fn new(subject_id: impl Into<String>, origin_pointer: i32, origin_value: V) -> Self {
        Self {
            subject_id: subject_id.into(),
            origin_pointer,
            origin_value,
        }
    }

    /// Pointer travel since drag start.
    pub fn delta(&self, pointer: i32) -> i32 {
        pointer.saturating_sub(self.origin_pointer)
    }
}

/// The drag in progress, if any. Only one header drag runs at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveDrag {
    /// Column resize; the origin value is the column width.
    Resize(DragSession<u32>),
    /// Column reorder; the origin value is the dragged column's index.
    Reorder(DragSession<usize>),
}

impl ActiveDrag {
    pub fn subject_id(&self) -> &str {
        match self {
            ActiveDrag::Resize(s) => &s.subject_id,
            ActiveDrag::Reorder(s) => &s.subject_id,
        }
    }
}
