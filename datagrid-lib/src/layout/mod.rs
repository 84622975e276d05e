//! Column layout: widths, visual order and sticky offsets.

mod drag;
mod sticky;

pub use drag::*;
pub use sticky::*;

use std::collections::HashMap;
use std::fmt;

use crate::error::GridError;
use crate::error::Result;
use crate::model::ColumnModel;

/// Per-column widths and visual order, with the header drag in progress.
///
/// Widths are independent: resizing one column never relayouts its siblings,
/// the table simply grows and scrolls horizontally.
pub struct ColumnLayout {
    order: Vec<String>,
    widths: HashMap<String, u32>,
    min_width: u32,
    drag: Option<ActiveDrag>,
    capture: Box<dyn PointerCapture>,
}

impl fmt::Debug for ColumnLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnLayout")
            .field("order", &self.order)
            .field("widths", &self.widths)
            .field("min_width", &self.min_width)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

impl ColumnLayout {
    /// Lay out columns in declaration order with their resolved widths.
    pub fn new<T>(columns: &ColumnModel<T>, min_width: u32) -> Self {
        let mut layout = Self {
            order: Vec::new(),
            widths: HashMap::new(),
            min_width,
            drag: None,
            capture: Box::new(NoCapture),
        };
        layout.sync(columns);
        layout
    }

    /// Install the host's pointer capture adapter.
    pub fn set_pointer_capture(&mut self, capture: impl PointerCapture + 'static) {
        self.cancel_drag();
        self.capture = Box::new(capture);
    }

    /// Reconcile with a new column set. Known keys keep their position and
    /// width, new keys are appended, removed keys are dropped.
    pub fn sync<T>(&mut self, columns: &ColumnModel<T>) {
        let keys = columns.keys();
        self.order.retain(|k| keys.contains(k));
        self.widths.retain(|k, _| keys.contains(k));
        for entry in columns.iter() {
            if !self.widths.contains_key(entry.key()) {
                self.order.push(entry.key().to_string());
                self.widths.insert(entry.key().to_string(), entry.width());
            }
        }
        if let Some(drag) = &self.drag
            && !self.widths.contains_key(drag.subject_id())
        {
            self.cancel_drag();
        }
    }

    /// Column keys in visual order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Current width of a column.
    pub fn width(&self, key: &str) -> Option<u32> {
        self.widths.get(key).copied()
    }

    pub fn min_width(&self) -> u32 {
        self.min_width
    }

    /// Total width of all data columns, saturating at `u32::MAX`.
    pub fn total_width(&self) -> u32 {
        self.widths
            .values()
            .fold(0u32, |acc, &width| acc.saturating_add(width))
    }

    /// Set a column width directly, floor-clamped to the minimum.
    pub fn set_width(&mut self, key: &str, width: u32) -> Result<u32> {
        let min = self.min_width;
        let slot = self
            .widths
            .get_mut(key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))?;
        *slot = width.max(min);
        Ok(*slot)
    }

    /// The drag in progress.
    pub fn drag(&self) -> Option<&ActiveDrag> {
        self.drag.as_ref()
    }

    fn start_drag(&mut self, drag: ActiveDrag) {
        self.cancel_drag();
        self.capture.acquire(drag.subject_id());
        self.drag = Some(drag);
    }

    /// End any drag in progress and release pointer capture.
    pub fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            self.capture.release(drag.subject_id());
        }
    }

    // -------------------------------------------------------------------------
    // Resize
    // -------------------------------------------------------------------------

    /// Start resizing a column from the given pointer x.
    pub fn begin_resize(&mut self, key: &str, pointer_x: i32) -> Result<()> {
        let width = self
            .width(key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))?;
        log::debug!("begin resize '{}' at x={} width={}", key, pointer_x, width);
        self.start_drag(ActiveDrag::Resize(DragSession::new(key, pointer_x, width)));
        Ok(())
    }

    /// Follow the pointer during a resize.
    ///
    /// Returns the resized column and its new width, or `None` when no resize
    /// is in progress.
    pub fn resize_to(&mut self, pointer_x: i32) -> Option<(String, u32)> {
        let Some(ActiveDrag::Resize(session)) = &self.drag else {
            return None;
        };
        let target = i64::from(session.origin_value) + i64::from(session.delta(pointer_x));
        let width = target.clamp(i64::from(self.min_width), i64::from(u32::MAX)) as u32;
        let key = session.subject_id.clone();
        self.widths.insert(key.clone(), width);
        Some((key, width))
    }

    /// Finish a resize. Returns the final width if a resize was in progress.
    pub fn end_resize(&mut self) -> Option<(String, u32)> {
        let Some(ActiveDrag::Resize(session)) = &self.drag else {
            return None;
        };
        let key = session.subject_id.clone();
        let width = self.width(&key)?;
        self.cancel_drag();
        log::debug!("end resize '{}' width={}", key, width);
        Some((key, width))
    }

    // -------------------------------------------------------------------------
    // Reorder
    // -------------------------------------------------------------------------

    /// Start dragging a header to reorder it.
    pub fn begin_reorder(&mut self, key: &str) -> Result<()> {
        let index = self
            .position(key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))?;
        self.start_drag(ActiveDrag::Reorder(DragSession::new(key, 0, index)));
        Ok(())
    }

    /// Drop the dragged header onto another header.
    ///
    /// Ends the drag in every case. Returns `true` if the order changed.
    pub fn drop_on(&mut self, target_key: &str) -> bool {
        let dragged = match &self.drag {
            Some(ActiveDrag::Reorder(session)) => session.subject_id.clone(),
            _ => return false,
        };
        self.cancel_drag();
        self.move_column(&dragged, target_key)
    }

    /// Move `key` to the position currently held by `target_key`.
    /// Moving a column onto itself, or naming an unknown column, is a no-op.
    pub fn move_column(&mut self, key: &str, target_key: &str) -> bool {
        if key == target_key {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(key), self.position(target_key)) else {
            return false;
        };
        let moved = self.order.remove(from);
        self.order.insert(to, moved);
        log::debug!("moved column '{}' from {} to {}", key, from, to);
        true
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.order.iter().position(|k| k == key)
    }
}

impl Drop for ColumnLayout {
    fn drop(&mut self) {
        self.cancel_drag();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::model::Column;

    fn layout() -> ColumnLayout {
        let columns: Vec<Column<serde_json::Value>> = vec![
            Column::field("a", "A").width(100),
            Column::field("b", "B").width(120),
            Column::field("c", "C"),
        ];
        ColumnLayout::new(&ColumnModel::new(columns, 150), 80)
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl PointerCapture for Recorder {
        fn acquire(&mut self, subject_id: &str) {
            self.0.lock().unwrap().push(format!("+{}", subject_id));
        }
        fn release(&mut self, subject_id: &str) {
            self.0.lock().unwrap().push(format!("-{}", subject_id));
        }
    }

    #[test]
    fn resize_changes_only_one_column() {
        let mut layout = layout();
        layout.begin_resize("b", 300).unwrap();
        assert_eq!(layout.resize_to(350), Some(("b".to_string(), 170)));
        assert_eq!(layout.end_resize(), Some(("b".to_string(), 170)));
        assert_eq!(layout.width("a"), Some(100));
        assert_eq!(layout.width("c"), Some(150));
        assert!(layout.drag().is_none());
    }

    #[test]
    fn resize_clamps_to_minimum() {
        let mut layout = layout();
        layout.begin_resize("a", 0).unwrap();
        assert_eq!(layout.resize_to(-500), Some(("a".to_string(), 80)));
    }

    #[test]
    fn resize_unknown_column_fails() {
        let mut layout = layout();
        assert!(matches!(layout.begin_resize("zz", 0), Err(GridError::UnknownColumn(_))));
    }

    #[test]
    fn reorder_splices_before_target() {
        let mut layout = layout();
        layout.begin_reorder("c").unwrap();
        assert!(layout.drop_on("a"));
        assert_eq!(layout.order(), ["c", "a", "b"]);

        assert!(layout.move_column("c", "b"));
        assert_eq!(layout.order(), ["a", "b", "c"]);
    }

    #[test]
    fn reorder_onto_self_is_noop() {
        let mut layout = layout();
        layout.begin_reorder("b").unwrap();
        assert!(!layout.drop_on("b"));
        assert_eq!(layout.order(), ["a", "b", "c"]);
        assert!(layout.drag().is_none());
    }

    #[test]
    fn capture_released_on_every_exit() {
        let recorder = Recorder::default();
        let log = Arc::clone(&recorder.0);
        {
            let mut layout = layout();
            layout.set_pointer_capture(recorder);
            layout.begin_resize("a", 0).unwrap();
            layout.end_resize();
            layout.begin_reorder("b").unwrap();
            // A new drag ends the previous one.
            layout.begin_resize("c", 0).unwrap();
            // Dropped mid-drag.
        }
        assert_eq!(
            *log.lock().unwrap(),
            vec!["+a", "-a", "+b", "-b", "+c", "-c"]
        );
    }

    #[test]
    fn sync_keeps_known_columns() {
        let mut layout = layout();
        layout.set_width("a", 300).unwrap();
        layout.move_column("c", "a");

        let columns: Vec<Column<serde_json::Value>> = vec![
            Column::field("a", "A").width(100),
            Column::field("c", "C"),
            Column::field("d", "D").width(90),
        ];
        layout.sync(&ColumnModel::new(columns, 150));
        assert_eq!(layout.order(), ["c", "a", "d"]);
        assert_eq!(layout.width("a"), Some(300));
        assert_eq!(layout.width("d"), Some(90));
    }
}
