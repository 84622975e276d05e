//! Sticky offsets for columns pinned to the left or right edge.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::ColumnModel;
use crate::model::FixedSide;

use super::ColumnLayout;

/// Pixel offsets of pinned columns from their edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StickyOffsets {
    /// Offset of the leading control column (selection/expansion), always 0.
    pub control: Option<u32>,
    /// Left-fixed columns: distance from the left edge.
    pub left: BTreeMap<String, u32>,
    /// Right-fixed columns: distance from the right edge.
    pub right: BTreeMap<String, u32>,
}

impl StickyOffsets {
    /// Offset of a fixed column, with its side.
    pub fn get(&self, key: &str) -> Option<(FixedSide, u32)> {
        self.left
            .get(key)
            .map(|&px| (FixedSide::Left, px))
            .or_else(|| self.right.get(key).map(|&px| (FixedSide::Right, px)))
    }
}

/// Compute sticky offsets from the current visual order and widths.
///
/// Left-fixed columns accumulate the widths of the left-fixed columns before
/// them, starting after the control column when there is one. Right-fixed
/// columns accumulate the same way walking the order backwards from the right
/// edge. Derived fresh from the layout every time, so a reorder or resize is
/// reflected immediately. Offsets saturate at `u32::MAX`.
pub fn sticky_offsets<T>(
    columns: &ColumnModel<T>,
    layout: &ColumnLayout,
    control_width: Option<u32>,
) -> StickyOffsets {
    let fixed_width = |key: &str, side: FixedSide| -> Option<u32> {
        columns
            .get(key)
            .filter(|entry| entry.fixed() == Some(side))
            .map(|_| layout.width(key).unwrap_or(0))
    };

    let mut left = BTreeMap::new();
    let mut acc = control_width.unwrap_or(0);
    for key in layout.order() {
        if let Some(width) = fixed_width(key, FixedSide::Left) {
            left.insert(key.clone(), acc);
            acc = acc.saturating_add(width);
        }
    }

    let mut right = BTreeMap::new();
    let mut acc = 0u32;
    for key in layout.order().iter().rev() {
        if let Some(width) = fixed_width(key, FixedSide::Right) {
            right.insert(key.clone(), acc);
            acc = acc.saturating_add(width);
        }
    }

    StickyOffsets {
        control: control_width.map(|_| 0),
        left,
        right,
    }
}
