//! Sort engine: sort state, header toggling and row ordering.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Result;
use crate::model::CellValue;
use crate::model::ColumnModel;
use crate::model::GridRecord;
use crate::model::Sortable;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Ascend,
    /// Descending order (Z-A, 9-0).
    Descend,
}

impl SortDirection {
    /// The default header cycle: ascend, then descend, then back to unsorted.
    pub const DEFAULT_CYCLE: [SortDirection; 2] = [SortDirection::Ascend, SortDirection::Descend];

    /// Apply this direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascend => ordering,
            SortDirection::Descend => ordering.reverse(),
        }
    }

    /// Value for the `aria-sort` attribute of a sorted header.
    pub fn aria_sort(self) -> &'static str {
        match self {
            SortDirection::Ascend => "ascending",
            SortDirection::Descend => "descending",
        }
    }
}

/// The active sort: one column and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub column_key: String,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(column_key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_key: column_key.into(),
            direction,
        }
    }

    pub fn ascend(column_key: impl Into<String>) -> Self {
        Self::new(column_key, SortDirection::Ascend)
    }

    pub fn descend(column_key: impl Into<String>) -> Self {
        Self::new(column_key, SortDirection::Descend)
    }
}

/// Single-column sort state.
///
/// A direction only exists together with a column, so an unsorted grid is
/// simply `active == None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    active: Option<SortOrder>,
}

impl SortState {
    /// No sorting.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sorted by one column.
    pub fn by(order: SortOrder) -> Self {
        Self {
            active: Some(order),
        }
    }

    /// The active sort, if any.
    pub fn active(&self) -> Option<&SortOrder> {
        self.active.as_ref()
    }

    pub fn column_key(&self) -> Option<&str> {
        self.active.as_ref().map(|o| o.column_key.as_str())
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.active.as_ref().map(|o| o.direction)
    }

    /// Direction for a given column, `None` if that column isn't sorted.
    pub fn direction_for(&self, column_key: &str) -> Option<SortDirection> {
        self.active
            .as_ref()
            .filter(|o| o.column_key == column_key)
            .map(|o| o.direction)
    }

    pub fn is_sorted(&self) -> bool {
        self.active.is_some()
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Toggle sort for a column header click.
    ///
    /// Clicking the sorted column advances through `directions` and then back
    /// to unsorted. Clicking another column abandons the old one and starts at
    /// the first direction. Returns `false` if nothing changed (empty cycle).
    pub fn toggle(&mut self, column_key: &str, directions: &[SortDirection]) -> bool {
        let Some(&first) = directions.first() else {
            return false;
        };

        let next = match &self.active {
            Some(order) if order.column_key == column_key => {
                match directions.iter().position(|d| *d == order.direction) {
                    Some(i) => directions.get(i + 1).copied(),
                    None => Some(first),
                }
            }
            _ => Some(first),
        };

        self.active = next.map(|direction| SortOrder::new(column_key, direction));
        true
    }
}

/// Compare two non-null cell values in ascending order.
///
/// Numbers compare numerically (ints and floats together), dates by
/// timestamp, strings case-sensitively. Mixed types order by kind:
/// bool < number < date < text.
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Int(x), CellValue::Int(y)) => x.cmp(y),
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        (CellValue::Date(x), CellValue::Date(y)) => x.cmp(y),
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => kind_rank(a).cmp(&kind_rank(b)),
        },
    }
}

fn kind_rank(value: &CellValue) -> u8 {
    match value {
        CellValue::Null => 0,
        CellValue::Bool(_) => 1,
        CellValue::Int(_) | CellValue::Float(_) => 2,
        CellValue::Date(_) => 3,
        CellValue::Text(_) => 4,
    }
}

/// Compare cell values for a sort direction. Nulls sort first in both
/// directions; the direction only inverts the comparison of non-null values.
pub fn compare_cells(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => direction.apply(compare_values(a, b)),
    }
}

/// Order a subset of rows.
///
/// `indices` selects rows from `rows` (typically the filter output) and the
/// result is a permutation of it. The sort is stable and idempotent. With no
/// active sort, or when the active key names no sortable column, the input
/// order is returned unchanged.
///
/// Cell values are resolved once per row before ordering, so an accessor
/// failure returns an error without partially reordering anything.
pub fn sort<T: GridRecord>(
    rows: &[T],
    indices: &[usize],
    columns: &ColumnModel<T>,
    state: &SortState,
) -> Result<Vec<usize>> {
    let Some(order) = state.active() else {
        return Ok(indices.to_vec());
    };
    let Some(entry) = columns.get(&order.column_key) else {
        log::debug!("sort column '{}' not in model, keeping order", order.column_key);
        return Ok(indices.to_vec());
    };

    match entry.sortable() {
        Sortable::No => Ok(indices.to_vec()),
        Sortable::Custom(cmp) => {
            let mut sorted = indices.to_vec();
            sorted.sort_by(|&a, &b| order.direction.apply(cmp(&rows[a], &rows[b])));
            Ok(sorted)
        }
        Sortable::Default => {
            let mut keyed = indices
                .iter()
                .map(|&i| entry.resolve(&rows[i], i).map(|value| (i, value)))
                .collect::<Result<Vec<_>>>()?;
            keyed.sort_by(|(_, a), (_, b)| compare_cells(a, b, order.direction));
            Ok(keyed.into_iter().map(|(i, _)| i).collect())
        }
    }
}
