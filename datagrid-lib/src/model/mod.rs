//! Grid data model: cell values, rows, columns and row keys.

mod column;
mod record;
mod row_key;
mod value;

pub use column::*;
pub use record::GridRecord;
pub use row_key::*;
pub use value::CellValue;
