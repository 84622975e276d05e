//! Row pipeline: filter, sort, paginate, window.
//!
//! Each stage is a pure function over row indices so the grid never clones
//! rows while deriving a view.

mod filter;
mod order;
mod page;
mod window;

pub use filter::*;
pub use order::*;
pub use page::*;
pub use window::*;
