//! Data grid engine
//!
//! Headless state and derivation for interactive data tables: column model,
//! row keys, sorting, filtering, pagination, scroll virtualization, selection,
//! expandable rows, column resize/reorder with sticky columns, and CSV/JSON
//! export. Rendering is left to the host; [`grid::DataGrid::view`] produces
//! everything a renderer needs.

pub mod error;
pub mod expansion;
pub mod export;
pub mod grid;
pub mod layout;
pub mod model;
pub mod query;
pub mod selection;

pub use error::GridError;
pub use error::Result;
pub use grid::DataGrid;
pub use grid::GridConfig;
pub use grid::GridEvent;
pub use grid::GridView;
