//! Series generator
//!
//! A virtual table producing integers from `start` to `stop` by `step`,
//! in either direction. Descending walks visit the same values as the
//! ascending walk.

mod columns;
mod cursor;
mod table;

pub use columns::{SeriesColumn, SERIES_DECLARATION};
pub use cursor::{SeriesBounds, SeriesCursor, SERIES_ROW_CAP};
pub use table::{SeriesTable, BOUNDED_ROWS, UNBOUNDED_ROWS};
