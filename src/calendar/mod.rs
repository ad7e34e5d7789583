//! Calendar generator
//!
//! A virtual table producing one row per date between a start and a stop
//! date, stepping by a named frequency. Date, year and the hidden start,
//! stop, step and format columns narrow the range; every other column is
//! left for the host to filter.

mod columns;
mod cursor;
mod frequency;
mod grid;
mod julian;
mod table;

pub use columns::{CalendarColumn, CALENDAR_DECLARATION};
pub use cursor::{
    format_date, is_valid_format, parse_date, week_of_year, CalendarCursor, CalendarRange,
    CALENDAR_ROW_CAP, DATE_FORMAT,
};
pub use frequency::Frequency;
pub use grid::{first_on_or_after, DescendingWalk};
pub use julian::{julian_date, julian_day, JD_UNIX_EPOCH};
pub use table::{default_max, default_min, CalendarTable, BOUNDED_ROWS, UNBOUNDED_ROWS};
