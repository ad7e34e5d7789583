//! Julian day numbers
//!
//! Dates are taken at midnight UTC. The Julian date of 1970-01-01T00:00Z is
//! 2440587.5; the Julian day number is its truncation.

use chrono::{Datelike, NaiveDate};

/// Julian date of the Unix epoch
pub const JD_UNIX_EPOCH: f64 = 2_440_587.5;

// 1970-01-01 counted from 0001-01-01 (day 1)
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

fn days_since_epoch(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
}

/// Fractional Julian date at midnight UTC
pub fn julian_date(date: NaiveDate) -> f64 {
    JD_UNIX_EPOCH + days_since_epoch(date) as f64
}

/// Integral Julian day
pub fn julian_day(date: NaiveDate) -> i64 {
    julian_date(date) as i64
}
