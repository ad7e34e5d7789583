//! Calendar grids
//!
//! The ascending walk from `min` decides which dates a range contains.
//! Month steps clamp to the last valid day and the clamp carries forward
//! (Jan 31, Feb 28, Mar 28, ...), so stepping back one month from the last
//! date does not retrace the walk. [`DescendingWalk`] replays it backward
//! from the step indexes where the day of month shrank.

use chrono::{Datelike, Days, NaiveDate};

use super::frequency::{Frequency, Unit};

/// First date at or after `lower` on the ascending walk from `origin`.
/// `None` when the walk overflows the calendar first.
pub fn first_on_or_after(origin: NaiveDate, lower: NaiveDate, step: Frequency) -> Option<NaiveDate> {
    if lower <= origin {
        return Some(origin);
    }
    match step.unit() {
        Unit::Days(n) => {
            let distance = u64::try_from(lower.signed_duration_since(origin).num_days()).ok()?;
            let steps = distance.div_ceil(n);
            origin.checked_add_days(Days::new(steps.checked_mul(n)?))
        }
        Unit::Months(_) => {
            let mut date = origin;
            while date < lower {
                date = step.next(date)?;
            }
            Some(date)
        }
    }
}

/// The ascending walk from an origin, traversed from its last date back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescendingWalk {
    origin: NaiveDate,
    step: Frequency,
    // (step index, day of month) wherever the day shrank, origin first
    clamps: Vec<(i64, u32)>,
}

impl DescendingWalk {
    /// Walk over `[origin, max]` plus its largest date. When `max` is
    /// before `origin` the range is empty and `max` itself is returned.
    pub fn new(origin: NaiveDate, max: NaiveDate, step: Frequency) -> (Self, NaiveDate) {
        let mut walk = Self {
            origin,
            step,
            clamps: vec![(0, origin.day())],
        };
        if max <= origin {
            return (walk, max);
        }

        let last = match step.unit() {
            Unit::Days(n) => {
                let distance = u64::try_from(max.signed_duration_since(origin).num_days()).unwrap_or(0);
                origin
                    .checked_add_days(Days::new(distance - distance % n))
                    .unwrap_or(origin)
            }
            Unit::Months(_) => {
                let mut date = origin;
                let mut index = 0;
                while let Some(next) = step.next(date).filter(|d| *d <= max) {
                    index += 1;
                    if next.day() != date.day() {
                        walk.clamps.push((index, next.day()));
                    }
                    date = next;
                }
                date
            }
        };
        (walk, last)
    }

    /// The walk's date one step before `date`. Below the origin the plain
    /// frequency applies.
    pub fn prev(&self, date: NaiveDate) -> Option<NaiveDate> {
        let Unit::Months(n) = self.step.unit() else {
            return self.step.prev(date);
        };
        if date <= self.origin {
            return self.step.prev(date);
        }

        let n = i64::from(n);
        let index = (month_index(date) - month_index(self.origin)) / n - 1;
        let day = self
            .clamps
            .iter()
            .rev()
            .find(|(at, _)| *at <= index)
            .map_or(self.origin.day(), |(_, day)| *day);

        let month = month_index(self.origin) + index * n;
        let year = i32::try_from(month.div_euclid(12)).ok()?;
        let month0 = u32::try_from(month.rem_euclid(12)).ok()?;
        NaiveDate::from_ymd_opt(year, month0 + 1, day)
    }
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ascending(min: NaiveDate, max: NaiveDate, step: Frequency) -> Vec<NaiveDate> {
        let mut out = Vec::new();
        let mut date = Some(min);
        while let Some(d) = date.filter(|d| *d <= max) {
            out.push(d);
            date = step.next(d);
        }
        out
    }

    fn descending(min: NaiveDate, max: NaiveDate, step: Frequency) -> Vec<NaiveDate> {
        let (walk, first) = DescendingWalk::new(min, max, step);
        let mut out = Vec::new();
        let mut date = Some(first);
        while let Some(d) = date.filter(|d| *d >= min) {
            out.push(d);
            date = walk.prev(d);
        }
        out
    }

    #[test]
    fn test_first_on_or_after_days() {
        let origin = ymd(2021, 1, 1);
        assert_eq!(first_on_or_after(origin, ymd(2021, 1, 2), Frequency::Weekly), Some(ymd(2021, 1, 8)));
        assert_eq!(first_on_or_after(origin, ymd(2021, 1, 8), Frequency::Weekly), Some(ymd(2021, 1, 8)));
        assert_eq!(first_on_or_after(origin, ymd(2020, 1, 1), Frequency::Weekly), Some(origin));
    }

    #[test]
    fn test_first_on_or_after_months_follows_clamps() {
        let origin = ymd(2021, 1, 31);
        assert_eq!(first_on_or_after(origin, ymd(2021, 3, 1), Frequency::Monthly), Some(ymd(2021, 3, 28)));
    }

    #[test]
    fn test_descending_day_steps_land_on_grid() {
        let (min, max) = (ymd(2021, 1, 1), ymd(2021, 1, 10));
        assert_eq!(descending(min, max, Frequency::Weekly), vec![ymd(2021, 1, 8), ymd(2021, 1, 1)]);
    }

    #[test]
    fn test_descending_replays_month_clamps() {
        let (min, max) = (ymd(2021, 1, 31), ymd(2021, 5, 30));
        let mut expected = ascending(min, max, Frequency::Monthly);
        expected.reverse();
        assert_eq!(descending(min, max, Frequency::Monthly), expected);
        assert_eq!(expected.last(), Some(&ymd(2021, 1, 31)));
    }

    #[test]
    fn test_descending_matches_ascending_for_every_frequency() {
        let (min, max) = (ymd(2019, 8, 31), ymd(2024, 3, 15));
        for step in Frequency::ALL {
            let mut expected = ascending(min, max, step);
            expected.reverse();
            assert_eq!(descending(min, max, step), expected, "{}", step);
        }
    }

    #[test]
    fn test_leap_day_yearly() {
        let (min, max) = (ymd(2020, 2, 29), ymd(2025, 1, 1));
        assert_eq!(
            descending(min, max, Frequency::Yearly),
            vec![ymd(2024, 2, 28), ymd(2023, 2, 28), ymd(2022, 2, 28), ymd(2021, 2, 28), ymd(2020, 2, 29)]
        );
    }

    #[test]
    fn test_empty_range() {
        let (walk, first) = DescendingWalk::new(ymd(2021, 2, 1), ymd(2021, 1, 1), Frequency::Monthly);
        assert_eq!(first, ymd(2021, 1, 1));
        assert_eq!(walk.prev(first), Some(ymd(2020, 12, 1)));
    }
}
