//! Calendar table columns

use crate::planner::{AcceptancePolicy, ColumnIndex};

/// Declared schema of the calendar table
pub const CALENDAR_DECLARATION: &str = "CREATE TABLE x(date, weekday, day, week, month, year, \
     julianDay, julianDate, print, start HIDDEN, stop HIDDEN, step HIDDEN, format HIDDEN)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarColumn {
    Date,
    Weekday,
    Day,
    Week,
    Month,
    Year,
    JulianDay,
    JulianDate,
    Print,
    Start,
    Stop,
    Step,
    Format,
}

impl ColumnIndex for CalendarColumn {
    const ALL: &'static [Self] = &[
        CalendarColumn::Date,
        CalendarColumn::Weekday,
        CalendarColumn::Day,
        CalendarColumn::Week,
        CalendarColumn::Month,
        CalendarColumn::Year,
        CalendarColumn::JulianDay,
        CalendarColumn::JulianDate,
        CalendarColumn::Print,
        CalendarColumn::Start,
        CalendarColumn::Stop,
        CalendarColumn::Step,
        CalendarColumn::Format,
    ];

    fn raw(self) -> i32 {
        self as i32
    }

    fn from_raw(raw: i32) -> Option<Self> {
        usize::try_from(raw)
            .ok()
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    fn name(self) -> &'static str {
        match self {
            CalendarColumn::Date => "date",
            CalendarColumn::Weekday => "weekday",
            CalendarColumn::Day => "day",
            CalendarColumn::Week => "week",
            CalendarColumn::Month => "month",
            CalendarColumn::Year => "year",
            CalendarColumn::JulianDay => "julianDay",
            CalendarColumn::JulianDate => "julianDate",
            CalendarColumn::Print => "print",
            CalendarColumn::Start => "start",
            CalendarColumn::Stop => "stop",
            CalendarColumn::Step => "step",
            CalendarColumn::Format => "format",
        }
    }

    fn is_hidden(self) -> bool {
        matches!(
            self,
            CalendarColumn::Start
                | CalendarColumn::Stop
                | CalendarColumn::Step
                | CalendarColumn::Format
        )
    }

    fn policy(self) -> AcceptancePolicy {
        match self {
            CalendarColumn::Date
            | CalendarColumn::Year
            | CalendarColumn::Start
            | CalendarColumn::Stop => AcceptancePolicy::Accept,
            CalendarColumn::Step | CalendarColumn::Format => AcceptancePolicy::EqualityOnly,
            _ => AcceptancePolicy::Exclude,
        }
    }
}
