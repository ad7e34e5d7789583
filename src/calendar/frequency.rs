//! Calendar step frequencies

use std::fmt;

use chrono::{Days, Months, NaiveDate};

/// Distance between two successive calendar rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Bimonthly,
    Quarterly,
    Yearly,
}

/// Length of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unit {
    Days(u64),
    Months(u32),
}

impl Frequency {
    pub const ALL: [Frequency; 7] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Bimonthly,
        Frequency::Quarterly,
        Frequency::Yearly,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Bimonthly => "bimonthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Looks a frequency up by exact name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub(crate) fn unit(&self) -> Unit {
        match self {
            Frequency::Daily => Unit::Days(1),
            Frequency::Weekly => Unit::Days(7),
            Frequency::Biweekly => Unit::Days(14),
            Frequency::Monthly => Unit::Months(1),
            Frequency::Bimonthly => Unit::Months(2),
            Frequency::Quarterly => Unit::Months(3),
            Frequency::Yearly => Unit::Months(12),
        }
    }

    /// The date one step after `date`. Month steps clamp to the last valid
    /// day of the target month. `None` when the calendar overflows.
    pub fn next(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self.unit() {
            Unit::Days(n) => date.checked_add_days(Days::new(n)),
            Unit::Months(n) => date.checked_add_months(Months::new(n)),
        }
    }

    /// The date one step before `date`
    pub fn prev(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self.unit() {
            Unit::Days(n) => date.checked_sub_days(Days::new(n)),
            Unit::Months(n) => date.checked_sub_months(Months::new(n)),
        }
    }

    /// Steps forward, or backward when `descending`
    pub fn step(&self, date: NaiveDate, descending: bool) -> Option<NaiveDate> {
        if descending {
            self.prev(date)
        } else {
            self.next(date)
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
