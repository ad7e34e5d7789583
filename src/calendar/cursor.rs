//! Calendar cursor
//!
//! Each execute starts again from the bounds snapshot taken when the cursor
//! was opened, narrows its own copy with the plan's bound values, and then
//! walks the range one frequency step at a time.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, NaiveDate};

use crate::planner::{ColumnIndex, ConstraintOp, Plan};
use crate::vtab::{Bounds, CursorState, Value, VirtualCursor};

use super::columns::CalendarColumn;
use super::frequency::Frequency;
use super::grid::{first_on_or_after, DescendingWalk};
use super::julian::{julian_date, julian_day};

/// Hard ceiling on rows per execution; a thousand-year daily scan
pub const CALENDAR_ROW_CAP: i64 = 360_500;

/// Format of the `date`, `start` and `stop` columns and of date arguments
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar range plus the `print` column's format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRange {
    pub bounds: Bounds<NaiveDate, Frequency>,
    pub format: String,
}

pub struct CalendarCursor {
    snapshot: CalendarRange,
    range: CalendarRange,
    state: CursorState<NaiveDate>,
    walk: Option<DescendingWalk>,
}

impl CalendarCursor {
    pub fn new(snapshot: CalendarRange) -> Self {
        Self {
            range: snapshot.clone(),
            snapshot,
            state: CursorState::new(CALENDAR_ROW_CAP),
            walk: None,
        }
    }

    /// Effective range after the last execute
    pub fn range(&self) -> &CalendarRange {
        &self.range
    }

    pub fn current(&self) -> Option<NaiveDate> {
        self.state.current().copied()
    }

    fn narrow(&mut self, plan: &Plan, args: &[Value]) {
        let bounds = &mut self.range.bounds;
        // Year and date constraints only tighten. They apply after the
        // loop, once start and step are final, so the new lower bound is a
        // date the ascending walk would have produced.
        let mut lower: Option<NaiveDate> = None;
        let mut upper: Option<NaiveDate> = None;

        for record in plan.constraints() {
            let Some(arg) = args.get(record.arg_slot) else {
                continue;
            };
            let Some(column) = CalendarColumn::from_raw(record.column) else {
                continue;
            };

            match column {
                CalendarColumn::Start => {
                    if let Some(date) = arg.as_text().and_then(parse_date) {
                        bounds.min = date;
                    }
                }
                CalendarColumn::Stop => {
                    if let Some(date) = arg.as_text().and_then(parse_date) {
                        bounds.max = date;
                    }
                }
                CalendarColumn::Step => {
                    if let Some(step) = arg.as_text().and_then(Frequency::from_name) {
                        bounds.step = step;
                    }
                }
                CalendarColumn::Format => {
                    if let Some(format) = arg.as_text().filter(|f| is_valid_format(f)) {
                        self.range.format = format.to_string();
                    }
                }
                CalendarColumn::Year => {
                    let Some(year) = arg.as_i64().and_then(|y| i32::try_from(y).ok()) else {
                        continue;
                    };
                    if record.op.is_lower_bound() || record.op.is_equality() {
                        if let Some(jan1) = NaiveDate::from_ymd_opt(year, 1, 1) {
                            raise(&mut lower, jan1);
                        }
                    }
                    if record.op.is_upper_bound() || record.op.is_equality() {
                        if let Some(dec31) = NaiveDate::from_ymd_opt(year, 12, 31) {
                            cut(&mut upper, dec31);
                        }
                    }
                }
                CalendarColumn::Date => {
                    let Some(date) = arg.as_text().and_then(parse_date) else {
                        continue;
                    };
                    match record.op {
                        ConstraintOp::Eq | ConstraintOp::Is => {
                            raise(&mut lower, date);
                            cut(&mut upper, date);
                        }
                        ConstraintOp::Gt => raise(&mut lower, date.succ_opt().unwrap_or(date)),
                        ConstraintOp::Ge => raise(&mut lower, date),
                        ConstraintOp::Lt => cut(&mut upper, date.pred_opt().unwrap_or(date)),
                        ConstraintOp::Le => cut(&mut upper, date),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if let Some(upper) = upper {
            bounds.max = bounds.max.min(upper);
        }
        if let Some(lower) = lower.filter(|l| *l > bounds.min) {
            let first = if lower <= bounds.max {
                first_on_or_after(bounds.min, lower, bounds.step)
            } else {
                None
            };
            match first {
                Some(first) => bounds.min = first,
                // Past max, or past the end of the calendar: empty
                None => {
                    bounds.min = lower;
                    bounds.max = bounds.max.min(lower.pred_opt().unwrap_or(lower));
                }
            }
        }
    }
}

fn raise(bound: &mut Option<NaiveDate>, date: NaiveDate) {
    *bound = Some(bound.map_or(date, |b| b.max(date)));
}

fn cut(bound: &mut Option<NaiveDate>, date: NaiveDate) {
    *bound = Some(bound.map_or(date, |b| b.min(date)));
}

impl VirtualCursor for CalendarCursor {
    fn execute(&mut self, plan: &Plan, args: &[Value]) {
        self.range = self.snapshot.clone();
        self.narrow(plan, args);

        let bounds = self.range.bounds;
        let first = if plan.is_descending() {
            let (walk, last) = DescendingWalk::new(bounds.min, bounds.max, bounds.step);
            self.walk = Some(walk);
            last
        } else {
            self.walk = None;
            bounds.min
        };
        self.state.start(first, plan.is_descending());
    }

    fn advance(&mut self) {
        let step = self.range.bounds.step;
        let walk = self.walk.as_ref();
        self.state.advance(|date, descending| match (walk, descending) {
            (Some(walk), true) => walk.prev(*date),
            _ => step.step(*date, descending),
        });
    }

    fn at_end(&self) -> bool {
        let Some(current) = self.state.current() else {
            return true;
        };
        if self.state.is_exhausted() || self.state.past_cap() {
            return true;
        }
        if self.state.is_descending() {
            *current < self.range.bounds.min
        } else {
            *current > self.range.bounds.max
        }
    }

    fn column(&self, index: i32) -> Value {
        let (Some(date), Some(column)) = (self.state.current(), CalendarColumn::from_raw(index))
        else {
            return Value::Null;
        };
        let date = *date;

        match column {
            CalendarColumn::Date => Value::Text(format_date(date)),
            CalendarColumn::Weekday => Value::Integer(i64::from(date.weekday().number_from_sunday())),
            CalendarColumn::Day => Value::Integer(i64::from(date.day())),
            CalendarColumn::Week => Value::Integer(i64::from(week_of_year(date))),
            CalendarColumn::Month => Value::Integer(i64::from(date.month())),
            CalendarColumn::Year => Value::Integer(i64::from(date.year())),
            CalendarColumn::JulianDay => Value::Integer(julian_day(date)),
            CalendarColumn::JulianDate => Value::Float(julian_date(date)),
            CalendarColumn::Print => render(date, &self.range.format).map_or(Value::Null, Value::Text),
            CalendarColumn::Start => Value::Text(format_date(self.range.bounds.min)),
            CalendarColumn::Stop => Value::Text(format_date(self.range.bounds.max)),
            CalendarColumn::Step => Value::Text(self.range.bounds.step.name().to_string()),
            CalendarColumn::Format => Value::Text(self.range.format.clone()),
        }
    }

    fn row_id(&self) -> i64 {
        self.state.row_id()
    }
}

/// Parses a `YYYY-MM-DD` date
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Renders a date with a strftime pattern. `None` when the pattern asks for
/// fields a bare date does not have.
pub fn render(date: NaiveDate, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format_with_items(StrftimeItems::new(format))).ok()?;
    Some(out)
}

/// A pattern is usable when it parses and renders a date
pub fn is_valid_format(format: &str) -> bool {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    render(NaiveDate::MIN, format).is_some()
}

/// Week of year with weeks starting on Sunday. Week 1 contains Jan 1, and
/// the week that contains the next Jan 1 is already week 1.
pub fn week_of_year(date: NaiveDate) -> u32 {
    let days_in_year = if date.with_ordinal(366).is_some() { 366 } else { 365 };
    let until_saturday = 6 - date.weekday().num_days_from_sunday();
    if date.ordinal() + until_saturday > days_in_year {
        return 1;
    }

    let jan1_offset = (date.weekday().num_days_from_sunday() + 7 - (date.ordinal0() % 7)) % 7;
    (date.ordinal0() + jan1_offset) / 7 + 1
}
