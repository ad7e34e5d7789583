//! Calendar table
//!
//! Positional arguments: `start_date`, `stop_date`, `step_name`.

use chrono::NaiveDate;

use crate::config::VtabConfig;
use crate::observability::{log_event_with_fields, Event, Severity};
use crate::planner::{ColumnIndex, IndexInfo, Plan, PlanRegistry};
use crate::vtab::{Bounds, TableArgs, VirtualTable};

use super::columns::{CalendarColumn, CALENDAR_DECLARATION};
use super::cursor::{format_date, parse_date, CalendarCursor, CalendarRange, DATE_FORMAT};
use super::frequency::Frequency;

/// Row estimate for an open-ended calendar scan
pub const UNBOUNDED_ROWS: i64 = 2_147_483_647;

/// Row estimate when both start and stop are constrained
pub const BOUNDED_ROWS: i64 = 1000;

pub fn default_min() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

pub fn default_max() -> NaiveDate {
    NaiveDate::from_ymd_opt(4001, 1, 1).unwrap_or(NaiveDate::MAX)
}

#[derive(Debug)]
pub struct CalendarTable {
    range: CalendarRange,
    plans: PlanRegistry,
}

impl CalendarTable {
    /// Construction-time range
    pub fn range(&self) -> &CalendarRange {
        &self.range
    }
}

impl VirtualTable for CalendarTable {
    type Column = CalendarColumn;
    type Cursor = CalendarCursor;

    const MODULE: &'static str = "calendar";
    const PRIMARY: CalendarColumn = CalendarColumn::Date;

    fn connect(args: &TableArgs, config: &VtabConfig) -> Self {
        let min = args.get(0).and_then(parse_date).unwrap_or_else(default_min);
        let max = args.get(1).and_then(parse_date).unwrap_or_else(default_max);
        let step = args.get(2).and_then(Frequency::from_name).unwrap_or_default();

        let (start, stop) = (format_date(min), format_date(max));
        log_event_with_fields(
            Severity::Info,
            Event::TableConnected,
            &[
                ("registry_mode", config.registry_mode.as_str()),
                ("start", start.as_str()),
                ("step", step.name()),
                ("stop", stop.as_str()),
                ("table", Self::MODULE),
            ],
        );

        Self {
            range: CalendarRange {
                bounds: Bounds::new(min, max, step),
                format: DATE_FORMAT.to_string(),
            },
            plans: PlanRegistry::new(config.registry_mode),
        }
    }

    fn declaration(&self) -> &'static str {
        CALENDAR_DECLARATION
    }

    fn plans(&self) -> &PlanRegistry {
        &self.plans
    }

    fn plans_mut(&mut self) -> &mut PlanRegistry {
        &mut self.plans
    }

    fn estimate(&self, plan: &Plan, info: &mut IndexInfo) {
        if plan.contains(CalendarColumn::Start.raw()) && plan.contains(CalendarColumn::Stop.raw()) {
            let step_bonus = if plan.contains(CalendarColumn::Step.raw()) { 1.0 } else { 0.0 };
            info.estimated_cost = 2.0 - step_bonus;
            info.estimated_rows = BOUNDED_ROWS;
        } else {
            info.estimated_rows = UNBOUNDED_ROWS;
        }

        if plan.has_equality_on(CalendarColumn::Date.raw()) {
            info.estimated_rows = 1;
            info.idx_flags |= IndexInfo::SCAN_UNIQUE;
        }
    }

    fn open(&self) -> CalendarCursor {
        CalendarCursor::new(self.range.clone())
    }
}
