//! Series table
//!
//! Positional arguments: `start`, `stop`, `step`.

use crate::config::VtabConfig;
use crate::observability::{log_event_with_fields, Event, Severity};
use crate::planner::{ColumnIndex, IndexInfo, Plan, PlanRegistry};
use crate::vtab::{Bounds, TableArgs, VirtualTable};

use super::columns::{SeriesColumn, SERIES_DECLARATION};
use super::cursor::{SeriesBounds, SeriesCursor};

/// Row estimate for an open-ended scan
pub const UNBOUNDED_ROWS: i64 = 2_147_483_647;

/// Row estimate when both start and stop are constrained
pub const BOUNDED_ROWS: i64 = 1000;

#[derive(Debug)]
pub struct SeriesTable {
    bounds: SeriesBounds,
    plans: PlanRegistry,
}

impl SeriesTable {
    /// Construction-time bounds
    pub fn bounds(&self) -> SeriesBounds {
        self.bounds
    }
}

fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

impl VirtualTable for SeriesTable {
    type Column = SeriesColumn;
    type Cursor = SeriesCursor;

    const MODULE: &'static str = "series";
    const PRIMARY: SeriesColumn = SeriesColumn::Value;

    fn connect(args: &TableArgs, config: &VtabConfig) -> Self {
        let bounds = Bounds::new(
            args.get(0).and_then(parse_int).unwrap_or(0),
            args.get(1).and_then(parse_int).unwrap_or(i64::MAX),
            args.get(2).and_then(parse_int).unwrap_or(1),
        );

        let (start, stop, step) = (bounds.min.to_string(), bounds.max.to_string(), bounds.step.to_string());
        log_event_with_fields(
            Severity::Info,
            Event::TableConnected,
            &[
                ("registry_mode", config.registry_mode.as_str()),
                ("start", start.as_str()),
                ("step", step.as_str()),
                ("stop", stop.as_str()),
                ("table", Self::MODULE),
            ],
        );

        Self {
            bounds,
            plans: PlanRegistry::new(config.registry_mode),
        }
    }

    fn declaration(&self) -> &'static str {
        SERIES_DECLARATION
    }

    fn plans(&self) -> &PlanRegistry {
        &self.plans
    }

    fn plans_mut(&mut self) -> &mut PlanRegistry {
        &mut self.plans
    }

    fn estimate(&self, plan: &Plan, info: &mut IndexInfo) {
        if plan.contains(SeriesColumn::Start.raw()) && plan.contains(SeriesColumn::Stop.raw()) {
            let step_bonus = if plan.contains(SeriesColumn::Step.raw()) { 1.0 } else { 0.0 };
            info.estimated_cost = 2.0 - step_bonus;
            info.estimated_rows = BOUNDED_ROWS;
        } else {
            info.estimated_rows = UNBOUNDED_ROWS;
        }

        if plan.has_equality_on(SeriesColumn::Value.raw()) {
            info.estimated_rows = 1;
            info.idx_flags |= IndexInfo::SCAN_UNIQUE;
        }
    }

    fn open(&self) -> SeriesCursor {
        SeriesCursor::new(self.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{ConstraintOp, RawConstraint};

    fn connect(args: &[&str]) -> SeriesTable {
        SeriesTable::connect(&TableArgs::positional(args), &VtabConfig::default())
    }

    #[test]
    fn test_defaults() {
        let table = connect(&[]);
        assert_eq!(table.bounds(), Bounds::new(0, i64::MAX, 1));
        assert_eq!(table.declaration(), SERIES_DECLARATION);
    }

    #[test]
    fn test_positional_arguments() {
        assert_eq!(connect(&["5", "20", "3"]).bounds(), Bounds::new(5, 20, 3));
        assert_eq!(connect(&["x", "'9'"]).bounds(), Bounds::new(0, 9, 1));
    }

    #[test]
    fn test_estimate_bounded() {
        let mut table = connect(&[]);
        let mut info = IndexInfo::new(
            vec![
                RawConstraint::new(SeriesColumn::Start.raw(), ConstraintOp::GE, true),
                RawConstraint::new(SeriesColumn::Stop.raw(), ConstraintOp::LE, true),
            ],
            Vec::new(),
            0,
        );
        table.best_index(&mut info).unwrap();
        assert_eq!(info.estimated_cost, 2.0);
        assert_eq!(info.estimated_rows, BOUNDED_ROWS);
        assert!(!info.is_unique_scan());
    }

    #[test]
    fn test_estimate_value_equality_is_unique() {
        let mut table = connect(&[]);
        let mut info = IndexInfo::new(
            vec![RawConstraint::new(SeriesColumn::Value.raw(), ConstraintOp::EQ, true)],
            Vec::new(),
            0,
        );
        table.best_index(&mut info).unwrap();
        assert_eq!(info.estimated_rows, 1);
        assert!(info.is_unique_scan());
    }

    #[test]
    fn test_step_range_rejects_plan() {
        let mut table = connect(&[]);
        let mut info = IndexInfo::new(
            vec![RawConstraint::new(SeriesColumn::Step.raw(), ConstraintOp::GT, false)],
            Vec::new(),
            0,
        );
        assert!(table.best_index(&mut info).is_err());
        assert_eq!(table.plans().metrics().plans_rejected, 1);
        assert!(table.plans().is_empty());
    }
}
