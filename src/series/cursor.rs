//! Series cursor

use crate::planner::{ColumnIndex, ConstraintOp, Plan};
use crate::vtab::{Bounds, CursorState, Value, VirtualCursor};

use super::columns::SeriesColumn;

/// Hard ceiling on rows per execution; stops zero or negative steps
pub const SERIES_ROW_CAP: i64 = 100_000_000;

pub type SeriesBounds = Bounds<i64, i64>;

pub struct SeriesCursor {
    snapshot: SeriesBounds,
    bounds: SeriesBounds,
    state: CursorState<i64>,
}

impl SeriesCursor {
    pub fn new(snapshot: SeriesBounds) -> Self {
        Self {
            snapshot,
            bounds: snapshot,
            state: CursorState::new(SERIES_ROW_CAP),
        }
    }

    /// Effective bounds after the last execute
    pub fn bounds(&self) -> SeriesBounds {
        self.bounds
    }

    pub fn current(&self) -> Option<i64> {
        self.state.current().copied()
    }

    fn narrow(&mut self, plan: &Plan, args: &[Value]) {
        let bounds = &mut self.bounds;
        // Value constraints only tighten, and are applied once start and
        // step are final so the lower bound can be snapped onto the grid
        let mut lower: Option<i64> = None;
        let mut upper: Option<i64> = None;

        for record in plan.constraints() {
            let Some(value) = args.get(record.arg_slot).and_then(Value::as_i64) else {
                continue;
            };

            match (SeriesColumn::from_raw(record.column), record.op) {
                (Some(SeriesColumn::Start), ConstraintOp::Eq | ConstraintOp::Ge | ConstraintOp::Gt) => {
                    bounds.min = value;
                }
                (Some(SeriesColumn::Stop), ConstraintOp::Eq | ConstraintOp::Le | ConstraintOp::Lt) => {
                    bounds.max = value;
                }
                (Some(SeriesColumn::Step), ConstraintOp::Eq) => bounds.step = value,
                (Some(SeriesColumn::Value), ConstraintOp::Eq) => {
                    lower = Some(lower.map_or(value, |l| l.max(value)));
                    upper = Some(upper.map_or(value, |u| u.min(value)));
                }
                (Some(SeriesColumn::Value), ConstraintOp::Ge | ConstraintOp::Gt) => {
                    lower = Some(lower.map_or(value, |l| l.max(value)));
                }
                (Some(SeriesColumn::Value), ConstraintOp::Le | ConstraintOp::Lt) => {
                    upper = Some(upper.map_or(value, |u| u.min(value)));
                }
                _ => {}
            }
        }

        if let Some(upper) = upper {
            bounds.max = bounds.max.min(upper);
        }
        if let Some(lower) = lower.filter(|l| *l > bounds.min) {
            match Self::first_on_grid(bounds, lower) {
                Some(first) => bounds.min = first,
                None => {
                    bounds.min = 1;
                    bounds.max = 0;
                }
            }
        }

        // A NULL comparison never holds
        if args.iter().any(Value::is_null) {
            bounds.min = 1;
            bounds.max = 0;
        }
    }

    /// Smallest value at or above `lower` that the ascending walk from
    /// `min` visits. `None` when it lies beyond `i64::MAX`.
    fn first_on_grid(bounds: &SeriesBounds, lower: i64) -> Option<i64> {
        if bounds.step <= 0 {
            return Some(lower);
        }
        let step = i128::from(bounds.step);
        let distance = i128::from(lower) - i128::from(bounds.min);
        let steps = (distance + step - 1) / step;
        i64::try_from(i128::from(bounds.min) + steps * step).ok()
    }

    /// First value of a descending walk: `max` moved back onto the grid
    /// the ascending walk from `min` would visit.
    fn descending_start(bounds: &SeriesBounds) -> i64 {
        if bounds.step <= 0 || bounds.max < bounds.min {
            return bounds.max;
        }
        let offset = (i128::from(bounds.max) - i128::from(bounds.min)) % i128::from(bounds.step);
        // offset < step, so it fits and max - offset >= min
        bounds.max - offset as i64
    }
}

impl VirtualCursor for SeriesCursor {
    fn execute(&mut self, plan: &Plan, args: &[Value]) {
        self.bounds = self.snapshot;
        self.narrow(plan, args);

        let first = if plan.is_descending() {
            Self::descending_start(&self.bounds)
        } else {
            self.bounds.min
        };
        self.state.start(first, plan.is_descending());
    }

    fn advance(&mut self) {
        let step = self.bounds.step;
        self.state.advance(|value, descending| {
            if descending {
                value.checked_sub(step)
            } else {
                value.checked_add(step)
            }
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
            *current < self.bounds.min
        } else {
            *current > self.bounds.max
        }
    }

    fn column(&self, index: i32) -> Value {
        let Some(current) = self.state.current() else {
            return Value::Null;
        };
        match SeriesColumn::from_raw(index) {
            Some(SeriesColumn::Value) => Value::Integer(*current),
            Some(SeriesColumn::Start) => Value::Integer(self.bounds.min),
            Some(SeriesColumn::Stop) => Value::Integer(self.bounds.max),
            Some(SeriesColumn::Step) => Value::Integer(self.bounds.step),
            None => Value::Null,
        }
    }

    fn row_id(&self) -> i64 {
        self.state.row_id()
    }
}
