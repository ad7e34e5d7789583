//! Generic table and cursor contracts
//!
//! # Lifecycle
//!
//! `Constructed → Planned → CursorOpen → Filtered → Iterating → Eof`
//!
//! A cursor may be filtered again with another plan id at any point;
//! `Filtered → Iterating → Filtered` is a valid cycle.
//!
//! Tables own their plan registry. Planning and plan resolution live in the
//! provided methods of [`VirtualTable`]; a concrete generator only supplies
//! its columns, construction, cost hints and cursor.

use crate::config::VtabConfig;
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::planner::{
    column_policy, ColumnIndex, IndexInfo, Plan, PlanBuilder, PlanExplain, PlanRegistry,
    PlannerResult,
};

use super::args::TableArgs;
use super::value::Value;

/// One row: every declared column, in raw-index order
pub type Row = Vec<Value>;

/// Iteration over one table's bounded range
pub trait VirtualCursor {
    /// Narrows this cursor's range using a resolved plan and its bound
    /// values, then positions it on the first row.
    fn execute(&mut self, plan: &Plan, args: &[Value]);

    /// Moves to the next row
    fn advance(&mut self);

    /// True when no current row exists
    fn at_end(&self) -> bool;

    /// Projects the current row; unknown indexes yield `Null`
    fn column(&self, index: i32) -> Value;

    /// Monotonically increasing row identifier
    fn row_id(&self) -> i64;
}

/// A table module the host can plan against and open cursors on
pub trait VirtualTable: Sized {
    type Column: ColumnIndex;
    type Cursor: VirtualCursor;

    /// Module name the host registers this table under
    const MODULE: &'static str;

    /// Column whose single-entry order-by the table can satisfy
    const PRIMARY: Self::Column;

    /// Builds a table from positional arguments. Malformed or missing
    /// values fall back to defaults; construction never fails.
    fn connect(args: &TableArgs, config: &VtabConfig) -> Self;

    /// Declared schema text
    fn declaration(&self) -> &'static str;

    fn plans(&self) -> &PlanRegistry;

    fn plans_mut(&mut self) -> &mut PlanRegistry;

    /// Sets cost and row-count hints for an accepted plan
    fn estimate(&self, plan: &Plan, info: &mut IndexInfo);

    /// Opens a cursor over a snapshot of the table's current bounds
    fn open(&self) -> Self::Cursor;

    /// Planning entry point. Registers the plan and returns its id, which is
    /// also written to `info.idx_num`.
    fn best_index(&mut self, info: &mut IndexInfo) -> PlannerResult<i32> {
        let builder = PlanBuilder::new(column_policy::<Self::Column>)
            .consume_order_on(Self::PRIMARY.raw());

        let registered = builder.build(info).and_then(|plan| {
            self.estimate(&plan, info);
            self.plans_mut().register(plan)
        });

        match registered {
            Ok(id) => {
                info.idx_num = id;

                if Logger::enabled(Severity::Trace) {
                    if let Some(plan) = self.plans().get(id) {
                        let text = PlanExplain::new::<Self::Column>(plan).to_string();
                        log_event_with_fields(
                            Severity::Trace,
                            Event::PlanRegistered,
                            &[("plan", text.as_str()), ("table", Self::MODULE)],
                        );
                    }
                }
                Ok(id)
            }
            Err(err) => {
                info.reset_outputs();
                self.plans().record_rejection();
                log_event_with_fields(
                    Severity::Info,
                    Event::PlanRejected,
                    &[
                        ("code", err.code().code()),
                        ("message", err.message()),
                        ("table", Self::MODULE),
                    ],
                );
                Err(err)
            }
        }
    }

    /// Execution entry point. Resolves `idx_num` (consuming registry
    /// entries) and hands the plan to the cursor. An id that no longer
    /// resolves runs as an unconstrained plan over the default range.
    fn filter(&mut self, cursor: &mut Self::Cursor, idx_num: i32, args: &[Value]) {
        let plan = self
            .plans_mut()
            .take(idx_num)
            .unwrap_or_else(|| Plan::unconstrained(idx_num));

        if Logger::enabled(Severity::Trace) {
            let text = PlanExplain::new::<Self::Column>(&plan)
                .with_values(args)
                .to_string();
            log_event_with_fields(
                Severity::Trace,
                Event::PlanExecuted,
                &[("plan", text.as_str()), ("table", Self::MODULE)],
            );
        }

        cursor.execute(&plan, args);
    }
}

/// Reads the current row of a cursor: every declared column in order
pub fn read_row<T: VirtualTable>(cursor: &T::Cursor) -> Row {
    T::Column::ALL
        .iter()
        .map(|col| cursor.column(col.raw()))
        .collect()
}
