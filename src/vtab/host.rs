//! In-process host harness
//!
//! Plays the host engine's side of the negotiation: builds the raw planning
//! arrays, calls `best_index`, falls back to an unconstrained scan on
//! rejection, binds argument values by `argv_index`, filters a cursor,
//! re-checks every constraint the table did not ask to omit, sorts when the
//! order-by was not consumed, and applies the limit.

use std::cmp::Ordering;

use crate::planner::{
    ColumnIndex, ConstraintOp, IndexInfo, PlannerError, PlannerResult, RawConstraint,
    RawOrderBy,
};

use super::table::{read_row, Row, VirtualCursor, VirtualTable};
use super::value::Value;

/// A constraint as the host sees it before planning
#[derive(Debug, Clone, PartialEq)]
pub struct HostConstraint {
    pub column: i32,
    pub op: ConstraintOp,
    pub value: Value,
    pub usable: bool,
}

/// A single-table query: `SELECT * FROM t WHERE .. ORDER BY .. LIMIT ..`
#[derive(Debug, Clone, Default)]
pub struct HostQuery {
    constraints: Vec<HostConstraint>,
    order_by: Vec<RawOrderBy>,
    limit: Option<usize>,
}

impl HostQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a usable constraint on a typed column
    pub fn filter<C: ColumnIndex>(self, column: C, op: ConstraintOp, value: impl Into<Value>) -> Self {
        self.filter_raw(column.raw(), op, value.into(), true)
    }

    /// Adds a constraint by raw column index with an explicit usable flag
    pub fn filter_raw(mut self, column: i32, op: ConstraintOp, value: Value, usable: bool) -> Self {
        self.constraints.push(HostConstraint {
            column,
            op,
            value,
            usable,
        });
        self
    }

    pub fn order_by<C: ColumnIndex>(mut self, column: C, desc: bool) -> Self {
        self.order_by.push(RawOrderBy::new(column.raw(), desc));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn constraints(&self) -> &[HostConstraint] {
        &self.constraints
    }

    /// Raw planning arrays for table `T`
    pub fn index_info<T: VirtualTable>(&self) -> IndexInfo {
        let constraints = self
            .constraints
            .iter()
            .map(|c| RawConstraint::new(c.column, c.op.code(), c.usable))
            .collect();
        IndexInfo::new(constraints, self.order_by.clone(), self.columns_used::<T>())
    }

    fn columns_used<T: VirtualTable>(&self) -> u64 {
        let visible = T::Column::ALL
            .iter()
            .filter(|c| !c.is_hidden())
            .fold(0u64, |mask, c| mask | c.mask());
        let referenced = self
            .constraints
            .iter()
            .map(|c| c.column)
            .chain(self.order_by.iter().map(|o| o.column))
            .filter_map(T::Column::from_raw)
            .fold(0u64, |mask, c| mask | c.mask());
        visible | referenced
    }

    /// Runs only the planning call
    pub fn plan<T: VirtualTable>(&self, table: &mut T) -> (IndexInfo, PlannerResult<i32>) {
        let mut info = self.index_info::<T>();
        let result = table.best_index(&mut info);
        (info, result)
    }

    /// Runs the query to completion and returns every matching row
    pub fn run<T: VirtualTable>(&self, table: &mut T) -> PlannerResult<Vec<Row>> {
        let mut rows = Vec::new();
        self.run_with(table, |row| {
            rows.push(row);
            Ok::<_, PlannerError>(())
        })?;
        Ok(rows)
    }

    /// Runs the query, handing each matching row to `visit` as the cursor
    /// produces it. Rows are only buffered when the host has to sort them.
    /// Stops at the first error `visit` returns. Returns the row count.
    pub fn run_with<T, E, F>(&self, table: &mut T, mut visit: F) -> Result<usize, E>
    where
        T: VirtualTable,
        E: From<PlannerError>,
        F: FnMut(Row) -> Result<(), E>,
    {
        let (info, accepted) = match self.plan(table) {
            (info, Ok(_)) => (info, true),
            (info, Err(_)) => {
                let mut fallback = IndexInfo::new(Vec::new(), self.order_by.clone(), info.col_used);
                table.best_index(&mut fallback)?;
                (fallback, false)
            }
        };

        let args = if accepted {
            self.bound_values(&info)
        } else {
            Vec::new()
        };
        let mut cursor = table.open();
        table.filter(&mut cursor, info.idx_num, &args);

        let limit = self.limit.unwrap_or(usize::MAX);
        let mut emitted = 0;

        if info.order_by_consumed || self.order_by.is_empty() {
            while emitted < limit && !cursor.at_end() {
                if self.passes(&cursor, &info, accepted) {
                    visit(read_row::<T>(&cursor))?;
                    emitted += 1;
                }
                cursor.advance();
            }
            return Ok(emitted);
        }

        let mut rows = Vec::new();
        while !cursor.at_end() {
            if self.passes(&cursor, &info, accepted) {
                rows.push(read_row::<T>(&cursor));
            }
            cursor.advance();
        }
        self.sort(&mut rows);
        for row in rows.into_iter().take(limit) {
            visit(row)?;
            emitted += 1;
        }
        Ok(emitted)
    }

    /// Argument array of an accepted plan, indexed by slot (`argv_index - 1`)
    pub fn bound_values(&self, info: &IndexInfo) -> Vec<Value> {
        let len = info
            .usage
            .iter()
            .map(|u| u.argv_index.max(0) as usize)
            .max()
            .unwrap_or(0);
        let mut args = vec![Value::Null; len];
        for (usage, constraint) in info.usage.iter().zip(&self.constraints) {
            if usage.argv_index > 0 {
                args[usage.argv_index as usize - 1] = constraint.value.clone();
            }
        }
        args
    }

    fn passes<C: VirtualCursor>(&self, cursor: &C, info: &IndexInfo, accepted: bool) -> bool {
        self.constraints.iter().enumerate().all(|(i, c)| {
            let omitted = accepted && info.usage.get(i).is_some_and(|u| u.omit);
            omitted || evaluate(c.op, &cursor.column(c.column), &c.value)
        })
    }

    fn sort(&self, rows: &mut [Row]) {
        rows.sort_by(|a, b| {
            for key in &self.order_by {
                let i = key.column.max(0) as usize;
                let ord = sort_order(a.get(i), b.get(i));
                let ord = if key.desc { ord.reverse() } else { ord };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
    }
}

/// Evaluates `lhs op rhs` the way the host re-checks a constraint. NULL
/// never compares true; pattern and function operators are left to the
/// host's own evaluator and pass here.
pub fn evaluate(op: ConstraintOp, lhs: &Value, rhs: &Value) -> bool {
    let ord = lhs.compare(rhs);
    match op {
        ConstraintOp::Eq => ord == Some(Ordering::Equal),
        ConstraintOp::Ne => matches!(ord, Some(o) if o != Ordering::Equal),
        ConstraintOp::Lt => ord == Some(Ordering::Less),
        ConstraintOp::Le => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
        ConstraintOp::Gt => ord == Some(Ordering::Greater),
        ConstraintOp::Ge => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
        ConstraintOp::Is => (lhs.is_null() && rhs.is_null()) || ord == Some(Ordering::Equal),
        ConstraintOp::IsNot => !evaluate(ConstraintOp::Is, lhs, rhs),
        ConstraintOp::IsNull => lhs.is_null(),
        ConstraintOp::IsNotNull => !lhs.is_null(),
        ConstraintOp::Match
        | ConstraintOp::Like
        | ConstraintOp::Glob
        | ConstraintOp::Regexp
        | ConstraintOp::Function => true,
    }
}

// NULL < numbers < text < blob
fn type_rank(v: Option<&Value>) -> u8 {
    match v {
        None | Some(Value::Null) => 0,
        Some(Value::Integer(_)) | Some(Value::Float(_)) => 1,
        Some(Value::Text(_)) => 2,
        Some(Value::Blob(_)) => 3,
    }
}

fn sort_order(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x
            .compare(y)
            .unwrap_or_else(|| type_rank(a).cmp(&type_rank(b))),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VtabConfig;
    use crate::planner::PlannerErrorCode;
    use crate::series::SeriesTable;
    use crate::vtab::TableArgs;

    #[test]
    fn test_evaluate_comparisons() {
        let five = Value::Integer(5);
        assert!(evaluate(ConstraintOp::Eq, &five, &Value::Integer(5)));
        assert!(evaluate(ConstraintOp::Ge, &five, &Value::Integer(5)));
        assert!(evaluate(ConstraintOp::Lt, &five, &Value::Float(5.5)));
        assert!(!evaluate(ConstraintOp::Gt, &five, &Value::Integer(5)));
        assert!(evaluate(ConstraintOp::Ne, &five, &Value::Integer(6)));
    }

    #[test]
    fn test_evaluate_null_never_true() {
        let five = Value::Integer(5);
        assert!(!evaluate(ConstraintOp::Eq, &five, &Value::Null));
        assert!(!evaluate(ConstraintOp::Ne, &five, &Value::Null));
        assert!(!evaluate(ConstraintOp::Le, &Value::Null, &five));
    }

    #[test]
    fn test_evaluate_is() {
        assert!(evaluate(ConstraintOp::Is, &Value::Null, &Value::Null));
        assert!(evaluate(ConstraintOp::IsNot, &Value::Integer(1), &Value::Null));
        assert!(evaluate(ConstraintOp::IsNull, &Value::Null, &Value::Null));
        assert!(!evaluate(ConstraintOp::IsNotNull, &Value::Null, &Value::Null));
    }

    #[test]
    fn test_evaluate_patterns_pass() {
        assert!(evaluate(ConstraintOp::Like, &Value::from("a"), &Value::from("b%")));
    }

    #[derive(Debug, PartialEq)]
    enum Visit {
        Full,
        Planner(PlannerErrorCode),
    }

    impl From<PlannerError> for Visit {
        fn from(err: PlannerError) -> Self {
            Visit::Planner(err.code())
        }
    }

    #[test]
    fn test_run_with_streams_unbounded_series() {
        let mut table = SeriesTable::connect(&TableArgs::positional(&[] as &[&str]), &VtabConfig::default());
        let mut seen = Vec::new();

        let result = HostQuery::new().run_with(&mut table, |row| {
            if seen.len() == 3 {
                return Err(Visit::Full);
            }
            seen.push(row[0].clone());
            Ok(())
        });

        assert_eq!(result, Err(Visit::Full));
        assert_eq!(seen, vec![Value::Integer(0), Value::Integer(1), Value::Integer(2)]);
    }

    #[test]
    fn test_run_with_counts_rows() {
        let mut table = SeriesTable::connect(&TableArgs::positional(&["1", "9"]), &VtabConfig::default());
        let count = HostQuery::new()
            .limit(4)
            .run_with(&mut table, |_| Ok::<_, Visit>(()))
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_sort_order_ranks_types() {
        let n = Value::Null;
        let i = Value::Integer(3);
        let t = Value::from("a");
        assert_eq!(sort_order(Some(&n), Some(&i)), Ordering::Less);
        assert_eq!(sort_order(Some(&t), Some(&i)), Ordering::Greater);
        assert_eq!(sort_order(Some(&i), Some(&Value::Integer(2))), Ordering::Greater);
    }
}
