//! Series Generator Tests
//!
//! Tests for the integer series table driven through the host harness:
//! - Start/stop/step narrowing in both directions
//! - Equality and range constraints on the value column
//! - NULL arguments produce no rows
//! - Rejected plans fall back to an unconstrained scan

use vtabkit::config::VtabConfig;
use vtabkit::planner::ConstraintOp;
use vtabkit::series::{SeriesColumn, SeriesTable};
use vtabkit::vtab::{HostQuery, Row, TableArgs, Value, VirtualTable};

// =============================================================================
// Helper Functions
// =============================================================================

fn table(args: &[&str]) -> SeriesTable {
    SeriesTable::connect(&TableArgs::positional(args), &VtabConfig::default())
}

fn values(rows: &[Row]) -> Vec<i64> {
    rows.iter()
        .map(|row| match row[0] {
            Value::Integer(v) => v,
            ref other => panic!("unexpected value {:?}", other),
        })
        .collect()
}

fn bounded(start: i64, stop: i64, step: i64) -> HostQuery {
    HostQuery::new()
        .filter(SeriesColumn::Start, ConstraintOp::Eq, start)
        .filter(SeriesColumn::Stop, ConstraintOp::Eq, stop)
        .filter(SeriesColumn::Step, ConstraintOp::Eq, step)
}

// =============================================================================
// Direction Tests
// =============================================================================

/// start=5, stop=20, step=3 ascending.
#[test]
fn test_ascending_series() {
    let mut series = table(&[]);
    let rows = bounded(5, 20, 3).run(&mut series).unwrap();
    assert_eq!(values(&rows), vec![5, 8, 11, 14, 17, 20]);
}

/// Same bounds descending yield the exact reverse.
#[test]
fn test_descending_series_is_reverse() {
    let mut series = table(&[]);
    let rows = bounded(5, 20, 3)
        .order_by(SeriesColumn::Value, true)
        .run(&mut series)
        .unwrap();
    assert_eq!(values(&rows), vec![20, 17, 14, 11, 8, 5]);
}

/// Descending lands on the ascending grid when stop is off-grid.
#[test]
fn test_descending_off_grid_stop() {
    let mut series = table(&[]);
    let asc = bounded(5, 22, 3).run(&mut series).unwrap();
    let desc = bounded(5, 22, 3)
        .order_by(SeriesColumn::Value, true)
        .run(&mut series)
        .unwrap();

    let mut reversed = values(&desc);
    reversed.reverse();
    assert_eq!(values(&asc), reversed);
    assert_eq!(values(&desc)[0], 20);
}

/// Construction arguments seed the bounds.
#[test]
fn test_construction_arguments() {
    let mut series = table(&["1", "10", "4"]);
    let rows = HostQuery::new().run(&mut series).unwrap();
    assert_eq!(values(&rows), vec![1, 5, 9]);
}

// =============================================================================
// Value Constraint Tests
// =============================================================================

/// value = 7 yields exactly one row.
#[test]
fn test_value_equality_single_row() {
    let mut series = table(&[]);
    let rows = HostQuery::new()
        .filter(SeriesColumn::Value, ConstraintOp::Eq, 7)
        .run(&mut series)
        .unwrap();
    assert_eq!(values(&rows), vec![7]);
}

/// value <= 11 lowers the upper bound.
#[test]
fn test_value_upper_bound() {
    let mut series = table(&["5", "20", "3"]);
    let rows = HostQuery::new()
        .filter(SeriesColumn::Value, ConstraintOp::Le, 11)
        .run(&mut series)
        .unwrap();
    assert_eq!(values(&rows), vec![5, 8, 11]);
}

/// Value bounds wider than the table never add rows.
#[test]
fn test_value_bounds_never_widen() {
    let mut series = table(&["5", "20", "3"]);
    let rows = HostQuery::new()
        .filter(SeriesColumn::Value, ConstraintOp::Ge, 0)
        .filter(SeriesColumn::Value, ConstraintOp::Le, 100)
        .run(&mut series)
        .unwrap();
    assert_eq!(values(&rows), vec![5, 8, 11, 14, 17, 20]);
}

/// A value lower bound keeps the table's step grid.
#[test]
fn test_value_lower_bound_keeps_grid() {
    let mut series = table(&["5", "20", "3"]);
    let rows = HostQuery::new()
        .filter(SeriesColumn::Value, ConstraintOp::Ge, 6)
        .order_by(SeriesColumn::Value, true)
        .run(&mut series)
        .unwrap();
    assert_eq!(values(&rows), vec![20, 17, 14, 11, 8]);
}

/// Strict bounds are narrowed inclusively and re-checked by the host.
#[test]
fn test_strict_bounds_rechecked() {
    let mut series = table(&["0", "100"]);
    let rows = HostQuery::new()
        .filter(SeriesColumn::Value, ConstraintOp::Gt, 3)
        .filter(SeriesColumn::Value, ConstraintOp::Lt, 7)
        .run(&mut series)
        .unwrap();
    assert_eq!(values(&rows), vec![4, 5, 6]);
}

/// Unbounded default series is cut by the host limit.
#[test]
fn test_default_series_with_limit() {
    let mut series = table(&[]);
    let rows = HostQuery::new().limit(5).run(&mut series).unwrap();
    assert_eq!(values(&rows), vec![0, 1, 2, 3, 4]);
}

// =============================================================================
// NULL and Fallback Tests
// =============================================================================

/// Any NULL argument empties the range.
#[test]
fn test_null_argument_yields_no_rows() {
    let mut series = table(&["1", "10"]);
    let rows = HostQuery::new()
        .filter(SeriesColumn::Stop, ConstraintOp::Eq, Value::Null)
        .run(&mut series)
        .unwrap();
    assert!(rows.is_empty());

    let rows = HostQuery::new()
        .filter(SeriesColumn::Value, ConstraintOp::Ge, 2)
        .filter(SeriesColumn::Value, ConstraintOp::Le, Value::Null)
        .run(&mut series)
        .unwrap();
    assert!(rows.is_empty());
}

/// A rejected plan falls back to a full scan filtered by the host.
#[test]
fn test_rejected_plan_falls_back() {
    let mut series = table(&["1", "10", "3"]);
    let rows = HostQuery::new()
        .filter_raw(SeriesColumn::Step as i32, ConstraintOp::Gt, Value::Integer(2), false)
        .run(&mut series)
        .unwrap();

    assert_eq!(values(&rows), vec![1, 4, 7, 10]);
    assert_eq!(series.plans().metrics().plans_rejected, 1);
}

/// Host sorts when the order-by is not consumed.
#[test]
fn test_unconsumed_order_sorted_by_host() {
    let mut series = table(&["1", "5"]);
    let query = HostQuery::new()
        .order_by(SeriesColumn::Value, true)
        .order_by(SeriesColumn::Step, false);

    let (info, _) = query.plan(&mut series);
    assert!(!info.order_by_consumed);

    let rows = query.run(&mut series).unwrap();
    assert_eq!(values(&rows), vec![5, 4, 3, 2, 1]);
}

/// Hidden columns project the effective bounds.
#[test]
fn test_hidden_columns_projection() {
    let mut series = table(&[]);
    let rows = bounded(2, 4, 2).run(&mut series).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        vec![Value::Integer(2), Value::Integer(2), Value::Integer(4), Value::Integer(2)]
    );
}
