//! Owned model of the host's planning call
//!
//! The host hands over fixed-size constraint and order-by arrays and expects
//! per-constraint outputs plus cost hints back. Everything is copied into
//! bounds-checked vectors at the entry point; nothing borrowed from the host
//! outlives the call.

/// One entry of the host's constraint array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawConstraint {
    pub column: i32,
    pub op: u8,
    pub usable: bool,
}

impl RawConstraint {
    pub fn new(column: i32, op: u8, usable: bool) -> Self {
        Self { column, op, usable }
    }
}

/// One entry of the host's order-by array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawOrderBy {
    pub column: i32,
    pub desc: bool,
}

impl RawOrderBy {
    pub fn new(column: i32, desc: bool) -> Self {
        Self { column, desc }
    }
}

/// Per-constraint output: 1-based argument index (0 = not passed) and the
/// omit flag telling the host to skip its own re-check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintUsage {
    pub argv_index: i32,
    pub omit: bool,
}

/// Planning call inputs and outputs
#[derive(Debug, Clone, PartialEq)]
pub struct IndexInfo {
    // Inputs
    pub constraints: Vec<RawConstraint>,
    pub order_by: Vec<RawOrderBy>,
    pub col_used: u64,

    // Outputs
    pub usage: Vec<ConstraintUsage>,
    pub order_by_consumed: bool,
    pub estimated_cost: f64,
    pub estimated_rows: i64,
    pub idx_flags: i32,
    pub idx_num: i32,
}

impl IndexInfo {
    /// Scan visits at most one row
    pub const SCAN_UNIQUE: i32 = 1;
    /// Host-side default cost before the table sets one
    pub const DEFAULT_COST: f64 = 5.0e98;
    /// Host-side default row estimate before the table sets one
    pub const DEFAULT_ROWS: i64 = 25;

    pub fn new(constraints: Vec<RawConstraint>, order_by: Vec<RawOrderBy>, col_used: u64) -> Self {
        let usage = vec![ConstraintUsage::default(); constraints.len()];
        Self {
            constraints,
            order_by,
            col_used,
            usage,
            order_by_consumed: false,
            estimated_cost: Self::DEFAULT_COST,
            estimated_rows: Self::DEFAULT_ROWS,
            idx_flags: 0,
            idx_num: 0,
        }
    }

    /// Clears every output field back to host defaults
    pub fn reset_outputs(&mut self) {
        self.usage = vec![ConstraintUsage::default(); self.constraints.len()];
        self.order_by_consumed = false;
        self.estimated_cost = Self::DEFAULT_COST;
        self.estimated_rows = Self::DEFAULT_ROWS;
        self.idx_flags = 0;
        self.idx_num = 0;
    }

    /// Returns true if the unique-scan flag was set
    pub fn is_unique_scan(&self) -> bool {
        self.idx_flags & Self::SCAN_UNIQUE != 0
    }
}
