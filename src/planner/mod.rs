//! Constraint planning for virtual tables
//!
//! The host engine pushes predicate constraints down to a table during
//! planning. The planner decides which ones the table satisfies itself,
//! assigns the argument slots the host will use to pass bound values, and
//! stores the result as a [`Plan`] whose id the host echoes back at
//! execution time.
//!
//! # Design Principles
//!
//! - Deterministic: same raw constraints + policy → same plan
//! - Owned: host arrays are copied into bounds-checked vectors on entry
//! - Fail closed: unusable constraints reject the plan, never half-apply
//! - Single use: a plan id resolves at most once

mod builder;
mod column;
mod constraint;
mod errors;
mod explain;
mod index_info;
mod registry;

pub use builder::{Plan, PlanBuilder};
pub use column::{column_names, column_policy, AcceptancePolicy, ColumnIndex};
pub use constraint::{ConstraintOp, ConstraintRecord};
pub use errors::{PlannerError, PlannerErrorCode, PlannerResult, Severity};
pub use explain::PlanExplain;
pub use index_info::{ConstraintUsage, IndexInfo, RawConstraint, RawOrderBy};
pub use registry::{PlanRegistry, RegistryMode};
