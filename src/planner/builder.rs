//! Plan builder
//!
//! Turns one host planning call into an immutable [`Plan`].
//!
//! # Algorithm (strict order)
//!
//! 1. Decode each raw constraint in host order into a candidate record
//! 2. Apply the caller's acceptance policy
//! 3. Give every kept constraint the next consecutive argument slot
//! 4. Reject the plan if a kept constraint is unusable (unless hidden)
//! 5. Consume a single-entry order-by and copy its direction
//! 6. Record the host's column-usage mask
//!
//! The builder is deterministic: the same raw arrays and policy always
//! produce the same plan.

use super::column::AcceptancePolicy;
use super::constraint::{ConstraintOp, ConstraintRecord};
use super::errors::{PlannerError, PlannerResult};
use super::index_info::{ConstraintUsage, IndexInfo};

/// Immutable outcome of one planning call
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    id: i32,
    constraints: Vec<ConstraintRecord>,
    order_by_consumed: bool,
    descending: bool,
    columns_used: u64,
}

impl Plan {
    /// A plan with no constraints, ascending, no order-by consumed
    pub fn unconstrained(id: i32) -> Self {
        Self {
            id,
            constraints: Vec::new(),
            order_by_consumed: false,
            descending: false,
            columns_used: 0,
        }
    }

    pub(crate) fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    /// Accepted constraints in slot order
    pub fn constraints(&self) -> &[ConstraintRecord] {
        &self.constraints
    }

    pub fn order_by_consumed(&self) -> bool {
        self.order_by_consumed
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    /// Host column-usage mask captured at planning time
    pub fn columns_used(&self) -> u64 {
        self.columns_used
    }

    /// Returns true if any accepted constraint is on the raw column
    pub fn contains(&self, column: i32) -> bool {
        self.constraints.iter().any(|c| c.is_on(column))
    }

    /// First accepted constraint on the raw column
    pub fn find(&self, column: i32) -> Option<&ConstraintRecord> {
        self.constraints.iter().find(|c| c.is_on(column))
    }

    /// Returns true if an equality constraint on the raw column was accepted
    pub fn has_equality_on(&self, column: i32) -> bool {
        self.constraints
            .iter()
            .any(|c| c.is_on(column) && c.op.is_equality())
    }
}

/// Builds plans from raw host arrays using a caller-supplied policy
pub struct PlanBuilder<P>
where
    P: Fn(&ConstraintRecord) -> AcceptancePolicy,
{
    policy: P,
    order_column: Option<i32>,
}

impl<P> PlanBuilder<P>
where
    P: Fn(&ConstraintRecord) -> AcceptancePolicy,
{
    /// Creates a builder with the given acceptance policy
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            order_column: None,
        }
    }

    /// Only consume a single-entry order-by when it sorts on this raw column
    pub fn consume_order_on(mut self, column: i32) -> Self {
        self.order_column = Some(column);
        self
    }

    /// Builds a plan, writing argument indexes and the order-by flag into
    /// `info`. On rejection every output field is reset to host defaults.
    pub fn build(&self, info: &mut IndexInfo) -> PlannerResult<Plan> {
        match self.build_inner(info) {
            Ok(plan) => Ok(plan),
            Err(err) => {
                info.reset_outputs();
                Err(err)
            }
        }
    }

    fn build_inner(&self, info: &mut IndexInfo) -> PlannerResult<Plan> {
        if info.usage.len() != info.constraints.len() {
            info.usage = vec![ConstraintUsage::default(); info.constraints.len()];
        }

        let mut kept = Vec::with_capacity(info.constraints.len());

        for (i, raw) in info.constraints.iter().enumerate() {
            let op = ConstraintOp::from_code(raw.op);
            let candidate = ConstraintRecord::new(kept.len(), raw.column, op, raw.usable);

            let policy = (self.policy)(&candidate);
            match policy {
                AcceptancePolicy::Required => {
                    if !raw.usable {
                        return Err(PlannerError::required_unusable(raw.column));
                    }
                }
                AcceptancePolicy::Exclude => continue,
                AcceptancePolicy::EqualityOnly => {
                    if !raw.usable && !op.is_equality() {
                        return Err(PlannerError::equality_only(raw.column, op));
                    }
                }
                AcceptancePolicy::Accept | AcceptancePolicy::Hidden => {}
            }

            if !raw.usable && policy != AcceptancePolicy::Hidden {
                return Err(PlannerError::unusable(raw.column, op));
            }

            info.usage[i] = ConstraintUsage {
                argv_index: (candidate.arg_slot + 1) as i32,
                omit: policy == AcceptancePolicy::Hidden,
            };
            kept.push(candidate);
        }

        let mut order_by_consumed = false;
        let mut descending = false;
        if let [only] = info.order_by.as_slice() {
            if self.order_column.map_or(true, |col| col == only.column) {
                order_by_consumed = true;
                descending = only.desc;
            }
        }
        info.order_by_consumed = order_by_consumed;

        Ok(Plan {
            id: 0,
            constraints: kept,
            order_by_consumed,
            descending,
            columns_used: info.col_used,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::column::column_policy;
    use crate::planner::column::test_columns::SampleColumn;
    use crate::planner::index_info::{RawConstraint, RawOrderBy};

    fn raw(column: i32, op: u8, usable: bool) -> RawConstraint {
        RawConstraint::new(column, op, usable)
    }

    fn sample_builder() -> PlanBuilder<fn(&ConstraintRecord) -> AcceptancePolicy> {
        PlanBuilder::new(column_policy::<SampleColumn> as fn(&ConstraintRecord) -> AcceptancePolicy)
    }

    #[test]
    fn test_slots_are_consecutive_from_zero() {
        let mut info = IndexInfo::new(
            vec![
                raw(1, ConstraintOp::GE, true),
                raw(2, ConstraintOp::LE, true),
                raw(0, ConstraintOp::EQ, true),
            ],
            vec![],
            0b111,
        );
        let plan = sample_builder().build(&mut info).unwrap();

        let slots: Vec<usize> = plan.constraints().iter().map(|c| c.arg_slot).collect();
        assert_eq!(slots, vec![0, 1, 2]);
        let argv: Vec<i32> = info.usage.iter().map(|u| u.argv_index).collect();
        assert_eq!(argv, vec![1, 2, 3]);
        assert_eq!(plan.columns_used(), 0b111);
    }

    #[test]
    fn test_excluded_constraint_gets_no_slot() {
        let builder = PlanBuilder::new(|rec: &ConstraintRecord| {
            if rec.column == 2 {
                AcceptancePolicy::Exclude
            } else {
                AcceptancePolicy::Accept
            }
        });
        let mut info = IndexInfo::new(
            vec![
                raw(1, ConstraintOp::GE, true),
                raw(2, ConstraintOp::LE, true),
                raw(0, ConstraintOp::EQ, true),
            ],
            vec![],
            0,
        );
        let plan = builder.build(&mut info).unwrap();

        assert_eq!(plan.constraints().len(), 2);
        assert!(!plan.contains(2));
        assert_eq!(info.usage[1].argv_index, 0);
        assert_eq!(info.usage[2].argv_index, 2);
        assert_eq!(plan.find(0).map(|c| c.arg_slot), Some(1));
    }

    #[test]
    fn test_required_unusable_rejects() {
        let builder = PlanBuilder::new(|_: &ConstraintRecord| AcceptancePolicy::Required);
        let mut info = IndexInfo::new(
            vec![raw(0, ConstraintOp::EQ, true), raw(1, ConstraintOp::EQ, false)],
            vec![RawOrderBy::new(0, true)],
            0,
        );
        let err = builder.build(&mut info).unwrap_err();
        assert_eq!(err.code().code(), "VTAB_PLAN_REQUIRED_UNUSABLE");
        assert_eq!(err.column(), 1);
        // Outputs are reset on rejection
        assert_eq!(info.usage[0].argv_index, 0);
        assert!(!info.order_by_consumed);
    }

    #[test]
    fn test_equality_only_rejects_unusable_range() {
        let mut info = IndexInfo::new(vec![raw(3, ConstraintOp::GT, false)], vec![], 0);
        let err = sample_builder().build(&mut info).unwrap_err();
        assert_eq!(err.code().code(), "VTAB_PLAN_EQUALITY_ONLY");
    }

    #[test]
    fn test_equality_only_accepts_usable_range() {
        let mut info = IndexInfo::new(vec![raw(3, ConstraintOp::GT, true)], vec![], 0);
        let plan = sample_builder().build(&mut info).unwrap();
        assert_eq!(plan.constraints().len(), 1);
    }

    #[test]
    fn test_kept_unusable_rejects() {
        let mut info = IndexInfo::new(vec![raw(1, ConstraintOp::GE, false)], vec![], 0);
        let err = sample_builder().build(&mut info).unwrap_err();
        assert_eq!(err.code().code(), "VTAB_PLAN_UNUSABLE");
    }

    #[test]
    fn test_hidden_tolerates_unusable_and_sets_omit() {
        let builder = PlanBuilder::new(|_: &ConstraintRecord| AcceptancePolicy::Hidden);
        let mut info = IndexInfo::new(
            vec![raw(1, ConstraintOp::EQ, false), raw(2, ConstraintOp::EQ, true)],
            vec![],
            0,
        );
        let plan = builder.build(&mut info).unwrap();
        assert_eq!(plan.constraints().len(), 2);
        assert!(!plan.constraints()[0].usable);
        assert!(info.usage[0].omit);
        assert!(info.usage[1].omit);
    }

    #[test]
    fn test_single_order_by_consumed() {
        let mut info = IndexInfo::new(vec![], vec![RawOrderBy::new(0, true)], 0);
        let plan = sample_builder().build(&mut info).unwrap();
        assert!(plan.order_by_consumed());
        assert!(plan.is_descending());
        assert!(info.order_by_consumed);
    }

    #[test]
    fn test_multi_order_by_not_consumed() {
        let mut info = IndexInfo::new(
            vec![],
            vec![RawOrderBy::new(0, true), RawOrderBy::new(1, false)],
            0,
        );
        let plan = sample_builder().build(&mut info).unwrap();
        assert!(!plan.order_by_consumed());
        assert!(!plan.is_descending());
    }

    #[test]
    fn test_order_column_restriction() {
        let builder = sample_builder().consume_order_on(0);

        let mut info = IndexInfo::new(vec![], vec![RawOrderBy::new(2, true)], 0);
        let plan = builder.build(&mut info).unwrap();
        assert!(!plan.order_by_consumed());
        assert!(!plan.is_descending());

        let mut info = IndexInfo::new(vec![], vec![RawOrderBy::new(0, true)], 0);
        let plan = builder.build(&mut info).unwrap();
        assert!(plan.order_by_consumed());
        assert!(plan.is_descending());
    }

    #[test]
    fn test_deterministic_planning() {
        let constraints = vec![
            raw(0, ConstraintOp::EQ, true),
            raw(1, ConstraintOp::GT, true),
            raw(3, ConstraintOp::EQ, true),
        ];
        let order = vec![RawOrderBy::new(0, true)];

        let mut a = IndexInfo::new(constraints.clone(), order.clone(), 9);
        let mut b = IndexInfo::new(constraints, order, 9);
        let plan_a = sample_builder().build(&mut a).unwrap();
        let plan_b = sample_builder().build(&mut b).unwrap();

        assert_eq!(plan_a.constraints(), plan_b.constraints());
        assert_eq!(plan_a.is_descending(), plan_b.is_descending());
        assert_eq!(a.usage, b.usage);
    }

    #[test]
    fn test_plan_queries() {
        let mut info = IndexInfo::new(
            vec![raw(0, ConstraintOp::EQ, true), raw(1, ConstraintOp::GE, true)],
            vec![],
            0,
        );
        let plan = sample_builder().build(&mut info).unwrap();
        assert!(plan.has_equality_on(0));
        assert!(!plan.has_equality_on(1));
        assert!(plan.contains(1));
        assert!(!plan.contains(2));
    }
}
