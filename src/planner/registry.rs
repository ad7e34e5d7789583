//! Plan registry
//!
//! Per-table store of plans awaiting execution, keyed by the id returned to
//! the host as its index number. Ids are handed out monotonically and never
//! reused within a registry, so a consumed or cleared id cannot alias a
//! newer plan.
//!
//! # Consumption modes
//!
//! - `ClearOnExecute`: resolving any id empties the whole registry. Only one
//!   plan is ever in flight; interleaved planning on two cursors of the same
//!   table loses the other cursor's plan.
//! - `PerPlan`: resolving an id removes only that plan.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::observability::{
    log_event_with_fields, Event, MetricsSnapshot, PlannerMetrics, Severity,
};

use super::builder::Plan;
use super::errors::{PlannerError, PlannerResult};

/// How resolving a plan id consumes registry entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryMode {
    #[default]
    ClearOnExecute,
    PerPlan,
}

impl RegistryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryMode::ClearOnExecute => "clear_on_execute",
            RegistryMode::PerPlan => "per_plan",
        }
    }
}

/// Append-only plan store with single-use resolution
#[derive(Debug)]
pub struct PlanRegistry {
    plans: BTreeMap<i32, Plan>,
    // None once every id has been handed out
    next_id: Option<i32>,
    mode: RegistryMode,
    metrics: PlannerMetrics,
}

impl Default for PlanRegistry {
    fn default() -> Self {
        Self::new(RegistryMode::default())
    }
}

impl PlanRegistry {
    pub fn new(mode: RegistryMode) -> Self {
        Self {
            plans: BTreeMap::new(),
            next_id: Some(0),
            mode,
            metrics: PlannerMetrics::new(),
        }
    }

    pub fn mode(&self) -> RegistryMode {
        self.mode
    }

    /// Stores a plan and returns its id. Fails once the id space is
    /// used up rather than hand out an id twice.
    pub fn register(&mut self, plan: Plan) -> PlannerResult<i32> {
        let id = self.next_id.ok_or_else(PlannerError::registry_exhausted)?;
        self.next_id = id.checked_add(1);
        self.plans.insert(id, plan.with_id(id));
        self.metrics.increment_registered();
        Ok(id)
    }

    /// Looks a plan up without consuming it
    pub fn get(&self, id: i32) -> Option<&Plan> {
        self.plans.get(&id)
    }

    /// Resolves a plan for execution, consuming registry entries according
    /// to the mode. Returns `None` for ids that were never registered or
    /// have already been consumed or cleared.
    pub fn take(&mut self, id: i32) -> Option<Plan> {
        let plan = self.plans.remove(&id);

        if self.mode == RegistryMode::ClearOnExecute {
            self.clear();
        }

        match plan {
            Some(plan) => {
                self.metrics.increment_executed();
                Some(plan)
            }
            None => {
                self.metrics.increment_stale();
                let id_str = id.to_string();
                log_event_with_fields(
                    Severity::Warn,
                    Event::PlanStale,
                    &[("id", id_str.as_str()), ("mode", self.mode.as_str())],
                );
                None
            }
        }
    }

    /// Invalidates every stored plan
    pub fn clear(&mut self) {
        let dropped = self.plans.len();
        self.plans.clear();
        self.metrics.increment_clears();

        let dropped_str = dropped.to_string();
        log_event_with_fields(
            Severity::Trace,
            Event::RegistryCleared,
            &[("dropped", dropped_str.as_str())],
        );
    }

    /// Counts a rejected planning call
    pub fn record_rejection(&self) {
        self.metrics.increment_rejected();
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
