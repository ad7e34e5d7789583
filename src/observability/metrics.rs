//! Planner counters
//!
//! - Counters only
//! - Monotonic increase
//! - Relaxed atomics, no locks

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters owned by one plan registry
#[derive(Debug, Default)]
pub struct PlannerMetrics {
    plans_registered: AtomicU64,
    plans_rejected: AtomicU64,
    plans_executed: AtomicU64,
    stale_lookups: AtomicU64,
    registry_clears: AtomicU64,
}

impl PlannerMetrics {
    /// Create a metrics set with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_registered(&self) {
        self.plans_registered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rejected(&self) {
        self.plans_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_executed(&self) {
        self.plans_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_stale(&self) {
        self.stale_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_clears(&self) {
        self.registry_clears.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all counters as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            plans_registered: self.plans_registered.load(Ordering::Relaxed),
            plans_rejected: self.plans_rejected.load(Ordering::Relaxed),
            plans_executed: self.plans_executed.load(Ordering::Relaxed),
            stale_lookups: self.stale_lookups.load(Ordering::Relaxed),
            registry_clears: self.registry_clears.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of the planner counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub plans_registered: u64,
    pub plans_rejected: u64,
    pub plans_executed: u64,
    pub stale_lookups: u64,
    pub registry_clears: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero() {
        let metrics = PlannerMetrics::new();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_counters_are_independent() {
        let metrics = PlannerMetrics::new();
        metrics.increment_registered();
        metrics.increment_registered();
        metrics.increment_rejected();
        metrics.increment_stale();

        let snap = metrics.snapshot();
        assert_eq!(snap.plans_registered, 2);
        assert_eq!(snap.plans_rejected, 1);
        assert_eq!(snap.plans_executed, 0);
        assert_eq!(snap.stale_lookups, 1);
        assert_eq!(snap.registry_clears, 0);
    }
}
