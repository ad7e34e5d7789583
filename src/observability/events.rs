//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events of the planning and iteration layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded
    ConfigLoaded,
    /// Table constructed from host arguments
    TableConnected,

    // Planning
    /// Plan accepted and stored in the registry
    PlanRegistered,
    /// Planning call rejected
    PlanRejected,

    // Execution
    /// Plan resolved and applied to a cursor
    PlanExecuted,
    /// Plan id did not resolve
    PlanStale,
    /// Registry emptied
    RegistryCleared,
    /// Cursor stopped at its safety cap
    RowCapReached,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::TableConnected => "TABLE_CONNECTED",
            Event::PlanRegistered => "PLAN_REGISTERED",
            Event::PlanRejected => "PLAN_REJECTED",
            Event::PlanExecuted => "PLAN_EXECUTED",
            Event::PlanStale => "PLAN_STALE",
            Event::RegistryCleared => "REGISTRY_CLEARED",
            Event::RowCapReached => "ROW_CAP_REACHED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::ConfigLoaded,
            Event::TableConnected,
            Event::PlanRegistered,
            Event::PlanRejected,
            Event::PlanExecuted,
            Event::PlanStale,
            Event::RegistryCleared,
            Event::RowCapReached,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }
}
