//! Observability subsystem
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle events
//! - Planner counters
//!
//! Observability is read-only: nothing here changes planning or iteration.
//!
//! # Usage
//!
//! ```ignore
//! use vtabkit::observability::{log_event_with_fields, Event, Severity};
//!
//! log_event_with_fields(Severity::Info, Event::PlanRejected, &[("table", "series")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{render_line, Logger, Severity};
pub use metrics::{MetricsSnapshot, PlannerMetrics};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(severity: Severity, event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity, event, fields);
}
