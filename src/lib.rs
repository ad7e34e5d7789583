//! vtabkit - constraint planning and bounded row generators for virtual tables
//!
//! A host query engine negotiates with each table which predicates the
//! table evaluates itself. Accepted plans are stored per table and resolved
//! when a cursor executes, narrowing a generator's range before rows are
//! produced.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod observability;
pub mod planner;
pub mod series;
pub mod vtab;
