//! Series table columns

use crate::planner::{AcceptancePolicy, ColumnIndex};

/// Declared schema of the series table
pub const SERIES_DECLARATION: &str = "CREATE TABLE series(value, start HIDDEN, stop HIDDEN, step HIDDEN)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesColumn {
    Value,
    Start,
    Stop,
    Step,
}

impl ColumnIndex for SeriesColumn {
    const ALL: &'static [Self] = &[
        SeriesColumn::Value,
        SeriesColumn::Start,
        SeriesColumn::Stop,
        SeriesColumn::Step,
    ];

    fn raw(self) -> i32 {
        self as i32
    }

    fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(SeriesColumn::Value),
            1 => Some(SeriesColumn::Start),
            2 => Some(SeriesColumn::Stop),
            3 => Some(SeriesColumn::Step),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            SeriesColumn::Value => "value",
            SeriesColumn::Start => "start",
            SeriesColumn::Stop => "stop",
            SeriesColumn::Step => "step",
        }
    }

    fn is_hidden(self) -> bool {
        self != SeriesColumn::Value
    }

    fn policy(self) -> AcceptancePolicy {
        match self {
            SeriesColumn::Step => AcceptancePolicy::EqualityOnly,
            _ => AcceptancePolicy::Accept,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns() {
        for (i, col) in SeriesColumn::ALL.iter().enumerate() {
            assert_eq!(col.raw(), i as i32);
            assert_eq!(SeriesColumn::from_name(col.name()), Some(*col));
        }
        assert_eq!(SeriesColumn::from_raw(4), None);
        assert!(!SeriesColumn::Value.is_hidden());
        assert!(SeriesColumn::Stop.is_hidden());
    }
}
