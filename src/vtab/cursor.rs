//! Shared cursor bookkeeping
//!
//! Generators compose [`CursorState`] for position, row id, direction and
//! the safety cap, and [`Bounds`] for their `(min, max, step)` range.

use crate::observability::{log_event_with_fields, Event, Severity};

/// A generator's value range and step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds<T, S> {
    pub min: T,
    pub max: T,
    pub step: S,
}

impl<T, S> Bounds<T, S> {
    pub fn new(min: T, max: T, step: S) -> Self {
        Self { min, max, step }
    }
}

/// Iteration position of one cursor
#[derive(Debug, Clone)]
pub struct CursorState<T> {
    current: Option<T>,
    row_id: i64,
    descending: bool,
    exhausted: bool,
    cap: i64,
}

impl<T> CursorState<T> {
    /// An unfiltered cursor: no current value, so it is at end
    pub fn new(cap: i64) -> Self {
        Self {
            current: None,
            row_id: 0,
            descending: false,
            exhausted: false,
            cap,
        }
    }

    /// Positions the cursor on its first row
    pub fn start(&mut self, first: T, descending: bool) {
        self.current = Some(first);
        self.row_id = 1;
        self.descending = descending;
        self.exhausted = false;
    }

    /// Moves one row. `step` receives the current value and direction and
    /// returns the next value, or `None` when the domain overflows; the
    /// current value is then retained and the cursor is exhausted.
    pub fn advance<F>(&mut self, step: F)
    where
        F: FnOnce(&T, bool) -> Option<T>,
    {
        self.row_id = self.row_id.saturating_add(1);
        if self.row_id == self.cap.saturating_add(1) {
            let cap = self.cap.to_string();
            log_event_with_fields(Severity::Warn, Event::RowCapReached, &[("cap", cap.as_str())]);
        }

        if self.exhausted {
            return;
        }
        if let Some(current) = &self.current {
            match step(current, self.descending) {
                Some(next) => self.current = Some(next),
                None => self.exhausted = true,
            }
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn row_id(&self) -> i64 {
        self.row_id
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    /// True once stepping overflowed the value domain
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// True once more rows than the cap would be emitted
    pub fn past_cap(&self) -> bool {
        self.row_id > self.cap
    }

    pub fn cap(&self) -> i64 {
        self.cap
    }

    #[cfg(test)]
    pub(crate) fn set_row_id(&mut self, row_id: i64) {
        self.row_id = row_id;
    }
}
