//! Human-readable plan descriptions
//!
//! Produces deterministic output such as
//! `Plan[3] (*start >= 5 *stop <= 20) ORDER DESC`, where `*` marks a usable
//! constraint. Bound values replace `argv[n]` placeholders when supplied.

use std::fmt;

use crate::vtab::Value;

use super::builder::Plan;
use super::column::{column_names, ColumnIndex};

/// Explain view over a plan
#[derive(Debug, Clone)]
pub struct PlanExplain<'a> {
    plan: &'a Plan,
    columns: Vec<&'static str>,
    values: Option<&'a [Value]>,
}

impl<'a> PlanExplain<'a> {
    /// Explain a plan using a table's declared column names
    pub fn new<C: ColumnIndex>(plan: &'a Plan) -> Self {
        Self {
            plan,
            columns: column_names::<C>(),
            values: None,
        }
    }

    /// Substitute bound values for argument placeholders
    pub fn with_values(mut self, values: &'a [Value]) -> Self {
        self.values = Some(values);
        self
    }

    fn column_name(&self, raw: i32) -> String {
        usize::try_from(raw)
            .ok()
            .and_then(|i| self.columns.get(i))
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("col[{}]", raw))
    }

    fn argument(&self, slot: usize) -> String {
        match self.values.and_then(|values| values.get(slot)) {
            Some(value) => value.to_string(),
            None => format!("argv[{}]", slot),
        }
    }
}

impl fmt::Display for PlanExplain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plan[{}] (", self.plan.id())?;
        for (i, rec) in self.plan.constraints().iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(
                f,
                "{}{} {} {}",
                if rec.usable { "*" } else { "" },
                self.column_name(rec.column),
                rec.op.symbol(),
                self.argument(rec.arg_slot)
            )?;
        }
        write!(f, ")")?;
        if self.plan.order_by_consumed() {
            let dir = if self.plan.is_descending() { "DESC" } else { "ASC" };
            write!(f, " ORDER {}", dir)?;
        }
        Ok(())
    }
}
