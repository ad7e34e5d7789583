//! Planner rejection types
//!
//! A rejection is a normal negotiation outcome, not a fault: the host
//! falls back to an unconstrained scan and re-checks every predicate itself.
//!
//! Error codes:
//! - VTAB_PLAN_REQUIRED_UNUSABLE (REJECT)
//! - VTAB_PLAN_EQUALITY_ONLY (REJECT)
//! - VTAB_PLAN_UNUSABLE (REJECT)
//! - VTAB_PLAN_REGISTRY_EXHAUSTED (REJECT)

use std::fmt;

use super::constraint::ConstraintOp;

/// Severity levels for planner errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Plan rejected, host must choose another plan
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Planner rejection codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerErrorCode {
    /// A `required` column arrived with an unusable constraint
    RequiredUnusable,
    /// An `equality_only` column arrived with a non-equality, unusable constraint
    EqualityOnly,
    /// A kept constraint is not usable
    Unusable,
    /// The table has handed out every plan id
    RegistryExhausted,
}

impl PlannerErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            PlannerErrorCode::RequiredUnusable => "VTAB_PLAN_REQUIRED_UNUSABLE",
            PlannerErrorCode::EqualityOnly => "VTAB_PLAN_EQUALITY_ONLY",
            PlannerErrorCode::Unusable => "VTAB_PLAN_UNUSABLE",
            PlannerErrorCode::RegistryExhausted => "VTAB_PLAN_REGISTRY_EXHAUSTED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for PlannerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Planner rejection with context
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerError {
    code: PlannerErrorCode,
    message: String,
    column: i32,
}

impl PlannerError {
    /// Create a required-but-unusable rejection
    pub fn required_unusable(column: i32) -> Self {
        Self {
            code: PlannerErrorCode::RequiredUnusable,
            message: format!("required column {} has no usable constraint", column),
            column,
        }
    }

    /// Create an equality-only rejection
    pub fn equality_only(column: i32, op: ConstraintOp) -> Self {
        Self {
            code: PlannerErrorCode::EqualityOnly,
            message: format!(
                "column {} accepts only usable '=' constraints, got '{}'",
                column,
                op.symbol()
            ),
            column,
        }
    }

    /// Create an unusable-constraint rejection
    pub fn unusable(column: i32, op: ConstraintOp) -> Self {
        Self {
            code: PlannerErrorCode::Unusable,
            message: format!(
                "constraint '{}' on column {} is not usable",
                op.symbol(),
                column
            ),
            column,
        }
    }

    /// Create a rejection for a registry with no ids left
    pub fn registry_exhausted() -> Self {
        Self {
            code: PlannerErrorCode::RegistryExhausted,
            message: "plan registry has no ids left".to_string(),
            column: -1,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> PlannerErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the raw column index that caused the rejection
    pub fn column(&self) -> i32 {
        self.column
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for PlannerError {}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
