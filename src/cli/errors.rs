//! CLI-specific error types

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::planner::PlannerError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout)
    IoError,
    /// `--where` expression could not be parsed
    InvalidFilter,
    /// `--where` names a column the table does not declare
    UnknownColumn,
    /// Planning failed even without constraints
    PlanRejected,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "VTAB_CLI_CONFIG_ERROR",
            Self::IoError => "VTAB_CLI_IO_ERROR",
            Self::InvalidFilter => "VTAB_CLI_INVALID_FILTER",
            Self::UnknownColumn => "VTAB_CLI_UNKNOWN_COLUMN",
            Self::PlanRejected => "VTAB_CLI_PLAN_REJECTED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Malformed filter expression
    pub fn invalid_filter(expr: &str) -> Self {
        Self::new(
            CliErrorCode::InvalidFilter,
            format!("Expected 'column OP value', got '{}'", expr),
        )
    }

    /// Unknown column
    pub fn unknown_column(table: &str, column: &str) -> Self {
        Self::new(
            CliErrorCode::UnknownColumn,
            format!("Table '{}' has no column '{}'", table, column),
        )
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<PlannerError> for CliError {
    fn from(e: PlannerError) -> Self {
        Self::new(CliErrorCode::PlanRejected, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::invalid_filter("value");
        assert_eq!(err.code(), &CliErrorCode::InvalidFilter);
        assert!(err.to_string().starts_with("VTAB_CLI_INVALID_FILTER: "));
    }

    #[test]
    fn test_from_planner_error() {
        let err: CliError = PlannerError::required_unusable(1).into();
        assert_eq!(err.code(), &CliErrorCode::PlanRejected);
        assert!(err.to_string().starts_with("VTAB_CLI_PLAN_REJECTED: "));
        assert!(err.message().contains("VTAB_PLAN_REQUIRED_UNUSABLE"));
    }
}
