//! Runtime configuration
//!
//! Loaded from a JSON file. Every field is optional:
//!
//! ```json
//! { "registry_mode": "clear_on_execute", "log_level": "warn" }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::planner::RegistryMode;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON for this schema
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Log level is not one of trace, info, warn, error
    #[error("Invalid log_level: '{0}'")]
    InvalidLogLevel(String),
}

/// Configuration for tables and the command line driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VtabConfig {
    /// How resolving a plan consumes the plan registry (default: clear_on_execute)
    #[serde(default)]
    pub registry_mode: RegistryMode,

    /// Lowest logged severity (default: "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for VtabConfig {
    fn default() -> Self {
        Self {
            registry_mode: RegistryMode::default(),
            log_level: default_log_level(),
        }
    }
}

impl VtabConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: VtabConfig = serde_json::from_str(content)?;
        config.severity()?;
        Ok(config)
    }

    /// Parsed log level
    pub fn severity(&self) -> ConfigResult<Severity> {
        match self.log_level.to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "info" => Ok(Severity::Info),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            _ => Err(ConfigError::InvalidLogLevel(self.log_level.clone())),
        }
    }

    /// Applies process-wide settings (the log floor)
    pub fn apply(&self) -> ConfigResult<()> {
        Logger::set_min_severity(self.severity()?);
        log_event_with_fields(
            Severity::Info,
            Event::ConfigLoaded,
            &[
                ("log_level", self.log_level.as_str()),
                ("registry_mode", self.registry_mode.as_str()),
            ],
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = VtabConfig::from_json("{}").unwrap();
        assert_eq!(config.registry_mode, RegistryMode::ClearOnExecute);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config, VtabConfig::default());
    }

    #[test]
    fn test_config_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vtabkit.json");
        let body = json!({ "registry_mode": "per_plan", "log_level": "trace" });
        fs::write(&path, body.to_string()).unwrap();

        let config = VtabConfig::load(&path).unwrap();
        assert_eq!(config.registry_mode, RegistryMode::PerPlan);
        assert_eq!(config.severity().unwrap(), Severity::Trace);
    }

    #[test]
    fn test_config_rejects_unknown_mode() {
        let result = VtabConfig::from_json(r#"{ "registry_mode": "sometimes" }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_rejects_bad_log_level() {
        let result = VtabConfig::from_json(r#"{ "log_level": "loud" }"#);
        assert!(matches!(result, Err(ConfigError::InvalidLogLevel(_))));
    }

    #[test]
    fn test_config_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = VtabConfig::load(&temp_dir.path().join("absent.json"));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
