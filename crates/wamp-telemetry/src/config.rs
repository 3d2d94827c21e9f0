//! Telemetry configuration from environment variables.

use crate::TelemetryError;
use std::env;

/// Logging configuration for a routing process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup record
    pub service_name: String,

    /// `EnvFilter` directive (trace, debug, info, warn, error, or per-target)
    pub log_level: String,

    /// Whether to write log records to stdout
    pub console_output: bool,

    /// Whether to format records as JSON instead of pretty text
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "wamp-router".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `WAMP_SERVICE_NAME`: Service name (default: wamp-router)
    /// - `WAMP_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `WAMP_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `WAMP_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("WAMP_SERVICE_NAME").unwrap_or_else(|| "wamp-router".to_string()),

            log_level: lookup("WAMP_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),

            console_output: lookup("WAMP_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: lookup("WAMP_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),
        }
    }

    /// Builder-style method to set the log filter
    #[must_use]
    pub fn with_log_level(mut self, log_level: impl Into<String>) -> Self {
        self.log_level = log_level.into();
        self
    }

    /// Builder-style method to switch JSON output
    #[must_use]
    pub fn with_json_logs(mut self, json_logs: bool) -> Self {
        self.json_logs = json_logs;
        self
    }

    /// Builder-style method to switch console output
    #[must_use]
    pub fn with_console_output(mut self, console_output: bool) -> Self {
        self.console_output = console_output;
        self
    }

    pub fn validate(&self) -> Result<(), TelemetryError> {
        if self.service_name.trim().is_empty() {
            return Err(TelemetryError::Config(
                "service_name cannot be empty".to_string(),
            ));
        }
        if self.log_level.trim().is_empty() {
            return Err(TelemetryError::Config("log_level cannot be empty".to_string()));
        }
        Ok(())
    }
}
