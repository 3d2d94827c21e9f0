//! # WAMP Telemetry
//!
//! Structured logging for processes embedding the broker.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wamp_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     init_telemetry(TelemetryConfig::from_env()).expect("Failed to init telemetry");
//!     // Broker routing decisions are now logged
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `WAMP_SERVICE_NAME` | `wamp-router` | Service name in the startup record |
//! | `WAMP_LOG_LEVEL` | `info` | Log filter, falls back to `RUST_LOG` |
//! | `WAMP_CONSOLE_OUTPUT` | `true` | Write records to stdout |
//! | `WAMP_JSON_LOGS` | `false` | JSON records; defaults on inside containers |

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Validate the configuration and install the global subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_telemetry(config: TelemetryConfig) -> Result<(), TelemetryError> {
    config.validate()?;
    tracing_setup::init_tracing(&config)
}

/// Install a subscriber for tests, ignoring one that is already installed.
///
/// Honors `WAMP_LOG_LEVEL`/`RUST_LOG`; defaults to `warn` so test output stays quiet.
pub fn init_test_telemetry() {
    let config = TelemetryConfig::from_env();
    let level_set = std::env::var("WAMP_LOG_LEVEL").is_ok() || std::env::var("RUST_LOG").is_ok();
    let config = if level_set {
        config
    } else {
        config.with_log_level("warn")
    };
    let _ = init_telemetry(config.with_json_logs(false));
}
