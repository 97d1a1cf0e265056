//! Tracing setup for livemark hosts.
//!
//! Library crates only emit `tracing` events; binaries call [`init`] once at
//! startup to print them. Output goes to stderr so stdout stays usable for
//! machine-readable results.
//!
//! # Usage
//!
//! ```ignore
//! use livemark_common::telemetry::{self, TelemetryConfig};
//!
//! fn main() {
//!     telemetry::init(TelemetryConfig::from_env("livemark"));
//!     tracing::info!("started");
//! }
//! ```

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name for labeling (e.g., "livemark")
    pub service_name: String,
    /// Console log level (default: INFO, DEBUG in debug builds)
    pub console_level: Level,
}

impl TelemetryConfig {
    /// Defaults for this build.
    ///
    /// - `RUST_LOG`: Standard env filter (optional, overrides console_level)
    pub fn from_env(service_name: impl Into<String>) -> Self {
        let console_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };

        Self {
            service_name: service_name.into(),
            console_level,
        }
    }

    /// Override the console level with a name like `"trace"` or `"warn"`.
    /// Returns the unparsed name back on failure.
    pub fn with_level_name(mut self, name: &str) -> Result<Self, String> {
        self.console_level = name.parse().map_err(|_| name.to_owned())?;
        Ok(self)
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.console_level.as_str().to_lowercase()))
    }
}

/// Initialize tracing with a compact stderr layer.
///
/// Call once at application startup; later calls are ignored.
pub fn init(config: TelemetryConfig) {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_filter(config.env_filter());

    if tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_ok()
    {
        tracing::debug!(
            service = %config.service_name,
            level = %config.console_level,
            "telemetry initialized"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        let config = TelemetryConfig::from_env("livemark")
            .with_level_name("trace")
            .unwrap();
        assert_eq!(config.console_level, Level::TRACE);

        let err = TelemetryConfig::from_env("livemark")
            .with_level_name("chatty")
            .unwrap_err();
        assert_eq!(err, "chatty");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(TelemetryConfig::from_env("livemark-test"));
        init(TelemetryConfig::from_env("livemark-test"));
    }
}
