//! Logging configuration and subscriber setup

use serde::Deserialize;
use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::error::ValidationError;

static INIT: Once = Once::new();

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info,capex_estimator=debug`
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.filter.trim().is_empty() {
            return Err(ValidationError::MissingRequired("logging.filter"));
        }
        EnvFilter::try_new(&self.filter)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }

    /// Install the global tracing subscriber.
    ///
    /// Idempotent; later calls are ignored. Logs go to stderr so the
    /// estimate printed on stdout stays clean.
    pub fn init(&self) {
        INIT.call_once(|| {
            let filter =
                EnvFilter::try_new(&self.filter).unwrap_or_else(|_| EnvFilter::new(default_filter()));

            if self.json {
                tracing_subscriber::registry()
                    .with(fmt::layer().json().with_writer(std::io::stderr))
                    .with(filter)
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                    .with(filter)
                    .init();
            }
        });
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "info,capex_estimator=debug".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.filter, "info,capex_estimator=debug");
        assert!(!config.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_filter_is_invalid() {
        let config = LoggingConfig {
            filter: "  ".to_string(),
            json: false,
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("logging.filter"))
        );
    }
}
