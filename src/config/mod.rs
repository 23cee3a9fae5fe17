//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CAPEX` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use capex_estimator::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reading catalog from {}", config.data.dir.display());
//! ```

mod data;
mod error;
mod logging;
mod report;
mod risk;

pub use data::DataConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use report::ReportConfig;
pub use risk::{RiskConfig, MAX_ITERATIONS, MIN_ITERATIONS};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Catalog data location and file names
    #[serde(default)]
    pub data: DataConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Monte Carlo settings
    #[serde(default)]
    pub risk: RiskConfig,

    /// Report export settings
    #[serde(default)]
    pub report: ReportConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CAPEX` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CAPEX__DATA__DIR=./data` -> `data.dir = ./data`
    /// - `CAPEX__RISK__ITERATIONS=5000` -> `risk.iterations = 5000`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CAPEX")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.data.validate()?;
        self.logging.validate()?;
        self.risk.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("CAPEX__DATA__DIR");
        env::remove_var("CAPEX__DATA__BENCHMARKS_FILE");
        env::remove_var("CAPEX__LOGGING__JSON");
        env::remove_var("CAPEX__RISK__ITERATIONS");
        env::remove_var("CAPEX__RISK__SEED");
        env::remove_var("CAPEX__REPORT__OUTPUT_DIR");
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert_eq!(config.risk.iterations, 2_000);
        assert!(!config.report.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CAPEX__DATA__DIR", "/srv/capex");
        env::set_var("CAPEX__DATA__BENCHMARKS_FILE", "benchmarks_2024.yaml");
        env::set_var("CAPEX__LOGGING__JSON", "true");
        env::set_var("CAPEX__RISK__ITERATIONS", "5000");
        env::set_var("CAPEX__RISK__SEED", "42");
        env::set_var("CAPEX__REPORT__OUTPUT_DIR", "/tmp/reports");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.data.dir, PathBuf::from("/srv/capex"));
        assert_eq!(config.data.catalog_files().benchmarks, "benchmarks_2024.yaml");
        assert!(config.logging.json);
        assert_eq!(config.risk.iterations, 5_000);
        assert_eq!(config.risk.seed, Some(42));
        assert_eq!(config.report.output_dir, Some(PathBuf::from("/tmp/reports")));
    }

    #[test]
    fn test_validate_rejects_iterations_out_of_range() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CAPEX__RISK__ITERATIONS", "50");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidIterations { actual: 50, .. })
        ));
    }
}
