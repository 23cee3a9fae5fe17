//! Risk simulation configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::risk::RiskSimulator;

/// Fewest Monte Carlo draws accepted.
pub const MIN_ITERATIONS: usize = 200;

/// Most Monte Carlo draws accepted.
pub const MAX_ITERATIONS: usize = 20_000;

/// Monte Carlo configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    /// Number of lognormal draws
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
}

impl RiskConfig {
    /// Simulator configured from these settings
    pub fn simulator(&self) -> RiskSimulator {
        RiskSimulator::new(self.iterations, self.seed)
    }

    /// Validate risk configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&self.iterations) {
            return Err(ValidationError::InvalidIterations {
                min: MIN_ITERATIONS,
                max: MAX_ITERATIONS,
                actual: self.iterations,
            });
        }
        Ok(())
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            seed: None,
        }
    }
}

fn default_iterations() -> usize {
    2_000
}
