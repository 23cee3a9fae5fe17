//! Configuration errors raised by the estimation pipeline.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, Scenario};

/// Structural lookup failures. These are never retried or defaulted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    #[error("Module '{0}' is not defined")]
    UnknownModule(String),

    #[error("Chapter '{chapter}' has no {form} rate for scenario '{scenario}'")]
    MissingRate {
        chapter: String,
        form: &'static str,
        scenario: Scenario,
    },

    #[error("Module '{module}' has no {field} for scenario '{scenario}'")]
    MissingPercentage {
        module: String,
        field: &'static str,
        scenario: Scenario,
    },

    #[error("Module '{module}' has no use profile '{building_use}'")]
    UnknownUseProfile { module: String, building_use: String },

    #[error("Module '{module}' has no multiplier table '{table}'")]
    MissingMultiplierTable { module: String, table: String },

    #[error("Multiplier table '{table}' of module '{module}' has no key '{key}'")]
    UnknownMultiplierKey {
        module: String,
        table: String,
        key: String,
    },
}

impl From<EstimationError> for DomainError {
    fn from(err: EstimationError) -> Self {
        let code = match &err {
            EstimationError::UnknownModule(_) => ErrorCode::ModuleNotFound,
            EstimationError::MissingRate { .. } | EstimationError::MissingPercentage { .. } => {
                ErrorCode::ScenarioNotFound
            }
            EstimationError::UnknownUseProfile { .. } => ErrorCode::UseProfileNotFound,
            EstimationError::MissingMultiplierTable { .. }
            | EstimationError::UnknownMultiplierKey { .. } => ErrorCode::MultiplierNotFound,
        };
        DomainError::new(code, err.to_string())
    }
}
