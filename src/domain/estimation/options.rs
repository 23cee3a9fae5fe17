//! Estimation options selected per request.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::MultiplierOption;

/// Options recognized by the engine. Unknown keys are ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateOptions {
    pub building_use: Option<String>,
    pub intervention_level: Option<String>,
    pub reform_level: Option<String>,
    #[serde(rename = "use")]
    pub use_key: Option<String>,
    pub include_furniture: bool,
    /// Soft-cost fraction overriding the scenario default.
    pub soft_items_pct: Option<f64>,
    /// Contingency fraction overriding the scenario default.
    pub cont_items_pct: Option<f64>,
}

impl EstimateOptions {
    /// Returns the value of the option selecting a module multiplier.
    pub fn multiplier_key(&self, option: MultiplierOption) -> Option<&str> {
        match option {
            MultiplierOption::InterventionLevel => self.intervention_level.as_deref(),
            MultiplierOption::ReformLevel => self.reform_level.as_deref(),
            MultiplierOption::Use => self.use_key.as_deref(),
        }
    }
}
