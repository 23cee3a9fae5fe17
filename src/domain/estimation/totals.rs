//! Totals Aggregator - indirects, GG+BI, soft costs, contingency and total.

use serde::{Deserialize, Serialize};

use super::{CalibrationOutcome, ChapterTable, EstimateOptions, EstimationError, UseMultipliers};
use crate::domain::catalog::ModuleDefaults;
use crate::domain::foundation::{Scenario, ScenarioMap};

/// Caller-supplied percentage overrides. `None` means use the scenario default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PercentOverrides {
    pub soft_costs: Option<f64>,
    pub contingency: Option<f64>,
}

impl From<&EstimateOptions> for PercentOverrides {
    fn from(options: &EstimateOptions) -> Self {
        Self {
            soft_costs: options.soft_items_pct,
            contingency: options.cont_items_pct,
        }
    }
}

/// Percentages in effect for one scenario, resolved once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostShares {
    pub indirects: f64,
    pub gg_bi: f64,
    pub soft_costs: f64,
    pub soft_costs_default: f64,
    pub contingency: f64,
    pub contingency_default: f64,
}

impl CostShares {
    /// Resolves scenario defaults and applies overrides.
    ///
    /// # Errors
    /// `MissingPercentage` if a default is not defined for the scenario.
    pub fn resolve(
        module_key: &str,
        defaults: &ModuleDefaults,
        scenario: Scenario,
        overrides: PercentOverrides,
    ) -> Result<Self, EstimationError> {
        let lookup = |field: &'static str, map: &ScenarioMap<f64>| {
            map.value(scenario).ok_or_else(|| EstimationError::MissingPercentage {
                module: module_key.to_string(),
                field,
                scenario,
            })
        };

        let indirects = lookup("indirects_pct", &defaults.indirects_pct)?;
        let soft_costs_default = lookup("soft_costs_pct", &defaults.soft_costs_pct)?;
        let contingency_default = lookup("contingency_pct", &defaults.contingency_pct)?;

        Ok(Self {
            indirects,
            gg_bi: defaults.gg_bi_pct,
            soft_costs: overrides.soft_costs.unwrap_or(soft_costs_default),
            soft_costs_default,
            contingency: overrides.contingency.unwrap_or(contingency_default),
            contingency_default,
        })
    }
}

/// Multipliers echoed in the totals for audit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierEcho {
    pub calibration: f64,
    pub use_multipliers: UseMultipliers,
    pub module: f64,
}

impl MultiplierEcho {
    /// Builds the echo from the stage outputs of a run.
    pub fn new(calibration: &CalibrationOutcome, use_multipliers: UseMultipliers, module: f64) -> Self {
        Self {
            calibration: calibration.factor,
            use_multipliers,
            module,
        }
    }
}

impl Default for MultiplierEcho {
    fn default() -> Self {
        Self {
            calibration: 1.0,
            use_multipliers: UseMultipliers::NEUTRAL,
            module: 1.0,
        }
    }
}

/// Rolled-up costs for one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalsRecord {
    pub direct: f64,
    pub indirects: f64,
    pub gg_bi: f64,
    pub soft_costs: f64,
    pub soft_pct_used: f64,
    pub soft_pct_default: f64,
    pub contingency: f64,
    pub cont_pct_used: f64,
    pub cont_pct_default: f64,
    pub total: f64,
    pub calibration: f64,
    pub use_arch: f64,
    pub use_mep: f64,
    pub use_overall: f64,
    pub module_mult: f64,
}

impl TotalsRecord {
    /// Sum of the five cost components.
    pub fn components_sum(&self) -> f64 {
        self.direct + self.indirects + self.gg_bi + self.soft_costs + self.contingency
    }
}

/// Derives totals from a chapter table. No clamping: negative inputs
/// propagate as-is.
pub struct TotalsAggregator;

impl TotalsAggregator {
    /// Aggregates a table with resolved shares.
    pub fn aggregate(table: &ChapterTable, shares: &CostShares, echo: &MultiplierEcho) -> TotalsRecord {
        let direct = table.direct_total();
        let indirects = direct * shares.indirects;
        let gg_bi = direct * shares.gg_bi;
        let soft_costs = direct * shares.soft_costs;
        let contingency = direct * shares.contingency;

        TotalsRecord {
            direct,
            indirects,
            gg_bi,
            soft_costs,
            soft_pct_used: shares.soft_costs,
            soft_pct_default: shares.soft_costs_default,
            contingency,
            cont_pct_used: shares.contingency,
            cont_pct_default: shares.contingency_default,
            total: direct + indirects + gg_bi + soft_costs + contingency,
            calibration: echo.calibration,
            use_arch: echo.use_multipliers.arch,
            use_mep: echo.use_multipliers.mep,
            use_overall: echo.use_multipliers.overall,
            module_mult: echo.module,
        }
    }
}
