//! Scenario Totals Table - side-by-side comparison of scenario totals.

use serde::{Deserialize, Serialize};

use super::TotalsRecord;
use crate::domain::foundation::Scenario;

/// One scenario's totals with a per-area ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTotalsRow {
    pub scenario: Scenario,
    pub label: String,
    pub total_eur: f64,
    /// Total per reference area; NaN when the area is not positive.
    pub eur_m2: f64,
    pub direct_eur: f64,
    pub indirects_eur: f64,
    pub gg_bi_eur: f64,
    pub soft_costs_eur: f64,
    pub contingency_eur: f64,
    pub calib_factor: f64,
}

/// Projects scenario totals into comparison rows, in the order supplied.
pub fn totals_table<'a, I>(totals_by_scenario: I, area_ref: f64) -> Vec<ScenarioTotalsRow>
where
    I: IntoIterator<Item = (&'a Scenario, &'a TotalsRecord)>,
{
    totals_by_scenario
        .into_iter()
        .map(|(scenario, totals)| ScenarioTotalsRow {
            scenario: *scenario,
            label: scenario.label().to_string(),
            total_eur: totals.total,
            eur_m2: if area_ref > 0.0 {
                totals.total / area_ref
            } else {
                f64::NAN
            },
            direct_eur: totals.direct,
            indirects_eur: totals.indirects,
            gg_bi_eur: totals.gg_bi,
            soft_costs_eur: totals.soft_costs,
            contingency_eur: totals.contingency,
            calib_factor: totals.calibration,
        })
        .collect()
}
