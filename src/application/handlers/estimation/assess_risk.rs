//! AssessRiskHandler - Monte Carlo spread and sensitivity for an estimate.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::EstimateProjectResult;
use crate::domain::estimation::Factors;
use crate::domain::foundation::{DomainError, ErrorCode, Scenario};
use crate::domain::risk::{HistogramBin, RiskSimulator, RiskSummary, SensitivityDriver, SensitivityRanking};

/// Number of histogram bins reported by default.
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

/// Command to assess the risk around a total.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessRiskCommand {
    pub base_total: f64,
    pub factors: Factors,
    pub histogram_bins: usize,
}

impl AssessRiskCommand {
    /// Assesses the mid-scenario total of a project estimate.
    pub fn from_estimate(result: &EstimateProjectResult) -> Result<Self, DomainError> {
        let mid = result.estimate(Scenario::Mid).ok_or_else(|| {
            DomainError::new(ErrorCode::ScenarioNotFound, "Estimate has no mid scenario")
        })?;
        Ok(Self {
            base_total: mid.totals.total,
            factors: result.factors,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        })
    }
}

/// Result of a risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessRiskResult {
    pub summary: RiskSummary,
    pub histogram: Vec<HistogramBin>,
    pub drivers: Vec<SensitivityDriver>,
}

/// Handler for risk assessment.
pub struct AssessRiskHandler {
    simulator: RiskSimulator,
}

impl AssessRiskHandler {
    pub fn new(simulator: RiskSimulator) -> Self {
        Self { simulator }
    }

    pub fn handle(&self, cmd: AssessRiskCommand) -> Result<AssessRiskResult, DomainError> {
        let summary = self.simulator.simulate(cmd.base_total, &cmd.factors)?;
        let histogram = summary.histogram(cmd.histogram_bins);
        let drivers = SensitivityRanking::rank(&cmd.factors);

        info!(
            base_total = cmd.base_total,
            sigma = summary.sigma,
            p50 = summary.p50,
            p80 = summary.p80,
            p90 = summary.p90,
            "Risk assessed"
        );

        Ok(AssessRiskResult {
            summary,
            histogram,
            drivers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::sample_catalog;
    use super::super::{EstimateProjectCommand, EstimateProjectHandler};
    use super::*;
    use std::sync::Arc;

    fn project() -> EstimateProjectResult {
        let mut cmd = EstimateProjectCommand::new("obra_nueva_edificio", 1000.0, 200.0);
        cmd.factors.complexity = 1.2;
        EstimateProjectHandler::new(Arc::new(sample_catalog()))
            .handle(cmd)
            .unwrap()
    }

    #[test]
    fn assesses_mid_scenario_total() {
        let project = project();
        let cmd = AssessRiskCommand::from_estimate(&project).unwrap();
        let result = AssessRiskHandler::new(RiskSimulator::new(2_000, Some(11)))
            .handle(cmd.clone())
            .unwrap();

        assert_eq!(result.summary.base_total, cmd.base_total);
        assert!((result.summary.sigma - 0.14).abs() < 1e-12);
        assert_eq!(result.histogram.len(), DEFAULT_HISTOGRAM_BINS);
        assert_eq!(result.drivers[0].factor, "complexity");
        assert!(result.summary.p50 < result.summary.p90);
    }

    #[test]
    fn zero_total_is_rejected() {
        let cmd = AssessRiskCommand {
            base_total: 0.0,
            factors: Factors::default(),
            histogram_bins: 10,
        };
        let err = AssessRiskHandler::new(RiskSimulator::new(100, Some(1)))
            .handle(cmd)
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
