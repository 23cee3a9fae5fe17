//! Benchmark Calibrator - rescales direct cost to a top-down €/area ratio.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChapterTable, SourceMode};
use crate::domain::catalog::{BenchmarkRow, ModuleDefinition};
use crate::domain::foundation::Scenario;

/// What the calibrator did for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationOutcome {
    /// Multiplier applied to every row; 1.0 when skipped.
    pub factor: f64,
    pub applied: bool,
    /// Benchmark rate times reference area, when a rate was available.
    pub target_direct: Option<f64>,
}

impl CalibrationOutcome {
    /// No calibration.
    pub const SKIPPED: CalibrationOutcome = CalibrationOutcome {
        factor: 1.0,
        applied: false,
        target_direct: None,
    };
}

/// Optional top-down calibration stage.
pub struct BenchmarkCalibrator;

impl BenchmarkCalibrator {
    /// Area the benchmark ratio applies to.
    ///
    /// Total built area for paired-rate modules, above-ground area otherwise.
    pub fn reference_area(module: &ModuleDefinition, area_above: f64, area_below: f64) -> f64 {
        if module.uses_paired_rates() {
            area_above + area_below
        } else {
            area_above
        }
    }

    /// Rescales all rows so the direct total equals `rate * reference_area`.
    ///
    /// # Edge Cases
    /// - Not requested, no benchmark row, or no rate for the scenario: skipped
    /// - Reference area <= 0 or current direct <= 0: skipped, factor 1.0
    ///
    /// Every returned row records the factor used, including 1.0.
    pub fn calibrate(
        table: &ChapterTable,
        benchmark: Option<&BenchmarkRow>,
        scenario: Scenario,
        reference_area: f64,
        requested: bool,
    ) -> (ChapterTable, CalibrationOutcome) {
        let rate = benchmark
            .filter(|_| requested)
            .and_then(|row| row.rate(scenario));

        let outcome = match rate {
            None => CalibrationOutcome::SKIPPED,
            Some(rate) => {
                let current = table.direct_total();
                let target = rate * reference_area;
                if reference_area > 0.0 && current > 0.0 {
                    CalibrationOutcome {
                        factor: target / current,
                        applied: true,
                        target_direct: Some(target),
                    }
                } else {
                    debug!(
                        reference_area,
                        current_direct = current,
                        "Calibration skipped for degenerate input"
                    );
                    CalibrationOutcome {
                        target_direct: Some(target),
                        ..CalibrationOutcome::SKIPPED
                    }
                }
            }
        };

        let calibrated = table.map_rows(|row| {
            let mut scaled = if outcome.applied {
                let mut r = row.scaled(outcome.factor);
                r.source_mode = SourceMode::CalibratedToBenchmark;
                r
            } else {
                row.clone()
            };
            scaled.factor_calibration = outcome.factor;
            scaled
        });

        (calibrated, outcome)
    }
}
