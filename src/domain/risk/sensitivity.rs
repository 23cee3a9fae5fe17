//! Sensitivity drivers - which factors move the estimate the most.

use serde::{Deserialize, Serialize};

use crate::domain::estimation::Factors;

/// One factor and its deviation from neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityDriver {
    pub factor: String,
    pub value: f64,
    pub deviation: f64,
}

/// Ranks the factor model by distance from 1.0.
pub struct SensitivityRanking;

impl SensitivityRanking {
    /// Factors sorted by |value - 1| descending.
    ///
    /// Ties keep the factor model's declaration order.
    pub fn rank(factors: &Factors) -> Vec<SensitivityDriver> {
        let named = [
            ("complexity", factors.complexity),
            ("height", factors.height),
            ("location", factors.location),
            ("mep_intensity", factors.mep_intensity),
            ("finishes", factors.finishes),
            ("certification", factors.certification),
            ("schedule", factors.schedule),
            ("prior_condition", factors.prior_condition),
            ("temporal_index", factors.temporal_index),
        ];

        let mut drivers: Vec<SensitivityDriver> = named
            .into_iter()
            .map(|(name, value)| SensitivityDriver {
                factor: name.to_string(),
                value,
                deviation: (value - 1.0).abs(),
            })
            .collect();
        drivers.sort_by(|a, b| b.deviation.total_cmp(&a.deviation));
        drivers
    }
}
