//! Factor Model - independent multiplicative adjustment factors.

use serde::{Deserialize, Serialize};

/// Nine scalar multipliers, each neutral at 1.0.
///
/// Ranges are not validated here; the input layer constrains them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Factors {
    pub complexity: f64,
    pub height: f64,
    pub location: f64,
    pub mep_intensity: f64,
    pub finishes: f64,
    pub certification: f64,
    pub schedule: f64,
    pub prior_condition: f64,
    /// Price-index update (e.g. construction cost index), set manually.
    pub temporal_index: f64,
}

impl Factors {
    /// All factors at 1.0.
    pub const NEUTRAL: Factors = Factors {
        complexity: 1.0,
        height: 1.0,
        location: 1.0,
        mep_intensity: 1.0,
        finishes: 1.0,
        certification: 1.0,
        schedule: 1.0,
        prior_condition: 1.0,
        temporal_index: 1.0,
    };

    /// Product of all nine factors.
    pub fn combined(&self) -> f64 {
        self.complexity
            * self.height
            * self.location
            * self.mep_intensity
            * self.finishes
            * self.certification
            * self.schedule
            * self.prior_condition
            * self.temporal_index
    }

    /// Returns a copy with the location factor scaled by a city factor.
    pub fn with_location_factor(self, city_factor: f64) -> Self {
        Self {
            location: self.location * city_factor,
            ..self
        }
    }
}

impl Default for Factors {
    fn default() -> Self {
        Self::NEUTRAL
    }
}
