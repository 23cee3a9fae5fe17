//! Monte Carlo risk overlay - lognormal spread around a base total.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::estimation::Factors;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Upper bound on the lognormal sigma.
pub const MAX_SIGMA: f64 = 0.35;

/// Sigma with all factors neutral.
pub const BASE_SIGMA: f64 = 0.12;

/// Errors from the risk sampler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    #[error("Base total must be positive, got {0}")]
    NonPositiveBase(f64),

    #[error("At least one iteration is required")]
    NoIterations,
}

impl From<RiskError> for DomainError {
    fn from(err: RiskError) -> Self {
        DomainError::new(ErrorCode::ValidationFailed, err.to_string())
    }
}

/// Percentiles of the simulated total cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub base_total: f64,
    pub sigma: f64,
    pub p50: f64,
    pub p80: f64,
    pub p90: f64,
    pub samples: Vec<f64>,
}

/// One histogram bucket of simulated totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl RiskSummary {
    /// Buckets the samples into `bins` equal-width bins.
    ///
    /// The last bin is closed on the right; all samples fall in a bin.
    pub fn histogram(&self, bins: usize) -> Vec<HistogramBin> {
        if bins == 0 || self.samples.is_empty() {
            return Vec::new();
        }
        let min = self.samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let width = (max - min) / bins as f64;

        let mut histogram: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                lower: min + width * i as f64,
                upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
                count: 0,
            })
            .collect();

        for sample in &self.samples {
            let index = if width > 0.0 {
                (((sample - min) / width) as usize).min(bins - 1)
            } else {
                0
            };
            histogram[index].count += 1;
        }
        histogram
    }
}

/// Lognormal sampler for the total cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskSimulator {
    iterations: usize,
    seed: Option<u64>,
}

impl RiskSimulator {
    /// Creates a simulator; a seed makes runs reproducible.
    pub fn new(iterations: usize, seed: Option<u64>) -> Self {
        Self { iterations, seed }
    }

    /// Sigma grows with complexity and prior-condition factors, capped at
    /// `MAX_SIGMA` and never negative.
    pub fn sigma_for(factors: &Factors) -> f64 {
        let sigma = BASE_SIGMA
            + 0.10 * (factors.complexity - 1.0)
            + 0.15 * (factors.prior_condition - 1.0);
        sigma.clamp(0.0, MAX_SIGMA)
    }

    /// Draws lognormal totals whose mean equals `base_total`.
    ///
    /// # Errors
    /// `NonPositiveBase` if the base total is not positive, `NoIterations`
    /// if the simulator was configured with zero iterations.
    pub fn simulate(&self, base_total: f64, factors: &Factors) -> Result<RiskSummary, RiskError> {
        if base_total <= 0.0 || base_total.is_nan() {
            return Err(RiskError::NonPositiveBase(base_total));
        }
        if self.iterations == 0 {
            return Err(RiskError::NoIterations);
        }

        let sigma = Self::sigma_for(factors);
        let mu = base_total.ln() - 0.5 * sigma * sigma;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let samples: Vec<f64> = (0..self.iterations)
            .map(|_| (mu + sigma * standard_normal(&mut rng)).exp())
            .collect();

        let mut sorted = samples.clone();
        sorted.sort_by(f64::total_cmp);

        Ok(RiskSummary {
            base_total,
            sigma,
            p50: percentile(&sorted, 50.0),
            p80: percentile(&sorted, 80.0),
            p90: percentile(&sorted, 90.0),
            samples,
        })
    }
}

/// Standard normal draw (Box-Muller).
fn standard_normal(rng: &mut impl Rng) -> f64 {
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Linear-interpolated percentile of sorted values.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
