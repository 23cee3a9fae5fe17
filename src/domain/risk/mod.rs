//! Risk Module - uncertainty around an estimate.
//!
//! - `RiskSimulator` - Monte Carlo lognormal spread and percentiles
//! - `SensitivityRanking` - factors ordered by distance from neutral
//!
//! Unlike the estimation engine these results are randomized unless seeded.

mod monte_carlo;
mod sensitivity;

pub use monte_carlo::{HistogramBin, RiskError, RiskSimulator, RiskSummary, BASE_SIGMA, MAX_SIGMA};
pub use sensitivity::{SensitivityDriver, SensitivityRanking};
