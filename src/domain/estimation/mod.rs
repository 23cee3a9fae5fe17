//! Estimation Module - Pure domain services for CAPEX estimation.
//!
//! Bottom-up per-chapter costs, building-use and module multipliers,
//! optional top-down benchmark calibration, and totals per scenario.
//!
//! # Components
//!
//! - `Factors` - Nine independent multipliers and their product
//! - `ChapterTableBuilder` - Per-chapter direct cost rows
//! - `MultiplierApplier` - Building-use, module and global multipliers
//! - `BenchmarkCalibrator` - Linear rescale to a €/area benchmark
//! - `TotalsAggregator` - Indirects, GG+BI, soft costs, contingency, total
//! - `totals_table` - Scenario comparison rows
//! - `EstimationEngine` - The full pipeline for one module and scenario
//!
//! All functions are pure and stateless; each stage returns a new table.

mod calibration;
mod chapter_table;
mod engine;
mod errors;
mod factors;
mod multipliers;
mod options;
mod scenario_table;
mod totals;

pub use calibration::{BenchmarkCalibrator, CalibrationOutcome};
pub use chapter_table::{ChapterCostRow, ChapterTable, ChapterTableBuilder, LabelCost, SourceMode};
pub use engine::{Estimate, EstimateInput, EstimationEngine};
pub use errors::EstimationError;
pub use factors::Factors;
pub use multipliers::{MultiplierApplier, UseMultipliers};
pub use options::EstimateOptions;
pub use scenario_table::{totals_table, ScenarioTotalsRow};
pub use totals::{CostShares, MultiplierEcho, PercentOverrides, TotalsAggregator, TotalsRecord};
