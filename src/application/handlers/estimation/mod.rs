//! Estimation handlers.
//!
//! Orchestrate a project estimate across scenarios, its risk overlay and
//! report export.

mod assess_risk;
mod estimate_project;
mod export_report;

#[cfg(test)]
mod fixtures;

pub use assess_risk::{AssessRiskCommand, AssessRiskHandler, AssessRiskResult, DEFAULT_HISTOGRAM_BINS};
pub use estimate_project::{EstimateProjectCommand, EstimateProjectHandler, EstimateProjectResult};
pub use export_report::{ExportReportCommand, ExportReportHandler, ExportReportResult};
