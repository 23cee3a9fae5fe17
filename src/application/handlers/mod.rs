//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod estimation;

pub use estimation::{
    AssessRiskCommand, AssessRiskHandler, AssessRiskResult, EstimateProjectCommand,
    EstimateProjectHandler, EstimateProjectResult, ExportReportCommand, ExportReportHandler,
    ExportReportResult, DEFAULT_HISTOGRAM_BINS,
};
