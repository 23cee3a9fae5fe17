//! Report Module - the serializable snapshot a renderer consumes.

mod estimate_report;

pub use estimate_report::{EstimateReport, ReportAreas};
