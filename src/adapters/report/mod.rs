//! Report Adapters
//!
//! - **JsonReportExporter** - Writes reports as pretty JSON files

mod json_report_exporter;

pub use json_report_exporter::JsonReportExporter;
