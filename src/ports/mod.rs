//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CatalogReader` - Loads module definitions and reference tables
//! - `ReportExporter` - Persists finished estimate reports

mod catalog_reader;
mod report_exporter;

pub use catalog_reader::{CatalogError, CatalogReader};
pub use report_exporter::{ExportError, ReportExporter};
