//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `catalog` - Catalog readers (YAML files, in-memory)
//! - `report` - Report exporters (JSON files)

pub mod catalog;
pub mod report;

pub use catalog::{CatalogFiles, InMemoryCatalogReader, YamlCatalogReader};
pub use report::JsonReportExporter;
