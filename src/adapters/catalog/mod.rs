//! Catalog Adapters
//!
//! Implementations of the CatalogReader port.
//!
//! - **YamlCatalogReader** - Reads YAML tables from a data directory
//! - **InMemoryCatalogReader** - Serves a prebuilt catalog (testing/embedding)

mod in_memory_catalog_reader;
mod yaml_catalog_reader;

pub use in_memory_catalog_reader::InMemoryCatalogReader;
pub use yaml_catalog_reader::{CatalogFiles, YamlCatalogReader};
