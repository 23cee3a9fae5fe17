//! In-Memory Catalog Reader Adapter
//!
//! Serves a prebuilt catalog. Useful for testing and embedding.

use crate::domain::catalog::CostCatalog;
use crate::ports::{CatalogError, CatalogReader};

/// Catalog reader over an owned catalog
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogReader {
    catalog: CostCatalog,
}

impl InMemoryCatalogReader {
    /// Create a reader that always returns `catalog`
    pub fn new(catalog: CostCatalog) -> Self {
        Self { catalog }
    }
}

impl CatalogReader for InMemoryCatalogReader {
    fn load_catalog(&self) -> Result<CostCatalog, CatalogError> {
        Ok(self.catalog.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CityFactor;

    #[test]
    fn returns_the_catalog_it_was_built_with() {
        let catalog = CostCatalog {
            cities: vec![CityFactor {
                city: "Bilbao".to_string(),
                location_factor: 1.03,
            }],
            ..CostCatalog::default()
        };
        let reader = InMemoryCatalogReader::new(catalog.clone());

        assert_eq!(reader.load_catalog().unwrap(), catalog);
    }
}
