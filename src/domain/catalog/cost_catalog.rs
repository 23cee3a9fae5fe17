//! The loaded reference data an estimation run reads from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{BenchmarkTable, CityFactor, CostItemBreakdown, ModuleDefinition, SourceRecord};

/// Module definitions keyed by module identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleCatalog {
    pub modules: BTreeMap<String, ModuleDefinition>,
}

impl ModuleCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module definition, returning the catalog.
    pub fn with_module(mut self, key: impl Into<String>, module: ModuleDefinition) -> Self {
        self.modules.insert(key.into(), module);
        self
    }

    /// Looks up a module by key.
    pub fn get(&self, key: &str) -> Option<&ModuleDefinition> {
        self.modules.get(key)
    }

    /// Returns the module keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }
}

/// Everything the engine and the reporting side need, materialized in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostCatalog {
    pub modules: ModuleCatalog,
    pub benchmarks: BenchmarkTable,
    pub sources: Vec<SourceRecord>,
    pub cities: Vec<CityFactor>,
    pub soft_cost_items: CostItemBreakdown,
    pub contingency_items: CostItemBreakdown,
}

impl CostCatalog {
    /// Creates a catalog with only module definitions.
    pub fn from_modules(modules: ModuleCatalog) -> Self {
        Self {
            modules,
            ..Self::default()
        }
    }

    /// Looks up a city's location factor (case-insensitive).
    pub fn city_factor(&self, city: &str) -> Option<f64> {
        self.cities
            .iter()
            .find(|c| c.city.eq_ignore_ascii_case(city.trim()))
            .map(|c| c.location_factor)
    }
}
