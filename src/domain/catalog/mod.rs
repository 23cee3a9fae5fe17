//! Catalog Module - Reference data consumed by the estimation engine.
//!
//! Module definitions, benchmarks, provenance sources, city factors and
//! cost-item breakdowns. Everything here is immutable for the duration of an
//! estimation run and is passed to the engine explicitly.

mod benchmark;
mod chapter;
mod cost_catalog;
mod module_definition;
mod reference_tables;

pub use benchmark::{BenchmarkRow, BenchmarkTable};
pub use chapter::{ChapterBasis, ChapterDefinition, ChapterKind, RateForm};
pub use cost_catalog::{CostCatalog, ModuleCatalog};
pub use module_definition::{
    BenchmarkLookup, ModuleDefaults, ModuleDefinition, ModuleMultiplierRule, MultiplierOption,
    UseProfile, USE_MULTIPLIERS_TABLE,
};
pub use reference_tables::{CityFactor, CostItem, CostItemBreakdown, SourceRecord};
