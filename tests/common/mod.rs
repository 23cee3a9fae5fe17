//! Synthetic module definitions shared by the integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use capex_estimator::domain::catalog::{
    ChapterBasis, ChapterDefinition, ModuleCatalog, ModuleDefaults, ModuleDefinition,
};
use capex_estimator::domain::foundation::ScenarioMap;

pub fn defaults() -> ModuleDefaults {
    ModuleDefaults {
        indirects_pct: ScenarioMap::from_values(0.08, 0.10, 0.12),
        soft_costs_pct: ScenarioMap::from_values(0.06, 0.08, 0.10),
        contingency_pct: ScenarioMap::from_values(0.05, 0.07, 0.09),
        gg_bi_pct: 0.05,
        multiplier_tables: BTreeMap::new(),
    }
}

fn module(chapters: Vec<ChapterDefinition>) -> ModuleDefinition {
    ModuleDefinition {
        label: "Sintético".to_string(),
        measurement: None,
        chapters,
        defaults: defaults(),
        use_profiles: BTreeMap::new(),
        use_multipliers: BTreeMap::new(),
        applies_use_profiles: false,
        module_multiplier: None,
        furniture_chapter: None,
        benchmark_lookup: None,
    }
}

/// One paired-rate chapter: 400/500/650 above, 250/300/380 below.
pub fn single_chapter_building() -> ModuleDefinition {
    module(vec![ChapterDefinition::paired(
        "estructura",
        "Estructura",
        ScenarioMap::from_values(400.0, 500.0, 650.0),
        ScenarioMap::from_values(250.0, 300.0, 380.0),
    )])
}

/// Several paired chapters of every kind, one optional.
pub fn mixed_building() -> ModuleDefinition {
    let paired = |key: &str, above: f64, below: f64| {
        ChapterDefinition::paired(
            key,
            key,
            ScenarioMap::from_values(above * 0.8, above, above * 1.3),
            ScenarioMap::from_values(below * 0.8, below, below * 1.3),
        )
    };
    module(vec![
        paired("estructura", 200.0, 240.0),
        paired("acabados", 130.0, 20.0),
        paired("mep_clima", 90.0, 30.0),
        paired("mep_electricidad", 60.0, 25.0),
        paired("urbanizacion", 20.0, 0.0).with_basis(ChapterBasis::Optional),
    ])
}

pub fn catalog() -> ModuleCatalog {
    ModuleCatalog::new()
        .with_module("edificio", single_chapter_building())
        .with_module("mixto", mixed_building())
}
