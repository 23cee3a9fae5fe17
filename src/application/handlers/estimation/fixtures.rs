//! Shared catalog for handler tests.

use std::collections::BTreeMap;

use crate::domain::catalog::{
    BenchmarkLookup, BenchmarkRow, BenchmarkTable, ChapterBasis, ChapterDefinition, CityFactor,
    CostCatalog, CostItem, CostItemBreakdown, ModuleCatalog, ModuleDefaults, ModuleDefinition,
    ModuleMultiplierRule, MultiplierOption, SourceRecord, UseProfile,
};
use crate::domain::foundation::ScenarioMap;

fn defaults() -> ModuleDefaults {
    ModuleDefaults {
        indirects_pct: ScenarioMap::from_values(0.08, 0.10, 0.12),
        soft_costs_pct: ScenarioMap::from_values(0.06, 0.08, 0.10),
        contingency_pct: ScenarioMap::from_values(0.05, 0.07, 0.09),
        gg_bi_pct: 0.05,
        multiplier_tables: BTreeMap::new(),
    }
}

fn building_module() -> ModuleDefinition {
    ModuleDefinition {
        label: "Obra nueva edificio".to_string(),
        measurement: Some("m² construidos".to_string()),
        chapters: vec![
            ChapterDefinition::paired(
                "estructura",
                "Estructura",
                ScenarioMap::from_values(400.0, 500.0, 650.0),
                ScenarioMap::from_values(250.0, 300.0, 380.0),
            ),
            ChapterDefinition::paired(
                "urbanizacion",
                "Urbanización",
                ScenarioMap::from_values(10.0, 20.0, 30.0),
                ScenarioMap::uniform(0.0),
            )
            .with_basis(ChapterBasis::Optional),
        ],
        defaults: defaults(),
        use_profiles: BTreeMap::from([
            ("hotel".to_string(), UseProfile::new(1.1, 1.3, 1.05)),
            ("residencial".to_string(), UseProfile::new(1.0, 1.0, 1.0)),
        ]),
        use_multipliers: BTreeMap::new(),
        applies_use_profiles: true,
        module_multiplier: None,
        furniture_chapter: None,
        benchmark_lookup: Some(BenchmarkLookup::BuildingUse),
    }
}

fn fitout_module() -> ModuleDefinition {
    let mut defaults = defaults();
    defaults.multiplier_tables.insert(
        "intervention_multiplier".to_string(),
        BTreeMap::from([("ligera".to_string(), 0.8), ("media".to_string(), 1.0)]),
    );

    ModuleDefinition {
        label: "Fit-out oficinas".to_string(),
        measurement: Some("m² útiles".to_string()),
        chapters: vec![
            ChapterDefinition::single("particiones", "Particiones", ScenarioMap::uniform(100.0)),
            ChapterDefinition::single("mep_interiores", "Instalaciones", ScenarioMap::uniform(200.0)),
        ],
        defaults,
        use_profiles: BTreeMap::new(),
        use_multipliers: BTreeMap::new(),
        applies_use_profiles: false,
        module_multiplier: Some(ModuleMultiplierRule {
            option: MultiplierOption::InterventionLevel,
            table: "intervention_multiplier".to_string(),
            fallback: "media".to_string(),
        }),
        furniture_chapter: None,
        benchmark_lookup: Some(BenchmarkLookup::Module),
    }
}

/// Two modules, benchmarks (one city-specific), two cities, item breakdowns.
pub(super) fn sample_catalog() -> CostCatalog {
    CostCatalog {
        modules: ModuleCatalog::new()
            .with_module("obra_nueva_edificio", building_module())
            .with_module("fitout_oficinas", fitout_module()),
        benchmarks: BenchmarkTable::new(vec![
            BenchmarkRow::new("residencial", "Residencial", 600.0, 700.0, 900.0),
            BenchmarkRow::new("fitout_oficinas", "Fit-out oficinas", 300.0, 400.0, 500.0),
            BenchmarkRow::new("fitout_oficinas_barcelona", "Fit-out Barcelona", 350.0, 450.0, 550.0),
        ]),
        sources: vec![SourceRecord {
            source: "Base de precios".to_string(),
            kind: "publica".to_string(),
            consulted_on: None,
            link: None,
        }],
        cities: vec![
            CityFactor {
                city: "Madrid".to_string(),
                location_factor: 1.0,
            },
            CityFactor {
                city: "Barcelona".to_string(),
                location_factor: 1.1,
            },
        ],
        soft_cost_items: CostItemBreakdown::default(),
        contingency_items: CostItemBreakdown::default(),
    }
}

/// Sample catalog with soft-cost and contingency item breakdowns.
pub(super) fn catalog_with_items() -> CostCatalog {
    CostCatalog {
        soft_cost_items: CostItemBreakdown::new(vec![
            CostItem::new("Honorarios", 7.0),
            CostItem::new("Licencias", 3.0),
        ]),
        contingency_items: CostItemBreakdown::new(vec![CostItem::new("Imprevistos", 4.0)]),
        ..sample_catalog()
    }
}
