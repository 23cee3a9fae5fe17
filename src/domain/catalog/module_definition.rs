//! Module definitions - project types with their chapters and defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ChapterDefinition;
use crate::domain::foundation::ScenarioMap;

/// Name of the module-level use multiplier table.
pub const USE_MULTIPLIERS_TABLE: &str = "use_multipliers";

/// Building-use multipliers for whole-building modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseProfile {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "neutral")]
    pub arch: f64,
    #[serde(default = "neutral")]
    pub mep: f64,
    #[serde(default = "neutral")]
    pub overall: f64,
}

impl UseProfile {
    /// Creates an unlabeled profile.
    pub fn new(arch: f64, mep: f64, overall: f64) -> Self {
        Self {
            label: None,
            arch,
            mep,
            overall,
        }
    }
}

fn neutral() -> f64 {
    1.0
}

/// Which request option selects the module-level multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplierOption {
    InterventionLevel,
    ReformLevel,
    Use,
}

impl MultiplierOption {
    /// Returns the option key as it appears in requests.
    pub fn key(&self) -> &'static str {
        match self {
            MultiplierOption::InterventionLevel => "intervention_level",
            MultiplierOption::ReformLevel => "reform_level",
            MultiplierOption::Use => "use",
        }
    }
}

/// How a module looks up its scalar multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMultiplierRule {
    /// Option holding the lookup key.
    pub option: MultiplierOption,
    /// Multiplier table name in the module defaults (or `use_multipliers`).
    pub table: String,
    /// Key used when the option is absent from the request.
    pub fallback: String,
}

/// Which key selects a module's benchmark row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkLookup {
    /// The selected building use.
    BuildingUse,
    /// The module key itself.
    Module,
}

/// Per-module percentage constants and multiplier tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDefaults {
    pub indirects_pct: ScenarioMap<f64>,
    pub soft_costs_pct: ScenarioMap<f64>,
    pub contingency_pct: ScenarioMap<f64>,
    pub gg_bi_pct: f64,
    /// Module-specific tables such as `intervention_multiplier`.
    #[serde(flatten)]
    pub multiplier_tables: BTreeMap<String, BTreeMap<String, f64>>,
}

/// A project type: ordered chapters plus defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    pub label: String,
    #[serde(default)]
    pub measurement: Option<String>,
    pub chapters: Vec<ChapterDefinition>,
    pub defaults: ModuleDefaults,
    #[serde(default)]
    pub use_profiles: BTreeMap<String, UseProfile>,
    #[serde(default)]
    pub use_multipliers: BTreeMap<String, f64>,
    /// Whole-building modules apply building-use profiles.
    #[serde(default)]
    pub applies_use_profiles: bool,
    #[serde(default)]
    pub module_multiplier: Option<ModuleMultiplierRule>,
    /// Chapter dropped unless furniture is opted in.
    #[serde(default)]
    pub furniture_chapter: Option<String>,
    #[serde(default)]
    pub benchmark_lookup: Option<BenchmarkLookup>,
}

impl ModuleDefinition {
    /// Returns true when chapters use above/below rates.
    ///
    /// Decided by the first chapter; a module with no chapters counts as
    /// single-area.
    pub fn uses_paired_rates(&self) -> bool {
        self.chapters
            .first()
            .map(|c| c.rates.is_paired())
            .unwrap_or(false)
    }

    /// Looks up a multiplier table by name.
    pub fn multiplier_table(&self, name: &str) -> Option<&BTreeMap<String, f64>> {
        self.defaults
            .multiplier_tables
            .get(name)
            .or_else(|| (name == USE_MULTIPLIERS_TABLE).then_some(&self.use_multipliers))
    }

    /// Finds a chapter definition by key.
    pub fn chapter(&self, key: &str) -> Option<&ChapterDefinition> {
        self.chapters.iter().find(|c| c.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ChapterKind;
    use crate::domain::foundation::Scenario;

    const REFORMA_PISO: &str = r#"
label: Reforma de piso
measurement: m² útiles
chapters:
  - key: demoliciones
    label: Demoliciones
    single: { low: 40, mid: 55, high: 70 }
  - key: mep_renov
    label: Instalaciones
    single: { low: 150, mid: 190, high: 240 }
defaults:
  indirects_pct: { low: 0.05, mid: 0.06, high: 0.07 }
  soft_costs_pct: { low: 0.08, mid: 0.10, high: 0.12 }
  contingency_pct: { low: 0.05, mid: 0.08, high: 0.10 }
  gg_bi_pct: 0.19
  level_multiplier: { parcial: 0.7, integral: 1.0, integral_plus: 1.2 }
module_multiplier:
  option: reform_level
  table: level_multiplier
  fallback: integral
"#;

    #[test]
    fn deserializes_module_with_multiplier_tables() {
        let module: ModuleDefinition = serde_yaml::from_str(REFORMA_PISO).unwrap();

        assert_eq!(module.chapters.len(), 2);
        assert_eq!(module.chapters[1].kind, ChapterKind::Mep);
        assert_eq!(module.defaults.gg_bi_pct, 0.19);
        assert_eq!(module.defaults.indirects_pct.value(Scenario::Mid), Some(0.06));

        let table = module.multiplier_table("level_multiplier").unwrap();
        assert_eq!(table.get("integral_plus"), Some(&1.2));
    }

    #[test]
    fn single_rate_module_is_not_paired() {
        let module: ModuleDefinition = serde_yaml::from_str(REFORMA_PISO).unwrap();
        assert!(!module.uses_paired_rates());
        assert!(!module.applies_use_profiles);
    }

    #[test]
    fn rule_deserializes_option_and_fallback() {
        let module: ModuleDefinition = serde_yaml::from_str(REFORMA_PISO).unwrap();
        let rule = module.module_multiplier.unwrap();

        assert_eq!(rule.option, MultiplierOption::ReformLevel);
        assert_eq!(rule.fallback, "integral");
    }

    #[test]
    fn use_multipliers_table_resolves_to_module_level_map() {
        let mut module: ModuleDefinition = serde_yaml::from_str(REFORMA_PISO).unwrap();
        module.use_multipliers.insert("retail".to_string(), 1.1);

        let table = module.multiplier_table(USE_MULTIPLIERS_TABLE).unwrap();
        assert_eq!(table.get("retail"), Some(&1.1));
        assert!(module.multiplier_table("unknown_table").is_none());
    }

    #[test]
    fn use_profile_defaults_missing_multipliers_to_neutral() {
        let profile: UseProfile = serde_yaml::from_str("label: Hotel\narch: 1.1\n").unwrap();
        assert_eq!(profile.arch, 1.1);
        assert_eq!(profile.mep, 1.0);
        assert_eq!(profile.overall, 1.0);
    }
}
