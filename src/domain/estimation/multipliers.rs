//! Use / Intervention Multiplier Applier and the global factor stage.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChapterTable, EstimateOptions, EstimationError};
use crate::domain::catalog::{ChapterKind, ModuleDefinition, MultiplierOption, UseProfile};

/// Building-use multipliers in effect for a run, echoed for audit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UseMultipliers {
    pub arch: f64,
    pub mep: f64,
    pub overall: f64,
}

impl UseMultipliers {
    /// No adjustment.
    pub const NEUTRAL: UseMultipliers = UseMultipliers {
        arch: 1.0,
        mep: 1.0,
        overall: 1.0,
    };

    /// Multiplier for a chapter of the given kind.
    ///
    /// MEP chapters take the MEP multiplier, everything else the
    /// architecture one; the overall multiplier applies to all.
    pub fn factor_for(&self, kind: ChapterKind) -> f64 {
        let class = if kind.is_mep() { self.mep } else { self.arch };
        class * self.overall
    }
}

impl Default for UseMultipliers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl From<&UseProfile> for UseMultipliers {
    fn from(profile: &UseProfile) -> Self {
        Self {
            arch: profile.arch,
            mep: profile.mep,
            overall: profile.overall,
        }
    }
}

/// Multiplier stages applied after the chapter table is built.
pub struct MultiplierApplier;

impl MultiplierApplier {
    /// Resolves the building-use profile for a run.
    ///
    /// # Edge Cases
    /// - Module does not apply use profiles, or has none: neutral
    /// - No building use selected: neutral
    ///
    /// # Errors
    /// `UnknownUseProfile` if a use is selected that the module's profiles
    /// do not define. An unrecognized use is never treated as neutral,
    /// unlike an absent one.
    pub fn resolve_use_profile(
        module_key: &str,
        module: &ModuleDefinition,
        building_use: Option<&str>,
    ) -> Result<UseMultipliers, EstimationError> {
        if !module.applies_use_profiles || module.use_profiles.is_empty() {
            return Ok(UseMultipliers::NEUTRAL);
        }
        let Some(building_use) = building_use else {
            return Ok(UseMultipliers::NEUTRAL);
        };

        module
            .use_profiles
            .get(building_use)
            .map(UseMultipliers::from)
            .ok_or_else(|| EstimationError::UnknownUseProfile {
                module: module_key.to_string(),
                building_use: building_use.to_string(),
            })
    }

    /// Applies use multipliers per chapter kind.
    pub fn apply_use_profile(table: &ChapterTable, multipliers: &UseMultipliers) -> ChapterTable {
        table.map_rows(|row| {
            let factor = multipliers.factor_for(row.kind);
            let mut scaled = row.scaled(factor);
            scaled.factor_use = factor;
            scaled
        })
    }

    /// Resolves the module-level scalar multiplier.
    ///
    /// The lookup key is the request option named by the module's rule, or
    /// the rule's fallback when absent. Modules without a rule use 1.0.
    ///
    /// # Errors
    /// For level-based options, a missing table or key is a configuration
    /// error. Use-based lookups fall back to 1.0.
    pub fn resolve_module_multiplier(
        module_key: &str,
        module: &ModuleDefinition,
        options: &EstimateOptions,
    ) -> Result<f64, EstimationError> {
        let Some(rule) = &module.module_multiplier else {
            return Ok(1.0);
        };

        let key = options
            .multiplier_key(rule.option)
            .unwrap_or(rule.fallback.as_str());
        let value = module
            .multiplier_table(&rule.table)
            .and_then(|table| table.get(key))
            .copied();

        match (value, rule.option) {
            (Some(value), _) => Ok(value),
            (None, MultiplierOption::Use) => {
                debug!(module = module_key, key, "No use multiplier, using 1.0");
                Ok(1.0)
            }
            (None, _) => match module.multiplier_table(&rule.table) {
                None => Err(EstimationError::MissingMultiplierTable {
                    module: module_key.to_string(),
                    table: rule.table.clone(),
                }),
                Some(_) => Err(EstimationError::UnknownMultiplierKey {
                    module: module_key.to_string(),
                    table: rule.table.clone(),
                    key: key.to_string(),
                }),
            },
        }
    }

    /// Applies the combined factor model times the module multiplier to
    /// every row, recording both on the row.
    pub fn apply_global(table: &ChapterTable, combined_factors: f64, module_multiplier: f64) -> ChapterTable {
        let global = combined_factors * module_multiplier;
        table.map_rows(|row| {
            let mut scaled = row.scaled(global);
            scaled.factor_global = global;
            scaled.factor_module = module_multiplier;
            scaled
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{
        ChapterDefinition, ModuleDefaults, ModuleMultiplierRule, USE_MULTIPLIERS_TABLE,
    };
    use crate::domain::estimation::ChapterTableBuilder;
    use crate::domain::foundation::{Scenario, ScenarioMap};
    use std::collections::BTreeMap;

    fn module() -> ModuleDefinition {
        let rate = |mid: f64| ScenarioMap::from_values(mid, mid, mid);
        let mut tables = BTreeMap::new();
        tables.insert(
            "intervention_multiplier".to_string(),
            BTreeMap::from([
                ("ligero".to_string(), 0.8),
                ("medio".to_string(), 1.0),
                ("intensivo".to_string(), 1.25),
            ]),
        );
        let mut profiles = BTreeMap::new();
        profiles.insert("hotel".to_string(), UseProfile::new(1.2, 1.5, 1.1));

        ModuleDefinition {
            label: "Reposicionamiento".to_string(),
            measurement: None,
            chapters: vec![
                ChapterDefinition::single("estructura", "Estructura", rate(100.0)),
                ChapterDefinition::single("mep_clima", "Climatización", rate(50.0)),
            ],
            defaults: ModuleDefaults {
                indirects_pct: ScenarioMap::uniform(0.1),
                soft_costs_pct: ScenarioMap::uniform(0.08),
                contingency_pct: ScenarioMap::uniform(0.07),
                gg_bi_pct: 0.05,
                multiplier_tables: tables,
            },
            use_profiles: profiles,
            use_multipliers: BTreeMap::from([("retail".to_string(), 1.15)]),
            applies_use_profiles: true,
            module_multiplier: Some(ModuleMultiplierRule {
                option: MultiplierOption::InterventionLevel,
                table: "intervention_multiplier".to_string(),
                fallback: "medio".to_string(),
            }),
            furniture_chapter: None,
            benchmark_lookup: None,
        }
    }

    fn table(module: &ModuleDefinition) -> ChapterTable {
        ChapterTableBuilder::build(module, Scenario::Mid, 10.0, 0.0, 1.0, 1.0).unwrap()
    }

    #[test]
    fn use_profile_scales_by_chapter_kind_then_overall() {
        let m = module();
        let use_mults = MultiplierApplier::resolve_use_profile("repo", &m, Some("hotel")).unwrap();
        let result = MultiplierApplier::apply_use_profile(&table(&m), &use_mults);

        // estructura: 1000 * 1.2 * 1.1, mep_clima: 500 * 1.5 * 1.1
        assert!((result.rows()[0].cost_direct - 1_320.0).abs() < 1e-9);
        assert!((result.rows()[1].cost_direct - 825.0).abs() < 1e-9);
        assert!((result.rows()[1].factor_use - 1.65).abs() < 1e-12);
    }

    #[test]
    fn no_building_use_is_neutral() {
        let m = module();
        let use_mults = MultiplierApplier::resolve_use_profile("repo", &m, None).unwrap();
        assert_eq!(use_mults, UseMultipliers::NEUTRAL);

        let before = table(&m);
        let after = MultiplierApplier::apply_use_profile(&before, &use_mults);
        assert_eq!(before.direct_total(), after.direct_total());
    }

    #[test]
    fn modules_without_use_profiles_ignore_selection() {
        let mut m = module();
        m.applies_use_profiles = false;
        let use_mults = MultiplierApplier::resolve_use_profile("repo", &m, Some("hotel")).unwrap();
        assert_eq!(use_mults, UseMultipliers::NEUTRAL);
    }

    #[test]
    fn unknown_building_use_is_configuration_error() {
        let m = module();
        let err = MultiplierApplier::resolve_use_profile("repo", &m, Some("estadio")).unwrap_err();
        assert!(matches!(err, EstimationError::UnknownUseProfile { .. }));
    }

    #[test]
    fn module_multiplier_uses_selected_option() {
        let m = module();
        let options = EstimateOptions {
            intervention_level: Some("intensivo".to_string()),
            ..EstimateOptions::default()
        };
        let value = MultiplierApplier::resolve_module_multiplier("repo", &m, &options).unwrap();
        assert_eq!(value, 1.25);
    }

    #[test]
    fn module_multiplier_falls_back_to_named_key() {
        let m = module();
        let value =
            MultiplierApplier::resolve_module_multiplier("repo", &m, &EstimateOptions::default()).unwrap();
        assert_eq!(value, 1.0);
    }

    #[test]
    fn unknown_level_key_is_configuration_error() {
        let m = module();
        let options = EstimateOptions {
            intervention_level: Some("extremo".to_string()),
            ..EstimateOptions::default()
        };
        let err = MultiplierApplier::resolve_module_multiplier("repo", &m, &options).unwrap_err();
        assert!(matches!(err, EstimationError::UnknownMultiplierKey { .. }));
    }

    #[test]
    fn missing_level_table_is_configuration_error() {
        let mut m = module();
        m.defaults.multiplier_tables.clear();
        let err =
            MultiplierApplier::resolve_module_multiplier("repo", &m, &EstimateOptions::default()).unwrap_err();
        assert!(matches!(err, EstimationError::MissingMultiplierTable { .. }));
    }

    #[test]
    fn use_based_lookup_defaults_to_neutral() {
        let mut m = module();
        m.module_multiplier = Some(ModuleMultiplierRule {
            option: MultiplierOption::Use,
            table: USE_MULTIPLIERS_TABLE.to_string(),
            fallback: "otros".to_string(),
        });

        let retail = EstimateOptions {
            use_key: Some("retail".to_string()),
            ..EstimateOptions::default()
        };
        assert_eq!(MultiplierApplier::resolve_module_multiplier("local", &m, &retail).unwrap(), 1.15);
        assert_eq!(
            MultiplierApplier::resolve_module_multiplier("local", &m, &EstimateOptions::default()).unwrap(),
            1.0
        );
    }

    #[test]
    fn global_stage_records_composed_factor() {
        let m = module();
        let result = MultiplierApplier::apply_global(&table(&m), 1.1, 1.25);

        for row in result.rows() {
            assert!((row.factor_global - 1.375).abs() < 1e-12);
            assert_eq!(row.factor_module, 1.25);
        }
        assert!((result.direct_total() - 1_500.0 * 1.375).abs() < 1e-9);
    }
}
