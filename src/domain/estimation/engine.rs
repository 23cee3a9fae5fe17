//! Estimation Engine - the bottom-up pipeline for one module and scenario.
//!
//! Stages, each producing a new chapter table:
//! 1. Chapter rows from rates, areas, MEP-intensity and finishes factors
//! 2. Furniture exclusion (unless opted in)
//! 3. Building-use multipliers
//! 4. Combined factor model times the module multiplier
//! 5. Optional benchmark calibration
//! 6. Totals

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    BenchmarkCalibrator, CalibrationOutcome, ChapterTable, ChapterTableBuilder, CostShares,
    EstimateOptions, EstimationError, Factors, MultiplierApplier, MultiplierEcho, PercentOverrides,
    TotalsAggregator, TotalsRecord,
};
use crate::domain::catalog::{BenchmarkRow, ModuleCatalog, ModuleDefinition};
use crate::domain::foundation::Scenario;

/// Inputs of one estimation run.
#[derive(Debug, Clone, Copy)]
pub struct EstimateInput<'a> {
    pub module_key: &'a str,
    pub scenario: Scenario,
    pub area_above: f64,
    pub area_below: f64,
    pub factors: &'a Factors,
    pub options: &'a EstimateOptions,
    pub benchmark: Option<&'a BenchmarkRow>,
    pub calibrate: bool,
}

/// Result of one estimation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub scenario: Scenario,
    pub table: ChapterTable,
    pub totals: TotalsRecord,
    pub calibration: CalibrationOutcome,
    pub shares: CostShares,
    pub echo: MultiplierEcho,
}

impl Estimate {
    /// Re-derives totals for an edited chapter selection.
    ///
    /// Uses the same resolved percentages and multiplier echoes as the
    /// original run; never reuses the previous totals.
    pub fn with_table(&self, table: ChapterTable) -> Self {
        let totals = TotalsAggregator::aggregate(&table, &self.shares, &self.echo);
        Self {
            scenario: self.scenario,
            table,
            totals,
            calibration: self.calibration,
            shares: self.shares,
            echo: self.echo,
        }
    }
}

/// Runs estimations against an explicit module catalog.
///
/// Stateless between calls; each run allocates its own rows.
pub struct EstimationEngine<'a> {
    modules: &'a ModuleCatalog,
}

impl<'a> EstimationEngine<'a> {
    /// Creates an engine over a module catalog.
    pub fn new(modules: &'a ModuleCatalog) -> Self {
        Self { modules }
    }

    /// Looks up a module definition.
    ///
    /// # Errors
    /// `UnknownModule` if the key is not defined.
    pub fn module(&self, module_key: &str) -> Result<&'a ModuleDefinition, EstimationError> {
        self.modules
            .get(module_key)
            .ok_or_else(|| EstimationError::UnknownModule(module_key.to_string()))
    }

    /// Estimates chapter costs and totals for one scenario.
    ///
    /// # Errors
    /// Structural lookups (module, scenario rates, percentages, use
    /// profile, multiplier table/key) fail with `EstimationError`.
    /// Degenerate areas never fail.
    pub fn estimate(&self, input: &EstimateInput<'_>) -> Result<Estimate, EstimationError> {
        let module = self.module(input.module_key)?;
        let factors = input.factors;
        let options = input.options;

        let table = ChapterTableBuilder::build(
            module,
            input.scenario,
            input.area_above,
            input.area_below,
            factors.mep_intensity,
            factors.finishes,
        )?;

        let table = match &module.furniture_chapter {
            Some(key) if !options.include_furniture => table.without_chapter(key),
            _ => table,
        };

        let use_multipliers = MultiplierApplier::resolve_use_profile(
            input.module_key,
            module,
            options.building_use.as_deref(),
        )?;
        let table = MultiplierApplier::apply_use_profile(&table, &use_multipliers);

        let module_multiplier =
            MultiplierApplier::resolve_module_multiplier(input.module_key, module, options)?;
        let table = MultiplierApplier::apply_global(&table, factors.combined(), module_multiplier);

        let reference_area =
            BenchmarkCalibrator::reference_area(module, input.area_above, input.area_below);
        let (table, calibration) = BenchmarkCalibrator::calibrate(
            &table,
            input.benchmark,
            input.scenario,
            reference_area,
            input.calibrate,
        );

        let shares = CostShares::resolve(
            input.module_key,
            &module.defaults,
            input.scenario,
            PercentOverrides::from(options),
        )?;
        let echo = MultiplierEcho::new(&calibration, use_multipliers, module_multiplier);
        let totals = TotalsAggregator::aggregate(&table, &shares, &echo);

        debug!(
            module = input.module_key,
            scenario = %input.scenario,
            chapters = table.len(),
            direct = totals.direct,
            calibration = calibration.factor,
            total = totals.total,
            "Estimated module"
        );

        Ok(Estimate {
            scenario: input.scenario,
            table,
            totals,
            calibration,
            shares,
            echo,
        })
    }
}
