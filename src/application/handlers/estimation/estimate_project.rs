//! EstimateProjectHandler - Runs every scenario for one project request.
//!
//! Resolves what the engine expects to be given explicitly:
//! - City location factor folded into the factor model
//! - Soft-cost / contingency overrides from item breakdowns
//! - Benchmark row by building use or module, city variant first
//!
//! Then estimates low / mid / high, applies the chapter selection and
//! tabulates the scenario comparison.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::catalog::{
    BenchmarkLookup, BenchmarkRow, ChapterBasis, CostCatalog, ModuleDefinition,
};
use crate::domain::estimation::{
    totals_table, BenchmarkCalibrator, ChapterTable, Estimate, EstimateInput, EstimateOptions,
    EstimationEngine, Factors, ScenarioTotalsRow,
};
use crate::domain::foundation::{DomainError, ErrorCode, Scenario, ScenarioMap};

/// Default measurement label when a module does not declare one.
const DEFAULT_MEASUREMENT: &str = "m²";

fn default_title() -> String {
    "Estimación CAPEX".to_string()
}

fn default_true() -> bool {
    true
}

/// Command to estimate a project across all scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateProjectCommand {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub project: Option<String>,
    pub module: String,
    #[serde(default)]
    pub area_above: f64,
    #[serde(default)]
    pub area_below: f64,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub factors: Factors,
    #[serde(default)]
    pub options: EstimateOptions,
    /// Rescale direct cost to the selected benchmark.
    #[serde(default)]
    pub calibrate: bool,
    /// Soft-cost concepts to leave out of the item breakdown.
    #[serde(default)]
    pub excluded_soft_items: Vec<String>,
    /// Contingency concepts to leave out of the item breakdown.
    #[serde(default)]
    pub excluded_contingency_items: Vec<String>,
    /// Keep chapters tagged `optional`.
    #[serde(default = "default_true")]
    pub include_optional: bool,
    /// Chapters switched off for every scenario.
    #[serde(default)]
    pub excluded_chapters: Vec<String>,
}

impl EstimateProjectCommand {
    /// Creates a command with every optional input at its default.
    pub fn new(module: impl Into<String>, area_above: f64, area_below: f64) -> Self {
        Self {
            title: default_title(),
            project: None,
            module: module.into(),
            area_above,
            area_below,
            city: None,
            factors: Factors::default(),
            options: EstimateOptions::default(),
            calibrate: false,
            excluded_soft_items: Vec::new(),
            excluded_contingency_items: Vec::new(),
            include_optional: true,
            excluded_chapters: Vec::new(),
        }
    }
}

/// Estimates for every scenario plus the inputs actually used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateProjectResult {
    pub title: String,
    pub project: Option<String>,
    pub module_key: String,
    pub module_label: String,
    pub measurement: String,
    pub area_above: f64,
    pub area_below: f64,
    /// Area the €/m² ratios and calibration use.
    pub area_ref: f64,
    pub city: Option<String>,
    /// Factors after the city location factor was applied.
    pub factors: Factors,
    /// Options after item-breakdown overrides were resolved.
    pub options: EstimateOptions,
    pub benchmark: Option<BenchmarkRow>,
    pub estimates: ScenarioMap<Estimate>,
    pub comparison: Vec<ScenarioTotalsRow>,
}

impl EstimateProjectResult {
    /// Estimate for one scenario.
    pub fn estimate(&self, scenario: Scenario) -> Option<&Estimate> {
        self.estimates.get(scenario)
    }
}

/// Handler for project estimation.
pub struct EstimateProjectHandler {
    catalog: Arc<CostCatalog>,
}

impl EstimateProjectHandler {
    pub fn new(catalog: Arc<CostCatalog>) -> Self {
        Self { catalog }
    }

    pub fn handle(&self, cmd: EstimateProjectCommand) -> Result<EstimateProjectResult, DomainError> {
        // 1. Validate inputs
        validate_area("area_above", cmd.area_above)?;
        validate_area("area_below", cmd.area_below)?;

        let engine = EstimationEngine::new(&self.catalog.modules);
        let module = engine.module(&cmd.module)?;

        // 2. Resolve collaborator inputs
        let factors = cmd.factors.with_location_factor(self.city_factor(cmd.city.as_deref())?);
        let options = self.resolve_item_overrides(&cmd);
        let benchmark = self
            .select_benchmark(&cmd.module, module, &options, cmd.city.as_deref())
            .cloned();
        let area_ref = BenchmarkCalibrator::reference_area(module, cmd.area_above, cmd.area_below);

        // 3. Estimate every scenario, then apply the chapter selection
        let mut estimates = ScenarioMap::new();
        for scenario in Scenario::ALL {
            let estimate = engine.estimate(&EstimateInput {
                module_key: &cmd.module,
                scenario,
                area_above: cmd.area_above,
                area_below: cmd.area_below,
                factors: &factors,
                options: &options,
                benchmark: benchmark.as_ref(),
                calibrate: cmd.calibrate,
            })?;
            let selected = select_chapters(&estimate.table, cmd.include_optional, &cmd.excluded_chapters);
            estimates = estimates.with(scenario, estimate.with_table(selected));
        }

        // 4. Compare scenarios
        let comparison = totals_table(estimates.iter().map(|(s, e)| (s, &e.totals)), area_ref);

        info!(
            module = %cmd.module,
            area_ref,
            benchmark = benchmark.as_ref().map(|b| b.key.as_str()),
            calibrate = cmd.calibrate,
            "Project estimated"
        );

        Ok(EstimateProjectResult {
            title: cmd.title,
            project: cmd.project,
            module_label: module.label.clone(),
            measurement: module
                .measurement
                .clone()
                .unwrap_or_else(|| DEFAULT_MEASUREMENT.to_string()),
            module_key: cmd.module,
            area_above: cmd.area_above,
            area_below: cmd.area_below,
            area_ref,
            city: cmd.city,
            factors,
            options,
            benchmark,
            estimates,
            comparison,
        })
    }

    /// City location factor; 1.0 when no city is given.
    fn city_factor(&self, city: Option<&str>) -> Result<f64, DomainError> {
        match city {
            None => Ok(1.0),
            Some(city) => self.catalog.city_factor(city).ok_or_else(|| {
                DomainError::new(ErrorCode::CityNotFound, format!("Unknown city: {}", city))
                    .with_detail("city", city)
            }),
        }
    }

    /// Explicit overrides win; otherwise a non-empty item breakdown sets the fraction.
    fn resolve_item_overrides(&self, cmd: &EstimateProjectCommand) -> EstimateOptions {
        let soft = &self.catalog.soft_cost_items;
        let contingency = &self.catalog.contingency_items;

        let mut options = cmd.options.clone();
        if options.soft_items_pct.is_none() && !soft.is_empty() {
            options.soft_items_pct = Some(soft.excluding(&cmd.excluded_soft_items).applicable_fraction());
        }
        if options.cont_items_pct.is_none() && !contingency.is_empty() {
            options.cont_items_pct =
                Some(contingency.excluding(&cmd.excluded_contingency_items).applicable_fraction());
        }

        debug!(
            soft_pct = options.soft_items_pct,
            cont_pct = options.cont_items_pct,
            "Resolved percentage overrides"
        );
        options
    }

    fn select_benchmark(
        &self,
        module_key: &str,
        module: &ModuleDefinition,
        options: &EstimateOptions,
        city: Option<&str>,
    ) -> Option<&BenchmarkRow> {
        let key = match module.benchmark_lookup? {
            BenchmarkLookup::BuildingUse => options.building_use.as_deref()?,
            BenchmarkLookup::Module => module_key,
        };
        self.catalog.benchmarks.find_for_city(key, city)
    }
}

fn validate_area(field: &str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DomainError::new(
            ErrorCode::InvalidArea,
            format!("{} must be a non-negative number, got {}", field, value),
        )
        .with_detail("field", field))
    }
}

fn select_chapters(table: &ChapterTable, include_optional: bool, excluded: &[String]) -> ChapterTable {
    let table = if include_optional {
        table.clone()
    } else {
        table.without_basis(ChapterBasis::Optional)
    };
    table.without_chapters(excluded)
}
