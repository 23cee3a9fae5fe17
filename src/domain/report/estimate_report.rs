//! Estimate report - everything needed to render an estimate without the catalog.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{BenchmarkRow, SourceRecord};
use crate::domain::estimation::{
    ChapterCostRow, Estimate, EstimateOptions, Factors, LabelCost, ScenarioTotalsRow, TotalsRecord,
};
use crate::domain::foundation::{ReportId, Scenario, Timestamp};

/// Areas the estimate was computed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportAreas {
    /// Display label of the measured quantity, e.g. "m² construidos".
    pub label: String,
    pub above: f64,
    pub below: f64,
    /// Area the €/m² ratios are taken over.
    pub reference: f64,
}

/// A finished estimate for one module and scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateReport {
    pub report_id: ReportId,
    pub generated_at: Timestamp,
    pub title: String,
    pub project: Option<String>,
    pub module_key: String,
    pub module_label: String,
    pub areas: ReportAreas,
    pub scenario: Scenario,
    pub scenario_label: String,
    pub building_use: Option<String>,
    pub city: Option<String>,
    pub factors: Factors,
    pub options: EstimateOptions,
    pub breakdown: Vec<ChapterCostRow>,
    pub summary: Vec<LabelCost>,
    pub totals: TotalsRecord,
    pub comparison: Vec<ScenarioTotalsRow>,
    pub benchmark: Option<BenchmarkRow>,
    pub sources: Vec<SourceRecord>,
    pub notes: Vec<String>,
}

impl EstimateReport {
    /// Creates a report from an estimate; optional sections start empty.
    pub fn new(
        title: impl Into<String>,
        module_key: impl Into<String>,
        module_label: impl Into<String>,
        areas: ReportAreas,
        factors: Factors,
        options: EstimateOptions,
        estimate: &Estimate,
    ) -> Self {
        Self {
            report_id: ReportId::new(),
            generated_at: Timestamp::now(),
            title: title.into(),
            project: None,
            module_key: module_key.into(),
            module_label: module_label.into(),
            areas,
            scenario: estimate.scenario,
            scenario_label: estimate.scenario.label().to_string(),
            building_use: options.building_use.clone(),
            city: None,
            factors,
            options,
            breakdown: estimate.table.rows().to_vec(),
            summary: estimate.table.summary_by_label(),
            totals: estimate.totals,
            comparison: Vec::new(),
            benchmark: None,
            sources: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_comparison(mut self, comparison: Vec<ScenarioTotalsRow>) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn with_benchmark(mut self, benchmark: Option<BenchmarkRow>) -> Self {
        self.benchmark = benchmark;
        self
    }

    pub fn with_sources(mut self, sources: Vec<SourceRecord>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Direct cost per reference area; `None` when the area is not positive.
    pub fn direct_per_area(&self) -> Option<f64> {
        (self.areas.reference > 0.0).then(|| self.totals.direct / self.areas.reference)
    }

    /// Base file name, without extension, for exported artifacts.
    pub fn file_stem(&self) -> String {
        format!("capex_{}_{}", self.module_key, self.scenario.key())
    }
}
