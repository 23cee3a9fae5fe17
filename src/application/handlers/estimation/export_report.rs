//! ExportReportHandler - Builds an estimate report and hands it to an exporter.

use std::path::PathBuf;
use std::sync::Arc;

use super::EstimateProjectResult;
use crate::domain::catalog::CostCatalog;
use crate::domain::foundation::{DomainError, ErrorCode, ReportId, Scenario};
use crate::domain::report::{EstimateReport, ReportAreas};
use crate::ports::ReportExporter;

/// Command to export one scenario of a project estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReportCommand {
    pub scenario: Scenario,
    pub notes: Vec<String>,
}

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReportResult {
    pub report_id: ReportId,
    pub path: PathBuf,
}

/// Handler for report export.
pub struct ExportReportHandler {
    catalog: Arc<CostCatalog>,
    exporter: Arc<dyn ReportExporter>,
}

impl ExportReportHandler {
    pub fn new(catalog: Arc<CostCatalog>, exporter: Arc<dyn ReportExporter>) -> Self {
        Self { catalog, exporter }
    }

    /// Builds the report for the selected scenario without exporting it.
    pub fn build_report(
        &self,
        project: &EstimateProjectResult,
        cmd: &ExportReportCommand,
    ) -> Result<EstimateReport, DomainError> {
        let estimate = project.estimate(cmd.scenario).ok_or_else(|| {
            DomainError::new(
                ErrorCode::ScenarioNotFound,
                format!("Estimate has no {} scenario", cmd.scenario),
            )
        })?;

        let areas = ReportAreas {
            label: project.measurement.clone(),
            above: project.area_above,
            below: project.area_below,
            reference: project.area_ref,
        };

        let mut report = EstimateReport::new(
            project.title.clone(),
            project.module_key.clone(),
            project.module_label.clone(),
            areas,
            project.factors,
            project.options.clone(),
            estimate,
        )
        .with_comparison(project.comparison.clone())
        .with_benchmark(project.benchmark.clone())
        .with_sources(self.catalog.sources.clone());

        if let Some(name) = &project.project {
            report = report.with_project(name.clone());
        }
        if let Some(city) = &project.city {
            report = report.with_city(city.clone());
        }
        Ok(cmd.notes.iter().fold(report, |r, note| r.with_note(note.clone())))
    }

    pub fn handle(
        &self,
        project: &EstimateProjectResult,
        cmd: ExportReportCommand,
    ) -> Result<ExportReportResult, DomainError> {
        let report = self.build_report(project, &cmd)?;
        let path = self.exporter.export(&report)?;

        Ok(ExportReportResult {
            report_id: report.report_id,
            path,
        })
    }
}
