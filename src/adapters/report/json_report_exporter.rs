//! JSON Report Exporter Adapter
//!
//! Writes each report as pretty-printed JSON into an output directory.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::report::EstimateReport;
use crate::ports::{ExportError, ReportExporter};

/// File-based JSON exporter
#[derive(Debug, Clone)]
pub struct JsonReportExporter {
    output_dir: PathBuf,
}

impl JsonReportExporter {
    /// Create an exporter writing into `output_dir`
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Path a report will be written to
    pub fn report_path(&self, report: &EstimateReport) -> PathBuf {
        self.output_dir.join(format!("{}.json", report.file_stem()))
    }
}

impl ReportExporter for JsonReportExporter {
    fn export(&self, report: &EstimateReport) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| ExportError::Io {
            path: self.output_dir.clone(),
            message: e.to_string(),
        })?;

        let json = serde_json::to_string_pretty(report)
            .map_err(|e| ExportError::SerializationFailed(e.to_string()))?;

        let path = self.report_path(report);
        fs::write(&path, json).map_err(|e| ExportError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;

        info!(
            report_id = %report.report_id,
            generated_at = %report.generated_at,
            path = %path.display(),
            "Report exported"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::estimation::{
        CalibrationOutcome, ChapterTable, CostShares, Estimate, EstimateOptions, Factors,
        MultiplierEcho, TotalsAggregator,
    };
    use crate::domain::foundation::Scenario;
    use crate::domain::report::ReportAreas;
    use tempfile::TempDir;

    fn report() -> EstimateReport {
        let shares = CostShares {
            indirects: 0.1,
            gg_bi: 0.05,
            soft_costs: 0.08,
            soft_costs_default: 0.08,
            contingency: 0.07,
            contingency_default: 0.07,
        };
        let echo = MultiplierEcho::default();
        let table = ChapterTable::default();
        let estimate = Estimate {
            scenario: Scenario::Mid,
            totals: TotalsAggregator::aggregate(&table, &shares, &echo),
            table,
            calibration: CalibrationOutcome::SKIPPED,
            shares,
            echo,
        };
        let areas = ReportAreas {
            label: "m²".to_string(),
            above: 0.0,
            below: 0.0,
            reference: 0.0,
        };
        EstimateReport::new(
            "Estimación",
            "fitout_oficinas",
            "Fit-out oficinas",
            areas,
            Factors::default(),
            EstimateOptions::default(),
            &estimate,
        )
    }

    #[test]
    fn writes_named_json_file() {
        let dir = TempDir::new().unwrap();
        let exporter = JsonReportExporter::new(dir.path().join("out"));
        let report = report();

        let path = exporter.export(&report).unwrap();

        assert!(path.ends_with("capex_fitout_oficinas_mid.json"));
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["module_key"], "fitout_oficinas");
        assert_eq!(written["report_id"], report.report_id.to_string());
    }

    #[test]
    fn unwritable_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let err = JsonReportExporter::new(&blocker).export(&report()).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
