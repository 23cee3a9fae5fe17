//! Report Exporter Port - Interface for writing estimate reports.

use std::path::PathBuf;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::report::EstimateReport;

/// Errors that can occur during report export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to serialize report: {0}")]
    SerializationFailed(String),

    #[error("Failed to write {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
}

impl From<ExportError> for DomainError {
    fn from(err: ExportError) -> Self {
        DomainError::new(ErrorCode::ExportFailed, err.to_string())
    }
}

/// Port for persisting a rendered report
pub trait ReportExporter: Send + Sync {
    /// Export a report, returning where it was written
    ///
    /// # Errors
    /// Returns `ExportError` if serialization or writing fails
    fn export(&self, report: &EstimateReport) -> Result<PathBuf, ExportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_error_maps_to_export_failed() {
        let err: DomainError = ExportError::SerializationFailed("NaN".to_string()).into();
        assert_eq!(err.code, ErrorCode::ExportFailed);
    }
}
