//! Report export configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Report export configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// Directory for exported reports; export is skipped when unset
    pub output_dir: Option<PathBuf>,
}

impl ReportConfig {
    /// Check if report export is enabled
    pub fn is_enabled(&self) -> bool {
        self.output_dir.is_some()
    }
}
