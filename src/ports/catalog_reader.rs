//! Catalog Reader Port - Interface for loading reference data.
//!
//! The estimation engine never reads files; adapters materialize a
//! `CostCatalog` up front and the application layer hands it down.

use std::path::PathBuf;

use crate::domain::catalog::CostCatalog;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors that can occur while loading the catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Required catalog file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

impl From<CatalogError> for DomainError {
    fn from(err: CatalogError) -> Self {
        DomainError::new(ErrorCode::CatalogUnavailable, err.to_string())
    }
}

/// Port for loading the cost catalog
///
/// # Contract
///
/// Implementations must:
/// - Return every module, benchmark and reference table in one call
/// - Fail when module definitions are missing or malformed
/// - Treat absent optional tables as empty
pub trait CatalogReader: Send + Sync {
    /// Load the complete catalog
    ///
    /// # Errors
    /// Returns `CatalogError` if a required table cannot be read or parsed
    fn load_catalog(&self) -> Result<CostCatalog, CatalogError>;
}
