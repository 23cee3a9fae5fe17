//! Catalog data configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::adapters::CatalogFiles;

/// Where the catalog tables live
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory holding the YAML tables
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_cost_ranges")]
    pub cost_ranges_file: String,

    #[serde(default = "default_benchmarks")]
    pub benchmarks_file: String,

    #[serde(default = "default_sources")]
    pub sources_file: String,

    #[serde(default = "default_cities")]
    pub cities_file: String,

    #[serde(default = "default_soft_cost_items")]
    pub soft_cost_items_file: String,

    #[serde(default = "default_contingency_items")]
    pub contingency_items_file: String,
}

impl DataConfig {
    /// File names as the catalog reader expects them
    pub fn catalog_files(&self) -> CatalogFiles {
        CatalogFiles {
            cost_ranges: self.cost_ranges_file.clone(),
            benchmarks: self.benchmarks_file.clone(),
            sources: self.sources_file.clone(),
            cities: self.cities_file.clone(),
            soft_cost_items: self.soft_cost_items_file.clone(),
            contingency_items: self.contingency_items_file.clone(),
        }
    }

    /// Validate data configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("data.dir"));
        }
        if self.cost_ranges_file.trim().is_empty() {
            return Err(ValidationError::MissingRequired("data.cost_ranges_file"));
        }
        Ok(())
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            cost_ranges_file: default_cost_ranges(),
            benchmarks_file: default_benchmarks(),
            sources_file: default_sources(),
            cities_file: default_cities(),
            soft_cost_items_file: default_soft_cost_items(),
            contingency_items_file: default_contingency_items(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_cost_ranges() -> String {
    "cost_ranges.yaml".to_string()
}

fn default_benchmarks() -> String {
    "benchmarks.yaml".to_string()
}

fn default_sources() -> String {
    "sources.yaml".to_string()
}

fn default_cities() -> String {
    "cities.yaml".to_string()
}

fn default_soft_cost_items() -> String {
    "soft_cost_items.yaml".to_string()
}

fn default_contingency_items() -> String {
    "contingency_items.yaml".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_config_defaults_match_reader_defaults() {
        let config = DataConfig::default();
        assert_eq!(config.dir, PathBuf::from("data"));
        assert_eq!(config.catalog_files(), CatalogFiles::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_dir_is_invalid() {
        let config = DataConfig {
            dir: PathBuf::new(),
            ..DataConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::MissingRequired("data.dir")));
    }
}
