//! YAML Catalog Reader Adapter
//!
//! Loads module definitions and reference tables from YAML files in one
//! data directory. Tables are sequences of rows keyed by column name.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::catalog::{CostCatalog, ModuleCatalog};
use crate::ports::{CatalogError, CatalogReader};

/// File names of each table inside the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFiles {
    pub cost_ranges: String,
    pub benchmarks: String,
    pub sources: String,
    pub cities: String,
    pub soft_cost_items: String,
    pub contingency_items: String,
}

impl Default for CatalogFiles {
    fn default() -> Self {
        Self {
            cost_ranges: "cost_ranges.yaml".to_string(),
            benchmarks: "benchmarks.yaml".to_string(),
            sources: "sources.yaml".to_string(),
            cities: "cities.yaml".to_string(),
            soft_cost_items: "soft_cost_items.yaml".to_string(),
            contingency_items: "contingency_items.yaml".to_string(),
        }
    }
}

/// File-based catalog reader
#[derive(Debug, Clone)]
pub struct YamlCatalogReader {
    data_dir: PathBuf,
    files: CatalogFiles,
}

impl YamlCatalogReader {
    /// Create a reader over a data directory with the default file names
    ///
    /// # Example
    /// ```ignore
    /// let reader = YamlCatalogReader::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            files: CatalogFiles::default(),
        }
    }

    /// Override the table file names
    pub fn with_files(mut self, files: CatalogFiles) -> Self {
        self.files = files;
        self
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    /// Reads a required table; a missing file is an error.
    fn read_required<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T, CatalogError> {
        let path = self.path(file);
        if !path.exists() {
            return Err(CatalogError::NotFound(path));
        }
        read_yaml(&path)
    }

    /// Reads an optional table; a missing file loads as empty.
    fn read_optional<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T, CatalogError> {
        let path = self.path(file);
        if !path.exists() {
            debug!(path = %path.display(), "Optional catalog table absent");
            return Ok(T::default());
        }
        read_yaml(&path)
    }
}

fn read_yaml<T: DeserializeOwned + Default>(path: &Path) -> Result<T, CatalogError> {
    let yaml = fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if yaml.trim().is_empty() {
        return Ok(T::default());
    }

    serde_yaml::from_str(&yaml).map_err(|e| CatalogError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl CatalogReader for YamlCatalogReader {
    fn load_catalog(&self) -> Result<CostCatalog, CatalogError> {
        let modules: ModuleCatalog = self.read_required(&self.files.cost_ranges)?;

        let catalog = CostCatalog {
            modules,
            benchmarks: self.read_optional(&self.files.benchmarks)?,
            sources: self.read_optional(&self.files.sources)?,
            cities: self.read_optional(&self.files.cities)?,
            soft_cost_items: self.read_optional(&self.files.soft_cost_items)?,
            contingency_items: self.read_optional(&self.files.contingency_items)?,
        };

        info!(
            data_dir = %self.data_dir.display(),
            modules = catalog.modules.modules.len(),
            benchmarks = catalog.benchmarks.rows().len(),
            cities = catalog.cities.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{ChapterKind, RateForm};
    use crate::domain::foundation::Scenario;
    use tempfile::TempDir;

    const COST_RANGES: &str = r#"
modules:
  obra_nueva:
    label: Obra nueva residencial
    measurement: m² construidos
    applies_use_profiles: true
    chapters:
      - key: estructura
        label: Estructura
        above: { low: 180, mid: 220, high: 280 }
        below: { low: 250, mid: 300, high: 360 }
      - key: mep_clima
        label: Climatización
        above: { low: 60, mid: 80, high: 110 }
        below: { low: 20, mid: 30, high: 40 }
    defaults:
      indirects_pct: { low: 0.08, mid: 0.10, high: 0.12 }
      soft_costs_pct: { low: 0.06, mid: 0.08, high: 0.10 }
      contingency_pct: { low: 0.05, mid: 0.07, high: 0.09 }
      gg_bi_pct: 0.05
"#;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn loads_modules_and_optional_tables() {
        let dir = TempDir::new().unwrap();
        write(&dir, "cost_ranges.yaml", COST_RANGES);
        write(
            &dir,
            "cities.yaml",
            "- city: Madrid\n  location_factor: 1.05\n- city: Sevilla\n  location_factor: 0.95\n",
        );

        let catalog = YamlCatalogReader::new(dir.path()).load_catalog().unwrap();
        let module = catalog.modules.get("obra_nueva").unwrap();

        assert_eq!(module.chapters.len(), 2);
        assert!(matches!(module.chapters[0].rates, RateForm::Paired { .. }));
        assert_eq!(module.chapters[1].kind, ChapterKind::Mep);
        assert_eq!(module.defaults.indirects_pct.value(Scenario::Mid), Some(0.10));
        assert_eq!(catalog.city_factor("sevilla"), Some(0.95));
        assert!(catalog.benchmarks.is_empty());
        assert!(catalog.sources.is_empty());
    }

    #[test]
    fn missing_cost_ranges_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = YamlCatalogReader::new(dir.path()).load_catalog().unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn chapter_with_both_rate_forms_fails_to_load() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "cost_ranges.yaml",
            r#"
modules:
  roto:
    label: Roto
    chapters:
      - key: estructura
        label: Estructura
        single: { low: 1, mid: 2, high: 3 }
        above: { low: 1, mid: 2, high: 3 }
        below: { low: 1, mid: 2, high: 3 }
    defaults:
      indirects_pct: { low: 0.1, mid: 0.1, high: 0.1 }
      soft_costs_pct: { low: 0.1, mid: 0.1, high: 0.1 }
      contingency_pct: { low: 0.1, mid: 0.1, high: 0.1 }
      gg_bi_pct: 0.05
"#,
        );

        let err = YamlCatalogReader::new(dir.path()).load_catalog().unwrap_err();
        match err {
            CatalogError::Parse { path, .. } => assert!(path.ends_with("cost_ranges.yaml")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn empty_optional_file_loads_as_empty_table() {
        let dir = TempDir::new().unwrap();
        write(&dir, "cost_ranges.yaml", COST_RANGES);
        write(&dir, "sources.yaml", "");

        let catalog = YamlCatalogReader::new(dir.path()).load_catalog().unwrap();
        assert!(catalog.sources.is_empty());
    }

    #[test]
    fn reads_item_breakdowns_with_spanish_columns() {
        let dir = TempDir::new().unwrap();
        write(&dir, "cost_ranges.yaml", COST_RANGES);
        write(
            &dir,
            "soft_cost_items.yaml",
            "- concepto: Honorarios\n  pct_sobre_directo: 6.0\n  aplica: true\n- concepto: Licencias\n  pct_sobre_directo: 3.0\n  aplica: false\n",
        );

        let catalog = YamlCatalogReader::new(dir.path()).load_catalog().unwrap();
        assert_eq!(catalog.soft_cost_items.items().len(), 2);
        assert!((catalog.soft_cost_items.applicable_fraction() - 0.06).abs() < 1e-12);
    }

    #[test]
    fn custom_file_names_are_honored() {
        let dir = TempDir::new().unwrap();
        write(&dir, "modulos.yaml", COST_RANGES);

        let files = CatalogFiles {
            cost_ranges: "modulos.yaml".to_string(),
            ..CatalogFiles::default()
        };
        let catalog = YamlCatalogReader::new(dir.path())
            .with_files(files)
            .load_catalog()
            .unwrap();
        assert!(catalog.modules.get("obra_nueva").is_some());
    }
}
