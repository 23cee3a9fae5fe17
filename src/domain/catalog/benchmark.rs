//! Top-down benchmark ratios used for calibration reference.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Scenario;

/// A benchmark €/area ratio per scenario for one building use or module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRow {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub pem_low: Option<f64>,
    #[serde(default)]
    pub pem_mid: Option<f64>,
    #[serde(default)]
    pub pem_high: Option<f64>,
}

impl BenchmarkRow {
    /// Creates a row with all three scenario rates.
    pub fn new(key: impl Into<String>, label: impl Into<String>, low: f64, mid: f64, high: f64) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            unit: "€/m²".to_string(),
            pem_low: Some(low),
            pem_mid: Some(mid),
            pem_high: Some(high),
        }
    }

    /// Returns the benchmark rate for a scenario, if present.
    pub fn rate(&self, scenario: Scenario) -> Option<f64> {
        match scenario {
            Scenario::Low => self.pem_low,
            Scenario::Mid => self.pem_mid,
            Scenario::High => self.pem_high,
        }
    }
}

/// Benchmark rows, looked up by exact key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkTable {
    rows: Vec<BenchmarkRow>,
}

impl BenchmarkTable {
    /// Creates a table from rows.
    pub fn new(rows: Vec<BenchmarkRow>) -> Self {
        Self { rows }
    }

    /// Finds the first row with the given key.
    pub fn find(&self, key: &str) -> Option<&BenchmarkRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Finds a city-specific row (`<key>_<city>`) before the generic one.
    pub fn find_for_city(&self, key: &str, city: Option<&str>) -> Option<&BenchmarkRow> {
        city.map(|c| format!("{}_{}", key, c.trim().to_lowercase()))
            .and_then(|city_key| self.find(&city_key))
            .or_else(|| self.find(key))
    }

    /// Returns all rows in declaration order.
    pub fn rows(&self) -> &[BenchmarkRow] {
        &self.rows
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
