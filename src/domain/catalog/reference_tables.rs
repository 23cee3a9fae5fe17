//! Supporting reference tables: provenance sources, city location factors,
//! and soft-cost / contingency item breakdowns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Provenance of a rate or benchmark, consumed by reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    #[serde(rename = "fuente")]
    pub source: String,
    #[serde(rename = "tipo", default)]
    pub kind: String,
    #[serde(rename = "fecha_consulta", default)]
    pub consulted_on: Option<NaiveDate>,
    #[serde(rename = "enlace", default)]
    pub link: Option<String>,
}

/// Location factor for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityFactor {
    pub city: String,
    pub location_factor: f64,
}

/// One concept of a soft-cost or contingency breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    #[serde(rename = "concepto")]
    pub concept: String,
    /// Percent of direct cost (2.5 means 2.5%).
    #[serde(rename = "pct_sobre_directo")]
    pub pct_of_direct: f64,
    #[serde(rename = "aplica", default = "applies_by_default")]
    pub applies: bool,
}

fn applies_by_default() -> bool {
    true
}

impl CostItem {
    /// Creates an applicable item.
    pub fn new(concept: impl Into<String>, pct_of_direct: f64) -> Self {
        Self {
            concept: concept.into(),
            pct_of_direct,
            applies: true,
        }
    }
}

/// A list of cost items summed into a single fraction of direct cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostItemBreakdown {
    items: Vec<CostItem>,
}

impl CostItemBreakdown {
    /// Creates a breakdown from items.
    pub fn new(items: Vec<CostItem>) -> Self {
        Self { items }
    }

    /// Returns the items.
    pub fn items(&self) -> &[CostItem] {
        &self.items
    }

    /// Returns true if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a copy with the named concepts marked as not applicable.
    pub fn excluding(&self, concepts: &[String]) -> Self {
        let items = self
            .items
            .iter()
            .cloned()
            .map(|mut item| {
                if concepts.iter().any(|c| c == &item.concept) {
                    item.applies = false;
                }
                item
            })
            .collect();
        Self { items }
    }

    /// Sum of applicable percentages, as a fraction of direct cost.
    pub fn applicable_fraction(&self) -> f64 {
        self.items
            .iter()
            .filter(|i| i.applies)
            .map(|i| i.pct_of_direct)
            .sum::<f64>()
            / 100.0
    }
}
