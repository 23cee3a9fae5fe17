//! Chapter Cost Table - per-chapter direct cost rows for one scenario.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::EstimationError;
use crate::domain::catalog::{ChapterBasis, ChapterDefinition, ChapterKind, ModuleDefinition, RateForm};
use crate::domain::foundation::Scenario;

/// Where a row's direct cost came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    /// Bottom-up chapter rates.
    ChapterRate,
    /// Rescaled to match a top-down benchmark.
    CalibratedToBenchmark,
}

/// Direct cost of one chapter with the multipliers that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterCostRow {
    pub chapter_key: String,
    pub label: String,
    pub basis: ChapterBasis,
    pub kind: ChapterKind,
    /// Above-ground rate, or the single rate.
    pub rate_above: f64,
    /// Below-ground rate; `None` for single-rate chapters.
    pub rate_below: Option<f64>,
    pub area_above: f64,
    pub area_below: f64,
    pub cost_direct: f64,
    /// MEP-intensity or finishes factor applied to this chapter.
    pub factor_chapter: f64,
    /// Building-use multiplier applied to this chapter.
    pub factor_use: f64,
    /// Module-level scalar multiplier.
    pub factor_module: f64,
    /// Combined factor model times the module multiplier.
    pub factor_global: f64,
    pub factor_calibration: f64,
    pub source_mode: SourceMode,
}

impl ChapterCostRow {
    /// Returns a copy with the direct cost multiplied by `multiplier`.
    pub fn scaled(&self, multiplier: f64) -> Self {
        Self {
            cost_direct: self.cost_direct * multiplier,
            ..self.clone()
        }
    }
}

/// Direct cost of a label, used for breakdown charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCost {
    pub label: String,
    pub cost_direct: f64,
}

/// Ordered chapter rows for one scenario.
///
/// Every transformation returns a new table; row order is always the
/// module's chapter declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterTable {
    rows: Vec<ChapterCostRow>,
}

impl ChapterTable {
    /// Creates a table from rows.
    pub fn new(rows: Vec<ChapterCostRow>) -> Self {
        Self { rows }
    }

    /// Returns the rows.
    pub fn rows(&self) -> &[ChapterCostRow] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finds a row by chapter key.
    pub fn row(&self, chapter_key: &str) -> Option<&ChapterCostRow> {
        self.rows.iter().find(|r| r.chapter_key == chapter_key)
    }

    /// Sum of direct costs in declaration order.
    pub fn direct_total(&self) -> f64 {
        self.rows.iter().map(|r| r.cost_direct).sum()
    }

    /// Returns a new table with each row transformed.
    pub fn map_rows<F>(&self, f: F) -> Self
    where
        F: FnMut(&ChapterCostRow) -> ChapterCostRow,
    {
        Self {
            rows: self.rows.iter().map(f).collect(),
        }
    }

    /// Returns a new table keeping only rows matching the predicate.
    pub fn filtered<P>(&self, mut keep: P) -> Self
    where
        P: FnMut(&ChapterCostRow) -> bool,
    {
        Self {
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    /// Removes a chapter entirely.
    pub fn without_chapter(&self, chapter_key: &str) -> Self {
        self.filtered(|r| r.chapter_key != chapter_key)
    }

    /// Removes all chapters with the given basis.
    pub fn without_basis(&self, basis: ChapterBasis) -> Self {
        self.filtered(|r| r.basis != basis)
    }

    /// Removes the listed chapters.
    pub fn without_chapters(&self, chapter_keys: &[String]) -> Self {
        let excluded: HashSet<&str> = chapter_keys.iter().map(String::as_str).collect();
        self.filtered(|r| !excluded.contains(r.chapter_key.as_str()))
    }

    /// Direct cost grouped by label, largest first.
    pub fn summary_by_label(&self) -> Vec<LabelCost> {
        let mut summary: Vec<LabelCost> = Vec::new();
        for row in &self.rows {
            match summary.iter_mut().find(|s| s.label == row.label) {
                Some(entry) => entry.cost_direct += row.cost_direct,
                None => summary.push(LabelCost {
                    label: row.label.clone(),
                    cost_direct: row.cost_direct,
                }),
            }
        }
        summary.sort_by(|a, b| b.cost_direct.total_cmp(&a.cost_direct));
        summary
    }
}

/// Builds chapter rows from rate tables and area inputs.
pub struct ChapterTableBuilder;

impl ChapterTableBuilder {
    /// Computes one row per chapter, in declaration order.
    ///
    /// # Algorithm
    /// - Paired rates: `above[s] * area_above + below[s] * area_below`
    /// - Single rate: `single[s] * area_above` (below-ground area ignored)
    /// - MEP chapters are multiplied by `mep_intensity`, architecture
    ///   chapters by `finishes`.
    ///
    /// # Errors
    /// `MissingRate` if a chapter has no rate for the scenario.
    pub fn build(
        module: &ModuleDefinition,
        scenario: Scenario,
        area_above: f64,
        area_below: f64,
        mep_intensity: f64,
        finishes: f64,
    ) -> Result<ChapterTable, EstimationError> {
        let rows = module
            .chapters
            .iter()
            .map(|chapter| {
                Self::build_row(chapter, scenario, area_above, area_below, mep_intensity, finishes)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ChapterTable::new(rows))
    }

    fn build_row(
        chapter: &ChapterDefinition,
        scenario: Scenario,
        area_above: f64,
        area_below: f64,
        mep_intensity: f64,
        finishes: f64,
    ) -> Result<ChapterCostRow, EstimationError> {
        let factor_chapter = match chapter.kind {
            ChapterKind::Mep => mep_intensity,
            ChapterKind::Architecture => finishes,
            ChapterKind::Other => 1.0,
        };

        let missing = |form: &'static str| EstimationError::MissingRate {
            chapter: chapter.key.clone(),
            form,
            scenario,
        };

        let (rate_above, rate_below, area_below, raw_cost) = match &chapter.rates {
            RateForm::Paired { above, below } => {
                let above = above.value(scenario).ok_or_else(|| missing("above"))?;
                let below = below.value(scenario).ok_or_else(|| missing("below"))?;
                (
                    above,
                    Some(below),
                    area_below,
                    above * area_above + below * area_below,
                )
            }
            RateForm::Single { single } => {
                let single = single.value(scenario).ok_or_else(|| missing("single"))?;
                (single, None, 0.0, single * area_above)
            }
        };

        Ok(ChapterCostRow {
            chapter_key: chapter.key.clone(),
            label: chapter.label.clone(),
            basis: chapter.basis,
            kind: chapter.kind,
            rate_above,
            rate_below,
            area_above,
            area_below,
            cost_direct: raw_cost * factor_chapter,
            factor_chapter,
            factor_use: 1.0,
            factor_module: 1.0,
            factor_global: 1.0,
            factor_calibration: 1.0,
            source_mode: SourceMode::ChapterRate,
        })
    }
}
