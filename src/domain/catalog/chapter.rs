//! Chapter definitions - cost line-item categories with per-area rates.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ScenarioMap, ValidationError};

/// Chapter keys treated as MEP regardless of prefix.
const MEP_KEYS: &[&str] = &["mep", "mep_renov", "mep_interiores"];

/// Prefix identifying MEP chapters.
const MEP_PREFIX: &str = "mep_";

/// Chapter keys treated as architecture / finishes.
const ARCHITECTURE_KEYS: &[&str] = &[
    "acabados",
    "particiones",
    "carpinterias",
    "envolvente",
    "envolvente_mej",
    "techos",
    "obra_civil",
    "albanileria",
];

/// Inclusion tag of a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterBasis {
    #[default]
    Base,
    Optional,
}

/// Which factor family adjusts a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChapterKind {
    /// Adjusted by the finishes factor.
    Architecture,
    /// Adjusted by the MEP-intensity factor.
    Mep,
    /// Not adjusted per chapter.
    Other,
}

impl ChapterKind {
    /// Classifies a chapter from its key.
    ///
    /// Only used when the catalog does not declare a kind explicitly; the
    /// result is stored on the definition at load time.
    pub fn infer_from_key(key: &str) -> Self {
        if key.starts_with(MEP_PREFIX) || MEP_KEYS.contains(&key) {
            ChapterKind::Mep
        } else if ARCHITECTURE_KEYS.contains(&key) {
            ChapterKind::Architecture
        } else {
            ChapterKind::Other
        }
    }

    /// Returns true for MEP chapters.
    pub fn is_mep(&self) -> bool {
        matches!(self, ChapterKind::Mep)
    }
}

/// Per-area rates of a chapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RateForm {
    /// Separate rates for above-ground and below-ground area.
    Paired {
        above: ScenarioMap<f64>,
        below: ScenarioMap<f64>,
    },
    /// One rate applied to the above-ground (or only) area.
    Single { single: ScenarioMap<f64> },
}

impl RateForm {
    /// Returns true for the above/below form.
    pub fn is_paired(&self) -> bool {
        matches!(self, RateForm::Paired { .. })
    }
}

/// A chapter as declared in a module definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawChapterDefinition")]
pub struct ChapterDefinition {
    pub key: String,
    pub label: String,
    pub basis: ChapterBasis,
    pub kind: ChapterKind,
    #[serde(flatten)]
    pub rates: RateForm,
}

impl ChapterDefinition {
    /// Creates a chapter with above/below rates; kind is derived from the key.
    pub fn paired(
        key: impl Into<String>,
        label: impl Into<String>,
        above: ScenarioMap<f64>,
        below: ScenarioMap<f64>,
    ) -> Self {
        let key = key.into();
        Self {
            kind: ChapterKind::infer_from_key(&key),
            key,
            label: label.into(),
            basis: ChapterBasis::Base,
            rates: RateForm::Paired { above, below },
        }
    }

    /// Creates a chapter with a single rate; kind is derived from the key.
    pub fn single(key: impl Into<String>, label: impl Into<String>, single: ScenarioMap<f64>) -> Self {
        let key = key.into();
        Self {
            kind: ChapterKind::infer_from_key(&key),
            key,
            label: label.into(),
            basis: ChapterBasis::Base,
            rates: RateForm::Single { single },
        }
    }

    /// Overrides the derived kind.
    pub fn with_kind(mut self, kind: ChapterKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the inclusion basis.
    pub fn with_basis(mut self, basis: ChapterBasis) -> Self {
        self.basis = basis;
        self
    }
}

/// Chapter as it appears in configuration, before the rate form is checked.
#[derive(Debug, Deserialize)]
struct RawChapterDefinition {
    key: String,
    label: String,
    #[serde(default)]
    basis: ChapterBasis,
    #[serde(default)]
    kind: Option<ChapterKind>,
    #[serde(default)]
    above: Option<ScenarioMap<f64>>,
    #[serde(default)]
    below: Option<ScenarioMap<f64>>,
    #[serde(default)]
    single: Option<ScenarioMap<f64>>,
}

impl TryFrom<RawChapterDefinition> for ChapterDefinition {
    type Error = ValidationError;

    fn try_from(raw: RawChapterDefinition) -> Result<Self, Self::Error> {
        if raw.key.trim().is_empty() {
            return Err(ValidationError::empty_field("chapter.key"));
        }

        let rates = match (raw.above, raw.below, raw.single) {
            (Some(above), Some(below), None) => RateForm::Paired { above, below },
            (None, None, Some(single)) => RateForm::Single { single },
            _ => {
                return Err(ValidationError::invalid_format(
                    format!("chapter '{}'", raw.key),
                    "expected either 'above' and 'below' rates or a 'single' rate",
                ))
            }
        };

        let kind = raw
            .kind
            .unwrap_or_else(|| ChapterKind::infer_from_key(&raw.key));

        Ok(Self {
            key: raw.key,
            label: raw.label,
            basis: raw.basis,
            kind,
            rates,
        })
    }
}
