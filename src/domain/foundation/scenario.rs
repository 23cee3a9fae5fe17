//! Cost scenarios (low / mid / high) and scenario-keyed value maps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A cost-optimism band. Each scenario has its own rate tables and
/// percentage defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Low,
    Mid,
    High,
}

impl Scenario {
    /// All scenarios in presentation order.
    pub const ALL: [Scenario; 3] = [Scenario::Low, Scenario::Mid, Scenario::High];

    /// Returns the configuration key of this scenario.
    pub fn key(&self) -> &'static str {
        match self {
            Scenario::Low => "low",
            Scenario::Mid => "mid",
            Scenario::High => "high",
        }
    }

    /// Returns the display label of this scenario.
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Low => "Bajo",
            Scenario::Mid => "Medio",
            Scenario::High => "Alto",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Scenario {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Scenario::Low),
            "mid" => Ok(Scenario::Mid),
            "high" => Ok(Scenario::High),
            other => Err(ValidationError::invalid_format(
                "scenario",
                format!("expected low, mid or high, got '{}'", other),
            )),
        }
    }
}

/// A value per scenario, as declared in configuration.
///
/// Entries may be missing; callers decide whether a missing scenario is a
/// configuration error (rates, percentages) or an absent reference value
/// (benchmarks).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioMap<T>(BTreeMap<Scenario, T>);

impl<T> ScenarioMap<T> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the value for a scenario.
    pub fn get(&self, scenario: Scenario) -> Option<&T> {
        self.0.get(&scenario)
    }

    /// Sets the value for a scenario, returning the map.
    pub fn with(mut self, scenario: Scenario, value: T) -> Self {
        self.0.insert(scenario, value);
        self
    }

    /// Iterates entries in scenario order (low, mid, high).
    pub fn iter(&self) -> impl Iterator<Item = (&Scenario, &T)> {
        self.0.iter()
    }

    /// Returns true if every scenario has a value.
    pub fn is_complete(&self) -> bool {
        Scenario::ALL.iter().all(|s| self.0.contains_key(s))
    }
}

impl<T: Clone> ScenarioMap<T> {
    /// Creates a map with the same value for every scenario.
    pub fn uniform(value: T) -> Self {
        Scenario::ALL
            .iter()
            .map(|s| (*s, value.clone()))
            .collect()
    }
}

impl ScenarioMap<f64> {
    /// Creates a map from explicit low / mid / high values.
    pub fn from_values(low: f64, mid: f64, high: f64) -> Self {
        Self::new()
            .with(Scenario::Low, low)
            .with(Scenario::Mid, mid)
            .with(Scenario::High, high)
    }

    /// Returns the value for a scenario by copy.
    pub fn value(&self, scenario: Scenario) -> Option<f64> {
        self.get(scenario).copied()
    }
}

impl<T> Default for ScenarioMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(Scenario, T)> for ScenarioMap<T> {
    fn from_iter<I: IntoIterator<Item = (Scenario, T)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
