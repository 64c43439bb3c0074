//! Lithology label vocabulary and depth-aligned label series.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Categorical rock-type tag.
///
/// Vocabularies are method-specific: gamma ray yields the sand/shale triplet,
/// neutron-density yields matrix names plus `GasSand`, photoelectric yields
/// mineral names plus `Unknown`, clustering yields `Facies(k)`. Facies indices
/// are run-dependent identifiers, not calibrated rock types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LithologyLabel {
    CleanSandstone,
    ShalySandstone,
    Shale,
    Sandstone,
    Limestone,
    Dolomite,
    Anhydrite,
    GasSand,
    Quartz,
    Calcite,
    Clay,
    Salt,
    Facies(usize),
    Unknown,
}

impl std::fmt::Display for LithologyLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LithologyLabel::CleanSandstone => write!(f, "CleanSandstone"),
            LithologyLabel::ShalySandstone => write!(f, "ShalySandstone"),
            LithologyLabel::Shale => write!(f, "Shale"),
            LithologyLabel::Sandstone => write!(f, "Sandstone"),
            LithologyLabel::Limestone => write!(f, "Limestone"),
            LithologyLabel::Dolomite => write!(f, "Dolomite"),
            LithologyLabel::Anhydrite => write!(f, "Anhydrite"),
            LithologyLabel::GasSand => write!(f, "GasSand"),
            LithologyLabel::Quartz => write!(f, "Quartz"),
            LithologyLabel::Calcite => write!(f, "Calcite"),
            LithologyLabel::Clay => write!(f, "Clay"),
            LithologyLabel::Salt => write!(f, "Salt"),
            LithologyLabel::Facies(k) => write!(f, "Facies_{k}"),
            LithologyLabel::Unknown => write!(f, "Unknown"),
        }
    }
}

impl FromStr for LithologyLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = match s {
            "CleanSandstone" => LithologyLabel::CleanSandstone,
            "ShalySandstone" => LithologyLabel::ShalySandstone,
            "Shale" => LithologyLabel::Shale,
            "Sandstone" => LithologyLabel::Sandstone,
            "Limestone" => LithologyLabel::Limestone,
            "Dolomite" => LithologyLabel::Dolomite,
            "Anhydrite" => LithologyLabel::Anhydrite,
            "GasSand" => LithologyLabel::GasSand,
            "Quartz" => LithologyLabel::Quartz,
            "Calcite" => LithologyLabel::Calcite,
            "Clay" => LithologyLabel::Clay,
            "Salt" => LithologyLabel::Salt,
            "Unknown" => LithologyLabel::Unknown,
            other => {
                let k = other
                    .strip_prefix("Facies_")
                    .and_then(|n| n.parse::<usize>().ok())
                    .ok_or_else(|| format!("unknown lithology label '{other}'"))?;
                LithologyLabel::Facies(k)
            }
        };
        Ok(label)
    }
}

impl TryFrom<String> for LithologyLabel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LithologyLabel> for String {
    fn from(label: LithologyLabel) -> Self {
        label.to_string()
    }
}

/// Output of one classification method: one optional label per store sample.
///
/// `None` marks depths where the method's input curves were absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSeries {
    pub labels: Vec<Option<LithologyLabel>>,
}

impl LabeledSeries {
    pub fn new(labels: Vec<Option<LithologyLabel>>) -> Self {
        Self { labels }
    }

    /// Number of depths that received a label.
    pub fn labeled_count(&self) -> usize {
        self.labels.iter().flatten().count()
    }

    /// Count of each label over labelled depths.
    pub fn counts(&self) -> BTreeMap<LithologyLabel, usize> {
        let mut counts = BTreeMap::new();
        for label in self.labels.iter().flatten() {
            *counts.entry(*label).or_insert(0) += 1;
        }
        counts
    }

    /// Percentage of labelled depths carrying each label.
    pub fn distribution(&self) -> BTreeMap<String, f64> {
        let total = self.labeled_count();
        if total == 0 {
            return BTreeMap::new();
        }
        self.counts()
            .into_iter()
            .map(|(label, count)| (label.to_string(), count as f64 / total as f64 * 100.0))
            .collect()
    }
}
