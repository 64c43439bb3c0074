//! Curve metadata and the logical roles the interpreter looks curves up by.

use serde::{Deserialize, Serialize};

/// Metadata for one measurement channel as supplied by the ingestion side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveInfo {
    /// Curve mnemonic as written in the source file (e.g. "GR", "RHOB")
    pub mnemonic: String,
    /// Unit string, empty when the source did not provide one
    #[serde(default)]
    pub unit: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
}

impl CurveInfo {
    pub fn new(mnemonic: impl Into<String>) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            unit: String::new(),
            description: String::new(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Logical curve roles. Deployments map each role to a list of mnemonic
/// aliases in `[curves]`; the first alias present in the store wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveRole {
    Depth,
    GammaRay,
    Neutron,
    Density,
    Photoelectric,
    Resistivity,
}

impl CurveRole {
    /// Roles considered by the clustering fallback, in feature order.
    pub const CLUSTERING_CANDIDATES: [CurveRole; 5] = [
        CurveRole::GammaRay,
        CurveRole::Neutron,
        CurveRole::Density,
        CurveRole::Photoelectric,
        CurveRole::Resistivity,
    ];
}

impl std::fmt::Display for CurveRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurveRole::Depth => write!(f, "depth"),
            CurveRole::GammaRay => write!(f, "gamma ray"),
            CurveRole::Neutron => write!(f, "neutron porosity"),
            CurveRole::Density => write!(f, "bulk density"),
            CurveRole::Photoelectric => write!(f, "photoelectric factor"),
            CurveRole::Resistivity => write!(f, "true resistivity"),
        }
    }
}
