//! Merged interpretation result handed to reporting collaborators.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::lithology::{ClusteringResult, GammaRayResult, NeutronDensityResult, PhotoelectricResult};
use crate::properties::{NetToGrossResult, PermeabilityResult, PorosityResult, SaturationResult};
use crate::types::{Diagnostic, DiagnosticLevel, QualityReport};

/// Keys of every method result in the bundle, in output order
pub const METHOD_KEYS: [&str; 8] = [
    "gammaRay",
    "neutronDensity",
    "photoelectric",
    "mlClustering",
    "porosity",
    "waterSaturation",
    "permeability",
    "netToGross",
];

/// Identity of the interpreted well
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WellSummary {
    pub name: String,
    pub field: String,
    /// Free-form header from the source
    pub metadata: BTreeMap<String, String>,
    pub depth_curve: String,
    pub depth_min: f64,
    pub depth_max: f64,
    pub sample_count: usize,
    /// Mnemonics in store order, depth excluded
    pub curves: Vec<String>,
}

/// Everything one run produces. Absent methods serialize as `null`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretationBundle {
    pub generated_at: DateTime<Utc>,
    pub well: WellSummary,
    pub quality: QualityReport,

    pub gamma_ray: Option<GammaRayResult>,
    pub neutron_density: Option<NeutronDensityResult>,
    pub photoelectric: Option<PhotoelectricResult>,
    pub ml_clustering: Option<ClusteringResult>,

    pub porosity: Option<PorosityResult>,
    pub water_saturation: Option<SaturationResult>,
    pub permeability: Option<PermeabilityResult>,
    pub net_to_gross: Option<NetToGrossResult>,

    pub diagnostics: Vec<Diagnostic>,
}

impl InterpretationBundle {
    /// Whether the method under `key` produced a result. Unknown keys are `false`.
    pub fn is_present(&self, key: &str) -> bool {
        match key {
            "gammaRay" => self.gamma_ray.is_some(),
            "neutronDensity" => self.neutron_density.is_some(),
            "photoelectric" => self.photoelectric.is_some(),
            "mlClustering" => self.ml_clustering.is_some(),
            "porosity" => self.porosity.is_some(),
            "waterSaturation" => self.water_saturation.is_some(),
            "permeability" => self.permeability.is_some(),
            "netToGross" => self.net_to_gross.is_some(),
            _ => false,
        }
    }

    pub fn present_methods(&self) -> Vec<&'static str> {
        METHOD_KEYS
            .iter()
            .copied()
            .filter(|k| self.is_present(k))
            .collect()
    }

    pub fn skipped_methods(&self) -> Vec<&'static str> {
        METHOD_KEYS
            .iter()
            .copied()
            .filter(|k| !self.is_present(k))
            .collect()
    }

    pub fn diagnostics_at(&self, level: DiagnosticLevel) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.level == level)
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
