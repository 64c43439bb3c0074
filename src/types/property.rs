//! Reservoir property estimates.

use serde::{Deserialize, Serialize};

/// How a property value was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateMethod {
    /// Mean of density and neutron porosity
    NeutronDensityAverage,
    /// Density porosity substituted in a gas zone
    DensityGasCorrected,
    /// Archie water saturation
    Archie,
    /// Mean of Kozeny-Carman and Timur permeability
    KozenyCarmanTimurMean,
    /// Gamma-ray cutoff net flag
    GammaRayCutoff,
}

/// Per-sample diagnostic flag attached to an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateFlag {
    /// Neutron porosity reads more than the separation below density porosity
    GasEffectDetected,
    /// Porosity was raised to the configured floor before power/division
    PorosityFloored,
    /// Raw value fell outside the physical range and was clipped
    Clipped,
}

/// One property value at one depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyEstimate {
    pub value: f64,
    pub method: EstimateMethod,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<EstimateFlag>,
}

impl PropertyEstimate {
    pub fn new(value: f64, method: EstimateMethod) -> Self {
        Self {
            value,
            method,
            flags: Vec::new(),
        }
    }

    pub fn flagged(mut self, flag: EstimateFlag) -> Self {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    pub fn has_flag(&self, flag: EstimateFlag) -> bool {
        self.flags.contains(&flag)
    }
}

/// Depth-aligned series of estimates; `None` where inputs were absent.
pub type EstimateSeries = Vec<Option<PropertyEstimate>>;

/// Mean over the present values of a depth-aligned optional series.
pub fn mean_present(values: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
