//! Empirical permeability from corrected porosity (millidarcy).
//!
//! Reported value is the mean of Kozeny-Carman and Timur. No upper clip:
//! both formulas grow without bound as porosity approaches 1.

use serde::Serialize;
use tracing::debug;

use super::porosity::PorosityResult;
use crate::config::{InterpretationConfig, PermeabilityConfig};
use crate::types::{EstimateFlag, EstimateMethod, EstimateSeries, PropertyEstimate, SkipReason};

/// `C * phi^3 / (1 - phi)^2`
pub fn kozeny_carman(porosity: f64, config: &PermeabilityConfig) -> f64 {
    config.kozeny_carman_coefficient * porosity.powi(3) / (1.0 - porosity).powi(2)
}

/// `C * phi^e / (1 - phi)^2`
pub fn timur(porosity: f64, config: &PermeabilityConfig) -> f64 {
    config.timur_coefficient * porosity.powf(config.timur_exponent) / (1.0 - porosity).powi(2)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermeabilityResult {
    pub kozeny_carman: Vec<Option<f64>>,
    pub timur: Vec<Option<f64>>,
    /// Mean of the two correlations
    pub permeability: EstimateSeries,
}

impl PermeabilityResult {
    pub fn values(&self) -> Vec<Option<f64>> {
        self.permeability
            .iter()
            .map(|e| e.as_ref().map(|e| e.value))
            .collect()
    }
}

pub fn calculate(
    porosity: Option<&PorosityResult>,
    config: &InterpretationConfig,
) -> Result<PermeabilityResult, SkipReason> {
    let porosity = porosity.ok_or_else(|| SkipReason::MissingDependency {
        dependency: super::COMPONENT_POROSITY.to_string(),
    })?;
    let cfg = &config.permeability;
    let floor = config.porosity.porosity_floor;

    let values = porosity.corrected_values();
    let mut kc_series = Vec::with_capacity(values.len());
    let mut timur_series = Vec::with_capacity(values.len());
    let mut permeability = Vec::with_capacity(values.len());

    for phi in values {
        let Some(raw) = phi else {
            kc_series.push(None);
            timur_series.push(None);
            permeability.push(None);
            continue;
        };
        let phi = raw.max(floor);
        let kc = kozeny_carman(phi, cfg);
        let t = timur(phi, cfg);
        let mut estimate =
            PropertyEstimate::new((kc + t) / 2.0, EstimateMethod::KozenyCarmanTimurMean);
        if phi != raw {
            estimate = estimate.flagged(EstimateFlag::PorosityFloored);
        }
        kc_series.push(Some(kc));
        timur_series.push(Some(t));
        permeability.push(Some(estimate));
    }

    debug!(
        samples = permeability.iter().flatten().count(),
        "Permeability computed"
    );

    Ok(PermeabilityResult {
        kozeny_carman: kc_series,
        timur: timur_series,
        permeability,
    })
}
