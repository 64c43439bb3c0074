//! Archie water saturation.
//!
//! `F = a / phi^m`, `Sw = clip(((Rw * F) / Rt)^(1/n), 0, 1)`, `Sh = 1 - Sw`.
//! Porosity is raised to the configured floor before use so the formation
//! factor stays finite; floored depths carry `PorosityFloored`. Depths with a
//! non-positive resistivity reading are left absent.

use serde::Serialize;
use tracing::debug;

use super::porosity::PorosityResult;
use crate::config::{ArchieConfig, InterpretationConfig};
use crate::lithology::require_curve;
use crate::store::MeasurementStore;
use crate::types::{
    CurveRole, EstimateFlag, EstimateMethod, EstimateSeries, PropertyEstimate, SkipReason,
};

pub fn formation_factor(porosity: f64, archie: &ArchieConfig) -> f64 {
    archie.a / porosity.powf(archie.m)
}

/// Unclipped Archie saturation. `porosity` must already be floored.
pub fn archie_sw_raw(porosity: f64, rt: f64, archie: &ArchieConfig) -> f64 {
    ((archie.rw * formation_factor(porosity, archie)) / rt).powf(1.0 / archie.n)
}

/// Water saturation estimate at one depth, or `None` when `rt` is unusable.
pub fn archie_sw(
    porosity: f64,
    rt: f64,
    archie: &ArchieConfig,
    porosity_floor: f64,
) -> Option<PropertyEstimate> {
    if rt.is_nan() || rt <= 0.0 {
        return None;
    }
    let phi = porosity.max(porosity_floor);
    let raw = archie_sw_raw(phi, rt, archie);
    let sw = raw.clamp(0.0, 1.0);

    let mut estimate = PropertyEstimate::new(sw, EstimateMethod::Archie);
    if phi != porosity {
        estimate = estimate.flagged(EstimateFlag::PorosityFloored);
    }
    if sw != raw {
        estimate = estimate.flagged(EstimateFlag::Clipped);
    }
    Some(estimate)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaturationResult {
    pub resistivity_curve: String,
    pub water_saturation: EstimateSeries,
    pub hydrocarbon_saturation: Vec<Option<f64>>,
    pub formation_factor: Vec<Option<f64>>,
    /// Parameters actually used (defaults are uncalibrated)
    pub archie: ArchieConfig,
    pub valid_count: usize,
}

impl SaturationResult {
    pub fn water_values(&self) -> Vec<Option<f64>> {
        self.water_saturation
            .iter()
            .map(|e| e.as_ref().map(|e| e.value))
            .collect()
    }
}

pub fn calculate(
    store: &MeasurementStore,
    porosity: Option<&PorosityResult>,
    config: &InterpretationConfig,
) -> Result<SaturationResult, SkipReason> {
    let rt = require_curve(store, CurveRole::Resistivity, &config.curves)?;
    let porosity = porosity.ok_or_else(|| SkipReason::MissingDependency {
        dependency: super::COMPONENT_POROSITY.to_string(),
    })?;

    let archie = &config.archie;
    let floor = config.porosity.porosity_floor;
    let n = store.sample_count();
    let mut water_saturation = Vec::with_capacity(n);
    let mut hydrocarbon_saturation = Vec::with_capacity(n);
    let mut formation = Vec::with_capacity(n);

    for (phi, rt) in porosity.corrected_values().into_iter().zip(rt.values()) {
        let estimate = match (phi, rt) {
            (Some(phi), Some(rt)) => archie_sw(phi, *rt, archie, floor),
            _ => None,
        };
        match estimate {
            Some(sw) => {
                let phi = phi.map(|p| p.max(floor));
                formation.push(phi.map(|p| formation_factor(p, archie)));
                hydrocarbon_saturation.push(Some(1.0 - sw.value));
                water_saturation.push(Some(sw));
            }
            None => {
                formation.push(None);
                hydrocarbon_saturation.push(None);
                water_saturation.push(None);
            }
        }
    }

    let valid_count = water_saturation.iter().flatten().count();
    if valid_count == 0 {
        return Err(SkipReason::InsufficientData {
            needed: 1,
            available: 0,
        });
    }
    debug!(valid = valid_count, rw = archie.rw, "Water saturation computed");

    Ok(SaturationResult {
        resistivity_curve: rt.mnemonic().to_string(),
        water_saturation,
        hydrocarbon_saturation,
        formation_factor: formation,
        archie: archie.clone(),
        valid_count,
    })
}
