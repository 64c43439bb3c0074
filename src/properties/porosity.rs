//! Density/neutron porosity with gas-effect correction.
//!
//! Density and neutron porosity are each clipped to `[0, max_porosity]`.
//! The combined value is their mean, except in gas zones (neutron porosity
//! more than `gas_separation` below density porosity) where density porosity
//! is used and the estimate is flagged.

use serde::Serialize;
use tracing::debug;

use super::COMPONENT_POROSITY;
use crate::config::{InterpretationConfig, PorosityConfig};
use crate::lithology::require_curve;
use crate::store::MeasurementStore;
use crate::types::{
    CurveRole, EstimateFlag, EstimateMethod, EstimateSeries, PropertyEstimate, SkipReason,
};

/// Density porosity, unclipped.
pub fn density_porosity_raw(bulk_density: f64, config: &PorosityConfig) -> f64 {
    (config.matrix_density - bulk_density) / (config.matrix_density - config.fluid_density)
}

/// Porosity at one depth from a neutron fraction and a bulk density.
#[derive(Debug, Clone, PartialEq)]
pub struct PorosityPoint {
    pub density: f64,
    pub neutron: f64,
    pub combined: f64,
    pub corrected: PropertyEstimate,
}

pub fn porosity_at(neutron_fraction: f64, bulk_density: f64, config: &PorosityConfig) -> PorosityPoint {
    let raw_d = density_porosity_raw(bulk_density, config);
    let phi_d = raw_d.clamp(0.0, config.max_porosity);
    let phi_n = neutron_fraction.clamp(0.0, config.max_porosity);
    let combined = (phi_d + phi_n) / 2.0;
    let clipped = raw_d != phi_d || neutron_fraction != phi_n;

    let mut corrected = if phi_n < phi_d - config.gas_separation {
        PropertyEstimate::new(phi_d, EstimateMethod::DensityGasCorrected)
            .flagged(EstimateFlag::GasEffectDetected)
    } else {
        PropertyEstimate::new(combined, EstimateMethod::NeutronDensityAverage)
    };
    if clipped {
        corrected = corrected.flagged(EstimateFlag::Clipped);
    }

    PorosityPoint {
        density: phi_d,
        neutron: phi_n,
        combined,
        corrected,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PorosityResult {
    pub neutron_curve: String,
    pub density_curve: String,
    pub density_porosity: Vec<Option<f64>>,
    pub neutron_porosity: Vec<Option<f64>>,
    pub combined_porosity: Vec<Option<f64>>,
    /// Combined porosity after gas correction; input to saturation and permeability
    pub corrected_porosity: EstimateSeries,
    pub gas_count: usize,
    pub valid_count: usize,
}

impl PorosityResult {
    pub fn corrected_values(&self) -> Vec<Option<f64>> {
        self.corrected_porosity
            .iter()
            .map(|e| e.as_ref().map(|e| e.value))
            .collect()
    }

    /// Fraction of computed depths flagged as gas
    pub fn gas_fraction(&self) -> f64 {
        if self.valid_count == 0 {
            0.0
        } else {
            self.gas_count as f64 / self.valid_count as f64
        }
    }
}

pub fn calculate(
    store: &MeasurementStore,
    config: &InterpretationConfig,
) -> Result<PorosityResult, SkipReason> {
    let neutron = require_curve(store, CurveRole::Neutron, &config.curves)?;
    let density = require_curve(store, CurveRole::Density, &config.curves)?;
    let scale = config.neutron_density.neutron_percent_scale;

    let n = store.sample_count();
    let mut density_porosity = Vec::with_capacity(n);
    let mut neutron_porosity = Vec::with_capacity(n);
    let mut combined_porosity = Vec::with_capacity(n);
    let mut corrected_porosity = Vec::with_capacity(n);
    let mut gas_count = 0;
    let mut valid_count = 0;

    for (nphi, rhob) in neutron.values().iter().zip(density.values()) {
        match (nphi, rhob) {
            (Some(nphi), Some(rhob)) => {
                let p = porosity_at(nphi / scale, *rhob, &config.porosity);
                valid_count += 1;
                if p.corrected.has_flag(EstimateFlag::GasEffectDetected) {
                    gas_count += 1;
                }
                density_porosity.push(Some(p.density));
                neutron_porosity.push(Some(p.neutron));
                combined_porosity.push(Some(p.combined));
                corrected_porosity.push(Some(p.corrected));
            }
            _ => {
                density_porosity.push(None);
                neutron_porosity.push(None);
                combined_porosity.push(None);
                corrected_porosity.push(None);
            }
        }
    }

    if valid_count == 0 {
        return Err(SkipReason::InsufficientData {
            needed: 1,
            available: 0,
        });
    }

    debug!(
        component = COMPONENT_POROSITY,
        valid = valid_count,
        gas = gas_count,
        "Porosity computed"
    );

    Ok(PorosityResult {
        neutron_curve: neutron.mnemonic().to_string(),
        density_curve: density.mnemonic().to_string(),
        density_porosity,
        neutron_porosity,
        combined_porosity,
        corrected_porosity,
        gas_count,
        valid_count,
    })
}
