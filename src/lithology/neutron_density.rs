//! Neutron-density crossplot classification
//!
//! Nearest mineral matrix point in (neutron fraction, bulk density) space,
//! with the density axis down-weighted. Low density together with low neutron
//! porosity is overridden to `GasSand`.

use serde::Serialize;

use super::{require_curve, LithologyMethod, LithologyResult};
use crate::config::{InterpretationConfig, MatrixPoint, NeutronDensityConfig};
use crate::store::MeasurementStore;
use crate::types::{CurveRole, LabeledSeries, LithologyLabel, SkipReason};

pub const KEY: &str = "neutronDensity";

/// Weighted distance from a reading to a matrix point.
pub fn matrix_distance(neutron: f64, density: f64, point: &MatrixPoint, density_weight: f64) -> f64 {
    let dn = neutron - point.neutron;
    let dr = density - point.density;
    (dn * dn + dr * dr * density_weight).sqrt()
}

/// Label a single reading. `neutron` is a fraction, not percent.
///
/// Ties go to the earlier matrix in the table.
pub fn classify_point(neutron: f64, density: f64, config: &NeutronDensityConfig) -> LithologyLabel {
    if density < config.gas_density_max && neutron < config.gas_neutron_max {
        return LithologyLabel::GasSand;
    }
    let mut best: Option<(f64, LithologyLabel)> = None;
    for point in &config.matrices {
        let d = matrix_distance(neutron, density, point, config.density_weight);
        if best.map_or(true, |(bd, _)| d < bd) {
            best = Some((d, point.label));
        }
    }
    best.map_or(LithologyLabel::Unknown, |(_, label)| label)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeutronDensityResult {
    pub neutron_curve: String,
    pub density_curve: String,
    /// Neutron porosity as a fraction at every depth where both curves are present
    pub neutron_fraction: Vec<Option<f64>>,
    /// Depths where both curves were present
    pub joint_count: usize,
    pub gas_count: usize,
    pub lithology: LabeledSeries,
}

pub struct NeutronDensityMethod;

impl NeutronDensityMethod {
    pub fn run(
        &self,
        store: &MeasurementStore,
        config: &InterpretationConfig,
    ) -> Result<NeutronDensityResult, SkipReason> {
        let cfg = &config.neutron_density;
        let neutron = require_curve(store, CurveRole::Neutron, &config.curves)?;
        let density = require_curve(store, CurveRole::Density, &config.curves)?;
        if cfg.matrices.is_empty() {
            return Err(SkipReason::Degenerate {
                detail: "no matrix points configured".to_string(),
            });
        }

        let mut neutron_fraction = Vec::with_capacity(store.sample_count());
        let mut labels = Vec::with_capacity(store.sample_count());
        let mut gas_count = 0;

        for (n, rho) in neutron.values().iter().zip(density.values()) {
            match (n, rho) {
                (Some(n), Some(rho)) => {
                    let frac = n / cfg.neutron_percent_scale;
                    let label = classify_point(frac, *rho, cfg);
                    if label == LithologyLabel::GasSand {
                        gas_count += 1;
                    }
                    neutron_fraction.push(Some(frac));
                    labels.push(Some(label));
                }
                _ => {
                    neutron_fraction.push(None);
                    labels.push(None);
                }
            }
        }

        let lithology = LabeledSeries::new(labels);
        let joint_count = lithology.labeled_count();
        if joint_count == 0 {
            return Err(SkipReason::InsufficientData {
                needed: 1,
                available: 0,
            });
        }

        Ok(NeutronDensityResult {
            neutron_curve: neutron.mnemonic().to_string(),
            density_curve: density.mnemonic().to_string(),
            neutron_fraction,
            joint_count,
            gas_count,
            lithology,
        })
    }
}

impl LithologyMethod for NeutronDensityMethod {
    fn key(&self) -> &'static str {
        KEY
    }

    fn classify(
        &self,
        store: &MeasurementStore,
        config: &InterpretationConfig,
    ) -> Result<LithologyResult, SkipReason> {
        self.run(store, config).map(LithologyResult::NeutronDensity)
    }
}
