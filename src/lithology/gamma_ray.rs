//! Gamma-ray shale volume (Larionov)
//!
//! The gamma-ray reading is normalized between the curve's clean-sand and
//! shale baselines (5th and 95th percentiles by default) and clipped to
//! [0, 1]. Both Larionov corrections are computed; the tertiary-rock estimate
//! drives classification.

use serde::Serialize;
use tracing::debug;

use super::{require_curve, require_valid, LithologyMethod, LithologyResult};
use crate::config::{GammaRayConfig, InterpretationConfig};
use crate::quality::stats::quantile;
use crate::store::MeasurementStore;
use crate::types::{CurveRole, LabeledSeries, LithologyLabel, SkipReason};

pub const KEY: &str = "gammaRay";

/// Larionov shale volume for tertiary (unconsolidated) rocks.
pub fn larionov_tertiary(index: f64) -> f64 {
    0.083 * (2f64.powf(3.7 * index) - 1.0)
}

/// Larionov shale volume for older (consolidated) rocks.
pub fn larionov_older(index: f64) -> f64 {
    0.33 * (2f64.powf(2.0 * index) - 1.0)
}

/// Band a shale volume: clean below the clean threshold, shale at or above the
/// shale threshold, shaly sand in between.
pub fn classify_shale_volume(v_shale: f64, config: &GammaRayConfig) -> LithologyLabel {
    if v_shale < config.clean_max_vshale {
        LithologyLabel::CleanSandstone
    } else if v_shale < config.shale_min_vshale {
        LithologyLabel::ShalySandstone
    } else {
        LithologyLabel::Shale
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaRayResult {
    /// Mnemonic the method read
    pub curve: String,
    /// Clean-sand baseline (low percentile)
    pub clean_baseline: f64,
    /// Shale baseline (high percentile)
    pub shale_baseline: f64,
    /// Gamma-ray index, clipped to [0, 1]
    pub index: Vec<Option<f64>>,
    pub v_shale_tertiary: Vec<Option<f64>>,
    pub v_shale_older: Vec<Option<f64>>,
    pub lithology: LabeledSeries,
}

pub struct GammaRayMethod;

impl GammaRayMethod {
    pub fn run(
        &self,
        store: &MeasurementStore,
        config: &InterpretationConfig,
    ) -> Result<GammaRayResult, SkipReason> {
        let cfg = &config.gamma_ray;
        let curve = require_curve(store, CurveRole::GammaRay, &config.curves)?;
        require_valid(curve, 1)?;

        let valid = curve.valid_values();
        let clean = quantile(&valid, cfg.clean_percentile);
        let shale = quantile(&valid, cfg.shale_percentile);
        let (Some(clean), Some(shale)) = (clean, shale) else {
            return Err(SkipReason::InsufficientData {
                needed: 1,
                available: 0,
            });
        };
        let range = shale - clean;
        if range <= 0.0 {
            return Err(SkipReason::Degenerate {
                detail: format!("gamma-ray baselines coincide at {clean:.2}"),
            });
        }

        let index: Vec<Option<f64>> = curve
            .values()
            .iter()
            .map(|v| v.map(|gr| ((gr - clean) / range).clamp(0.0, 1.0)))
            .collect();
        let v_shale_tertiary: Vec<Option<f64>> =
            index.iter().map(|g| g.map(larionov_tertiary)).collect();
        let v_shale_older: Vec<Option<f64>> = index.iter().map(|g| g.map(larionov_older)).collect();
        let lithology = LabeledSeries::new(
            v_shale_tertiary
                .iter()
                .map(|v| v.map(|v| classify_shale_volume(v, cfg)))
                .collect(),
        );

        debug!(
            curve = %curve.mnemonic(),
            clean_baseline = clean,
            shale_baseline = shale,
            "Gamma-ray baselines"
        );

        Ok(GammaRayResult {
            curve: curve.mnemonic().to_string(),
            clean_baseline: clean,
            shale_baseline: shale,
            index,
            v_shale_tertiary,
            v_shale_older,
            lithology,
        })
    }
}

impl LithologyMethod for GammaRayMethod {
    fn key(&self) -> &'static str {
        KEY
    }

    fn classify(
        &self,
        store: &MeasurementStore,
        config: &InterpretationConfig,
    ) -> Result<LithologyResult, SkipReason> {
        self.run(store, config).map(LithologyResult::GammaRay)
    }
}
