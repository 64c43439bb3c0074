//! Net-to-gross from a gamma-ray cutoff.
//!
//! A depth is net when its gamma-ray reading is below the cutoff. Gross
//! counts depths with a valid reading. Thickness is `count * spacing`, where
//! spacing is the configured constant (`fixed_spacing`, the default) or the
//! measured median depth interval (`median_spacing`).

use serde::Serialize;
use tracing::debug;

use crate::config::{InterpretationConfig, ThicknessMode};
use crate::lithology::{require_curve, require_valid};
use crate::quality::stats;
use crate::store::MeasurementStore;
use crate::types::{CurveRole, SkipReason};

/// Relative difference between configured and measured spacing worth reporting
pub const SPACING_DIVERGENCE: f64 = 0.01;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetToGrossResult {
    pub curve: String,
    pub cutoff: f64,
    /// Per-depth net flag; `None` where gamma ray is absent
    pub net_flags: Vec<Option<bool>>,
    pub net_count: usize,
    pub gross_count: usize,
    pub thickness_mode: ThicknessMode,
    /// Spacing the thicknesses were computed with
    pub sample_spacing: f64,
    /// Median depth interval of the store, if it has two or more samples
    pub measured_spacing: Option<f64>,
    pub net_thickness: f64,
    pub gross_thickness: f64,
    pub ratio: f64,
}

impl NetToGrossResult {
    /// Relative gap between the configured and measured spacing.
    pub fn spacing_divergence(&self, configured: f64) -> Option<f64> {
        let measured = self.measured_spacing?;
        if measured <= 0.0 {
            return None;
        }
        Some((configured - measured).abs() / measured)
    }

    /// True when median spacing was requested but the measured interval was
    /// unusable (duplicate depths), so the configured spacing was applied.
    pub fn median_spacing_rejected(&self) -> bool {
        self.thickness_mode == ThicknessMode::MedianSpacing
            && self.measured_spacing.is_some_and(|m| usable_spacing(m).is_none())
    }
}

fn usable_spacing(measured: f64) -> Option<f64> {
    (measured.is_finite() && measured > 0.0).then_some(measured)
}

pub fn calculate(
    store: &MeasurementStore,
    config: &InterpretationConfig,
) -> Result<NetToGrossResult, SkipReason> {
    let cfg = &config.net_to_gross;
    let gr = require_curve(store, CurveRole::GammaRay, &config.curves)?;
    require_valid(gr, 1)?;

    let net_flags: Vec<Option<bool>> = gr
        .values()
        .iter()
        .map(|v| v.map(|g| g < cfg.gr_cutoff))
        .collect();
    let gross_count = net_flags.iter().flatten().count();
    let net_count = net_flags.iter().flatten().filter(|n| **n).count();

    let measured_spacing = stats::median(&stats::diffs(store.depths()));
    let sample_spacing = match (cfg.thickness_mode, measured_spacing) {
        (ThicknessMode::MedianSpacing, Some(m)) => usable_spacing(m).unwrap_or(cfg.sample_spacing),
        _ => cfg.sample_spacing,
    };

    let net_thickness = net_count as f64 * sample_spacing;
    let gross_thickness = gross_count as f64 * sample_spacing;
    let ratio = if gross_thickness > 0.0 {
        net_thickness / gross_thickness
    } else {
        0.0
    };

    debug!(
        net = net_count,
        gross = gross_count,
        ratio,
        spacing = sample_spacing,
        "Net-to-gross computed"
    );

    Ok(NetToGrossResult {
        curve: gr.mnemonic().to_string(),
        cutoff: cfg.gr_cutoff,
        net_flags,
        net_count,
        gross_count,
        thickness_mode: cfg.thickness_mode,
        sample_spacing,
        measured_spacing,
        net_thickness,
        gross_thickness,
        ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gr_store(values: Vec<Option<f64>>, step: f64) -> MeasurementStore {
        let depths = (0..values.len()).map(|i| 2000.0 + i as f64 * step).collect();
        MeasurementStore::from_columns(depths, vec![("GR", values)]).unwrap()
    }

    #[test]
    fn test_all_clean_is_one() {
        let r = calculate(&gr_store(vec![Some(40.0); 8], 0.5), &InterpretationConfig::default())
            .unwrap();
        assert_eq!(r.ratio, 1.0);
        assert_eq!(r.net_thickness, 4.0);
    }

    #[test]
    fn test_all_shale_is_zero() {
        let r = calculate(&gr_store(vec![Some(120.0); 8], 0.5), &InterpretationConfig::default())
            .unwrap();
        assert_eq!(r.ratio, 0.0);
        assert_eq!(r.net_count, 0);
    }

    #[test]
    fn test_cutoff_is_strict_and_nulls_excluded() {
        let r = calculate(
            &gr_store(vec![Some(74.9), Some(75.0), None, Some(30.0)], 0.5),
            &InterpretationConfig::default(),
        )
        .unwrap();
        assert_eq!(r.net_flags, vec![Some(true), Some(false), None, Some(true)]);
        assert_eq!(r.gross_count, 3);
        assert!(r.ratio > 0.0 && r.ratio < 1.0);
        assert!((r.ratio - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_median_spacing_falls_back_to_configured() {
        let store = MeasurementStore::from_columns(
            vec![100.0, 100.0, 100.0, 100.0, 101.0],
            vec![("GR", vec![Some(40.0); 5])],
        )
        .unwrap();
        let mut config = InterpretationConfig::default();
        config.net_to_gross.thickness_mode = ThicknessMode::MedianSpacing;

        let r = calculate(&store, &config).unwrap();
        assert_eq!(r.measured_spacing, Some(0.0));
        assert_eq!(r.sample_spacing, 0.5);
        assert_eq!(r.gross_thickness, 2.5);
        assert_eq!(r.ratio, 1.0);
        assert!(r.median_spacing_rejected());
    }

    #[test]
    fn test_fixed_spacing_ignores_measured_interval() {
        let r = calculate(&gr_store(vec![Some(40.0); 5], 0.25), &InterpretationConfig::default())
            .unwrap();
        assert_eq!(r.sample_spacing, 0.5);
        assert_eq!(r.measured_spacing, Some(0.25));
        assert_eq!(r.gross_thickness, 2.5);
        assert_eq!(r.spacing_divergence(0.5), Some(1.0));
    }

    #[test]
    fn test_median_spacing_mode() {
        let mut cfg = InterpretationConfig::default();
        cfg.net_to_gross.thickness_mode = ThicknessMode::MedianSpacing;
        let r = calculate(&gr_store(vec![Some(40.0); 5], 0.25), &cfg).unwrap();
        assert_eq!(r.sample_spacing, 0.25);
        assert_eq!(r.gross_thickness, 1.25);
    }

    #[test]
    fn test_missing_gamma_ray_skips() {
        let store =
            MeasurementStore::from_columns(vec![1.0], vec![("RHOB", vec![Some(2.4)])]).unwrap();
        let err = calculate(&store, &InterpretationConfig::default()).unwrap_err();
        assert_eq!(err, SkipReason::MissingCurve { role: CurveRole::GammaRay });
    }
}
