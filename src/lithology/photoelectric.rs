//! Photoelectric-factor mineral lookup.
//!
//! Ranges are inclusive and may overlap; the first range in table order wins.

use serde::Serialize;

use super::{require_curve, require_valid, LithologyMethod, LithologyResult};
use crate::config::{InterpretationConfig, PhotoelectricConfig};
use crate::store::MeasurementStore;
use crate::types::{CurveRole, LabeledSeries, LithologyLabel, SkipReason};

pub const KEY: &str = "photoelectric";

pub fn classify_pe(pe: f64, config: &PhotoelectricConfig) -> LithologyLabel {
    config
        .ranges
        .iter()
        .find(|r| pe >= r.min && pe <= r.max)
        .map_or(LithologyLabel::Unknown, |r| r.label)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoelectricResult {
    pub curve: String,
    /// Valid readings that matched no range
    pub unknown_count: usize,
    pub lithology: LabeledSeries,
}

pub struct PhotoelectricMethod;

impl PhotoelectricMethod {
    pub fn run(
        &self,
        store: &MeasurementStore,
        config: &InterpretationConfig,
    ) -> Result<PhotoelectricResult, SkipReason> {
        let curve = require_curve(store, CurveRole::Photoelectric, &config.curves)?;
        require_valid(curve, 1)?;

        let lithology = LabeledSeries::new(
            curve
                .values()
                .iter()
                .map(|v| v.map(|pe| classify_pe(pe, &config.photoelectric)))
                .collect(),
        );
        let unknown_count = lithology
            .labels
            .iter()
            .filter(|l| **l == Some(LithologyLabel::Unknown))
            .count();

        Ok(PhotoelectricResult {
            curve: curve.mnemonic().to_string(),
            unknown_count,
            lithology,
        })
    }
}

impl LithologyMethod for PhotoelectricMethod {
    fn key(&self) -> &'static str {
        KEY
    }

    fn classify(
        &self,
        store: &MeasurementStore,
        config: &InterpretationConfig,
    ) -> Result<LithologyResult, SkipReason> {
        self.run(store, config).map(LithologyResult::Photoelectric)
    }
}
