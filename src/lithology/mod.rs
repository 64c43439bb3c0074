//! Lithology Classifier
//!
//! Four independent classification strategies behind one trait. Each method
//! reads the store, needs a specific set of curves, and either produces a
//! per-depth `LabeledSeries` (plus method-specific detail) or a `SkipReason`.
//! Methods are never reconciled into a single label.
//!
//! ## Methods
//!
//! 1. **gammaRay** - Larionov shale volume from normalized gamma ray
//! 2. **neutronDensity** - nearest mineral matrix in neutron/density space, gas override
//! 3. **photoelectric** - ordered PE range table
//! 4. **mlClustering** - seeded k-means over standardized curves, elbow-selected k

pub mod clustering;
pub mod gamma_ray;
pub mod neutron_density;
pub mod photoelectric;

pub use clustering::{ClusteringMethod, ClusteringResult};
pub use gamma_ray::{GammaRayMethod, GammaRayResult};
pub use neutron_density::{NeutronDensityMethod, NeutronDensityResult};
pub use photoelectric::{PhotoelectricMethod, PhotoelectricResult};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{CurveAliases, InterpretationConfig};
use crate::store::{Curve, MeasurementStore};
use crate::types::{CurveRole, Diagnostic, LabeledSeries, SkipReason};

/// A lithology classification strategy
pub trait LithologyMethod: Send + Sync {
    /// Bundle key (e.g. "gammaRay")
    fn key(&self) -> &'static str;

    /// Classify every depth of the store, or explain why the method cannot run
    fn classify(
        &self,
        store: &MeasurementStore,
        config: &InterpretationConfig,
    ) -> Result<LithologyResult, SkipReason>;
}

/// Output of any one method
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LithologyResult {
    GammaRay(GammaRayResult),
    NeutronDensity(NeutronDensityResult),
    Photoelectric(PhotoelectricResult),
    Clustering(ClusteringResult),
}

impl LithologyResult {
    pub fn series(&self) -> &LabeledSeries {
        match self {
            LithologyResult::GammaRay(r) => &r.lithology,
            LithologyResult::NeutronDensity(r) => &r.lithology,
            LithologyResult::Photoelectric(r) => &r.lithology,
            LithologyResult::Clustering(r) => &r.lithology,
        }
    }
}

/// The four default methods, in bundle order
pub fn default_methods() -> Vec<Box<dyn LithologyMethod>> {
    vec![
        Box::new(GammaRayMethod),
        Box::new(NeutronDensityMethod),
        Box::new(PhotoelectricMethod),
        Box::new(ClusteringMethod),
    ]
}

/// Results of every method, each absent when skipped
#[derive(Debug, Clone, Default)]
pub struct LithologySet {
    pub gamma_ray: Option<GammaRayResult>,
    pub neutron_density: Option<NeutronDensityResult>,
    pub photoelectric: Option<PhotoelectricResult>,
    pub clustering: Option<ClusteringResult>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LithologySet {
    fn insert(&mut self, result: LithologyResult) {
        match result {
            LithologyResult::GammaRay(r) => self.gamma_ray = Some(r),
            LithologyResult::NeutronDensity(r) => self.neutron_density = Some(r),
            LithologyResult::Photoelectric(r) => self.photoelectric = Some(r),
            LithologyResult::Clustering(r) => self.clustering = Some(r),
        }
    }

    /// Number of methods that produced a result
    pub fn present_count(&self) -> usize {
        [
            self.gamma_ray.is_some(),
            self.neutron_density.is_some(),
            self.photoelectric.is_some(),
            self.clustering.is_some(),
        ]
        .iter()
        .filter(|p| **p)
        .count()
    }
}

/// Run all default methods in parallel and collect their results.
pub fn classify_all(store: &MeasurementStore, config: &InterpretationConfig) -> LithologySet {
    let methods = default_methods();
    let outcomes: Vec<(&'static str, Result<LithologyResult, SkipReason>)> = methods
        .par_iter()
        .map(|m| (m.key(), m.classify(store, config)))
        .collect();

    let mut set = LithologySet::default();
    for (key, outcome) in outcomes {
        match outcome {
            Ok(result) => {
                let series = result.series();
                set.diagnostics.push(Diagnostic::info(
                    key,
                    format!(
                        "classified {} of {} depths",
                        series.labeled_count(),
                        series.labels.len()
                    ),
                ));
                set.insert(result);
            }
            Err(reason) => {
                debug!(method = key, reason = %reason, "Lithology method skipped");
                set.diagnostics.push(Diagnostic::skip(key, &reason));
            }
        }
    }

    info!(
        methods_run = set.present_count(),
        methods_total = methods.len(),
        "Lithology classification complete"
    );
    set
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Resolve the curve for `role`, or skip with `MissingCurve`.
pub(crate) fn require_curve<'a>(
    store: &'a MeasurementStore,
    role: CurveRole,
    aliases: &CurveAliases,
) -> Result<&'a Curve, SkipReason> {
    store
        .resolve(role, aliases)
        .ok_or(SkipReason::MissingCurve { role })
}

/// Skip when a curve has fewer than `needed` valid readings.
pub(crate) fn require_valid(curve: &Curve, needed: usize) -> Result<usize, SkipReason> {
    let available = curve.valid_count();
    if available < needed {
        return Err(SkipReason::InsufficientData { needed, available });
    }
    Ok(available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiagnosticLevel;

    #[test]
    fn test_method_keys_are_bundle_keys() {
        let keys: Vec<&str> = default_methods().iter().map(|m| m.key()).collect();
        assert_eq!(keys, vec!["gammaRay", "neutronDensity", "photoelectric", "mlClustering"]);
    }

    #[test]
    fn test_absent_curves_skip_every_method() {
        let store = MeasurementStore::from_columns(
            vec![1.0, 2.0, 3.0],
            vec![("CALI", vec![Some(8.5), Some(8.6), Some(8.4)])],
        )
        .unwrap();
        let set = classify_all(&store, &InterpretationConfig::default());
        assert_eq!(set.present_count(), 0);
        assert_eq!(
            set.diagnostics
                .iter()
                .filter(|d| d.level == DiagnosticLevel::Skip)
                .count(),
            4
        );
    }

    #[test]
    fn test_one_method_runs_while_others_skip() {
        let store = MeasurementStore::from_columns(
            vec![1.0, 2.0, 3.0],
            vec![("PE", vec![Some(1.85), Some(3.1), Some(9.0)])],
        )
        .unwrap();
        let set = classify_all(&store, &InterpretationConfig::default());
        assert!(set.photoelectric.is_some());
        assert!(set.gamma_ray.is_none());
        assert!(set.neutron_density.is_none());
        assert!(set.clustering.is_none());
    }
}
