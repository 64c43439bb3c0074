//! Lithology Tests
//!
//! All four classifiers run against a layered synthetic well, where the rock
//! type of every depth is known in advance.

use petrolog::lithology::{self, ClusteringMethod, GammaRayMethod, PhotoelectricMethod};
use petrolog::synthetic::{Layer, SyntheticWell};
use petrolog::types::{DiagnosticLevel, LabeledSeries};
use petrolog::{InterpretationConfig, LithologyLabel, MeasurementStore};

fn synthetic_store(well: &SyntheticWell) -> MeasurementStore {
    let config = InterpretationConfig::default();
    MeasurementStore::from_raw(well.generate(), &config.curves, &config.ingest).unwrap()
}

/// Fraction of labelled depths within `layer` that carry `label`.
fn layer_share(well: &SyntheticWell, series: &LabeledSeries, layer: Layer, label: LithologyLabel) -> f64 {
    let in_layer: Vec<LithologyLabel> = series
        .labels
        .iter()
        .enumerate()
        .filter(|(i, _)| well.layer_at(*i) == layer)
        .filter_map(|(_, l)| *l)
        .collect();
    assert!(!in_layer.is_empty(), "no labelled depths in {layer:?}");
    in_layer.iter().filter(|l| **l == label).count() as f64 / in_layer.len() as f64
}

// ============================================================================
// Layer recovery
// ============================================================================

#[test]
fn gamma_ray_separates_shale_from_clean_sand() {
    let well = SyntheticWell::new(1000, 42);
    let store = synthetic_store(&well);
    let result = GammaRayMethod.run(&store, &InterpretationConfig::default()).unwrap();

    assert!(result.clean_baseline < result.shale_baseline);
    assert!(layer_share(&well, &result.lithology, Layer::Shale, LithologyLabel::Shale) > 0.9);
    assert!(
        layer_share(&well, &result.lithology, Layer::WaterSand, LithologyLabel::CleanSandstone) > 0.8
    );
}

#[test]
fn gamma_ray_shale_volume_stays_in_unit_interval() {
    let store = synthetic_store(&SyntheticWell::new(600, 5));
    let result = GammaRayMethod.run(&store, &InterpretationConfig::default()).unwrap();
    for v in result
        .v_shale_tertiary
        .iter()
        .chain(&result.v_shale_older)
        .chain(&result.index)
        .flatten()
    {
        assert!((0.0..=1.0).contains(v), "shale volume {v} out of range");
    }
}

#[test]
fn neutron_density_flags_the_gas_sand() {
    let well = SyntheticWell::new(1000, 42);
    let store = synthetic_store(&well);
    let set = lithology::classify_all(&store, &InterpretationConfig::default());
    let nd = set.neutron_density.unwrap();

    assert!(nd.gas_count > 0);
    assert!(layer_share(&well, &nd.lithology, Layer::GasSand, LithologyLabel::GasSand) > 0.9);
    assert!(layer_share(&well, &nd.lithology, Layer::Shale, LithologyLabel::GasSand) < 0.05);
}

#[test]
fn photoelectric_reads_limestone_as_calcite() {
    let well = SyntheticWell::new(1000, 42);
    let store = synthetic_store(&well);
    let result = PhotoelectricMethod.run(&store, &InterpretationConfig::default()).unwrap();

    assert!(layer_share(&well, &result.lithology, Layer::Limestone, LithologyLabel::Calcite) > 0.5);
    assert_eq!(
        result.unknown_count,
        result.lithology.counts().get(&LithologyLabel::Unknown).copied().unwrap_or(0)
    );
}

// ============================================================================
// Clustering
// ============================================================================

#[test]
fn clustering_is_reproducible_for_a_fixed_seed() {
    let store = synthetic_store(&SyntheticWell::new(400, 11));
    let config = InterpretationConfig::default();
    let a = ClusteringMethod.run(&store, &config).unwrap();
    let b = ClusteringMethod.run(&store, &config).unwrap();

    assert_eq!(a.k, b.k);
    assert_eq!(a.lithology, b.lithology);
    assert_eq!(a.inertias, b.inertias);
}

#[test]
fn clustering_labels_only_joint_rows_with_facies_in_range() {
    let store = synthetic_store(&SyntheticWell::new(400, 11));
    let result = ClusteringMethod.run(&store, &InterpretationConfig::default()).unwrap();

    assert_eq!(result.curves.len(), 5);
    assert_eq!(result.lithology.labeled_count(), result.joint_count);
    assert!(result.joint_count < store.sample_count(), "nulls should exclude some rows");
    assert!(result.k_candidates.contains(&result.k));
    assert_eq!(result.cluster_sizes.iter().sum::<usize>(), result.joint_count);
    for label in result.lithology.labels.iter().flatten() {
        match label {
            LithologyLabel::Facies(f) => assert!(*f < result.k),
            other => panic!("unexpected clustering label {other:?}"),
        }
    }
}

#[test]
fn clustering_sweep_shrinks_for_short_logs() {
    let store = synthetic_store(&SyntheticWell::new(20, 3).with_null_fraction(0.0));
    let result = ClusteringMethod.run(&store, &InterpretationConfig::default()).unwrap();
    // 20 rows at 5 per cluster allows k up to 4
    assert_eq!(result.k_candidates, vec![2, 3, 4]);
    assert_eq!(result.inertias.len(), 3);
}

// ============================================================================
// Orchestration
// ============================================================================

#[test]
fn classify_all_runs_every_method_on_a_complete_log() {
    let store = synthetic_store(&SyntheticWell::new(300, 9));
    let set = lithology::classify_all(&store, &InterpretationConfig::default());

    assert_eq!(set.present_count(), 4);
    assert!(set
        .diagnostics
        .iter()
        .all(|d| d.level == DiagnosticLevel::Info));
    for series in [
        &set.gamma_ray.as_ref().unwrap().lithology,
        &set.neutron_density.as_ref().unwrap().lithology,
        &set.photoelectric.as_ref().unwrap().lithology,
        &set.clustering.as_ref().unwrap().lithology,
    ] {
        assert_eq!(series.labels.len(), store.sample_count());
    }
}

#[test]
fn missing_curves_skip_only_the_methods_that_need_them() {
    // Gamma ray and PE only: neutron-density cannot run, clustering still has two curves
    let n = 40;
    let depths: Vec<f64> = (0..n).map(|i| 2000.0 + f64::from(i) * 0.5).collect();
    let gr: Vec<Option<f64>> = (0..n)
        .map(|i| {
            let base = if i < 20 { 30.0 } else { 110.0 };
            Some(base + f64::from(i % 3))
        })
        .collect();
    let pe: Vec<Option<f64>> = (0..n).map(|i| Some(if i < 20 { 1.85 } else { 3.1 })).collect();
    let store = MeasurementStore::from_columns(depths, vec![("GR", gr), ("PE", pe)]).unwrap();

    let set = lithology::classify_all(&store, &InterpretationConfig::default());
    assert!(set.gamma_ray.is_some());
    assert!(set.photoelectric.is_some());
    assert!(set.clustering.is_some());
    assert!(set.neutron_density.is_none());

    let skips: Vec<_> = set
        .diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Skip)
        .collect();
    assert_eq!(skips.len(), 1);
    assert_eq!(skips[0].component, "neutronDensity");
}
