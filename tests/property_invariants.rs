//! Property Invariant Tests
//!
//! Range and alignment guarantees of the property calculator over synthetic
//! logs, plus the skip cascade when inputs are missing.

use petrolog::properties::{self, COMPONENT_PERMEABILITY, COMPONENT_SATURATION};
use petrolog::synthetic::{Layer, SyntheticWell};
use petrolog::types::DiagnosticLevel;
use petrolog::{EstimateFlag, EstimateMethod, InterpretationConfig, MeasurementStore};

fn synthetic_store(well: &SyntheticWell) -> MeasurementStore {
    let config = InterpretationConfig::default();
    MeasurementStore::from_raw(well.generate(), &config.curves, &config.ingest).unwrap()
}

// ============================================================================
// Ranges
// ============================================================================

#[test]
fn every_property_stays_in_its_physical_range() {
    let config = InterpretationConfig::default();
    for seed in [1, 2, 3] {
        let store = synthetic_store(&SyntheticWell::new(500, seed));
        let set = properties::calculate_all(&store, &config);
        let max_phi = config.porosity.max_porosity;

        let phi = set.porosity.as_ref().unwrap();
        for series in [&phi.density_porosity, &phi.neutron_porosity, &phi.combined_porosity] {
            for v in series.iter().flatten() {
                assert!((0.0..=max_phi).contains(v), "porosity {v} out of range");
            }
        }
        for v in phi.corrected_values().iter().flatten() {
            assert!((0.0..=max_phi).contains(v));
        }

        let sw = set.water_saturation.as_ref().unwrap();
        for v in sw.water_values().iter().flatten() {
            assert!((0.0..=1.0).contains(v), "Sw {v} out of range");
        }

        let k = set.permeability.as_ref().unwrap();
        for v in k.values().iter().chain(&k.kozeny_carman).chain(&k.timur).flatten() {
            assert!(v.is_finite() && *v >= 0.0, "permeability {v} invalid");
        }

        let ntg = set.net_to_gross.as_ref().unwrap();
        assert!((0.0..=1.0).contains(&ntg.ratio));
        assert!(ntg.net_thickness <= ntg.gross_thickness);
    }
}

#[test]
fn water_and_hydrocarbon_saturation_sum_to_one() {
    let store = synthetic_store(&SyntheticWell::new(400, 8));
    let set = properties::calculate_all(&store, &InterpretationConfig::default());
    let sw = set.water_saturation.unwrap();

    for (w, h) in sw.water_values().iter().zip(&sw.hydrocarbon_saturation) {
        match (w, h) {
            (Some(w), Some(h)) => assert_eq!(w + h, 1.0),
            (None, None) => {}
            other => panic!("misaligned saturation pair {other:?}"),
        }
    }
}

#[test]
fn all_series_are_aligned_with_the_store() {
    let store = synthetic_store(&SyntheticWell::new(250, 4));
    let n = store.sample_count();
    let set = properties::calculate_all(&store, &InterpretationConfig::default());

    let phi = set.porosity.unwrap();
    assert_eq!(phi.corrected_porosity.len(), n);
    assert_eq!(phi.density_porosity.len(), n);
    let sw = set.water_saturation.unwrap();
    assert_eq!(sw.water_saturation.len(), n);
    assert_eq!(sw.formation_factor.len(), n);
    assert_eq!(set.permeability.unwrap().permeability.len(), n);
    assert_eq!(set.net_to_gross.unwrap().net_flags.len(), n);
}

#[test]
fn porosity_is_absent_exactly_where_an_input_is_absent() {
    let store = synthetic_store(&SyntheticWell::new(500, 21).with_null_fraction(0.1));
    let set = properties::calculate_all(&store, &InterpretationConfig::default());
    let phi = set.porosity.unwrap();
    let nphi = store.curve("NPRL").unwrap();
    let rhob = store.curve("DEN").unwrap();

    for i in 0..store.sample_count() {
        let joint = nphi[i].is_some() && rhob[i].is_some();
        assert_eq!(phi.corrected_porosity[i].is_some(), joint, "depth index {i}");
    }
    assert_eq!(
        phi.valid_count,
        phi.corrected_porosity.iter().filter(|p| p.is_some()).count()
    );
}

// ============================================================================
// Gas correction
// ============================================================================

#[test]
fn gas_sand_uses_density_porosity() {
    let well = SyntheticWell::new(1000, 42).with_null_fraction(0.0);
    let store = synthetic_store(&well);
    let set = properties::calculate_all(&store, &InterpretationConfig::default());
    let phi = set.porosity.unwrap();

    let gas_layer: Vec<_> = phi
        .corrected_porosity
        .iter()
        .enumerate()
        .filter(|(i, _)| well.layer_at(*i) == Layer::GasSand)
        .filter_map(|(_, e)| e.as_ref())
        .collect();
    let corrected = gas_layer
        .iter()
        .filter(|e| {
            e.method == EstimateMethod::DensityGasCorrected
                && e.has_flag(EstimateFlag::GasEffectDetected)
        })
        .count();
    assert!(corrected as f64 / gas_layer.len() as f64 > 0.9);

    assert!(phi.gas_count > 0);
    assert!(set
        .diagnostics
        .iter()
        .any(|d| d.component == "porosity" && d.message.contains("gas effect")));
}

// ============================================================================
// Skip cascade
// ============================================================================

#[test]
fn missing_resistivity_skips_saturation_only() {
    let depths: Vec<f64> = (0..10).map(|i| 1000.0 + f64::from(i) * 0.5).collect();
    let store = MeasurementStore::from_columns(
        depths,
        vec![
            ("GR", vec![Some(40.0); 10]),
            ("NPHI", vec![Some(20.0); 10]),
            ("RHOB", vec![Some(2.3); 10]),
        ],
    )
    .unwrap();
    let set = properties::calculate_all(&store, &InterpretationConfig::default());

    assert!(set.porosity.is_some());
    assert!(set.permeability.is_some());
    assert!(set.net_to_gross.is_some());
    assert!(set.water_saturation.is_none());

    let skips: Vec<_> = set
        .diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Skip)
        .collect();
    assert_eq!(skips.len(), 1);
    assert_eq!(skips[0].component, COMPONENT_SATURATION);
}

#[test]
fn missing_density_skips_porosity_and_its_dependants() {
    let depths: Vec<f64> = (0..10).map(|i| 1000.0 + f64::from(i) * 0.5).collect();
    let store = MeasurementStore::from_columns(
        depths,
        vec![
            ("GR", vec![Some(90.0); 10]),
            ("NPHI", vec![Some(20.0); 10]),
            ("RT", vec![Some(10.0); 10]),
        ],
    )
    .unwrap();
    let set = properties::calculate_all(&store, &InterpretationConfig::default());

    assert!(set.porosity.is_none());
    assert!(set.water_saturation.is_none());
    assert!(set.permeability.is_none());
    let ntg = set.net_to_gross.unwrap();
    assert_eq!(ntg.ratio, 0.0);

    let skipped: Vec<&str> = set
        .diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Skip)
        .map(|d| d.component.as_str())
        .collect();
    assert!(skipped.contains(&"porosity"));
    assert!(skipped.contains(&COMPONENT_SATURATION));
    assert!(skipped.contains(&COMPONENT_PERMEABILITY));
}

#[test]
fn irregular_spacing_warns_about_fixed_thickness() {
    let depths: Vec<f64> = (0..10).map(|i| 1000.0 + f64::from(i) * 0.25).collect();
    let store = MeasurementStore::from_columns(depths, vec![("GR", vec![Some(40.0); 10])]).unwrap();
    let set = properties::calculate_all(&store, &InterpretationConfig::default());

    let ntg = set.net_to_gross.unwrap();
    assert_eq!(ntg.gross_thickness, 5.0);
    assert!(set
        .diagnostics
        .iter()
        .any(|d| d.level == DiagnosticLevel::Warning && d.component == "netToGross"));
}
