//! Store and Quality Tests
//!
//! Ingestion from raw rows and LAS text, null normalization, depth ordering,
//! and the quality report computed over the resulting store.

use petrolog::config::{CurveAliases, IngestConfig, QualityConfig};
use petrolog::quality;
use petrolog::store::las;
use petrolog::types::{CurveInfo, DiagnosticLevel, OutlierSummary};
use petrolog::{MeasurementStore, RawLog, StoreError};

fn raw(curves: &[&str], rows: &[&[f64]]) -> RawLog {
    let mut log = RawLog::new(curves.iter().map(|m| CurveInfo::new(*m)).collect());
    for row in rows {
        log.push_values(row);
    }
    log
}

fn build(log: RawLog) -> Result<MeasurementStore, StoreError> {
    MeasurementStore::from_raw(log, &CurveAliases::default(), &IngestConfig::default())
}

const LAS_TEXT: &str = "\
~Version Information
 VERS.   2.0 : CWLS LOG ASCII STANDARD
 WRAP.   NO  : One line per depth step
~Well Information
 STRT.FT  1000.0 : Start depth
 NULL.    -999.25 : Null value
 WELL.    TEST-7 : Well name
 FLD .    NORTH  : Field
~Curve Information
 DEPT.FT     : Depth
 GR  .GAPI   : Gamma ray
 RHOB.G/C3   : Bulk density
~A
 1000.0  45.0  2.40
 1000.5  -999.25  2.38
 1001.0  120.0  -999.25
 1001.5  60.0  2.45
";

// ============================================================================
// Ingestion
// ============================================================================

#[test]
fn sentinel_and_non_finite_values_become_absent() {
    let store = build(raw(
        &["DEPT", "GR"],
        &[&[1000.0, 50.0], &[1000.5, -999.25], &[1001.0, f64::NAN], &[1001.5, 70.0]],
    ))
    .unwrap();

    assert_eq!(store.curve("GR").unwrap(), &[Some(50.0), None, None, Some(70.0)]);
    assert_eq!(store.ingest_stats().nulls_normalized, 2);
}

#[test]
fn unsorted_rows_are_sorted_and_flagged() {
    let store = build(raw(
        &["DEPT", "GR"],
        &[&[1001.0, 3.0], &[1000.0, 1.0], &[1000.5, 2.0]],
    ))
    .unwrap();

    assert_eq!(store.depths(), &[1000.0, 1000.5, 1001.0]);
    assert_eq!(store.curve("GR").unwrap(), &[Some(1.0), Some(2.0), Some(3.0)]);
    assert!(store.ingest_stats().reordered);
}

#[test]
fn depth_column_is_found_by_alias_when_not_first() {
    let store = build(raw(&["GR", "DEPTH"], &[&[50.0, 1000.0], &[60.0, 1000.5]])).unwrap();
    assert_eq!(store.depth_info().mnemonic, "DEPTH");
    assert_eq!(store.mnemonics().collect::<Vec<_>>(), vec!["GR"]);
}

#[test]
fn all_depths_absent_is_structural_error() {
    let err = build(raw(&["DEPT", "GR"], &[&[-999.25, 50.0]])).unwrap_err();
    assert!(matches!(err, StoreError::Empty));
}

#[test]
fn ragged_row_is_structural_error() {
    let mut log = raw(&["DEPT", "GR"], &[&[1000.0, 50.0]]);
    log.push_row(vec![Some(1000.5)]);
    let err = build(log).unwrap_err();
    assert!(matches!(err, StoreError::RaggedRow { row: 1, expected: 2, found: 1 }));
}

#[test]
fn lookup_is_case_insensitive() {
    let store = MeasurementStore::from_columns(
        vec![1.0, 2.0],
        vec![("Rhob", vec![Some(2.4), Some(2.5)])],
    )
    .unwrap();
    assert!(store.curve("RHOB").is_some());
    assert!(store.curve("rhob").is_some());
    assert!(store.curve("NPHI").is_none());
}

#[test]
fn sample_view_reads_aligned_values() {
    let store = build(raw(&["DEPT", "GR", "RHOB"], &[&[1000.0, 50.0, 2.4], &[1000.5, 55.0, -999.25]]))
        .unwrap();
    let s = store.sample(1).unwrap();
    assert_eq!(s.depth(), 1000.5);
    assert_eq!(s.value("GR"), Some(55.0));
    assert_eq!(s.value("RHOB"), None);
    assert_eq!(s.values().count(), 2);
    assert!(store.sample(2).is_none());
}

// ============================================================================
// LAS
// ============================================================================

#[test]
fn las_text_builds_store_with_header_metadata() {
    let doc = las::read_las_str(LAS_TEXT).unwrap();
    assert_eq!(doc.skipped_rows, 0);

    let store = build(doc.log).unwrap();
    assert_eq!(store.sample_count(), 4);
    assert_eq!(store.well_metadata().get("WELL").map(String::as_str), Some("TEST-7"));
    assert_eq!(store.curve("GR").unwrap()[1], None);
    assert_eq!(store.curve("RHOB").unwrap()[2], None);
}

#[test]
fn las_write_then_read_preserves_absent_readings() {
    let original = build(las::read_las_str(LAS_TEXT).unwrap().log).unwrap();

    let mut log = RawLog::new(vec![CurveInfo::new("DEPT"), CurveInfo::new("GR"), CurveInfo::new("RHOB")]);
    for s in original.samples() {
        log.push_row(vec![Some(s.depth()), s.value("GR"), s.value("RHOB")]);
    }
    let text = las::write_las(&log, -999.25);
    let reread = build(las::read_las_str(&text).unwrap().log).unwrap();

    assert_eq!(reread.curve("GR"), original.curve("GR"));
    assert_eq!(reread.curve("RHOB"), original.curve("RHOB"));
}

#[test]
fn las_file_can_be_read_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("well.las");
    std::fs::write(&path, LAS_TEXT).unwrap();
    let doc = las::read_las_file(&path).unwrap();
    assert_eq!(doc.log.rows.len(), 4);
}

// ============================================================================
// Quality
// ============================================================================

#[test]
fn completeness_counts_valid_over_total() {
    let store = build(las::read_las_str(LAS_TEXT).unwrap().log).unwrap();
    let report = quality::assess(&store, &QualityConfig::default());

    let gr = report.curve("GR").unwrap();
    assert_eq!(gr.valid_count, 3);
    assert_eq!(gr.total_count, 4);
    assert!((gr.completeness - 0.75).abs() < 1e-12);
    assert!(report.curves.iter().all(|c| c.valid_count <= c.total_count));
}

#[test]
fn single_spike_is_the_only_outlier() {
    let mut values: Vec<Option<f64>> = (1..=20).map(|v| Some(f64::from(v))).collect();
    values.push(Some(500.0));
    let depths = (0..values.len()).map(|i| i as f64).collect();
    let store = MeasurementStore::from_columns(depths, vec![("GR", values)]).unwrap();

    let report = quality::assess(&store, &QualityConfig::default());
    match &report.curve("GR").unwrap().outliers {
        OutlierSummary::Evaluated { count, upper_fence, .. } => {
            assert_eq!(*count, 1);
            assert!(*upper_fence < 500.0);
        }
        other => panic!("expected evaluated outliers, got {other:?}"),
    }
}

#[test]
fn sparse_curve_reports_insufficient_data_instead_of_outliers() {
    let store = MeasurementStore::from_columns(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![("PE", vec![Some(2.0), None, Some(3.0), None, None])],
    )
    .unwrap();
    let report = quality::assess(&store, &QualityConfig::default());
    assert_eq!(
        report.curve("PE").unwrap().outliers,
        OutlierSummary::InsufficientData { valid: 2, required: 4 }
    );

    let diags = quality::diagnostics(&report);
    assert!(diags
        .iter()
        .any(|d| d.level == DiagnosticLevel::Info && d.message.contains("insufficient data")));
    assert!(diags
        .iter()
        .any(|d| d.level == DiagnosticLevel::Warning && d.message.contains("40.0% complete")));
}

#[test]
fn fully_null_curve_has_no_stats() {
    let store = MeasurementStore::from_columns(
        vec![0.0, 1.0],
        vec![("RT", vec![None, None]), ("GR", vec![Some(1.0), Some(3.0)])],
    )
    .unwrap();
    let report = quality::assess(&store, &QualityConfig::default());
    assert!(report.curve("RT").unwrap().stats.is_none());
    let gr = report.curve("GR").unwrap().stats.as_ref().unwrap();
    assert_eq!(gr.mean, 2.0);
    assert_eq!((gr.min, gr.max), (1.0, 3.0));
}

#[test]
fn depth_summary_reports_spacing_and_duplicates() {
    let store = MeasurementStore::from_columns(
        vec![100.0, 100.5, 100.5, 101.0, 101.5],
        vec![("GR", vec![Some(1.0); 5])],
    )
    .unwrap();
    let depth = quality::depth_summary(&store);
    assert_eq!(depth.span, 1.5);
    assert_eq!(depth.median_spacing, Some(0.5));
    assert_eq!(depth.duplicate_depths, vec![100.5]);

    let report = quality::assess(&store, &QualityConfig::default());
    assert!(quality::diagnostics(&report)
        .iter()
        .any(|d| d.level == DiagnosticLevel::Warning && d.message.contains("duplicate depth")));
}

#[test]
fn single_sample_has_no_spacing() {
    let store = MeasurementStore::from_columns(vec![100.0], vec![("GR", vec![Some(1.0)])]).unwrap();
    assert_eq!(quality::depth_summary(&store).median_spacing, None);
}
