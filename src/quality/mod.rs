//! Quality Assessor
//!
//! Diagnostic-only pass over the store: completeness and IQR outliers per
//! curve, plus depth span, median spacing and duplicate depths. Pure read;
//! the store is never modified.
//!
//! ## Architecture
//! - `stats`: quantile/median helpers (linear interpolation)
//! - `assess`: builds a `QualityReport` (curves evaluated in parallel via rayon)
//! - `diagnostics`: turns a report into structured `Diagnostic` entries

pub mod stats;

use rayon::prelude::*;
use statrs::statistics::Statistics;
use tracing::{debug, info};

use crate::config::QualityConfig;
use crate::store::{Curve, MeasurementStore};
use crate::types::{
    CurveQuality, CurveStats, DepthSummary, Diagnostic, OutlierSummary, QualityReport,
};

/// Component key used in diagnostics.
pub const COMPONENT: &str = "quality";

/// Completeness below this fraction is called out in diagnostics.
const LOW_COMPLETENESS: f64 = 0.5;

/// Build the full quality report for a store.
pub fn assess(store: &MeasurementStore, config: &QualityConfig) -> QualityReport {
    let total = store.sample_count();
    let curves: Vec<CurveQuality> = store
        .curves()
        .par_iter()
        .map(|c| assess_curve(c, total, config))
        .collect();

    let depth = depth_summary(store);
    info!(
        samples = depth.sample_count,
        span = depth.span,
        median_spacing = ?depth.median_spacing,
        duplicates = depth.duplicate_depths.len(),
        "Quality assessment complete"
    );

    QualityReport { depth, curves }
}

/// Quality of a single curve against the store's sample count.
pub fn assess_curve(curve: &Curve, total: usize, config: &QualityConfig) -> CurveQuality {
    let valid = curve.valid_values();
    let valid_count = valid.len();
    let completeness = if total == 0 {
        0.0
    } else {
        valid_count as f64 / total as f64
    };

    let outliers = iqr_outliers(&valid, config);
    let stats = curve_stats(&valid);

    debug!(
        curve = %curve.mnemonic(),
        valid = valid_count,
        completeness,
        outliers = ?outliers.count(),
        "Curve assessed"
    );

    CurveQuality {
        mnemonic: curve.mnemonic().to_string(),
        valid_count,
        total_count: total,
        completeness,
        outliers,
        stats,
    }
}

/// Tukey IQR rule over valid values. Skipped below `min_valid_for_iqr`.
pub fn iqr_outliers(valid: &[f64], config: &QualityConfig) -> OutlierSummary {
    if valid.len() < config.min_valid_for_iqr {
        return OutlierSummary::InsufficientData {
            valid: valid.len(),
            required: config.min_valid_for_iqr,
        };
    }

    let mut sorted = valid.to_vec();
    sorted.sort_by(f64::total_cmp);
    // Non-empty by the guard above
    let q1 = stats::quantile_sorted(&sorted, 0.25).unwrap_or(f64::NAN);
    let q3 = stats::quantile_sorted(&sorted, 0.75).unwrap_or(f64::NAN);
    let iqr = q3 - q1;
    let lower_fence = q1 - config.iqr_multiplier * iqr;
    let upper_fence = q3 + config.iqr_multiplier * iqr;
    let count = valid
        .iter()
        .filter(|&&v| v < lower_fence || v > upper_fence)
        .count();

    OutlierSummary::Evaluated {
        q1,
        q3,
        iqr,
        lower_fence,
        upper_fence,
        count,
        fraction: count as f64 / valid.len() as f64,
    }
}

fn curve_stats(valid: &[f64]) -> Option<CurveStats> {
    if valid.is_empty() {
        return None;
    }
    let min = valid.iter().copied().fold(f64::INFINITY, f64::min);
    let max = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = Statistics::mean(valid.iter());
    let std_dev = if valid.len() > 1 {
        Statistics::std_dev(valid.iter())
    } else {
        0.0
    };
    Some(CurveStats {
        min,
        max,
        mean,
        std_dev,
    })
}

/// Log-wide depth statistics.
pub fn depth_summary(store: &MeasurementStore) -> DepthSummary {
    let depths = store.depths();
    let (min, max) = store.depth_range();
    let spacing = stats::diffs(depths);

    let mut duplicate_depths: Vec<f64> = depths
        .windows(2)
        .filter(|w| w[0] == w[1])
        .map(|w| w[0])
        .collect();
    duplicate_depths.dedup();

    let ingest = store.ingest_stats();
    DepthSummary {
        min,
        max,
        span: max - min,
        sample_count: depths.len(),
        median_spacing: stats::median(&spacing),
        duplicate_depths,
        reordered: ingest.reordered,
        dropped_rows: ingest.dropped_rows,
    }
}

/// Structured diagnostics for notable findings in a report.
pub fn diagnostics(report: &QualityReport) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let depth = &report.depth;

    if !depth.duplicate_depths.is_empty() {
        out.push(Diagnostic::warning(
            COMPONENT,
            format!(
                "{} duplicate depth value(s), first at {:.2}",
                depth.duplicate_depths.len(),
                depth.duplicate_depths[0]
            ),
        ));
    }
    if depth.reordered {
        out.push(Diagnostic::warning(COMPONENT, "input rows were not in depth order"));
    }
    if depth.dropped_rows > 0 {
        out.push(Diagnostic::warning(
            COMPONENT,
            format!("{} row(s) dropped for missing depth", depth.dropped_rows),
        ));
    }

    for c in &report.curves {
        if c.completeness < LOW_COMPLETENESS {
            out.push(Diagnostic::warning(
                COMPONENT,
                format!(
                    "{}: only {:.1}% complete ({} of {})",
                    c.mnemonic,
                    c.completeness * 100.0,
                    c.valid_count,
                    c.total_count
                ),
            ));
        }
        match &c.outliers {
            OutlierSummary::Evaluated { count, fraction, .. } if *count > 0 => {
                out.push(Diagnostic::info(
                    COMPONENT,
                    format!("{}: {} outliers ({:.1}%)", c.mnemonic, count, fraction * 100.0),
                ));
            }
            OutlierSummary::InsufficientData { valid, required } => {
                out.push(Diagnostic::info(
                    COMPONENT,
                    format!(
                        "{}: outlier detection skipped, insufficient data ({valid} < {required})",
                        c.mnemonic
                    ),
                ));
            }
            OutlierSummary::Evaluated { .. } => {}
        }
    }

    out
}
