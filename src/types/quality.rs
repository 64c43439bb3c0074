//! Data-quality report types. Derived and read-only; regenerated on demand.

use serde::{Deserialize, Serialize};

/// IQR outlier result for one curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutlierSummary {
    Evaluated {
        q1: f64,
        q3: f64,
        iqr: f64,
        lower_fence: f64,
        upper_fence: f64,
        count: usize,
        /// Outliers as a fraction of valid values
        fraction: f64,
    },
    /// Too few valid values for a meaningful quartile
    InsufficientData { valid: usize, required: usize },
}

impl OutlierSummary {
    /// Outlier count, `None` when detection was skipped.
    pub fn count(&self) -> Option<usize> {
        match self {
            OutlierSummary::Evaluated { count, .. } => Some(*count),
            OutlierSummary::InsufficientData { .. } => None,
        }
    }
}

/// Descriptive statistics over the valid values of one curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation (n - 1); 0 for a single value
    pub std_dev: f64,
}

/// Quality diagnostics for one curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveQuality {
    pub mnemonic: String,
    pub valid_count: usize,
    pub total_count: usize,
    /// `valid_count / total_count`, 0 for an empty store
    pub completeness: f64,
    pub outliers: OutlierSummary,
    /// Absent for fully-null curves
    pub stats: Option<CurveStats>,
}

/// Log-wide depth diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthSummary {
    pub min: f64,
    pub max: f64,
    pub span: f64,
    pub sample_count: usize,
    /// Median of consecutive depth differences; `None` for fewer than 2 samples
    pub median_spacing: Option<f64>,
    /// Depth values that occur more than once (each reported once)
    pub duplicate_depths: Vec<f64>,
    /// True when ingestion had to sort rows into depth order
    pub reordered: bool,
    /// Rows dropped at ingestion because their depth was absent
    pub dropped_rows: usize,
}

/// Full quality report for a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub depth: DepthSummary,
    /// In store curve order
    pub curves: Vec<CurveQuality>,
}

impl QualityReport {
    pub fn curve(&self, mnemonic: &str) -> Option<&CurveQuality> {
        self.curves
            .iter()
            .find(|c| c.mnemonic.eq_ignore_ascii_case(mnemonic))
    }
}
