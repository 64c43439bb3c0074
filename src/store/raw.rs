//! Ingestion interface: what a file reader hands to the store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::CurveInfo;

/// Parsed but uninterpreted log data.
///
/// `rows[i][j]` is the reading of `curves[j]` at row `i`. Values may already be
/// `None` or may still carry the raw null sentinel; the store normalizes both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLog {
    pub curves: Vec<CurveInfo>,
    pub rows: Vec<Vec<Option<f64>>>,
    /// Free-form well header (e.g. WELL, FLD, COMP from a LAS `~W` section)
    #[serde(default)]
    pub well: BTreeMap<String, String>,
    /// Mnemonic the source declares as its index axis, if any
    #[serde(default)]
    pub index_hint: Option<String>,
}

impl RawLog {
    pub fn new(curves: Vec<CurveInfo>) -> Self {
        Self {
            curves,
            ..Self::default()
        }
    }

    pub fn with_index_hint(mut self, mnemonic: impl Into<String>) -> Self {
        self.index_hint = Some(mnemonic.into());
        self
    }

    pub fn push_row(&mut self, row: Vec<Option<f64>>) {
        self.rows.push(row);
    }

    /// Convenience for fully-populated rows (sentinels still normalized later).
    pub fn push_values(&mut self, row: &[f64]) {
        self.rows.push(row.iter().copied().map(Some).collect());
    }
}
