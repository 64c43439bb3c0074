//! Measurement Store
//!
//! Depth-indexed, immutable table of curve readings. Built once from a
//! `RawLog`; everything downstream reads it and never mutates it.
//!
//! ## Ingestion rules
//! - The depth axis is the source's declared index, else the first column
//!   matching a configured depth alias, else `StoreError::MissingDepthColumn`
//! - Null sentinels and non-finite readings become `None`
//! - Rows without a usable depth are dropped and counted
//! - Rows are stably sorted into non-decreasing depth order when needed;
//!   duplicate depths are kept for the quality assessor to report

mod raw;
pub mod las;

pub use raw::RawLog;

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{CurveAliases, IngestConfig};
use crate::types::{CurveInfo, CurveRole};

// ============================================================================
// Errors
// ============================================================================

/// Structural ingestion failures. These halt the whole pipeline.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No depth/index column found (looked for {candidates:?})")]
    MissingDepthColumn { candidates: Vec<String> },

    #[error("Row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Curve '{mnemonic}' has {found} values, expected {expected}")]
    LengthMismatch {
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate curve mnemonic: {0}")]
    DuplicateCurve(String),

    #[error("Log contains no samples with a valid depth")]
    Empty,
}

// ============================================================================
// Store
// ============================================================================

/// One curve column: metadata plus depth-aligned optional readings.
#[derive(Debug, Clone, Serialize)]
pub struct Curve {
    pub info: CurveInfo,
    values: Vec<Option<f64>>,
}

impl Curve {
    pub fn mnemonic(&self) -> &str {
        &self.info.mnemonic
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Present readings only, in depth order.
    pub fn valid_values(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Counters describing what ingestion had to repair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Rows dropped because the depth reading was absent
    pub dropped_rows: usize,
    /// True when rows had to be sorted into depth order
    pub reordered: bool,
    /// Readings replaced by an absence marker (sentinel or non-finite)
    pub nulls_normalized: usize,
}

/// One depth plus its readings, viewed through the store.
#[derive(Debug, Clone, Copy)]
pub struct Sample<'a> {
    store: &'a MeasurementStore,
    index: usize,
}

impl<'a> Sample<'a> {
    pub fn depth(&self) -> f64 {
        self.store.depths[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Reading for a mnemonic; `None` if absent here or the curve does not exist.
    pub fn value(&self, mnemonic: &str) -> Option<f64> {
        self.store.curve(mnemonic).and_then(|c| c[self.index])
    }

    /// All (mnemonic, reading) pairs in store curve order.
    pub fn values(&self) -> impl Iterator<Item = (&'a str, Option<f64>)> + 'a {
        let index = self.index;
        self.store
            .curves
            .iter()
            .map(move |c| (c.info.mnemonic.as_str(), c.values[index]))
    }
}

/// Immutable depth-indexed curve table.
#[derive(Debug, Clone, Serialize)]
pub struct MeasurementStore {
    depth_info: CurveInfo,
    depths: Vec<f64>,
    curves: Vec<Curve>,
    #[serde(skip)]
    lookup: HashMap<String, usize>,
    well: BTreeMap<String, String>,
    stats: IngestStats,
}

impl MeasurementStore {
    /// Build a store from parsed rows.
    pub fn from_raw(
        raw: RawLog,
        aliases: &CurveAliases,
        ingest: &IngestConfig,
    ) -> Result<Self, StoreError> {
        let width = raw.curves.len();
        let depth_col = find_depth_column(&raw, aliases)?;

        let mut stats = IngestStats::default();
        let mut depths = Vec::with_capacity(raw.rows.len());
        let mut columns: Vec<Vec<Option<f64>>> = (0..width)
            .filter(|&j| j != depth_col)
            .map(|_| Vec::with_capacity(raw.rows.len()))
            .collect();

        for (row_idx, row) in raw.rows.iter().enumerate() {
            if row.len() != width {
                return Err(StoreError::RaggedRow {
                    row: row_idx,
                    expected: width,
                    found: row.len(),
                });
            }
            let Some(depth) = normalize(row[depth_col], ingest, &mut stats.nulls_normalized) else {
                stats.dropped_rows += 1;
                continue;
            };
            depths.push(depth);
            let mut k = 0;
            for (j, value) in row.iter().enumerate() {
                if j == depth_col {
                    continue;
                }
                columns[k].push(normalize(*value, ingest, &mut stats.nulls_normalized));
                k += 1;
            }
        }

        if stats.dropped_rows > 0 {
            warn!(dropped = stats.dropped_rows, "Dropped rows with no valid depth");
        }

        let mut infos = raw.curves;
        let depth_info = infos.remove(depth_col);
        let curves = infos
            .into_iter()
            .zip(columns)
            .map(|(info, values)| Curve { info, values })
            .collect();

        let store = Self::assemble(depth_info, depths, curves, raw.well, stats)?;
        info!(
            samples = store.sample_count(),
            curves = store.curves.len(),
            depth_min = store.depth_range().0,
            depth_max = store.depth_range().1,
            nulls = store.stats.nulls_normalized,
            "Measurement store built"
        );
        Ok(store)
    }

    /// Build a store directly from columns, applying default null handling.
    ///
    /// Mostly useful for tests and programmatic callers that already hold
    /// depth-aligned arrays.
    pub fn from_columns(
        depths: Vec<f64>,
        curves: Vec<(&str, Vec<Option<f64>>)>,
    ) -> Result<Self, StoreError> {
        let ingest = IngestConfig::default();
        let mut stats = IngestStats::default();
        let expected = depths.len();

        let mut built = Vec::with_capacity(curves.len());
        for (mnemonic, values) in curves {
            if values.len() != expected {
                return Err(StoreError::LengthMismatch {
                    mnemonic: mnemonic.to_string(),
                    expected,
                    found: values.len(),
                });
            }
            let values = values
                .into_iter()
                .map(|v| normalize(v, &ingest, &mut stats.nulls_normalized))
                .collect();
            built.push(Curve {
                info: CurveInfo::new(mnemonic),
                values,
            });
        }

        Self::assemble(CurveInfo::new("DEPT"), depths, built, BTreeMap::new(), stats)
    }

    /// Shared tail of construction: ordering, lookup table, invariants.
    fn assemble(
        depth_info: CurveInfo,
        mut depths: Vec<f64>,
        mut curves: Vec<Curve>,
        well: BTreeMap<String, String>,
        mut stats: IngestStats,
    ) -> Result<Self, StoreError> {
        if depths.is_empty() {
            return Err(StoreError::Empty);
        }
        if depths.iter().any(|d| !d.is_finite()) {
            // Only reachable through from_columns; from_raw already dropped these
            let keep: Vec<usize> = (0..depths.len()).filter(|&i| depths[i].is_finite()).collect();
            stats.dropped_rows += depths.len() - keep.len();
            depths = keep.iter().map(|&i| depths[i]).collect();
            for c in &mut curves {
                c.values = keep.iter().map(|&i| c.values[i]).collect();
            }
            if depths.is_empty() {
                return Err(StoreError::Empty);
            }
        }

        if depths.windows(2).any(|w| w[1] < w[0]) {
            let mut order: Vec<usize> = (0..depths.len()).collect();
            order.sort_by(|&a, &b| depths[a].total_cmp(&depths[b]));
            depths = order.iter().map(|&i| depths[i]).collect();
            for c in &mut curves {
                c.values = order.iter().map(|&i| c.values[i]).collect();
            }
            stats.reordered = true;
            warn!("Input rows were not in depth order; sorted by depth");
        }

        let mut lookup = HashMap::with_capacity(curves.len());
        for (i, c) in curves.iter().enumerate() {
            let key = c.info.mnemonic.to_ascii_uppercase();
            if key == depth_info.mnemonic.to_ascii_uppercase() || lookup.insert(key, i).is_some() {
                return Err(StoreError::DuplicateCurve(c.info.mnemonic.clone()));
            }
        }

        Ok(Self {
            depth_info,
            depths,
            curves,
            lookup,
            well,
            stats,
        })
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Depth-aligned readings for a mnemonic (case-insensitive).
    pub fn curve(&self, mnemonic: &str) -> Option<&[Option<f64>]> {
        self.curve_entry(mnemonic).map(Curve::values)
    }

    /// Full curve entry (metadata + readings) for a mnemonic.
    pub fn curve_entry(&self, mnemonic: &str) -> Option<&Curve> {
        self.lookup
            .get(&mnemonic.to_ascii_uppercase())
            .map(|&i| &self.curves[i])
    }

    /// First curve matching one of the role's aliases, in alias order.
    pub fn resolve(&self, role: CurveRole, aliases: &CurveAliases) -> Option<&Curve> {
        let found = aliases
            .for_role(role)
            .iter()
            .find_map(|alias| self.curve_entry(alias));
        if let Some(c) = found {
            debug!(role = %role, mnemonic = %c.info.mnemonic, "Resolved curve role");
        }
        found
    }

    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    pub fn depth_info(&self) -> &CurveInfo {
        &self.depth_info
    }

    /// (min, max) depth. Rows are sorted, so these are the end points.
    pub fn depth_range(&self) -> (f64, f64) {
        (self.depths[0], self.depths[self.depths.len() - 1])
    }

    pub fn sample_count(&self) -> usize {
        self.depths.len()
    }

    pub fn sample(&self, index: usize) -> Option<Sample<'_>> {
        (index < self.depths.len()).then_some(Sample { store: self, index })
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample<'_>> {
        (0..self.depths.len()).map(move |index| Sample { store: self, index })
    }

    /// Curves in source order (depth axis excluded).
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn mnemonics(&self) -> impl Iterator<Item = &str> {
        self.curves.iter().map(|c| c.info.mnemonic.as_str())
    }

    pub fn well_metadata(&self) -> &BTreeMap<String, String> {
        &self.well
    }

    pub fn ingest_stats(&self) -> IngestStats {
        self.stats
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn find_depth_column(raw: &RawLog, aliases: &CurveAliases) -> Result<usize, StoreError> {
    let position = |name: &str| {
        raw.curves
            .iter()
            .position(|c| c.mnemonic.eq_ignore_ascii_case(name))
    };

    if let Some(idx) = raw.index_hint.as_deref().and_then(position) {
        return Ok(idx);
    }
    aliases
        .depth
        .iter()
        .find_map(|alias| position(alias))
        .ok_or_else(|| StoreError::MissingDepthColumn {
            candidates: raw
                .index_hint
                .iter()
                .chain(aliases.depth.iter())
                .cloned()
                .collect(),
        })
}

/// Map sentinel and non-finite readings to `None`.
fn normalize(value: Option<f64>, ingest: &IngestConfig, replaced: &mut usize) -> Option<f64> {
    let v = value?;
    if !v.is_finite() || (v - ingest.null_sentinel).abs() <= ingest.null_tolerance {
        *replaced += 1;
        None
    } else {
        Some(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InterpretationConfig;

    fn raw_with(curves: &[&str], rows: &[&[f64]]) -> RawLog {
        let mut raw = RawLog::new(curves.iter().map(|m| CurveInfo::new(*m)).collect());
        for r in rows {
            raw.push_values(r);
        }
        raw
    }

    #[test]
    fn test_sentinel_becomes_absent() {
        let cfg = InterpretationConfig::default();
        let raw = raw_with(&["DEPT", "GR"], &[&[100.0, 50.0], &[100.5, -999.25]]);
        let store = MeasurementStore::from_raw(raw, &cfg.curves, &cfg.ingest).unwrap();
        assert_eq!(store.curve("GR").unwrap(), &[Some(50.0), None]);
        assert_eq!(store.ingest_stats().nulls_normalized, 1);
    }

    #[test]
    fn test_missing_depth_column_is_structural_error() {
        let cfg = InterpretationConfig::default();
        let raw = raw_with(&["GR", "RHOB"], &[&[50.0, 2.4]]);
        let err = MeasurementStore::from_raw(raw, &cfg.curves, &cfg.ingest).unwrap_err();
        assert!(matches!(err, StoreError::MissingDepthColumn { .. }));
    }

    #[test]
    fn test_index_hint_takes_precedence() {
        let cfg = InterpretationConfig::default();
        let raw = raw_with(&["TIME", "DEPT", "GR"], &[&[1.0, 200.0, 40.0]]).with_index_hint("TIME");
        let store = MeasurementStore::from_raw(raw, &cfg.curves, &cfg.ingest).unwrap();
        assert_eq!(store.depth_info().mnemonic, "TIME");
        assert!(store.curve("DEPT").is_some());
    }

    #[test]
    fn test_rows_with_null_depth_dropped() {
        let cfg = InterpretationConfig::default();
        let raw = raw_with(
            &["DEPT", "GR"],
            &[&[100.0, 50.0], &[-999.25, 60.0], &[101.0, 70.0]],
        );
        let store = MeasurementStore::from_raw(raw, &cfg.curves, &cfg.ingest).unwrap();
        assert_eq!(store.sample_count(), 2);
        assert_eq!(store.ingest_stats().dropped_rows, 1);
    }

    #[test]
    fn test_unsorted_rows_are_sorted_and_flagged() {
        let store = MeasurementStore::from_columns(
            vec![102.0, 100.0, 101.0],
            vec![("GR", vec![Some(3.0), Some(1.0), Some(2.0)])],
        )
        .unwrap();
        assert_eq!(store.depths(), &[100.0, 101.0, 102.0]);
        assert_eq!(store.curve("gr").unwrap(), &[Some(1.0), Some(2.0), Some(3.0)]);
        assert!(store.ingest_stats().reordered);
        assert_eq!(store.depth_range(), (100.0, 102.0));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let cfg = InterpretationConfig::default();
        let mut raw = raw_with(&["DEPT", "GR"], &[&[100.0, 50.0]]);
        raw.push_row(vec![Some(101.0)]);
        let err = MeasurementStore::from_raw(raw, &cfg.curves, &cfg.ingest).unwrap_err();
        assert!(matches!(err, StoreError::RaggedRow { row: 1, .. }));
    }

    #[test]
    fn test_empty_store_rejected() {
        let err = MeasurementStore::from_columns(vec![], vec![]).unwrap_err();
        assert!(matches!(err, StoreError::Empty));
    }

    #[test]
    fn test_resolve_uses_alias_order() {
        let cfg = InterpretationConfig::default();
        let store = MeasurementStore::from_columns(
            vec![1.0, 2.0],
            vec![("GR", vec![Some(1.0), None]), ("GGCE", vec![Some(5.0), Some(6.0)])],
        )
        .unwrap();
        let gr = store.resolve(CurveRole::GammaRay, &cfg.curves).unwrap();
        assert_eq!(gr.mnemonic(), "GGCE");
        assert!(store.resolve(CurveRole::Photoelectric, &cfg.curves).is_none());
    }

    #[test]
    fn test_sample_view() {
        let store = MeasurementStore::from_columns(
            vec![10.0, 10.5],
            vec![("GR", vec![Some(1.0), None]), ("RHOB", vec![Some(2.5), Some(2.6)])],
        )
        .unwrap();
        let s = store.sample(1).unwrap();
        assert_eq!(s.depth(), 10.5);
        assert_eq!(s.value("GR"), None);
        assert_eq!(s.value("RHOB"), Some(2.6));
        assert_eq!(s.values().count(), 2);
        assert!(store.sample(2).is_none());
    }
}
