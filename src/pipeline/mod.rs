//! Interpretation Pipeline
//!
//! ## Stages
//!
//! ```text
//! RawLog ──> MeasurementStore (structural errors stop here)
//!                 │
//!      ┌──────────┼──────────────┐
//!      ▼          ▼              ▼
//!   Quality   Lithology      Properties
//!   (per-     (4 methods,    (porosity ─> saturation, permeability;
//!    curve)    parallel)      net-to-gross)
//!      └──────────┴──────────────┘
//!                 ▼
//!        InterpretationBundle + diagnostics
//! ```
//!
//! Only store construction can fail. Everything after it is a pure read of
//! the store; skipped methods are absent results plus a `Skip` diagnostic.

mod bundle;

pub use bundle::{InterpretationBundle, WellSummary, METHOD_KEYS};

use chrono::Utc;
use std::time::Instant;
use tracing::{info, info_span};

use crate::config::InterpretationConfig;
use crate::lithology;
use crate::properties;
use crate::quality;
use crate::store::{las, MeasurementStore, RawLog, StoreError};

/// Interpret an already-built store.
pub fn interpret(store: &MeasurementStore, config: &InterpretationConfig) -> InterpretationBundle {
    let span = info_span!("interpret", well = %config.well.name);
    let _guard = span.enter();
    let started = Instant::now();

    let (quality_report, (lithology, properties)) = rayon::join(
        || quality::assess(store, &config.quality),
        || {
            rayon::join(
                || lithology::classify_all(store, config),
                || properties::calculate_all(store, config),
            )
        },
    );

    let mut diagnostics = quality::diagnostics(&quality_report);
    diagnostics.extend(lithology.diagnostics);
    diagnostics.extend(properties.diagnostics);

    let (depth_min, depth_max) = store.depth_range();
    let well = WellSummary {
        name: well_name(store, config),
        field: store
            .well_metadata()
            .get("FLD")
            .filter(|field| !field.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| config.well.field.clone()),
        metadata: store.well_metadata().clone(),
        depth_curve: store.depth_info().mnemonic.clone(),
        depth_min,
        depth_max,
        sample_count: store.sample_count(),
        curves: store.mnemonics().map(str::to_string).collect(),
    };

    let bundle = InterpretationBundle {
        generated_at: Utc::now(),
        well,
        quality: quality_report,
        gamma_ray: lithology.gamma_ray,
        neutron_density: lithology.neutron_density,
        photoelectric: lithology.photoelectric,
        ml_clustering: lithology.clustering,
        porosity: properties.porosity,
        water_saturation: properties.water_saturation,
        permeability: properties.permeability,
        net_to_gross: properties.net_to_gross,
        diagnostics,
    };

    info!(
        present = ?bundle.present_methods(),
        skipped = ?bundle.skipped_methods(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Interpretation complete"
    );
    bundle
}

/// Build the store from parsed rows, then interpret it.
pub fn interpret_raw(
    raw: RawLog,
    config: &InterpretationConfig,
) -> Result<InterpretationBundle, StoreError> {
    let store = MeasurementStore::from_raw(raw, &config.curves, &config.ingest)?;
    Ok(interpret(&store, config))
}

/// Errors from the file-to-bundle path
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Las(#[from] las::LasError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Read a LAS file and interpret it.
pub fn interpret_las_file(
    path: &std::path::Path,
    config: &InterpretationConfig,
) -> Result<InterpretationBundle, PipelineError> {
    let doc = las::read_las_file(path)?;
    Ok(interpret_raw(doc.log, config)?)
}

/// Header well name wins over the configured label unless it is blank.
fn well_name(store: &MeasurementStore, config: &InterpretationConfig) -> String {
    store
        .well_metadata()
        .get("WELL")
        .filter(|name| !name.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| config.well.name.clone())
}
