//! petrolog: Petrophysical Well-Log Interpretation
//!
//! Turns depth-indexed log curves (gamma ray, neutron, density, PE,
//! resistivity) into data-quality diagnostics, lithology labels and
//! reservoir properties.
//!
//! ## Architecture
//!
//! - **Store**: immutable depth-indexed curve table built from a `RawLog`
//! - **Quality**: completeness, IQR outliers, depth spacing
//! - **Lithology**: gamma-ray, neutron-density, photoelectric and clustering methods
//! - **Properties**: porosity, water saturation, permeability, net-to-gross
//! - **Pipeline**: runs everything and merges results into one bundle

pub mod config;
pub mod lithology;
pub mod pipeline;
pub mod properties;
pub mod quality;
pub mod store;
pub mod summary;
pub mod synthetic;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, InterpretationConfig};

// Re-export the store and its ingestion interface
pub use store::{MeasurementStore, RawLog, StoreError};

// Re-export commonly used types
pub use types::{
    CurveInfo, CurveRole, Diagnostic, DiagnosticLevel, EstimateFlag, EstimateMethod,
    LabeledSeries, LithologyLabel, PropertyEstimate, QualityReport, SkipReason,
};

// Re-export pipeline entry points
pub use pipeline::{interpret, interpret_raw, InterpretationBundle, PipelineError};
