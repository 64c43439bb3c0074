//! Built-in interpretation constants.
//!
//! These are literal defaults, not universal constants. Real deployments
//! calibrate them per field/formation through `petrolog.toml`.

// ============================================================================
// Ingestion
// ============================================================================

/// Null sentinel written by LAS producers for missing readings.
pub const NULL_SENTINEL: f64 = -999.25;

/// Absolute tolerance when matching the null sentinel.
pub const NULL_TOLERANCE: f64 = 1e-6;

// ============================================================================
// Quality
// ============================================================================

/// Tukey fence multiplier for IQR outlier detection.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Below this many valid values the quartiles are degenerate.
pub const MIN_VALID_FOR_IQR: usize = 4;

// ============================================================================
// Gamma Ray (Larionov)
// ============================================================================

/// Percentile of the gamma-ray curve used as the clean-sand baseline.
pub const GR_CLEAN_PERCENTILE: f64 = 0.05;

/// Percentile of the gamma-ray curve used as the shale baseline.
pub const GR_SHALE_PERCENTILE: f64 = 0.95;

/// Shale volume below which a depth is clean sandstone.
pub const VSH_CLEAN_MAX: f64 = 0.15;

/// Shale volume at or above which a depth is shale.
pub const VSH_SHALE_MIN: f64 = 0.50;

// ============================================================================
// Neutron-Density
// ============================================================================

/// Neutron porosity stored in percent; divided by this to get a fraction.
pub const NEUTRON_PERCENT_SCALE: f64 = 100.0;

/// Weight applied to the squared density distance.
pub const DENSITY_DISTANCE_WEIGHT: f64 = 0.1;

/// Bulk density below which (with low neutron) gas is inferred (g/cc).
pub const GAS_DENSITY_MAX: f64 = 2.3;

/// Neutron fraction below which (with low density) gas is inferred.
pub const GAS_NEUTRON_MAX: f64 = 0.15;

// ============================================================================
// Clustering
// ============================================================================

pub const CLUSTER_MIN_CURVES: usize = 2;
pub const CLUSTER_MIN_SAMPLES: usize = 10;
pub const CLUSTER_MAX_K: usize = 8;
/// Upper bound on k is `valid_samples / CLUSTER_SAMPLES_PER_K`.
pub const CLUSTER_SAMPLES_PER_K: usize = 5;
/// Used when fewer than three k values were evaluated.
pub const CLUSTER_DEFAULT_K: usize = 3;
pub const CLUSTER_SEED: u64 = 42;
pub const CLUSTER_RESTARTS: usize = 10;
pub const CLUSTER_MAX_ITERATIONS: usize = 300;
pub const CLUSTER_TOLERANCE: f64 = 1e-4;

// ============================================================================
// Porosity
// ============================================================================

/// Sandstone matrix density (g/cc).
pub const MATRIX_DENSITY: f64 = 2.65;

/// Fresh water fluid density (g/cc).
pub const FLUID_DENSITY: f64 = 1.0;

/// Upper clip for density and neutron porosity.
pub const MAX_POROSITY: f64 = 0.5;

/// Neutron below density porosity by more than this flags gas.
pub const GAS_SEPARATION: f64 = 0.04;

/// Porosity floor applied before power/division in saturation and permeability.
pub const POROSITY_FLOOR: f64 = 1e-4;

// ============================================================================
// Archie
// ============================================================================

/// Formation water resistivity (ohm-m), uncalibrated.
pub const ARCHIE_RW: f64 = 0.1;
/// Tortuosity factor.
pub const ARCHIE_A: f64 = 1.0;
/// Cementation exponent.
pub const ARCHIE_M: f64 = 2.0;
/// Saturation exponent.
pub const ARCHIE_N: f64 = 2.0;

// ============================================================================
// Permeability
// ============================================================================

pub const KOZENY_CARMAN_COEFFICIENT: f64 = 5000.0;
pub const TIMUR_COEFFICIENT: f64 = 0.136;
pub const TIMUR_EXPONENT: f64 = 4.4;

// ============================================================================
// Net-to-Gross
// ============================================================================

/// Gamma-ray cutoff for net reservoir (curve's native units, usually GAPI).
pub const NTG_GR_CUTOFF: f64 = 75.0;

/// Sample spacing used for thickness (ft).
pub const NTG_SAMPLE_SPACING: f64 = 0.5;
