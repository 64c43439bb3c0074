//! Interpretation Configuration - every interpretive constant as a TOML value
//!
//! Each struct implements `Default` with the literal values in `defaults`, so
//! a run with no config file present uses the standard literature values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults::*;
use crate::types::{CurveRole, LithologyLabel};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "PETROLOG_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "petrolog.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for an interpretation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterpretationConfig {
    /// Well identification (labels only, no logic)
    #[serde(default)]
    pub well: WellInfo,

    /// Mnemonic aliases per curve role
    #[serde(default)]
    pub curves: CurveAliases,

    /// Null handling at ingestion
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Quality assessor tuning
    #[serde(default)]
    pub quality: QualityConfig,

    /// Larionov gamma-ray classification
    #[serde(default)]
    pub gamma_ray: GammaRayConfig,

    /// Neutron-density crossplot classification
    #[serde(default)]
    pub neutron_density: NeutronDensityConfig,

    /// Photoelectric factor lookup table
    #[serde(default)]
    pub photoelectric: PhotoelectricConfig,

    /// K-means clustering fallback
    #[serde(default)]
    pub clustering: ClusteringConfig,

    /// Density/neutron porosity
    #[serde(default)]
    pub porosity: PorosityConfig,

    /// Archie water saturation
    #[serde(default)]
    pub archie: ArchieConfig,

    /// Empirical permeability correlations
    #[serde(default)]
    pub permeability: PermeabilityConfig,

    /// Net-to-gross
    #[serde(default)]
    pub net_to_gross: NetToGrossConfig,
}

impl InterpretationConfig {
    /// Load configuration using the standard search order:
    /// 1. `$PETROLOG_CONFIG` environment variable
    /// 2. `./petrolog.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), well = %config.well.name, "Loaded config from PETROLOG_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from PETROLOG_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "PETROLOG_CONFIG points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(well = %config.well.name, "Loaded config from ./petrolog.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./petrolog.toml, using defaults");
                }
            }
        }

        info!("No petrolog.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Toml(inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document. Unknown keys are logged as warnings.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents).map_err(ConfigError::Toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Interpretation config saved");
        Ok(())
    }

    /// Validate physical ranges. Suspicious-but-legal values are logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_physical_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config parse error: {0}")]
    Toml(#[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Well Info
// ============================================================================

/// Identification metadata; appears in logs and the result bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellInfo {
    #[serde(default = "default_well_name")]
    pub name: String,

    #[serde(default)]
    pub field: String,
}

fn default_well_name() -> String {
    "UNNAMED".to_string()
}

impl Default for WellInfo {
    fn default() -> Self {
        Self {
            name: default_well_name(),
            field: String::new(),
        }
    }
}

// ============================================================================
// Curve Aliases
// ============================================================================

/// Mnemonic aliases per role, matched case-insensitively, first present wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveAliases {
    pub depth: Vec<String>,
    pub gamma_ray: Vec<String>,
    pub neutron: Vec<String>,
    pub density: Vec<String>,
    pub photoelectric: Vec<String>,
    pub resistivity: Vec<String>,
}

fn aliases(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

impl Default for CurveAliases {
    fn default() -> Self {
        Self {
            depth: aliases(&["DEPT", "DEPTH", "MD", "TDEP"]),
            gamma_ray: aliases(&["GGCE", "GR", "SGR", "CGR"]),
            neutron: aliases(&["NPRL", "NPHI", "TNPH", "NPOR"]),
            density: aliases(&["DEN", "RHOB", "ZDEN"]),
            photoelectric: aliases(&["PDPE", "PE", "PEF", "PEFZ"]),
            resistivity: aliases(&["RTAT", "RT", "ILD", "LLD", "RDEP"]),
        }
    }
}

impl CurveAliases {
    pub fn for_role(&self, role: CurveRole) -> &[String] {
        match role {
            CurveRole::Depth => &self.depth,
            CurveRole::GammaRay => &self.gamma_ray,
            CurveRole::Neutron => &self.neutron,
            CurveRole::Density => &self.density,
            CurveRole::Photoelectric => &self.photoelectric,
            CurveRole::Resistivity => &self.resistivity,
        }
    }
}

// ============================================================================
// Ingestion
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Value the source writes for a missing reading
    pub null_sentinel: f64,
    /// Absolute tolerance when comparing against the sentinel
    pub null_tolerance: f64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            null_sentinel: NULL_SENTINEL,
            null_tolerance: NULL_TOLERANCE,
        }
    }
}

// ============================================================================
// Quality
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    pub iqr_multiplier: f64,
    pub min_valid_for_iqr: usize,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: IQR_MULTIPLIER,
            min_valid_for_iqr: MIN_VALID_FOR_IQR,
        }
    }
}

// ============================================================================
// Lithology
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GammaRayConfig {
    /// Quantile (0-1) giving the clean-sand baseline
    pub clean_percentile: f64,
    /// Quantile (0-1) giving the shale baseline
    pub shale_percentile: f64,
    /// Tertiary shale volume below this is clean sandstone
    pub clean_max_vshale: f64,
    /// Tertiary shale volume at or above this is shale
    pub shale_min_vshale: f64,
}

impl Default for GammaRayConfig {
    fn default() -> Self {
        Self {
            clean_percentile: GR_CLEAN_PERCENTILE,
            shale_percentile: GR_SHALE_PERCENTILE,
            clean_max_vshale: VSH_CLEAN_MAX,
            shale_min_vshale: VSH_SHALE_MIN,
        }
    }
}

/// Mineral reference point in (neutron fraction, bulk density) space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixPoint {
    pub label: LithologyLabel,
    pub neutron: f64,
    pub density: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NeutronDensityConfig {
    /// Neutron curve divided by this to get a fraction (fixed, not auto-detected)
    pub neutron_percent_scale: f64,
    /// Weight on the squared density difference
    pub density_weight: f64,
    pub gas_density_max: f64,
    pub gas_neutron_max: f64,
    /// Reference points; ties go to the earlier entry
    pub matrices: Vec<MatrixPoint>,
}

impl Default for NeutronDensityConfig {
    fn default() -> Self {
        let point = |label, density| MatrixPoint {
            label,
            neutron: 0.0,
            density,
        };
        Self {
            neutron_percent_scale: NEUTRON_PERCENT_SCALE,
            density_weight: DENSITY_DISTANCE_WEIGHT,
            gas_density_max: GAS_DENSITY_MAX,
            gas_neutron_max: GAS_NEUTRON_MAX,
            matrices: vec![
                point(LithologyLabel::Sandstone, 2.65),
                point(LithologyLabel::Limestone, 2.71),
                point(LithologyLabel::Dolomite, 2.87),
                point(LithologyLabel::Anhydrite, 2.96),
            ],
        }
    }
}

/// Inclusive PE range (barns/electron) for one mineral
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeRange {
    pub label: LithologyLabel,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoelectricConfig {
    /// Ranges may overlap; the first match in this order wins
    pub ranges: Vec<PeRange>,
}

impl Default for PhotoelectricConfig {
    fn default() -> Self {
        let range = |label, min, max| PeRange { label, min, max };
        Self {
            ranges: vec![
                range(LithologyLabel::Quartz, 1.8, 1.9),
                range(LithologyLabel::Calcite, 5.0, 5.2),
                range(LithologyLabel::Dolomite, 3.0, 3.2),
                range(LithologyLabel::Clay, 2.8, 3.3),
                range(LithologyLabel::Anhydrite, 5.0, 5.1),
                range(LithologyLabel::Salt, 4.6, 4.8),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    pub min_curves: usize,
    pub min_samples: usize,
    pub max_k: usize,
    pub samples_per_cluster: usize,
    pub default_k: usize,
    pub seed: u64,
    /// k-means++ restarts per k; the lowest-inertia run is kept
    pub restarts: usize,
    pub max_iterations: usize,
    /// Stop when no centroid moves more than this (standardized units)
    pub tolerance: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            min_curves: CLUSTER_MIN_CURVES,
            min_samples: CLUSTER_MIN_SAMPLES,
            max_k: CLUSTER_MAX_K,
            samples_per_cluster: CLUSTER_SAMPLES_PER_K,
            default_k: CLUSTER_DEFAULT_K,
            seed: CLUSTER_SEED,
            restarts: CLUSTER_RESTARTS,
            max_iterations: CLUSTER_MAX_ITERATIONS,
            tolerance: CLUSTER_TOLERANCE,
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PorosityConfig {
    pub matrix_density: f64,
    pub fluid_density: f64,
    pub max_porosity: f64,
    pub gas_separation: f64,
    /// Floor applied before porosity is raised to a power or divided by
    pub porosity_floor: f64,
}

impl Default for PorosityConfig {
    fn default() -> Self {
        Self {
            matrix_density: MATRIX_DENSITY,
            fluid_density: FLUID_DENSITY,
            max_porosity: MAX_POROSITY,
            gas_separation: GAS_SEPARATION,
            porosity_floor: POROSITY_FLOOR,
        }
    }
}

/// Archie parameters. Defaults are uncalibrated literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchieConfig {
    pub rw: f64,
    pub a: f64,
    pub m: f64,
    pub n: f64,
}

impl Default for ArchieConfig {
    fn default() -> Self {
        Self {
            rw: ARCHIE_RW,
            a: ARCHIE_A,
            m: ARCHIE_M,
            n: ARCHIE_N,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PermeabilityConfig {
    pub kozeny_carman_coefficient: f64,
    pub timur_coefficient: f64,
    pub timur_exponent: f64,
}

impl Default for PermeabilityConfig {
    fn default() -> Self {
        Self {
            kozeny_carman_coefficient: KOZENY_CARMAN_COEFFICIENT,
            timur_coefficient: TIMUR_COEFFICIENT,
            timur_exponent: TIMUR_EXPONENT,
        }
    }
}

/// How net and gross thickness are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThicknessMode {
    /// `count * sample_spacing` with the configured spacing
    #[default]
    FixedSpacing,
    /// `count * median depth spacing` measured from the store
    MedianSpacing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetToGrossConfig {
    pub gr_cutoff: f64,
    pub sample_spacing: f64,
    pub thickness_mode: ThicknessMode,
}

impl Default for NetToGrossConfig {
    fn default() -> Self {
        Self {
            gr_cutoff: NTG_GR_CUTOFF,
            sample_spacing: NTG_SAMPLE_SPACING,
            thickness_mode: ThicknessMode::default(),
        }
    }
}
