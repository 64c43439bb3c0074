//! Property Calculator
//!
//! Porosity, Archie water saturation, permeability and net-to-gross.
//!
//! ## Dependency chain
//! - porosity -> water saturation
//! - porosity -> permeability
//! - net-to-gross reads gamma ray only
//!
//! Porosity and net-to-gross run concurrently; saturation and permeability
//! then run concurrently over the porosity result. A skipped porosity makes
//! both dependants skip with `MissingDependency`.

pub mod net_to_gross;
pub mod permeability;
pub mod porosity;
pub mod saturation;

pub use net_to_gross::NetToGrossResult;
pub use permeability::PermeabilityResult;
pub use porosity::PorosityResult;
pub use saturation::SaturationResult;

use tracing::{debug, info};

use crate::config::{InterpretationConfig, ThicknessMode};
use crate::store::MeasurementStore;
use crate::types::{Diagnostic, SkipReason};

pub const COMPONENT_POROSITY: &str = "porosity";
pub const COMPONENT_SATURATION: &str = "waterSaturation";
pub const COMPONENT_PERMEABILITY: &str = "permeability";
pub const COMPONENT_NET_TO_GROSS: &str = "netToGross";

/// All property results, each absent when skipped
#[derive(Debug, Clone, Default)]
pub struct PropertySet {
    pub porosity: Option<PorosityResult>,
    pub water_saturation: Option<SaturationResult>,
    pub permeability: Option<PermeabilityResult>,
    pub net_to_gross: Option<NetToGrossResult>,
    pub diagnostics: Vec<Diagnostic>,
}

fn record<T>(
    component: &str,
    outcome: Result<T, SkipReason>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(reason) => {
            debug!(component, reason = %reason, "Property skipped");
            diagnostics.push(Diagnostic::skip(component, &reason));
            None
        }
    }
}

pub fn calculate_all(store: &MeasurementStore, config: &InterpretationConfig) -> PropertySet {
    let (porosity, ntg) = rayon::join(
        || porosity::calculate(store, config),
        || net_to_gross::calculate(store, config),
    );

    let mut diagnostics = Vec::new();
    let porosity = record(COMPONENT_POROSITY, porosity, &mut diagnostics);

    let (sw, k) = rayon::join(
        || saturation::calculate(store, porosity.as_ref(), config),
        || permeability::calculate(porosity.as_ref(), config),
    );
    let water_saturation = record(COMPONENT_SATURATION, sw, &mut diagnostics);
    let permeability = record(COMPONENT_PERMEABILITY, k, &mut diagnostics);
    let net_to_gross = record(COMPONENT_NET_TO_GROSS, ntg, &mut diagnostics);

    if let Some(p) = &porosity {
        if p.gas_count > 0 {
            diagnostics.push(Diagnostic::info(
                COMPONENT_POROSITY,
                format!(
                    "gas effect detected at {} of {} depths ({:.1}%)",
                    p.gas_count,
                    p.valid_count,
                    p.gas_fraction() * 100.0
                ),
            ));
        }
    }

    if let Some(ntg) = &net_to_gross {
        let configured = config.net_to_gross.sample_spacing;
        if let Some(gap) = ntg.spacing_divergence(configured) {
            if gap > net_to_gross::SPACING_DIVERGENCE {
                let measured = ntg.measured_spacing.unwrap_or(configured);
                let message = match config.net_to_gross.thickness_mode {
                    ThicknessMode::FixedSpacing => format!(
                        "thickness uses fixed spacing {configured} but measured median spacing is {measured:.4}"
                    ),
                    ThicknessMode::MedianSpacing => format!(
                        "thickness uses measured median spacing {measured:.4} instead of configured {configured}"
                    ),
                };
                diagnostics.push(Diagnostic::warning(COMPONENT_NET_TO_GROSS, message));
            }
        }
        if ntg.median_spacing_rejected() {
            diagnostics.push(Diagnostic::warning(
                COMPONENT_NET_TO_GROSS,
                format!(
                    "measured median spacing is not positive; thickness uses configured spacing {configured}"
                ),
            ));
        }
    }

    let set = PropertySet {
        porosity,
        water_saturation,
        permeability,
        net_to_gross,
        diagnostics,
    };
    info!(
        porosity = set.porosity.is_some(),
        water_saturation = set.water_saturation.is_some(),
        permeability = set.permeability.is_some(),
        net_to_gross = set.net_to_gross.is_some(),
        "Property calculation complete"
    );
    set
}
