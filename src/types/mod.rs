//! Shared data structures for well-log interpretation
//!
//! This module defines the types passed across component boundaries:
//! - Curve metadata and curve roles (gamma ray, neutron, density, ...)
//! - LithologyLabel vocabulary and per-method labelled series
//! - PropertyEstimate (value + derivation method + flags)
//! - QualityReport (completeness, IQR outliers, depth statistics)
//! - Diagnostics and skip reasons (diagnostics are data, not console output)

mod curve;
mod diagnostic;
mod lithology;
mod property;
mod quality;

pub use curve::*;
pub use diagnostic::*;
pub use lithology::*;
pub use property::*;
pub use quality::*;
