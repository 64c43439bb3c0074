//! Structured diagnostics produced alongside component results.

use serde::{Deserialize, Serialize};

use super::CurveRole;

/// Severity of a diagnostic entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticLevel {
    Info,
    Warning,
    /// A method did not run; its result is absent
    Skip,
}

/// One diagnostic entry, attributed to the component that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Component key, e.g. "quality", "gammaRay", "netToGross"
    pub component: String,
    pub level: DiagnosticLevel,
    pub message: String,
}

impl Diagnostic {
    pub fn info(component: &str, message: impl Into<String>) -> Self {
        Self {
            component: component.to_string(),
            level: DiagnosticLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(component: &str, message: impl Into<String>) -> Self {
        Self {
            component: component.to_string(),
            level: DiagnosticLevel::Warning,
            message: message.into(),
        }
    }

    pub fn skip(component: &str, reason: &SkipReason) -> Self {
        Self {
            component: component.to_string(),
            level: DiagnosticLevel::Skip,
            message: reason.to_string(),
        }
    }
}

/// Why a method produced no result.
///
/// Skips are local: the affected method is absent from the bundle and its
/// siblings proceed. They are never surfaced as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// No curve for this role exists in the store
    MissingCurve { role: CurveRole },
    /// Curve exists but has too few usable samples
    InsufficientData { needed: usize, available: usize },
    /// Fewer curves available than the method needs
    InsufficientCurves { needed: usize, available: usize },
    /// Statistic needed by the method collapsed (e.g. clean == shale baseline)
    Degenerate { detail: String },
    /// An upstream result this method depends on is absent
    MissingDependency { dependency: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingCurve { role } => write!(f, "no {role} curve present"),
            SkipReason::InsufficientData { needed, available } => {
                write!(f, "insufficient data: need {needed} valid samples, have {available}")
            }
            SkipReason::InsufficientCurves { needed, available } => {
                write!(f, "insufficient curves: need {needed}, have {available}")
            }
            SkipReason::Degenerate { detail } => write!(f, "degenerate input: {detail}"),
            SkipReason::MissingDependency { dependency } => {
                write!(f, "required result '{dependency}' is absent")
            }
        }
    }
}
