//! Condensed, structured view of a bundle: the numbers an interpreter reads
//! first. Rendering is left to callers; `log_summary` emits it via tracing.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::config::ArchieConfig;
use crate::pipeline::InterpretationBundle;
use crate::types::{mean_present, DiagnosticLevel};

/// Porosity bands for reservoir quality, as fractions
const EXCELLENT_MIN: f64 = 0.15;
const GOOD_MIN: f64 = 0.10;
const FAIR_MIN: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ReservoirClass {
    /// Porosity above 15%
    Excellent,
    /// Above 10%, up to 15%
    Good,
    /// Above 5%, up to 10%
    Fair,
    /// 5% or less
    Poor,
}

impl ReservoirClass {
    pub fn from_porosity(phi: f64) -> Self {
        if phi > EXCELLENT_MIN {
            ReservoirClass::Excellent
        } else if phi > GOOD_MIN {
            ReservoirClass::Good
        } else if phi > FAIR_MIN {
            ReservoirClass::Fair
        } else {
            ReservoirClass::Poor
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PorositySummary {
    pub mean_density: Option<f64>,
    pub mean_neutron: Option<f64>,
    pub mean_corrected: Option<f64>,
    pub gas_count: usize,
    pub gas_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaturationSummary {
    pub mean_water: Option<f64>,
    pub mean_hydrocarbon: Option<f64>,
    pub archie: ArchieConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermeabilitySummary {
    pub mean_kozeny_carman: Option<f64>,
    pub mean_timur: Option<f64>,
    pub mean_combined: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetToGrossSummary {
    pub cutoff: f64,
    pub net_thickness: f64,
    pub gross_thickness: f64,
    pub ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretationSummary {
    pub well: String,
    pub sample_count: usize,
    pub depth_min: f64,
    pub depth_max: f64,
    pub median_spacing: Option<f64>,
    /// Method key -> label -> percent of labelled depths
    pub lithology: BTreeMap<String, BTreeMap<String, f64>>,
    pub gamma_ray_baselines: Option<(f64, f64)>,
    pub facies_count: Option<usize>,
    pub porosity: Option<PorositySummary>,
    pub saturation: Option<SaturationSummary>,
    pub permeability: Option<PermeabilitySummary>,
    pub net_to_gross: Option<NetToGrossSummary>,
    /// Percent of porosity depths in each class
    pub reservoir_quality: BTreeMap<ReservoirClass, f64>,
    pub skipped: Vec<String>,
    pub warnings: usize,
}

pub fn summarize(bundle: &InterpretationBundle) -> InterpretationSummary {
    let mut lithology = BTreeMap::new();
    if let Some(r) = &bundle.gamma_ray {
        lithology.insert("gammaRay".to_string(), r.lithology.distribution());
    }
    if let Some(r) = &bundle.neutron_density {
        lithology.insert("neutronDensity".to_string(), r.lithology.distribution());
    }
    if let Some(r) = &bundle.photoelectric {
        lithology.insert("photoelectric".to_string(), r.lithology.distribution());
    }
    if let Some(r) = &bundle.ml_clustering {
        lithology.insert("mlClustering".to_string(), r.lithology.distribution());
    }

    let porosity = bundle.porosity.as_ref().map(|p| PorositySummary {
        mean_density: mean_present(&p.density_porosity),
        mean_neutron: mean_present(&p.neutron_porosity),
        mean_corrected: mean_present(&p.corrected_values()),
        gas_count: p.gas_count,
        gas_percent: p.gas_fraction() * 100.0,
    });

    let saturation = bundle.water_saturation.as_ref().map(|s| SaturationSummary {
        mean_water: mean_present(&s.water_values()),
        mean_hydrocarbon: mean_present(&s.hydrocarbon_saturation),
        archie: s.archie.clone(),
    });

    let permeability = bundle.permeability.as_ref().map(|k| PermeabilitySummary {
        mean_kozeny_carman: mean_present(&k.kozeny_carman),
        mean_timur: mean_present(&k.timur),
        mean_combined: mean_present(&k.values()),
    });

    let net_to_gross = bundle.net_to_gross.as_ref().map(|n| NetToGrossSummary {
        cutoff: n.cutoff,
        net_thickness: n.net_thickness,
        gross_thickness: n.gross_thickness,
        ratio: n.ratio,
    });

    let reservoir_quality = bundle
        .porosity
        .as_ref()
        .map(|p| reservoir_quality(&p.corrected_values()))
        .unwrap_or_default();

    InterpretationSummary {
        well: bundle.well.name.clone(),
        sample_count: bundle.well.sample_count,
        depth_min: bundle.well.depth_min,
        depth_max: bundle.well.depth_max,
        median_spacing: bundle.quality.depth.median_spacing,
        lithology,
        gamma_ray_baselines: bundle
            .gamma_ray
            .as_ref()
            .map(|g| (g.clean_baseline, g.shale_baseline)),
        facies_count: bundle.ml_clustering.as_ref().map(|c| c.k),
        porosity,
        saturation,
        permeability,
        net_to_gross,
        reservoir_quality,
        skipped: bundle
            .skipped_methods()
            .into_iter()
            .map(str::to_string)
            .collect(),
        warnings: bundle.diagnostics_at(DiagnosticLevel::Warning).count(),
    }
}

/// Percentage of present porosity values in each class.
pub fn reservoir_quality(porosity: &[Option<f64>]) -> BTreeMap<ReservoirClass, f64> {
    let mut counts: BTreeMap<ReservoirClass, usize> = BTreeMap::new();
    for phi in porosity.iter().flatten() {
        *counts.entry(ReservoirClass::from_porosity(*phi)).or_insert(0) += 1;
    }
    let total: usize = counts.values().sum();
    counts
        .into_iter()
        .map(|(class, n)| (class, n as f64 / total as f64 * 100.0))
        .collect()
}

/// Emit the summary as structured log lines.
pub fn log_summary(summary: &InterpretationSummary) {
    info!(
        well = %summary.well,
        samples = summary.sample_count,
        depth_min = summary.depth_min,
        depth_max = summary.depth_max,
        median_spacing = ?summary.median_spacing,
        "Well"
    );
    for (method, distribution) in &summary.lithology {
        let parts: Vec<String> = distribution
            .iter()
            .map(|(label, pct)| format!("{label} {pct:.1}%"))
            .collect();
        info!(method = %method, distribution = %parts.join(", "), "Lithology");
    }
    if let Some(p) = &summary.porosity {
        info!(
            mean_density = ?p.mean_density,
            mean_neutron = ?p.mean_neutron,
            mean_corrected = ?p.mean_corrected,
            gas_count = p.gas_count,
            gas_percent = p.gas_percent,
            "Porosity"
        );
    }
    if let Some(s) = &summary.saturation {
        info!(
            mean_sw = ?s.mean_water,
            mean_sh = ?s.mean_hydrocarbon,
            rw = s.archie.rw,
            a = s.archie.a,
            m = s.archie.m,
            n = s.archie.n,
            "Water saturation"
        );
    }
    if let Some(k) = &summary.permeability {
        info!(
            kozeny_carman_md = ?k.mean_kozeny_carman,
            timur_md = ?k.mean_timur,
            combined_md = ?k.mean_combined,
            "Permeability"
        );
    }
    if let Some(n) = &summary.net_to_gross {
        info!(
            cutoff = n.cutoff,
            net = n.net_thickness,
            gross = n.gross_thickness,
            ratio = n.ratio,
            "Net-to-gross"
        );
    }
    for (class, pct) in &summary.reservoir_quality {
        info!(class = ?class, percent = pct, "Reservoir quality");
    }
    if !summary.skipped.is_empty() {
        info!(skipped = ?summary.skipped, warnings = summary.warnings, "Methods not run");
    }
}
