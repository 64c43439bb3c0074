//! Unsupervised facies clustering (k-means fallback)
//!
//! Applies when at least two candidate curves (GR, neutron, density, PE,
//! resistivity) are present and enough depths carry all of them. Features are
//! standardized to zero mean and unit population variance, k-means is swept
//! over `2..=min(max_k, n / samples_per_cluster)`, and k is picked at the
//! largest second difference of the inertia curve.
//!
//! ## Determinism
//!
//! Every k gets its own `StdRng` seeded from the configured seed, so the sweep
//! can run on rayon without making results depend on scheduling. Facies
//! indices are run-dependent names, not calibrated rock types.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use tracing::{debug, info};

use super::{LithologyMethod, LithologyResult};
use crate::config::{ClusteringConfig, InterpretationConfig};
use crate::store::{Curve, MeasurementStore};
use crate::types::{CurveRole, LabeledSeries, LithologyLabel, SkipReason};

pub const KEY: &str = "mlClustering";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusteringResult {
    /// Mnemonics used as features, in candidate order
    pub curves: Vec<String>,
    /// Depths where every feature curve was present
    pub joint_count: usize,
    /// Selected cluster count
    pub k: usize,
    /// Cluster counts evaluated in the sweep
    pub k_candidates: Vec<usize>,
    /// Inertia of the best run for each candidate
    pub inertias: Vec<f64>,
    /// Centroids in standardized feature space
    pub centroids: Vec<Vec<f64>>,
    pub feature_means: Vec<f64>,
    pub feature_scales: Vec<f64>,
    pub cluster_sizes: Vec<usize>,
    pub lithology: LabeledSeries,
}

/// One converged k-means solution
#[derive(Debug, Clone)]
pub struct KMeansFit {
    pub k: usize,
    pub centroids: Vec<Vec<f64>>,
    pub assignments: Vec<usize>,
    pub inertia: f64,
    pub iterations: usize,
}

pub struct ClusteringMethod;

impl ClusteringMethod {
    pub fn run(
        &self,
        store: &MeasurementStore,
        config: &InterpretationConfig,
    ) -> Result<ClusteringResult, SkipReason> {
        let cfg = &config.clustering;

        // A curve with no valid readings counts as absent
        let features: Vec<&Curve> = CurveRole::CLUSTERING_CANDIDATES
            .iter()
            .filter_map(|role| store.resolve(*role, &config.curves))
            .filter(|c| c.valid_count() > 0)
            .collect();
        if features.len() < cfg.min_curves {
            return Err(SkipReason::InsufficientCurves {
                needed: cfg.min_curves,
                available: features.len(),
            });
        }

        let (rows, data) = joint_rows(store.sample_count(), &features);
        if rows.len() < cfg.min_samples.max(1) {
            return Err(SkipReason::InsufficientData {
                needed: cfg.min_samples.max(1),
                available: rows.len(),
            });
        }

        let (scaled, feature_means, feature_scales) = standardize(&data);

        let upper = cfg.max_k.min(rows.len() / cfg.samples_per_cluster.max(1));
        let k_candidates: Vec<usize> = (2..=upper).collect();
        let fits: Vec<KMeansFit> = k_candidates
            .par_iter()
            .map(|&k| kmeans(&scaled, k, cfg))
            .collect();
        let inertias: Vec<f64> = fits.iter().map(|f| f.inertia).collect();

        let k = select_k(&k_candidates, &inertias, cfg.default_k).clamp(1, rows.len());
        let fit = match fits.iter().find(|f| f.k == k) {
            Some(f) => f.clone(),
            None => kmeans(&scaled, k, cfg),
        };

        let mut labels = vec![None; store.sample_count()];
        let mut cluster_sizes = vec![0usize; k];
        for (&row, &cluster) in rows.iter().zip(&fit.assignments) {
            labels[row] = Some(LithologyLabel::Facies(cluster));
            cluster_sizes[cluster] += 1;
        }

        info!(
            features = features.len(),
            samples = rows.len(),
            k,
            inertia = fit.inertia,
            iterations = fit.iterations,
            "Facies clustering complete"
        );

        Ok(ClusteringResult {
            curves: features.iter().map(|c| c.mnemonic().to_string()).collect(),
            joint_count: rows.len(),
            k,
            k_candidates,
            inertias,
            centroids: fit.centroids,
            feature_means,
            feature_scales,
            cluster_sizes,
            lithology: LabeledSeries::new(labels),
        })
    }
}

impl LithologyMethod for ClusteringMethod {
    fn key(&self) -> &'static str {
        KEY
    }

    fn classify(
        &self,
        store: &MeasurementStore,
        config: &InterpretationConfig,
    ) -> Result<LithologyResult, SkipReason> {
        self.run(store, config).map(LithologyResult::Clustering)
    }
}

// ============================================================================
// Feature preparation
// ============================================================================

/// Depth indices where every curve is present, and the matching feature rows.
fn joint_rows(samples: usize, curves: &[&Curve]) -> (Vec<usize>, Vec<Vec<f64>>) {
    let mut rows = Vec::new();
    let mut data = Vec::new();
    for i in 0..samples {
        let row: Option<Vec<f64>> = curves.iter().map(|c| c.values()[i]).collect();
        if let Some(row) = row {
            rows.push(i);
            data.push(row);
        }
    }
    (rows, data)
}

/// Column-wise z-score using the population standard deviation.
///
/// A constant column keeps a scale of 1 so it contributes zeros, not NaN.
pub fn standardize(data: &[Vec<f64>]) -> (Vec<Vec<f64>>, Vec<f64>, Vec<f64>) {
    let dims = data.first().map_or(0, Vec::len);
    let mut means = Vec::with_capacity(dims);
    let mut scales = Vec::with_capacity(dims);
    for d in 0..dims {
        let column: Vec<f64> = data.iter().map(|row| row[d]).collect();
        let mean = Statistics::mean(column.iter());
        let std = Statistics::population_std_dev(column.iter());
        means.push(mean);
        scales.push(if std > 0.0 && std.is_finite() { std } else { 1.0 });
    }
    let scaled = data
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(d, v)| (v - means[d]) / scales[d])
                .collect()
        })
        .collect();
    (scaled, means, scales)
}

/// Pick k at the maximum second difference of the inertia curve.
///
/// With fewer than three inertias there is no curvature to measure and
/// `default_k` is returned.
pub fn select_k(candidates: &[usize], inertias: &[f64], default_k: usize) -> usize {
    if inertias.len() <= 2 {
        return default_k;
    }
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for i in 0..inertias.len() - 2 {
        let curvature = inertias[i + 2] - 2.0 * inertias[i + 1] + inertias[i];
        if curvature > best_value {
            best_value = curvature;
            best = i;
        }
    }
    candidates.get(best).copied().unwrap_or(default_k)
}

// ============================================================================
// k-means
// ============================================================================

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn nearest(point: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (c, centroid) in centroids.iter().enumerate() {
        let d = squared_distance(point, centroid);
        if d < best.1 {
            best = (c, d);
        }
    }
    best
}

/// Seeded k-means with k-means++ initialisation; best of `restarts` runs.
pub fn kmeans(data: &[Vec<f64>], k: usize, config: &ClusteringConfig) -> KMeansFit {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut best = lloyd(data, init_plus_plus(data, k, &mut rng), config);
    for _ in 1..config.restarts.max(1) {
        let fit = lloyd(data, init_plus_plus(data, k, &mut rng), config);
        if fit.inertia < best.inertia {
            best = fit;
        }
    }
    debug!(k, inertia = best.inertia, "k-means fit");
    best
}

/// k-means++ seeding: each new centre drawn with probability proportional to
/// squared distance from the nearest existing centre.
fn init_plus_plus(data: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(data[rng.gen_range(0..data.len())].clone());
    while centroids.len() < k {
        let weights: Vec<f64> = data.iter().map(|p| nearest(p, &centroids).1).collect();
        let index = match WeightedIndex::new(&weights) {
            Ok(dist) => dist.sample(rng),
            // All points coincide with a centre
            Err(_) => rng.gen_range(0..data.len()),
        };
        centroids.push(data[index].clone());
    }
    centroids
}

fn lloyd(data: &[Vec<f64>], mut centroids: Vec<Vec<f64>>, config: &ClusteringConfig) -> KMeansFit {
    let k = centroids.len();
    let dims = data[0].len();
    let mut assignments = vec![0usize; data.len()];
    let mut iterations = 0;

    for _ in 0..config.max_iterations {
        iterations += 1;
        for (p, a) in data.iter().zip(assignments.iter_mut()) {
            *a = nearest(p, &centroids).0;
        }

        let mut sums = vec![vec![0.0; dims]; k];
        let mut counts = vec![0usize; k];
        for (p, &a) in data.iter().zip(&assignments) {
            counts[a] += 1;
            for (s, v) in sums[a].iter_mut().zip(p) {
                *s += v;
            }
        }

        // Empty clusters take the points farthest from their current centre
        let mut far: Vec<usize> = Vec::new();
        if counts.contains(&0) {
            far = (0..data.len()).collect();
            far.sort_by(|&a, &b| {
                let da = squared_distance(&data[a], &centroids[assignments[a]]);
                let db = squared_distance(&data[b], &centroids[assignments[b]]);
                da.total_cmp(&db)
            });
        }

        let mut updated = Vec::with_capacity(k);
        for c in 0..k {
            if counts[c] > 0 {
                updated.push(sums[c].iter().map(|s| s / counts[c] as f64).collect());
            } else if let Some(p) = far.pop() {
                assignments[p] = c;
                updated.push(data[p].clone());
            } else {
                updated.push(centroids[c].clone());
            }
        }

        let shift = centroids
            .iter()
            .zip(&updated)
            .map(|(a, b)| squared_distance(a, b).sqrt())
            .fold(0.0, f64::max);
        centroids = updated;
        if shift <= config.tolerance {
            break;
        }
    }

    let mut inertia = 0.0;
    for (p, a) in data.iter().zip(assignments.iter_mut()) {
        let (c, d) = nearest(p, &centroids);
        *a = c;
        inertia += d;
    }

    KMeansFit {
        k,
        centroids,
        assignments,
        inertia,
        iterations,
    }
}
