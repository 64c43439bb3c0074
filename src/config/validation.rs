//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse: the raw TOML is first walked as a `toml::Value` tree and
//! every key path is compared against the known field names, producing
//! "did you mean?" warnings. Normal serde deserialization follows. Unknown
//! keys never fail a load.

use std::collections::HashSet;

use super::InterpretationConfig;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for InterpretationConfig.
///
/// Maintained by hand to match the struct hierarchy in interp_config.rs.
/// Array-of-table entries (`matrices`, `ranges`) are not walked.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [well]
        "well",
        "well.name",
        "well.field",
        // [curves]
        "curves",
        "curves.depth",
        "curves.gamma_ray",
        "curves.neutron",
        "curves.density",
        "curves.photoelectric",
        "curves.resistivity",
        // [ingest]
        "ingest",
        "ingest.null_sentinel",
        "ingest.null_tolerance",
        // [quality]
        "quality",
        "quality.iqr_multiplier",
        "quality.min_valid_for_iqr",
        // [gamma_ray]
        "gamma_ray",
        "gamma_ray.clean_percentile",
        "gamma_ray.shale_percentile",
        "gamma_ray.clean_max_vshale",
        "gamma_ray.shale_min_vshale",
        // [neutron_density]
        "neutron_density",
        "neutron_density.neutron_percent_scale",
        "neutron_density.density_weight",
        "neutron_density.gas_density_max",
        "neutron_density.gas_neutron_max",
        "neutron_density.matrices",
        // [photoelectric]
        "photoelectric",
        "photoelectric.ranges",
        // [clustering]
        "clustering",
        "clustering.min_curves",
        "clustering.min_samples",
        "clustering.max_k",
        "clustering.samples_per_cluster",
        "clustering.default_k",
        "clustering.seed",
        "clustering.restarts",
        "clustering.max_iterations",
        "clustering.tolerance",
        // [porosity]
        "porosity",
        "porosity.matrix_density",
        "porosity.fluid_density",
        "porosity.max_porosity",
        "porosity.gas_separation",
        "porosity.porosity_floor",
        // [archie]
        "archie",
        "archie.rw",
        "archie.a",
        "archie.m",
        "archie.n",
        // [permeability]
        "permeability",
        "permeability.kozeny_carman_coefficient",
        "permeability.timur_coefficient",
        "permeability.timur_exponent",
        // [net_to_gross]
        "net_to_gross",
        "net_to_gross.gr_cutoff",
        "net_to_gross.sample_spacing",
        "net_to_gross.thickness_mode",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the lexicographically smaller key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by(|(ka, da), (kb, db)| da.cmp(db).then_with(|| ka.cmp(kb)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Does NOT fail on unknown keys; it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are reported by serde later
    };

    let known = known_config_keys();
    let mut warnings = Vec::new();

    for key in walk_toml_keys(&value, "") {
        if !known.contains(key.as_str()) {
            let suggestion = suggest_correction(&key, &known);
            let message = format!("Unknown config key '{key}'");
            warnings.push(ValidationWarning {
                field: key,
                message,
                suggestion,
            });
        }
    }

    warnings
}

// ============================================================================
// Physical Range Validation
// ============================================================================

fn finite_positive(value: f64, name: &str, errors: &mut Vec<String>) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(format!("{name} = {value} must be finite and > 0"));
    }
}

/// Validate physical ranges on a parsed InterpretationConfig.
///
/// Returns (errors, warnings). Errors are impossible values that would make
/// a formula undefined; warnings are legal but unusual.
pub fn validate_physical_ranges(
    config: &InterpretationConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Curve aliases: an empty list makes a role unresolvable
    for (name, list) in [
        ("curves.depth", &config.curves.depth),
        ("curves.gamma_ray", &config.curves.gamma_ray),
        ("curves.neutron", &config.curves.neutron),
        ("curves.density", &config.curves.density),
        ("curves.photoelectric", &config.curves.photoelectric),
        ("curves.resistivity", &config.curves.resistivity),
    ] {
        if list.is_empty() {
            errors.push(format!("{name} must list at least one mnemonic"));
        }
    }

    // Quality
    finite_positive(config.quality.iqr_multiplier, "quality.iqr_multiplier", &mut errors);
    if config.quality.min_valid_for_iqr < 4 {
        errors.push(format!(
            "quality.min_valid_for_iqr = {} must be >= 4 (quartiles are degenerate below that)",
            config.quality.min_valid_for_iqr
        ));
    }

    // Gamma ray baselines
    let gr = &config.gamma_ray;
    if !(0.0..=1.0).contains(&gr.clean_percentile)
        || !(0.0..=1.0).contains(&gr.shale_percentile)
        || gr.clean_percentile >= gr.shale_percentile
    {
        errors.push(format!(
            "gamma_ray percentiles must satisfy 0 <= clean ({}) < shale ({}) <= 1",
            gr.clean_percentile, gr.shale_percentile
        ));
    }
    if gr.clean_max_vshale >= gr.shale_min_vshale {
        errors.push(format!(
            "gamma_ray.clean_max_vshale ({}) must be less than shale_min_vshale ({})",
            gr.clean_max_vshale, gr.shale_min_vshale
        ));
    }

    // Neutron-density
    let nd = &config.neutron_density;
    finite_positive(nd.neutron_percent_scale, "neutron_density.neutron_percent_scale", &mut errors);
    finite_positive(nd.density_weight, "neutron_density.density_weight", &mut errors);
    if nd.matrices.is_empty() {
        errors.push("neutron_density.matrices must contain at least one reference point".to_string());
    }
    if nd.neutron_percent_scale != 100.0 && nd.neutron_percent_scale != 1.0 {
        warnings.push(ValidationWarning {
            field: "neutron_density.neutron_percent_scale".to_string(),
            message: format!(
                "neutron_percent_scale = {} is neither 100 (percent) nor 1 (fraction)",
                nd.neutron_percent_scale
            ),
            suggestion: None,
        });
    }

    // Photoelectric
    for (i, r) in config.photoelectric.ranges.iter().enumerate() {
        if r.min > r.max {
            errors.push(format!(
                "photoelectric.ranges[{i}] ({}) has min {} > max {}",
                r.label, r.min, r.max
            ));
        }
    }

    // Clustering
    let cl = &config.clustering;
    if cl.min_curves < 1 {
        errors.push("clustering.min_curves must be >= 1".to_string());
    }
    if cl.max_k < 2 {
        errors.push(format!("clustering.max_k = {} must be >= 2", cl.max_k));
    }
    if cl.default_k < 1 {
        errors.push("clustering.default_k must be >= 1".to_string());
    }
    if cl.default_k > cl.min_samples {
        errors.push(format!(
            "clustering.default_k ({}) cannot exceed clustering.min_samples ({})",
            cl.default_k, cl.min_samples
        ));
    }
    if cl.samples_per_cluster == 0 {
        errors.push("clustering.samples_per_cluster must be >= 1".to_string());
    }
    if cl.restarts == 0 || cl.max_iterations == 0 {
        errors.push("clustering.restarts and clustering.max_iterations must be >= 1".to_string());
    }

    // Porosity: the density porosity denominator must be positive
    let p = &config.porosity;
    if !(p.matrix_density > p.fluid_density) {
        errors.push(format!(
            "porosity.matrix_density ({}) must be greater than fluid_density ({})",
            p.matrix_density, p.fluid_density
        ));
    }
    if !(p.max_porosity > 0.0 && p.max_porosity < 1.0) {
        errors.push(format!(
            "porosity.max_porosity = {} must be in (0, 1)",
            p.max_porosity
        ));
    }
    if !(p.porosity_floor > 0.0 && p.porosity_floor < p.max_porosity) {
        errors.push(format!(
            "porosity.porosity_floor = {} must be in (0, max_porosity)",
            p.porosity_floor
        ));
    }

    // Archie: all parameters are exponents or divisors
    let a = &config.archie;
    finite_positive(a.rw, "archie.rw", &mut errors);
    finite_positive(a.a, "archie.a", &mut errors);
    finite_positive(a.m, "archie.m", &mut errors);
    finite_positive(a.n, "archie.n", &mut errors);
    if a.m.is_finite() && !(1.0..=3.5).contains(&a.m) {
        warnings.push(ValidationWarning {
            field: "archie.m".to_string(),
            message: format!("archie.m = {} is outside typical range (1-3.5)", a.m),
            suggestion: None,
        });
    }

    // Permeability
    finite_positive(
        config.permeability.kozeny_carman_coefficient,
        "permeability.kozeny_carman_coefficient",
        &mut errors,
    );
    finite_positive(config.permeability.timur_coefficient, "permeability.timur_coefficient", &mut errors);

    // Net-to-gross
    finite_positive(config.net_to_gross.sample_spacing, "net_to_gross.sample_spacing", &mut errors);
    if !config.net_to_gross.gr_cutoff.is_finite() {
        errors.push("net_to_gross.gr_cutoff must be finite".to_string());
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("porosty", "porosity"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [archie]
            rw = 0.05
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"archie".to_string()));
        assert!(keys.contains(&"archie.rw".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let warnings = validate_unknown_keys(
            r#"
[porosity]
matrix_densty = 2.71
"#,
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("porosity.matrix_density")
        );
    }

    #[test]
    fn test_array_of_tables_not_flagged() {
        let warnings = validate_unknown_keys(
            r#"
[[photoelectric.ranges]]
label = "Quartz"
min = 1.8
max = 1.9
"#,
        );
        assert!(warnings.is_empty(), "got {warnings:?}");
    }

    #[test]
    fn test_defaults_clean() {
        let (errors, warnings) = validate_physical_ranges(&InterpretationConfig::default());
        assert!(errors.is_empty(), "Defaults should produce no errors: {errors:?}");
        assert!(warnings.is_empty(), "Defaults should produce no warnings: {warnings:?}");
    }

    #[test]
    fn test_zero_archie_exponent_is_error() {
        let mut config = InterpretationConfig::default();
        config.archie.n = 0.0;
        let (errors, _) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("archie.n")));
    }

    #[test]
    fn test_inverted_percentiles_is_error() {
        let mut config = InterpretationConfig::default();
        config.gamma_ray.clean_percentile = 0.9;
        config.gamma_ray.shale_percentile = 0.1;
        let (errors, _) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("gamma_ray percentiles")));
    }

    #[test]
    fn test_unusual_cementation_exponent_warns() {
        let mut config = InterpretationConfig::default();
        config.archie.m = 4.5;
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.field == "archie.m"));
    }
}
