//! Cross-persona metrics over the core family.
//!
//! Provides:
//! - Effective sample size from distinct binned trait signatures
//! - Mean nearest-neighbour Euclidean distance in the normalized trait space
//! - Occupancy of the multi-dimensional 3-per-axis grid

use std::collections::HashSet;

use rayon::prelude::*;
use serde::Serialize;

use crate::persona::TraitMap;
use crate::registry::{ContinuousBin, DimensionDef, DimensionKind, DimensionRegistry, TraitFamily, TraitValue};

/// Cells per axis of the coverage grid.
pub const GRID_SIZE: u64 = 3;

/// Metrics that look at personas jointly rather than one dimension at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedMetrics {
    /// Number of distinct trait signatures
    pub ess: usize,
    pub ess_ratio: f64,
    pub dimensions_used: usize,
    /// Keys of the dimensions every persona could supply
    pub dimensions: Vec<String>,
    pub mean_min_distance: f64,
    pub unique_combinations: usize,
    pub uniqueness_ratio: f64,
    pub occupied_bins: u64,
    pub total_possible_bins: u64,
    pub bin_coverage: f64,
}

impl CombinedMetrics {
    /// Fallback for populations too small or too sparse to compare.
    fn degenerate(n: usize, dimensions: Vec<String>) -> Self {
        Self {
            ess: n,
            ess_ratio: 1.0,
            dimensions_used: dimensions.len(),
            dimensions,
            mean_min_distance: 0.0,
            unique_combinations: n,
            uniqueness_ratio: 1.0,
            occupied_bins: 1,
            total_possible_bins: 1,
            bin_coverage: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SignatureCell {
    Bin(u8),
    Category(String),
}

fn signature_cell(value: &TraitValue) -> SignatureCell {
    match value {
        TraitValue::Number(n) => SignatureCell::Bin(ContinuousBin::of(*n).index()),
        TraitValue::Category(c) => SignatureCell::Category(c.clone()),
    }
}

/// Map a value into [0, 1] (bipolar continuous values land in [-1, 1]).
fn embed(dim: &DimensionDef, value: &TraitValue) -> f64 {
    match (dim.kind, value) {
        (DimensionKind::Categorical { values }, TraitValue::Category(c)) => {
            let idx = dim.category_index(c).unwrap_or(0);
            idx as f64 / values.len().saturating_sub(1).max(1) as f64
        }
        (DimensionKind::Categorical { .. }, TraitValue::Number(_)) => 0.0,
        (DimensionKind::Continuous { .. }, TraitValue::Number(n)) => n / 100.0,
        (DimensionKind::Continuous { .. }, TraitValue::Category(_)) => 0.0,
    }
}

fn grid_coordinate(v: f64) -> i64 {
    if v < 1.0 {
        (v * GRID_SIZE as f64) as i64
    } else {
        GRID_SIZE as i64 - 1
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn nearest_neighbour(vectors: &[Vec<f64>], i: usize) -> f64 {
    vectors
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != i)
        .map(|(_, other)| euclidean(&vectors[i], other))
        .fold(f64::INFINITY, f64::min)
}

/// Sum in ascending order so the result does not depend on input order.
pub(crate) fn sorted_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.iter().sum()
}

/// Compute combined metrics over the core traits of eligible personas.
pub fn compute_combined_metrics(
    traits: &[TraitMap],
    registry: &DimensionRegistry,
    parallel: bool,
) -> CombinedMetrics {
    let n = traits.len();

    let mut usable: Vec<&DimensionDef> = registry
        .family(TraitFamily::Core)
        .filter(|dim| n > 0 && traits.iter().all(|t| t.contains_key(dim.key)))
        .collect();
    usable.sort_by_key(|dim| dim.key);
    let keys: Vec<String> = usable.iter().map(|d| d.key.to_string()).collect();

    if n < 2 || usable.is_empty() {
        return CombinedMetrics::degenerate(n, keys);
    }

    // Every usable key is present in every map.
    let rows: Vec<Vec<&TraitValue>> = traits
        .iter()
        .map(|t| usable.iter().filter_map(|dim| t.get(dim.key)).collect())
        .collect();

    let signatures: HashSet<Vec<SignatureCell>> = rows
        .iter()
        .map(|row| row.iter().map(|v| signature_cell(v)).collect())
        .collect();
    let unique = signatures.len();

    let vectors: Vec<Vec<f64>> = rows
        .iter()
        .map(|row| usable.iter().zip(row).map(|(dim, v)| embed(dim, v)).collect())
        .collect();

    let min_distances: Vec<f64> = if parallel {
        (0..n)
            .into_par_iter()
            .map(|i| nearest_neighbour(&vectors, i))
            .collect()
    } else {
        (0..n).map(|i| nearest_neighbour(&vectors, i)).collect()
    };
    let mean_min_distance = sorted_sum(min_distances) / n as f64;

    let cells: HashSet<Vec<i64>> = vectors
        .iter()
        .map(|vec| vec.iter().map(|v| grid_coordinate(*v)).collect())
        .collect();
    let occupied_bins = cells.len() as u64;
    let total_possible_bins = GRID_SIZE.saturating_pow(usable.len() as u32);
    let reachable = total_possible_bins.min(2 * n as u64);

    CombinedMetrics {
        ess: unique,
        ess_ratio: unique as f64 / n as f64,
        dimensions_used: usable.len(),
        dimensions: keys,
        mean_min_distance,
        unique_combinations: unique,
        uniqueness_ratio: unique as f64 / n as f64,
        occupied_bins,
        total_possible_bins,
        bin_coverage: occupied_bins as f64 / reachable as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{extract_traits, BigFive, DecisionStyleField, PersonaRecord, RiskProfile};

    fn core(persona: &PersonaRecord) -> TraitMap {
        extract_traits(persona, DimensionRegistry::global(), TraitFamily::Core)
    }

    fn with_openness(v: f64) -> TraitMap {
        core(&PersonaRecord {
            big5: Some(BigFive {
                openness: Some(v),
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    #[test]
    fn test_single_persona_defaults() {
        let metrics = compute_combined_metrics(&[with_openness(10.0)], DimensionRegistry::global(), true);
        assert_eq!(metrics.ess, 1);
        assert_eq!(metrics.ess_ratio, 1.0);
        assert_eq!(metrics.mean_min_distance, 0.0);
        assert_eq!(metrics.occupied_bins, 1);
        assert_eq!(metrics.total_possible_bins, 1);
        assert_eq!(metrics.bin_coverage, 1.0);
        assert_eq!(metrics.dimensions_used, 18);
    }

    #[test]
    fn test_empty_population() {
        let metrics = compute_combined_metrics(&[], DimensionRegistry::global(), false);
        assert_eq!(metrics.ess, 0);
        assert_eq!(metrics.unique_combinations, 0);
        assert_eq!(metrics.dimensions_used, 0);
    }

    #[test]
    fn test_identical_personas() {
        let traits = vec![with_openness(50.0); 4];
        let metrics = compute_combined_metrics(&traits, DimensionRegistry::global(), false);

        assert_eq!(metrics.ess, 1);
        assert_eq!(metrics.ess_ratio, 0.25);
        assert_eq!(metrics.mean_min_distance, 0.0);
        assert_eq!(metrics.occupied_bins, 1);
        assert_eq!(metrics.total_possible_bins, 3u64.pow(18));
        assert_eq!(metrics.bin_coverage, 1.0 / 8.0);
    }

    #[test]
    fn test_distance_of_two_personas() {
        let traits = vec![with_openness(0.0), with_openness(60.0)];
        let metrics = compute_combined_metrics(&traits, DimensionRegistry::global(), true);

        assert_eq!(metrics.ess, 2);
        assert!((metrics.mean_min_distance - 0.6).abs() < 1e-12);
        assert_eq!(metrics.occupied_bins, 2);
        assert_eq!(metrics.bin_coverage, 0.5);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let traits: Vec<TraitMap> = (0..12).map(|i| with_openness((i * 9) as f64)).collect();
        let serial = compute_combined_metrics(&traits, DimensionRegistry::global(), false);
        let parallel = compute_combined_metrics(&traits, DimensionRegistry::global(), true);
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_legacy_decision_style_narrows_dimensions() {
        let legacy = core(&PersonaRecord {
            big5: Some(BigFive::default()),
            risk_profile: Some(RiskProfile::default()),
            decision_style: Some(DecisionStyleField::Legacy("analytical".into())),
            ..Default::default()
        });
        let traits = vec![legacy, with_openness(90.0)];
        let metrics = compute_combined_metrics(&traits, DimensionRegistry::global(), false);

        assert_eq!(metrics.dimensions_used, 16);
        assert!(!metrics.dimensions.iter().any(|k| k == "decision_risk_seeking"));
        assert!(!metrics.dimensions.iter().any(|k| k == "decision_info_processing"));
    }

    #[test]
    fn test_grid_coordinate() {
        assert_eq!(grid_coordinate(0.0), 0);
        assert_eq!(grid_coordinate(0.34), 1);
        assert_eq!(grid_coordinate(0.99), 2);
        assert_eq!(grid_coordinate(1.0), 2);
        assert_eq!(grid_coordinate(1.5), 2);
        assert_eq!(grid_coordinate(-0.75), -2);
    }

    #[test]
    fn test_categorical_embedding() {
        let registry = DimensionRegistry::global();
        let primary = registry.get("decision_primary").unwrap();
        assert_eq!(embed(primary, &TraitValue::Category("analytical".into())), 0.0);
        assert_eq!(embed(primary, &TraitValue::Category("spontaneous".into())), 1.0);
        assert_eq!(embed(primary, &TraitValue::Category("rational".into())), 0.0);
    }

    #[test]
    fn test_sorted_sum_is_order_free() {
        let a = sorted_sum(vec![0.1, 1e16, 0.2, -1e16]);
        let b = sorted_sum(vec![-1e16, 0.2, 1e16, 0.1]);
        assert_eq!(a, b);
    }
}
