//! Per-dimension distributions and Shannon entropy.
//!
//! Continuous values are bucketed with [`ContinuousBin`]; categorical values
//! use the declared category list as bins. Categories outside the declared
//! list still contribute to the entropy but are reported separately and never
//! count as occupied declared bins.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::persona::TraitMap;
use crate::registry::{ContinuousBin, DimensionDef, DimensionKind, DimensionRegistry, TraitFamily, TraitValue};

/// Shannon entropy in bits of a frequency table.
///
/// Zero counts are skipped; an empty table has zero entropy.
pub fn shannon_entropy(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    -counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            p * p.log2()
        })
        .sum::<f64>()
}

/// Maximum attainable entropy for a dimension with `total_bins` bins.
pub fn max_entropy(total_bins: usize) -> f64 {
    if total_bins > 1 {
        (total_bins as f64).log2()
    } else {
        1.0
    }
}

// ─────────────────────────────────────────────────────────────────
// Dimension Metrics
// ─────────────────────────────────────────────────────────────────

/// Observed frequency of one bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinFrequency {
    pub label: String,
    pub count: usize,
    /// `count / sample_size`
    pub share: f64,
}

/// Distribution and entropy of one dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionMetrics {
    pub key: String,
    pub name: String,
    /// Declared bins in declaration order, unobserved ones included
    pub distribution: Vec<BinFrequency>,
    /// Categories seen in the data but absent from the declared list
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unrecognized: Vec<BinFrequency>,
    pub sample_size: usize,
    pub entropy: f64,
    pub max_entropy: f64,
    pub normalized_entropy: f64,
    /// Declared bins with at least one value; unrecognized categories are not counted
    pub occupied_bins: usize,
    pub total_bins: usize,
    /// `occupied_bins / total_bins`. Understates spread when the input
    /// carries off-schema categories, which still raise `entropy`.
    pub bin_coverage: f64,
}

impl DimensionMetrics {
    /// Measure one dimension over the extracted trait maps.
    ///
    /// Returns `None` when no persona has a value for it.
    pub fn measure(dim: &DimensionDef, traits: &[TraitMap]) -> Option<Self> {
        let values: Vec<&TraitValue> = traits.iter().filter_map(|t| t.get(dim.key)).collect();
        if values.is_empty() {
            return None;
        }

        let labels = dim.bin_labels();
        let mut declared = vec![0usize; labels.len()];
        let mut unrecognized: BTreeMap<String, usize> = BTreeMap::new();

        for value in &values {
            match (dim.kind, value) {
                (DimensionKind::Continuous { .. }, TraitValue::Number(n)) => {
                    declared[ContinuousBin::of(*n).index() as usize] += 1;
                }
                (DimensionKind::Categorical { .. }, TraitValue::Category(c)) => {
                    match dim.category_index(c) {
                        Some(idx) => declared[idx] += 1,
                        None => *unrecognized.entry(c.clone()).or_insert(0) += 1,
                    }
                }
                // Kind mismatch: the value cannot fall in any declared bin.
                (_, other) => *unrecognized.entry(other.to_string()).or_insert(0) += 1,
            }
        }

        let sample_size = values.len();
        let all_counts: Vec<usize> = declared.iter().chain(unrecognized.values()).copied().collect();
        let entropy = shannon_entropy(&all_counts);
        let total_bins = dim.total_bins();
        let max_entropy = max_entropy(total_bins);
        let occupied_bins = declared.iter().filter(|&&c| c > 0).count();

        let frequency = |label: String, count: usize| BinFrequency {
            label,
            count,
            share: count as f64 / sample_size as f64,
        };

        Some(Self {
            key: dim.key.to_string(),
            name: dim.display_name.to_string(),
            distribution: labels
                .iter()
                .zip(&declared)
                .map(|(label, &count)| frequency(label.to_string(), count))
                .collect(),
            unrecognized: unrecognized
                .into_iter()
                .map(|(label, count)| frequency(label, count))
                .collect(),
            sample_size,
            entropy,
            max_entropy,
            normalized_entropy: entropy / max_entropy,
            occupied_bins,
            total_bins,
            bin_coverage: if total_bins > 0 {
                occupied_bins as f64 / total_bins as f64
            } else {
                0.0
            },
        })
    }
}

// ─────────────────────────────────────────────────────────────────
// Family Metrics
// ─────────────────────────────────────────────────────────────────

/// Entropy summary of one trait family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyMetrics {
    pub family: TraitFamily,
    pub dimensions: Vec<DimensionMetrics>,
    /// Smallest raw entropy across measured dimensions
    pub min_entropy: f64,
    pub mean_entropy: f64,
    pub entropy_threshold_met: bool,
}

impl FamilyMetrics {
    pub fn dimension(&self, key: &str) -> Option<&DimensionMetrics> {
        self.dimensions.iter().find(|d| d.key == key)
    }
}

/// Measure every dimension of `family` and aggregate.
///
/// The threshold is compared against the raw minimum entropy, not the
/// normalized one, so categorical dimensions with many bins are easier to pass.
pub fn compute_family_metrics(
    traits: &[TraitMap],
    registry: &DimensionRegistry,
    family: TraitFamily,
    entropy_threshold: f64,
) -> FamilyMetrics {
    let dimensions: Vec<DimensionMetrics> = registry
        .family(family)
        .filter_map(|dim| DimensionMetrics::measure(dim, traits))
        .collect();

    if dimensions.is_empty() {
        return FamilyMetrics {
            family,
            dimensions,
            min_entropy: 0.0,
            mean_entropy: 0.0,
            entropy_threshold_met: false,
        };
    }

    let min_entropy = dimensions
        .iter()
        .map(|d| d.entropy)
        .fold(f64::INFINITY, f64::min);
    let mean_entropy = dimensions.iter().map(|d| d.entropy).sum::<f64>() / dimensions.len() as f64;

    FamilyMetrics {
        family,
        dimensions,
        min_entropy,
        mean_entropy,
        entropy_threshold_met: min_entropy >= entropy_threshold,
    }
}
