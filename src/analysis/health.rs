//! Diversity health scoring
//!
//! Folds the core entropy and combined metrics into four bounded component
//! scores, an overall score and a status, plus warnings for each weak spot.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::combined::CombinedMetrics;
use super::entropy::FamilyMetrics;

/// Maximum entropy of a three-bin dimension.
pub const LOG2_3: f64 = 1.584_962_500_721_156;

/// Mean min-distance that earns a full distance score.
pub const DISTANCE_TARGET: f64 = 0.35;
/// Bin coverage that earns a full coverage score.
pub const COVERAGE_TARGET: f64 = 0.6;

pub const ESS_RATIO_WARN: f64 = 0.5;
pub const DISTANCE_WARN: f64 = 0.1;
pub const COVERAGE_WARN: f64 = 0.2;
pub const ENTROPY_WARN: f64 = 0.5;
/// Normalized entropy below which a core dimension counts as low diversity.
pub const LOW_DIVERSITY_CUTOFF: f64 = 0.5;

// ─────────────────────────────────────────────────────────────────
// Status
// ─────────────────────────────────────────────────────────────────

/// Overall verdict bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Healthy,
    Moderate,
    Warning,
    Critical,
}

impl HealthStatus {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            HealthStatus::Healthy
        } else if score >= 0.6 {
            HealthStatus::Moderate
        } else if score >= 0.4 {
            HealthStatus::Warning
        } else {
            HealthStatus::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "HEALTHY",
            HealthStatus::Moderate => "MODERATE",
            HealthStatus::Warning => "WARNING",
            HealthStatus::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─────────────────────────────────────────────────────────────────
// Components & Warnings
// ─────────────────────────────────────────────────────────────────

/// The four component scores. ESS, distance and coverage lie in [0, 1]; the
/// entropy score is `mean_entropy / log2(3)` and exceeds 1 when categorical
/// dimensions with more than three bins are evenly spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScores {
    pub ess: f64,
    pub distance: f64,
    pub coverage: f64,
    pub entropy: f64,
}

impl ComponentScores {
    /// Label/score pairs in display order.
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("ess", self.ess),
            ("distance", self.distance),
            ("coverage", self.coverage),
            ("entropy", self.entropy),
        ]
    }

    pub fn mean(&self) -> f64 {
        (self.ess + self.distance + self.coverage + self.entropy) / 4.0
    }
}

/// A core dimension whose distribution is too concentrated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowDiversityDimension {
    pub key: String,
    pub dimension: String,
    pub normalized_entropy: f64,
    pub coverage: f64,
}

/// One actionable warning.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HealthWarning {
    LowEss { ess_ratio: f64 },
    LowDistance { mean_min_distance: f64 },
    LowCoverage { bin_coverage: f64 },
    LowEntropy { normalized_entropy: f64 },
    LowDiversityDimensions { count: usize },
}

impl fmt::Display for HealthWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthWarning::LowEss { ess_ratio } => write!(
                f,
                "ESS ratio too low ({:.2}): personas repeat the same trait signature",
                ess_ratio
            ),
            HealthWarning::LowDistance { mean_min_distance } => write!(
                f,
                "Mean min-distance too low ({:.3}): personas are too similar",
                mean_min_distance
            ),
            HealthWarning::LowCoverage { bin_coverage } => write!(
                f,
                "Bin coverage too low ({:.2}): distribution is too concentrated",
                bin_coverage
            ),
            HealthWarning::LowEntropy { normalized_entropy } => write!(
                f,
                "Mean normalized entropy too low ({:.2}): distribution is not even enough",
                normalized_entropy
            ),
            HealthWarning::LowDiversityDimensions { count } => {
                write!(f, "{} core dimension(s) lack diversity", count)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Verdict
// ─────────────────────────────────────────────────────────────────

/// Health verdict for a population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiversityHealth {
    pub overall_score: f64,
    pub status: HealthStatus,
    pub component_scores: ComponentScores,
    pub warnings: Vec<HealthWarning>,
    pub low_diversity_dimensions: Vec<LowDiversityDimension>,
    pub is_real_diversity: bool,
}

/// Score a population from its core family metrics and combined metrics.
pub fn score_health(core: &FamilyMetrics, combined: &CombinedMetrics) -> DiversityHealth {
    let normalized_entropy = core.mean_entropy / LOG2_3;
    let scores = ComponentScores {
        ess: combined.ess_ratio,
        distance: (combined.mean_min_distance / DISTANCE_TARGET).min(1.0),
        coverage: (combined.bin_coverage / COVERAGE_TARGET).min(1.0),
        entropy: normalized_entropy,
    };

    let mut warnings = Vec::new();
    if combined.ess_ratio < ESS_RATIO_WARN {
        warnings.push(HealthWarning::LowEss {
            ess_ratio: combined.ess_ratio,
        });
    }
    if combined.mean_min_distance < DISTANCE_WARN {
        warnings.push(HealthWarning::LowDistance {
            mean_min_distance: combined.mean_min_distance,
        });
    }
    if combined.bin_coverage < COVERAGE_WARN {
        warnings.push(HealthWarning::LowCoverage {
            bin_coverage: combined.bin_coverage,
        });
    }
    if scores.entropy < ENTROPY_WARN {
        warnings.push(HealthWarning::LowEntropy { normalized_entropy });
    }

    let low_diversity_dimensions: Vec<LowDiversityDimension> = core
        .dimensions
        .iter()
        .filter(|d| d.normalized_entropy < LOW_DIVERSITY_CUTOFF)
        .map(|d| LowDiversityDimension {
            key: d.key.clone(),
            dimension: d.name.clone(),
            normalized_entropy: d.normalized_entropy,
            coverage: d.bin_coverage,
        })
        .collect();

    if !low_diversity_dimensions.is_empty() {
        warnings.push(HealthWarning::LowDiversityDimensions {
            count: low_diversity_dimensions.len(),
        });
    }

    let overall_score = scores.mean();

    DiversityHealth {
        overall_score,
        status: HealthStatus::from_score(overall_score),
        component_scores: scores,
        is_real_diversity: overall_score >= 0.6 && low_diversity_dimensions.is_empty(),
        warnings,
        low_diversity_dimensions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::entropy::DimensionMetrics;
    use crate::registry::TraitFamily;

    fn combined(ess_ratio: f64, distance: f64, coverage: f64) -> CombinedMetrics {
        CombinedMetrics {
            ess: 10,
            ess_ratio,
            dimensions_used: 18,
            dimensions: Vec::new(),
            mean_min_distance: distance,
            unique_combinations: 10,
            uniqueness_ratio: ess_ratio,
            occupied_bins: 10,
            total_possible_bins: 100,
            bin_coverage: coverage,
        }
    }

    fn dimension(key: &str, normalized: f64) -> DimensionMetrics {
        DimensionMetrics {
            key: key.to_string(),
            name: key.to_uppercase(),
            distribution: Vec::new(),
            unrecognized: Vec::new(),
            sample_size: 10,
            entropy: normalized * LOG2_3,
            max_entropy: LOG2_3,
            normalized_entropy: normalized,
            occupied_bins: 2,
            total_bins: 3,
            bin_coverage: 2.0 / 3.0,
        }
    }

    fn core(dims: Vec<DimensionMetrics>, mean_entropy: f64) -> FamilyMetrics {
        FamilyMetrics {
            family: TraitFamily::Core,
            dimensions: dims,
            min_entropy: 0.0,
            mean_entropy,
            entropy_threshold_met: false,
        }
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(HealthStatus::from_score(0.8), HealthStatus::Healthy);
        assert_eq!(HealthStatus::from_score(0.79), HealthStatus::Moderate);
        assert_eq!(HealthStatus::from_score(0.6), HealthStatus::Moderate);
        assert_eq!(HealthStatus::from_score(0.4), HealthStatus::Warning);
        assert_eq!(HealthStatus::from_score(0.39), HealthStatus::Critical);
    }

    #[test]
    fn test_healthy_population() {
        let health = score_health(&core(vec![dimension("a", 0.9)], LOG2_3), &combined(1.0, 0.5, 0.9));

        assert_eq!(health.component_scores.distance, 1.0);
        assert_eq!(health.component_scores.coverage, 1.0);
        assert_eq!(health.component_scores.entropy, 1.0);
        assert_eq!(health.overall_score, 1.0);
        assert_eq!(health.status, HealthStatus::Healthy);
        assert!(health.warnings.is_empty());
        assert!(health.is_real_diversity);
    }

    #[test]
    fn test_every_warning_fires() {
        let health = score_health(
            &core(vec![dimension("a", 0.2), dimension("b", 0.9)], 0.1),
            &combined(0.2, 0.05, 0.1),
        );

        assert_eq!(health.warnings.len(), 5);
        assert_eq!(health.status, HealthStatus::Critical);
        assert_eq!(health.low_diversity_dimensions.len(), 1);
        assert_eq!(health.low_diversity_dimensions[0].dimension, "A");
        assert!(!health.is_real_diversity);
    }

    #[test]
    fn test_low_dimension_blocks_real_diversity() {
        let health = score_health(&core(vec![dimension("a", 0.3)], LOG2_3), &combined(1.0, 0.5, 0.9));
        assert_eq!(health.status, HealthStatus::Healthy);
        assert!(!health.is_real_diversity);
        assert_eq!(
            health.warnings,
            vec![HealthWarning::LowDiversityDimensions { count: 1 }]
        );
    }

    #[test]
    fn test_entropy_score_is_not_capped() {
        // Categorical dims with 4-5 bins can push the core mean above log2(3)
        let health = score_health(&core(vec![dimension("a", 0.9)], 2.5), &combined(1.0, 0.5, 0.9));
        let expected = 2.5 / LOG2_3;

        assert!((health.component_scores.entropy - expected).abs() < 1e-12);
        assert!((health.overall_score - (3.0 + expected) / 4.0).abs() < 1e-12);
        assert!(health.overall_score > 1.0);
        assert_eq!(health.status, HealthStatus::Healthy);
    }

    #[test]
    fn test_uncapped_entropy_can_lift_status_band() {
        // Three components at 0.45: a capped entropy would give 0.5875 (WARNING)
        let mean_entropy = 1.1 * LOG2_3;
        let health = score_health(
            &core(vec![dimension("a", 0.9)], mean_entropy),
            &combined(0.45, 0.45 * DISTANCE_TARGET, 0.45 * COVERAGE_TARGET),
        );

        assert!((health.component_scores.entropy - 1.1).abs() < 1e-12);
        assert!((health.overall_score - 0.6125).abs() < 1e-9);
        assert_eq!(health.status, HealthStatus::Moderate);
        assert!(health.is_real_diversity);
    }

    #[test]
    fn test_warning_serialization() {
        let json = serde_json::to_value(HealthWarning::LowCoverage { bin_coverage: 0.1 }).unwrap();
        assert_eq!(json["kind"], "low_coverage");
        assert!(HealthWarning::LowDiversityDimensions { count: 3 }
            .to_string()
            .contains("3 core dimension"));
    }
}
