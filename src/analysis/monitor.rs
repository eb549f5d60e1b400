//! The diversity monitor
//!
//! Runs the full pipeline over a persona population:
//! completeness -> trait extraction -> per-family entropy -> combined
//! metrics -> health verdict. Every call recomputes from scratch.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::persona::{check_completeness, extract_traits, CompletenessReport, PersonaRecord, SchemaGroup, TraitMap};
use crate::registry::{DimensionRegistry, TraitFamily};

use super::combined::{compute_combined_metrics, CombinedMetrics};
use super::entropy::{compute_family_metrics, FamilyMetrics};
use super::health::{score_health, DiversityHealth};
use super::summary::{compute_trait_summary, TraitSummary};

// ─────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────

/// Default minimum per-dimension entropy, in bits.
pub const DEFAULT_ENTROPY_THRESHOLD: f64 = 0.5;

/// Tunables for a monitor run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorOptions {
    /// Minimum raw entropy every core dimension must reach
    pub entropy_threshold: f64,
    /// Also measure the extended personality family
    pub use_extended: bool,
    /// Use rayon for the families and the distance pass
    pub parallel: bool,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            entropy_threshold: DEFAULT_ENTROPY_THRESHOLD,
            use_extended: false,
            parallel: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Results
// ─────────────────────────────────────────────────────────────────

/// Which personas were dropped and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletenessDetails {
    /// Ids of personas lacking a required group
    pub missing_personas: Vec<String>,
    /// Missing required groups of the first input record
    pub sample_missing_fields: Vec<SchemaGroup>,
}

/// Full metrics for a population with at least one eligible persona.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiversityMetrics {
    pub total_personas: usize,
    pub personas_with_ppv: usize,
    pub personas_missing_ppv: usize,
    pub avg_completeness: f64,
    pub core_metrics: FamilyMetrics,
    pub style_metrics: FamilyMetrics,
    pub behavioral_metrics: FamilyMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_metrics: Option<FamilyMetrics>,
    pub combined_metrics: CombinedMetrics,
    pub trait_summary: BTreeMap<String, TraitSummary>,
    pub completeness_details: CompletenessDetails,
    pub diversity_health: DiversityHealth,
}

/// Result shape when no persona can be analysed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedPopulation {
    pub error: String,
    pub hint: String,
    pub missing_count: usize,
    pub completeness_report: Vec<CompletenessReport>,
}

/// Outcome of a monitor run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DiversityOutcome {
    Metrics(Box<DiversityMetrics>),
    Rejected(RejectedPopulation),
}

impl DiversityOutcome {
    pub fn metrics(&self) -> Option<&DiversityMetrics> {
        match self {
            DiversityOutcome::Metrics(m) => Some(m),
            DiversityOutcome::Rejected(_) => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, DiversityOutcome::Rejected(_))
    }

    /// Turn a rejection into an error for callers that need metrics.
    pub fn into_result(self) -> Result<DiversityMetrics> {
        match self {
            DiversityOutcome::Metrics(m) => Ok(*m),
            DiversityOutcome::Rejected(r) if r.missing_count == 0 => Err(Error::InputEmpty(r.error)),
            DiversityOutcome::Rejected(r) => Err(Error::NoEligiblePersonas {
                missing_count: r.missing_count,
            }),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Monitor
// ─────────────────────────────────────────────────────────────────

/// Diversity monitor bound to a dimension registry.
#[derive(Debug, Clone)]
pub struct DiversityMonitor<'r> {
    registry: &'r DimensionRegistry,
    options: MonitorOptions,
}

impl DiversityMonitor<'static> {
    /// Monitor over the standard registry.
    pub fn new(options: MonitorOptions) -> Self {
        Self::with_registry(DimensionRegistry::global(), options)
    }
}

impl<'r> DiversityMonitor<'r> {
    pub fn with_registry(registry: &'r DimensionRegistry, options: MonitorOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &MonitorOptions {
        &self.options
    }

    pub fn registry(&self) -> &DimensionRegistry {
        self.registry
    }

    /// Compute every metric for the population.
    pub fn compute(&self, personas: &[PersonaRecord]) -> DiversityOutcome {
        if personas.is_empty() {
            return DiversityOutcome::Rejected(RejectedPopulation {
                error: "No personas provided".to_string(),
                hint: "Supply at least one persona record".to_string(),
                missing_count: 0,
                completeness_report: Vec::new(),
            });
        }

        let reports: Vec<CompletenessReport> = personas.iter().map(check_completeness).collect();
        let eligible: Vec<&PersonaRecord> = personas
            .iter()
            .zip(&reports)
            .filter(|(_, r)| r.has_basic)
            .map(|(p, _)| p)
            .collect();
        let missing_personas: Vec<String> = reports
            .iter()
            .filter(|r| !r.has_basic)
            .map(|r| r.id.clone())
            .collect();

        debug!(
            total = personas.len(),
            eligible = eligible.len(),
            missing = missing_personas.len(),
            "Checked persona completeness"
        );

        if eligible.is_empty() {
            info!(missing = personas.len(), "No persona carries the required groups");
            return DiversityOutcome::Rejected(RejectedPopulation {
                error: "All personas missing required fields (big5, risk_profile, decision_style)"
                    .to_string(),
                hint: "Please ensure personas have at least big5, risk_profile, and decision_style fields"
                    .to_string(),
                missing_count: personas.len(),
                completeness_report: reports,
            });
        }

        // Present counts are integers, so this mean is exact in any order.
        let present_total: usize = reports.iter().map(|r| r.present_count).sum();
        let avg_completeness =
            present_total as f64 / (SchemaGroup::all().len() * personas.len()) as f64;

        let family_traits = |family: TraitFamily| -> Vec<TraitMap> {
            eligible
                .iter()
                .map(|p| extract_traits(p, self.registry, family))
                .collect()
        };
        let core_traits = family_traits(TraitFamily::Core);

        let threshold = self.options.entropy_threshold;
        let measure = |family: TraitFamily| -> FamilyMetrics {
            if family == TraitFamily::Core {
                compute_family_metrics(&core_traits, self.registry, family, threshold)
            } else {
                compute_family_metrics(&family_traits(family), self.registry, family, threshold)
            }
        };

        let extended = || {
            self.options
                .use_extended
                .then(|| measure(TraitFamily::Extended))
        };

        let (core_metrics, style_metrics, behavioral_metrics, extended_metrics) = if self.options.parallel {
            let ((core, style), (behavioral, extended)) = rayon::join(
                || rayon::join(|| measure(TraitFamily::Core), || measure(TraitFamily::Style)),
                || rayon::join(|| measure(TraitFamily::Behavioral), extended),
            );
            (core, style, behavioral, extended)
        } else {
            (
                measure(TraitFamily::Core),
                measure(TraitFamily::Style),
                measure(TraitFamily::Behavioral),
                extended(),
            )
        };

        for family in [&core_metrics, &style_metrics, &behavioral_metrics]
            .into_iter()
            .chain(extended_metrics.as_ref())
        {
            debug!(
                family = %family.family,
                dimensions = family.dimensions.len(),
                min_entropy = family.min_entropy,
                mean_entropy = family.mean_entropy,
                threshold_met = family.entropy_threshold_met,
                "Measured trait family"
            );
        }

        let combined_metrics = compute_combined_metrics(&core_traits, self.registry, self.options.parallel);
        let trait_summary = compute_trait_summary(&core_traits, self.registry);
        let diversity_health = score_health(&core_metrics, &combined_metrics);

        info!(
            personas = personas.len(),
            eligible = eligible.len(),
            ess = combined_metrics.ess,
            score = diversity_health.overall_score,
            status = %diversity_health.status,
            real = diversity_health.is_real_diversity,
            "Diversity analysis complete"
        );

        DiversityOutcome::Metrics(Box::new(DiversityMetrics {
            total_personas: personas.len(),
            personas_with_ppv: eligible.len(),
            personas_missing_ppv: missing_personas.len(),
            avg_completeness,
            core_metrics,
            style_metrics,
            behavioral_metrics,
            extended_metrics,
            combined_metrics,
            trait_summary,
            completeness_details: CompletenessDetails {
                missing_personas,
                sample_missing_fields: reports[0].missing_required.clone(),
            },
            diversity_health,
        }))
    }

    /// Compute the metrics and render them as a text report.
    pub fn generate_report(&self, personas: &[PersonaRecord]) -> String {
        crate::report::render_report(&self.compute(personas), Some(chrono::Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{BigFive, DecisionStyleField, RiskProfile};

    fn eligible(id: &str, openness: f64) -> PersonaRecord {
        PersonaRecord {
            id: Some(id.to_string()),
            big5: Some(BigFive {
                openness: Some(openness),
                ..Default::default()
            }),
            risk_profile: Some(RiskProfile::default()),
            decision_style: Some(DecisionStyleField::Legacy("analytical".into())),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let outcome = DiversityMonitor::new(MonitorOptions::default()).compute(&[]);
        match &outcome {
            DiversityOutcome::Rejected(r) => {
                assert_eq!(r.error, "No personas provided");
                assert_eq!(r.missing_count, 0);
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
        assert!(matches!(outcome.into_result(), Err(Error::InputEmpty(_))));
    }

    #[test]
    fn test_all_ineligible_is_rejected() {
        let personas = vec![PersonaRecord::default(), PersonaRecord::default()];
        let outcome = DiversityMonitor::new(MonitorOptions::default()).compute(&personas);

        match &outcome {
            DiversityOutcome::Rejected(r) => {
                assert_eq!(r.missing_count, 2);
                assert_eq!(r.completeness_report.len(), 2);
                assert!(r.hint.contains("decision_style"));
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
        assert!(matches!(
            outcome.into_result(),
            Err(Error::NoEligiblePersonas { missing_count: 2 })
        ));
    }

    #[test]
    fn test_ineligible_personas_are_counted_not_measured() {
        let personas = vec![eligible("a", 10.0), PersonaRecord::default(), eligible("b", 90.0)];
        let outcome = DiversityMonitor::new(MonitorOptions::default()).compute(&personas);
        let metrics = outcome.metrics().unwrap();

        assert_eq!(metrics.total_personas, 3);
        assert_eq!(metrics.personas_with_ppv, 2);
        assert_eq!(metrics.personas_missing_ppv, 1);
        assert_eq!(metrics.completeness_details.missing_personas, vec!["unknown"]);
        assert!(metrics.completeness_details.sample_missing_fields.is_empty());
        assert_eq!(metrics.core_metrics.dimension("big5_openness").unwrap().sample_size, 2);
        assert!((metrics.avg_completeness - 6.0 / 42.0).abs() < 1e-12);
    }

    #[test]
    fn test_extended_metrics_only_when_requested() {
        let personas = vec![eligible("a", 10.0), eligible("b", 90.0)];

        let plain = DiversityMonitor::new(MonitorOptions::default()).compute(&personas);
        assert!(plain.metrics().unwrap().extended_metrics.is_none());

        let options = MonitorOptions {
            use_extended: true,
            ..Default::default()
        };
        let extended = DiversityMonitor::new(options).compute(&personas);
        let metrics = extended.metrics().unwrap();
        assert_eq!(metrics.extended_metrics.as_ref().unwrap().dimensions.len(), 16);
    }

    #[test]
    fn test_parallel_and_serial_agree() {
        let personas: Vec<PersonaRecord> = (0..9)
            .map(|i| eligible(&format!("p{}", i), (i * 11) as f64))
            .collect();
        let serial = MonitorOptions {
            parallel: false,
            use_extended: true,
            ..Default::default()
        };
        let parallel = MonitorOptions {
            parallel: true,
            use_extended: true,
            ..Default::default()
        };

        assert_eq!(
            DiversityMonitor::new(serial).compute(&personas),
            DiversityMonitor::new(parallel).compute(&personas)
        );
    }

    #[test]
    fn test_generate_report_for_rejection() {
        let report = DiversityMonitor::new(MonitorOptions::default()).generate_report(&[]);
        assert!(report.starts_with("Error: No personas provided"));
        assert!(report.contains("Hint:"));
    }
}
