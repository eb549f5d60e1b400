//! Diversity analysis
//!
//! Provides:
//! - Per-dimension entropy and bin coverage for each trait family
//! - Combined metrics (ESS, nearest-neighbour distance, grid coverage)
//! - Descriptive statistics of the core traits
//! - Health scoring and the monitor that runs the whole pipeline

pub mod combined;
pub mod entropy;
pub mod health;
pub mod monitor;
pub mod summary;

pub use combined::{compute_combined_metrics, CombinedMetrics};
pub use entropy::{compute_family_metrics, shannon_entropy, BinFrequency, DimensionMetrics, FamilyMetrics};
pub use health::{score_health, ComponentScores, DiversityHealth, HealthStatus, HealthWarning, LowDiversityDimension};
pub use monitor::{
    CompletenessDetails, DiversityMetrics, DiversityMonitor, DiversityOutcome, MonitorOptions,
    RejectedPopulation, DEFAULT_ENTROPY_THRESHOLD,
};
pub use summary::{compute_trait_summary, TraitSummary};
