//! Human-readable diversity report.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::analysis::{DiversityMetrics, DiversityOutcome, TraitSummary};

const RULE_WIDTH: usize = 60;
const SECTION_WIDTH: usize = 40;
const BAR_CELLS: usize = 10;

/// Ten-cell bar for a score; values above 1 fill the bar.
pub fn score_bar(score: f64) -> String {
    let filled = ((score * BAR_CELLS as f64) as usize).min(BAR_CELLS);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled))
}

fn section(out: &mut String, title: &str) {
    let rule = "-".repeat(SECTION_WIDTH);
    let _ = writeln!(out, "{}\n{}\n{}", rule, title, rule);
}

/// Render a monitor outcome as text.
///
/// `generated_at` is printed in the header when given.
pub fn render_report(outcome: &DiversityOutcome, generated_at: Option<DateTime<Utc>>) -> String {
    match outcome {
        DiversityOutcome::Rejected(rejected) => {
            format!("Error: {}\nHint: {}", rejected.error, rejected.hint)
        }
        DiversityOutcome::Metrics(metrics) => render_metrics(metrics, generated_at),
    }
}

fn render_metrics(metrics: &DiversityMetrics, generated_at: Option<DateTime<Utc>>) -> String {
    let mut out = String::new();
    let heavy = "=".repeat(RULE_WIDTH);
    let health = &metrics.diversity_health;

    let _ = writeln!(out, "{}\nPersona Diversity Report\n{}", heavy, heavy);
    if let Some(ts) = generated_at {
        let _ = writeln!(out, "Generated: {}", ts.to_rfc3339());
    }
    let _ = writeln!(out, "Personas analysed: {}", metrics.total_personas);
    let _ = writeln!(
        out,
        "With required groups: {} ({} missing)",
        metrics.personas_with_ppv, metrics.personas_missing_ppv
    );
    let _ = writeln!(out, "Average completeness: {:.1}%\n", metrics.avg_completeness * 100.0);

    let _ = writeln!(out, "Overall status: {}", health.status);
    let _ = writeln!(out, "Overall score: {:.1}%\n", health.overall_score * 100.0);

    let _ = writeln!(out, "Component scores:");
    for (name, score) in health.component_scores.entries() {
        let _ = writeln!(out, "  {:<12}: [{}] {:.1}%", name, score_bar(score), score * 100.0);
    }
    out.push('\n');

    section(&mut out, "Trait summary:");
    for summary in metrics.trait_summary.values() {
        match summary {
            TraitSummary::Continuous { name, mean, std, min, max, .. } => {
                let _ = writeln!(
                    out,
                    "  {}: mean={:.1}, std={:.1}, range=[{:.1}-{:.1}]",
                    name, mean, std, min, max
                );
            }
            TraitSummary::Categorical { name, distribution, .. } => {
                let shares: Vec<String> = distribution
                    .iter()
                    .map(|(category, share)| format!("{}:{}%", category, (share * 100.0) as u32))
                    .collect();
                let _ = writeln!(out, "  {}: {}", name, shares.join(", "));
            }
        }
    }
    out.push('\n');

    let core = &metrics.core_metrics;
    section(&mut out, "Core trait entropy:");
    let _ = writeln!(out, "  Min entropy: {:.3}", core.min_entropy);
    let _ = writeln!(out, "  Mean entropy: {:.3}", core.mean_entropy);
    let _ = writeln!(
        out,
        "  Threshold met: {}\n",
        if core.entropy_threshold_met { "yes" } else { "no" }
    );

    let combined = &metrics.combined_metrics;
    section(&mut out, "Combined metrics:");
    let _ = writeln!(
        out,
        "  ESS: {} ({:.0}% of n)",
        combined.ess,
        combined.ess_ratio * 100.0
    );
    let _ = writeln!(out, "  Dimensions used: {}", combined.dimensions_used);
    let _ = writeln!(out, "  Mean min-distance: {:.4}", combined.mean_min_distance);
    let _ = writeln!(out, "  Unique combinations: {}", combined.unique_combinations);
    let _ = writeln!(
        out,
        "  Bin coverage: {}/{} ({:.1}%)\n",
        combined.occupied_bins,
        combined.total_possible_bins,
        combined.bin_coverage * 100.0
    );

    if !health.warnings.is_empty() {
        section(&mut out, "Warnings:");
        for warning in &health.warnings {
            let _ = writeln!(out, "  ! {}", warning);
        }
        for dim in &health.low_diversity_dimensions {
            let _ = writeln!(
                out,
                "    - {} (normalized entropy {:.2}, coverage {:.0}%)",
                dim.dimension,
                dim.normalized_entropy,
                dim.coverage * 100.0
            );
        }
        out.push('\n');
    }

    let _ = writeln!(out, "{}", heavy);
    if health.is_real_diversity {
        let _ = writeln!(out, "Conclusion: REAL diversity");
        let _ = writeln!(out, "  Core traits (Big Five, risk profile, decision style) are well spread");
    } else {
        let _ = writeln!(out, "Conclusion: possibly SUPERFICIAL diversity");
        let _ = writeln!(out, "  Core traits need more variation");
    }
    let _ = write!(out, "{}", heavy);

    out
}
