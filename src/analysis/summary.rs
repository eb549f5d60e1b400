//! Descriptive statistics for the core dimensions.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::persona::TraitMap;
use crate::registry::{DimensionDef, DimensionKind, DimensionRegistry, TraitFamily, TraitValue};

use super::combined::sorted_sum;

/// Summary of one core dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraitSummary {
    Continuous {
        name: String,
        mean: f64,
        /// Population standard deviation
        std: f64,
        min: f64,
        max: f64,
        range: f64,
    },
    Categorical {
        name: String,
        /// Share of each observed category
        distribution: BTreeMap<String, f64>,
        mode: String,
        unique_count: usize,
    },
}

impl TraitSummary {
    pub fn name(&self) -> &str {
        match self {
            TraitSummary::Continuous { name, .. } | TraitSummary::Categorical { name, .. } => name,
        }
    }
}

fn summarize_continuous(dim: &DimensionDef, values: Vec<f64>) -> TraitSummary {
    let n = values.len() as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = sorted_sum(values.clone()) / n;
    let variance = sorted_sum(values.iter().map(|v| (v - mean) * (v - mean)).collect()) / n;

    TraitSummary::Continuous {
        name: dim.display_name.to_string(),
        mean,
        std: variance.sqrt(),
        min,
        max,
        range: max - min,
    }
}

fn summarize_categorical(dim: &DimensionDef, values: Vec<&str>) -> TraitSummary {
    let total = values.len() as f64;
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }

    // Ties go to the category declared first; unrecognized ones rank after
    // every declared category, alphabetically.
    let rank = |category: &str| dim.category_index(category).unwrap_or(usize::MAX);
    let mode = counts
        .iter()
        .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| (rank(b), *b).cmp(&(rank(a), *a))))
        .map(|(category, _)| category.clone())
        .unwrap_or_default();

    TraitSummary::Categorical {
        name: dim.display_name.to_string(),
        unique_count: counts.len(),
        distribution: counts
            .into_iter()
            .map(|(category, count)| (category, count as f64 / total))
            .collect(),
        mode,
    }
}

/// Summarize every core dimension that has at least one value.
pub fn compute_trait_summary(
    traits: &[TraitMap],
    registry: &DimensionRegistry,
) -> BTreeMap<String, TraitSummary> {
    let mut summary = BTreeMap::new();

    for dim in registry.family(TraitFamily::Core) {
        let values: Vec<&TraitValue> = traits.iter().filter_map(|t| t.get(dim.key)).collect();
        if values.is_empty() {
            continue;
        }

        let entry = match dim.kind {
            DimensionKind::Continuous { .. } => {
                summarize_continuous(dim, values.iter().filter_map(|v| v.as_number()).collect())
            }
            DimensionKind::Categorical { .. } => {
                summarize_categorical(dim, values.iter().filter_map(|v| v.as_category()).collect())
            }
        };
        summary.insert(dim.key.to_string(), entry);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{extract_traits, BigFive, DecisionStyleField, PersonaRecord};

    fn persona(openness: f64, style: &str) -> TraitMap {
        extract_traits(
            &PersonaRecord {
                big5: Some(BigFive {
                    openness: Some(openness),
                    ..Default::default()
                }),
                decision_style: Some(DecisionStyleField::Legacy(style.into())),
                ..Default::default()
            },
            DimensionRegistry::global(),
            TraitFamily::Core,
        )
    }

    #[test]
    fn test_continuous_summary() {
        let traits = vec![persona(20.0, "intuitive"), persona(40.0, "intuitive")];
        let summary = compute_trait_summary(&traits, DimensionRegistry::global());

        match &summary["big5_openness"] {
            TraitSummary::Continuous { mean, std, min, max, range, .. } => {
                assert_eq!(*mean, 30.0);
                assert_eq!(*std, 10.0);
                assert_eq!(*min, 20.0);
                assert_eq!(*max, 40.0);
                assert_eq!(*range, 20.0);
            }
            other => panic!("Expected continuous summary, got {:?}", other),
        }
    }

    #[test]
    fn test_categorical_summary_and_mode_tie() {
        let traits = vec![persona(50.0, "Spontaneous"), persona(50.0, "analytical")];
        let summary = compute_trait_summary(&traits, DimensionRegistry::global());

        match &summary["decision_primary"] {
            TraitSummary::Categorical { distribution, mode, unique_count, .. } => {
                assert_eq!(*unique_count, 2);
                assert_eq!(distribution["spontaneous"], 0.5);
                assert_eq!(mode, "analytical");
            }
            other => panic!("Expected categorical summary, got {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_categories_lose_ties() {
        let traits = vec![persona(50.0, "rational"), persona(50.0, "avoidant")];
        let summary = compute_trait_summary(&traits, DimensionRegistry::global());

        match &summary["decision_primary"] {
            TraitSummary::Categorical { mode, .. } => assert_eq!(mode, "avoidant"),
            other => panic!("Expected categorical summary, got {:?}", other),
        }
    }

    #[test]
    fn test_unavailable_dimensions_are_skipped() {
        let traits = vec![persona(50.0, "intuitive")];
        let summary = compute_trait_summary(&traits, DimensionRegistry::global());
        assert!(!summary.contains_key("decision_risk_seeking"));
        assert_eq!(summary.len(), 16);
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let traits = vec![persona(50.0, "intuitive")];
        let summary = compute_trait_summary(&traits, DimensionRegistry::global());
        let json = serde_json::to_value(&summary["big5_openness"]).unwrap();
        assert_eq!(json["type"], "continuous");
        assert_eq!(json["name"], "Openness");
    }
}
