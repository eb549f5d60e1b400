//! Common test utilities for integration tests
//!
//! Provides:
//! - Typed persona builders for the canonical populations
//! - A JSON writer for feeding populations to the binary

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use persona_diversity::persona::{
    BigFive, DecisionStyle, DecisionStyleField, PersonaRecord, RegulatoryFocus, RiskProfile,
    TimePreference,
};

// ─────────────────────────────────────────────────────────────────
// Persona Builders
// ─────────────────────────────────────────────────────────────────

/// Continuous core values of one persona, in registry order.
#[derive(Debug, Clone, Copy)]
pub struct CoreScores {
    pub big5: [f64; 5],
    pub risk: [f64; 5],
    pub risk_seeking: f64,
    pub discount_rate: f64,
    pub present_vs_future: f64,
    pub promotion: f64,
    pub prevention: f64,
}

impl CoreScores {
    /// Every 0-100 score set to `value`, the bipolar axis centred.
    pub fn uniform(value: f64) -> Self {
        Self {
            big5: [value; 5],
            risk: [value; 5],
            risk_seeking: value,
            discount_rate: value,
            present_vs_future: 0.0,
            promotion: value,
            prevention: value,
        }
    }
}

/// Persona with all five core groups populated.
pub fn core_persona(
    id: &str,
    scores: CoreScores,
    primary: &str,
    info_processing: &str,
    planning_horizon: &str,
) -> PersonaRecord {
    let [o, c, e, a, n] = scores.big5;
    let [overall, financial, ethical, social, health] = scores.risk;

    PersonaRecord {
        id: Some(id.to_string()),
        big5: Some(BigFive {
            openness: Some(o),
            conscientiousness: Some(c),
            extraversion: Some(e),
            agreeableness: Some(a),
            neuroticism: Some(n),
        }),
        risk_profile: Some(RiskProfile {
            overall: Some(overall),
            financial: Some(financial),
            ethical: Some(ethical),
            social: Some(social),
            health: Some(health),
        }),
        decision_style: Some(DecisionStyleField::Structured(DecisionStyle {
            primary: Some(primary.to_string()),
            risk_seeking: Some(scores.risk_seeking),
            info_processing: Some(info_processing.to_string()),
            ..Default::default()
        })),
        time_preference: Some(TimePreference {
            discount_rate: Some(scores.discount_rate),
            planning_horizon: Some(planning_horizon.to_string()),
            present_vs_future: Some(scores.present_vs_future),
        }),
        regulatory_focus: Some(RegulatoryFocus {
            promotion: Some(scores.promotion),
            prevention: Some(scores.prevention),
        }),
        ..Default::default()
    }
}

/// Persona carrying only the three required groups, with the given openness.
pub fn minimal_persona(id: &str, openness: f64) -> PersonaRecord {
    PersonaRecord {
        id: Some(id.to_string()),
        big5: Some(BigFive {
            openness: Some(openness),
            ..Default::default()
        }),
        risk_profile: Some(RiskProfile::default()),
        decision_style: Some(DecisionStyleField::Structured(DecisionStyle::default())),
        ..Default::default()
    }
}

/// Persona lacking every required group.
pub fn incomplete_persona(id: &str) -> PersonaRecord {
    PersonaRecord {
        id: Some(id.to_string()),
        time_preference: Some(TimePreference::default()),
        ..Default::default()
    }
}

// ─────────────────────────────────────────────────────────────────
// Canonical Populations
// ─────────────────────────────────────────────────────────────────

/// `n` identical personas. The primary decision style is outside the
/// declared category list.
pub fn homogeneous_population(n: usize) -> Vec<PersonaRecord> {
    (0..n)
        .map(|i| {
            core_persona(
                &format!("homogeneous_{}", i),
                CoreScores::uniform(50.0),
                "rational",
                "satisficer",
                "medium_term",
            )
        })
        .collect()
}

/// Homogeneous personas except openness, spread evenly over 0-100.
pub fn single_dimension_variance(n: usize) -> Vec<PersonaRecord> {
    let mut personas = homogeneous_population(n);
    let last = n.saturating_sub(1).max(1);
    for (i, persona) in personas.iter_mut().enumerate() {
        persona.id = Some(format!("single_var_{}", i));
        if let Some(big5) = persona.big5.as_mut() {
            big5.openness = Some(((i * 100) / last) as f64);
        }
    }
    personas
}

/// 27 personas covering every LOW/MED/HIGH combination of three traits,
/// with the remaining traits rotated through their bins.
pub fn perfect_population() -> Vec<PersonaRecord> {
    const BINS: [f64; 3] = [15.0, 50.0, 85.0];
    const PRIMARY: [&str; 5] = ["analytical", "intuitive", "dependent", "avoidant", "spontaneous"];
    const INFO: [&str; 3] = ["maximizer", "satisficer", "optimizer"];
    const HORIZON: [&str; 3] = ["short_term", "medium_term", "long_term"];
    const PVF: [f64; 3] = [-75.0, 0.0, 75.0];

    let mut personas = Vec::with_capacity(27);
    let mut idx = 0;
    for b1 in BINS {
        for b2 in BINS {
            for b3 in BINS {
                let rotated = BINS[idx % 3];
                let shifted = BINS[(idx + 1) % 3];
                let scores = CoreScores {
                    big5: [b1, b2, b3, rotated, shifted],
                    risk: [b1, b2, b3, rotated, shifted],
                    risk_seeking: b1,
                    discount_rate: b2,
                    present_vs_future: PVF[idx % 3],
                    promotion: b1,
                    prevention: b3,
                };
                personas.push(core_persona(
                    &format!("perfect_{}", idx),
                    scores,
                    PRIMARY[idx % 5],
                    INFO[idx % 3],
                    HORIZON[idx % 3],
                ));
                idx += 1;
            }
        }
    }
    personas
}

// ─────────────────────────────────────────────────────────────────
// Files
// ─────────────────────────────────────────────────────────────────

/// Write personas as a JSON array and return the file path.
pub fn write_personas(dir: &Path, name: &str, personas: &[PersonaRecord]) -> PathBuf {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(personas).unwrap();
    std::fs::write(&path, json).unwrap();
    path
}

/// Write arbitrary text to a file in `dir`.
pub fn write_text(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Compare two floats within an absolute tolerance.
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}
