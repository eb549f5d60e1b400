//! Typed persona records.
//!
//! A persona is an `id` plus up to fourteen optional trait groups. Every field
//! inside a group is optional as well: generators routinely omit parts of the
//! schema, and the extractor substitutes registry defaults for anything absent.
//! Unknown groups and fields are ignored on input.

use serde::{Deserialize, Deserializer, Serialize};

// ─────────────────────────────────────────────────────────────────
// Persona Record
// ─────────────────────────────────────────────────────────────────

/// One persona as produced by a generator pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaRecord {
    /// Persona identifier. Numeric ids are accepted and rendered as text.
    #[serde(deserialize_with = "text_or_number", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    // Required core groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub big5: Option<BigFive>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_profile: Option<RiskProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_style: Option<DecisionStyleField>,

    // Optional core groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_preference: Option<TimePreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulatory_focus: Option<RegulatoryFocus>,

    // Extended personality frameworks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hexaco: Option<Hexaco>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disc: Option<Disc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mbti: Option<Mbti>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enneagram: Option<Enneagram>,

    // Communication and social style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_style: Option<LanguageStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion_profile: Option<EmotionProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_profile: Option<SocialProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moral_foundations: Option<MoralFoundations>,

    // Behavioural indicators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavioral_indicators: Option<BehavioralIndicators>,
}

impl PersonaRecord {
    /// Identifier used in reports; `"unknown"` when the record has none.
    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or("unknown")
    }
}

// ─────────────────────────────────────────────────────────────────
// Core Decision Groups
// ─────────────────────────────────────────────────────────────────

/// Big Five personality scores (0-100).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BigFive {
    pub openness: Option<f64>,
    pub conscientiousness: Option<f64>,
    pub extraversion: Option<f64>,
    pub agreeableness: Option<f64>,
    pub neuroticism: Option<f64>,
}

/// Risk tolerance per domain (0-100).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskProfile {
    pub overall: Option<f64>,
    pub financial: Option<f64>,
    pub ethical: Option<f64>,
    pub social: Option<f64>,
    pub health: Option<f64>,
}

/// Decision style group.
///
/// Older generators wrote the primary style as a bare string. Such records
/// carry no risk-seeking or information-processing data at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecisionStyleField {
    Legacy(String),
    Structured(DecisionStyle),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionStyle {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub risk_seeking: Option<f64>,
    pub info_processing: Option<String>,
    pub social_preference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimePreference {
    pub discount_rate: Option<f64>,
    pub planning_horizon: Option<String>,
    /// Bipolar axis, -100 (present) to 100 (future).
    pub present_vs_future: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegulatoryFocus {
    pub promotion: Option<f64>,
    pub prevention: Option<f64>,
}

// ─────────────────────────────────────────────────────────────────
// Extended Personality Frameworks
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hexaco {
    pub honesty_humility: Option<f64>,
    pub emotionality: Option<f64>,
    pub extraversion: Option<f64>,
    pub agreeableness: Option<f64>,
    pub conscientiousness: Option<f64>,
    pub openness: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Disc {
    pub dominance: Option<f64>,
    pub influence: Option<f64>,
    pub steadiness: Option<f64>,
    pub conscientiousness: Option<f64>,
}

/// MBTI preference axes, each bipolar (-100 to 100).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mbti {
    #[serde(rename = "E_I")]
    pub e_i: Option<f64>,
    #[serde(rename = "S_N")]
    pub s_n: Option<f64>,
    #[serde(rename = "T_F")]
    pub t_f: Option<f64>,
    #[serde(rename = "J_P")]
    pub j_p: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enneagram {
    /// Primary type 1-9; numbers and strings are both accepted.
    #[serde(deserialize_with = "text_or_number")]
    pub primary_type: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub wing: Option<String>,
    pub instinct: Option<String>,
}

// ─────────────────────────────────────────────────────────────────
// Communication / Social Style
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageStyle {
    pub formality: Option<f64>,
    pub directness: Option<f64>,
    pub emotion_expression: Option<f64>,
    pub verbosity: Option<f64>,
    pub questioning_style: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionProfile {
    pub baseline_valence: Option<f64>,
    pub emotional_range: Option<f64>,
    pub stress_response: Option<String>,
    pub recovery_speed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialProfile {
    pub trust_default: Option<f64>,
    pub cooperation_tendency: Option<f64>,
    pub conformity: Option<f64>,
    pub independence: Option<f64>,
}

/// Moral foundations. Generators emit capitalised keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoralFoundations {
    #[serde(rename = "Care", alias = "care")]
    pub care: Option<f64>,
    #[serde(rename = "Fairness", alias = "fairness")]
    pub fairness: Option<f64>,
    #[serde(rename = "Loyalty", alias = "loyalty")]
    pub loyalty: Option<f64>,
    #[serde(rename = "Authority", alias = "authority")]
    pub authority: Option<f64>,
    #[serde(rename = "Sanctity", alias = "sanctity")]
    pub sanctity: Option<f64>,
}

// ─────────────────────────────────────────────────────────────────
// Behavioural Indicators
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehavioralIndicators {
    pub information_seeking: Option<f64>,
    pub comparison_behavior: Option<f64>,
    pub price_sensitivity: Option<f64>,
    pub brand_loyalty: Option<f64>,
}

/// Accept either a JSON string or a JSON number and keep it as text.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Integer(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    }))
}
