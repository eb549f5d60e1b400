//! Schema completeness checks.
//!
//! A persona is eligible for statistics only when the three required groups
//! are present. The completeness score counts every declared group.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::PersonaRecord;

/// How a schema group participates in the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupTier {
    Required,
    ExtendedCore,
    ExtendedPersonality,
    Style,
    Behavioral,
}

/// The fourteen declared persona groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaGroup {
    Big5,
    RiskProfile,
    DecisionStyle,
    TimePreference,
    RegulatoryFocus,
    Hexaco,
    Disc,
    Mbti,
    Enneagram,
    LanguageStyle,
    EmotionProfile,
    SocialProfile,
    MoralFoundations,
    BehavioralIndicators,
}

impl SchemaGroup {
    /// All groups in schema order.
    pub fn all() -> &'static [SchemaGroup] {
        use SchemaGroup::*;
        &[
            Big5,
            RiskProfile,
            DecisionStyle,
            TimePreference,
            RegulatoryFocus,
            Hexaco,
            Disc,
            Mbti,
            Enneagram,
            LanguageStyle,
            EmotionProfile,
            SocialProfile,
            MoralFoundations,
            BehavioralIndicators,
        ]
    }

    /// Field name of the group in persona JSON.
    pub fn field_name(&self) -> &'static str {
        match self {
            SchemaGroup::Big5 => "big5",
            SchemaGroup::RiskProfile => "risk_profile",
            SchemaGroup::DecisionStyle => "decision_style",
            SchemaGroup::TimePreference => "time_preference",
            SchemaGroup::RegulatoryFocus => "regulatory_focus",
            SchemaGroup::Hexaco => "hexaco",
            SchemaGroup::Disc => "disc",
            SchemaGroup::Mbti => "mbti",
            SchemaGroup::Enneagram => "enneagram",
            SchemaGroup::LanguageStyle => "language_style",
            SchemaGroup::EmotionProfile => "emotion_profile",
            SchemaGroup::SocialProfile => "social_profile",
            SchemaGroup::MoralFoundations => "moral_foundations",
            SchemaGroup::BehavioralIndicators => "behavioral_indicators",
        }
    }

    pub fn tier(&self) -> GroupTier {
        use SchemaGroup::*;
        match self {
            Big5 | RiskProfile | DecisionStyle => GroupTier::Required,
            TimePreference | RegulatoryFocus => GroupTier::ExtendedCore,
            Hexaco | Disc | Mbti | Enneagram => GroupTier::ExtendedPersonality,
            LanguageStyle | EmotionProfile | SocialProfile | MoralFoundations => GroupTier::Style,
            BehavioralIndicators => GroupTier::Behavioral,
        }
    }

    /// Whether the persona carries this group.
    pub fn is_present(&self, persona: &PersonaRecord) -> bool {
        match self {
            SchemaGroup::Big5 => persona.big5.is_some(),
            SchemaGroup::RiskProfile => persona.risk_profile.is_some(),
            SchemaGroup::DecisionStyle => persona.decision_style.is_some(),
            SchemaGroup::TimePreference => persona.time_preference.is_some(),
            SchemaGroup::RegulatoryFocus => persona.regulatory_focus.is_some(),
            SchemaGroup::Hexaco => persona.hexaco.is_some(),
            SchemaGroup::Disc => persona.disc.is_some(),
            SchemaGroup::Mbti => persona.mbti.is_some(),
            SchemaGroup::Enneagram => persona.enneagram.is_some(),
            SchemaGroup::LanguageStyle => persona.language_style.is_some(),
            SchemaGroup::EmotionProfile => persona.emotion_profile.is_some(),
            SchemaGroup::SocialProfile => persona.social_profile.is_some(),
            SchemaGroup::MoralFoundations => persona.moral_foundations.is_some(),
            SchemaGroup::BehavioralIndicators => persona.behavioral_indicators.is_some(),
        }
    }
}

impl fmt::Display for SchemaGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Presence report for one persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub id: String,
    pub has_basic: bool,
    pub has_extended_core: bool,
    pub has_extended_personality: bool,
    pub has_style: bool,
    pub has_behavioral: bool,
    pub missing_required: Vec<SchemaGroup>,
    pub present_optional: Vec<SchemaGroup>,
    /// Number of declared groups present
    pub present_count: usize,
    /// `present_count / 14`
    pub completeness_score: f64,
}

/// Inspect one persona against the declared schema groups.
pub fn check_completeness(persona: &PersonaRecord) -> CompletenessReport {
    let any_in_tier = |tier: GroupTier| {
        SchemaGroup::all()
            .iter()
            .any(|g| g.tier() == tier && g.is_present(persona))
    };

    let missing_required: Vec<SchemaGroup> = SchemaGroup::all()
        .iter()
        .copied()
        .filter(|g| g.tier() == GroupTier::Required && !g.is_present(persona))
        .collect();

    let present_optional: Vec<SchemaGroup> = SchemaGroup::all()
        .iter()
        .copied()
        .filter(|g| g.tier() != GroupTier::Required && g.is_present(persona))
        .collect();

    let present_count = SchemaGroup::all()
        .iter()
        .filter(|g| g.is_present(persona))
        .count();

    CompletenessReport {
        id: persona.display_id().to_string(),
        has_basic: missing_required.is_empty(),
        has_extended_core: any_in_tier(GroupTier::ExtendedCore),
        has_extended_personality: any_in_tier(GroupTier::ExtendedPersonality),
        has_style: any_in_tier(GroupTier::Style),
        has_behavioral: any_in_tier(GroupTier::Behavioral),
        missing_required,
        present_optional,
        present_count,
        completeness_score: present_count as f64 / SchemaGroup::all().len() as f64,
    }
}
